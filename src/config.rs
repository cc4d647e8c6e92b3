//! Run configuration, loaded from JSON by the front end.
//!
//! Every field has a default, so `{}` is a valid config. Unknown stat, item
//! and weapon names are rejected by serde since those are closed enums.

use crate::systems::character::CharacterKind;
use crate::systems::combat::CombatConfig;
use crate::systems::difficulty::DifficultyConfig;
use crate::systems::experience::XpCurve;
use crate::systems::items::ItemDef;
use crate::systems::spawn_controller::SpawnConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Fixed RNG seed; None seeds from entropy
    pub seed: Option<u64>,
    pub character: CharacterKind,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    pub xp_curve: XpCurve,
    pub combat: CombatConfig,
    /// Replaces the built-in item catalog
    pub items: Option<Vec<ItemDef>>,
}

impl GameConfig {
    /// Parse and validate
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.xp_curve.is_strictly_increasing() {
            return Err(invalid("xpCurve must cost strictly more XP every level"));
        }

        let d = &self.difficulty;
        if d.recalc_interval <= 0.0 {
            return Err(invalid("difficulty.recalcInterval must be positive"));
        }
        if d.boss_interval <= 0.0 {
            return Err(invalid("difficulty.bossInterval must be positive"));
        }
        if !(0.0..=1.0).contains(&d.max_elite_chance) || !(0.0..=1.0).contains(&d.base_elite_chance) {
            return Err(invalid("difficulty elite chances must be within [0, 1]"));
        }

        let s = &self.spawn;
        if s.base_spawn_interval <= 0.0 {
            return Err(invalid("spawn.baseSpawnInterval must be positive"));
        }
        if s.spawn_distance < 0.0 || s.spawn_safety_margin < 0.0 {
            return Err(invalid("spawn ring distances must not be negative"));
        }

        let c = &self.combat;
        if !(c.knockback_decay_per_second > 0.0 && c.knockback_decay_per_second <= 1.0) {
            return Err(invalid("combat.knockbackDecayPerSecond must be within (0, 1]"));
        }

        if let Some(items) = &self.items {
            if items.is_empty() {
                return Err(invalid("items must not be empty when given"));
            }
            let mut seen = HashSet::new();
            for item in items {
                if !seen.insert(item.kind) {
                    return Err(invalid(format!("item {:?} is listed twice", item.kind)));
                }
                if !item.base_effect.stat.supports(item.base_effect.kind)
                    || !item.upgrade_scaling.stat.supports(item.upgrade_scaling.kind)
                {
                    return Err(invalid(format!("item {} uses an unsupported modifier", item.name)));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
