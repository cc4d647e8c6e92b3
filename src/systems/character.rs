//! Playable characters and their per-level stat growth.

use crate::stats::{CharacterStats, ModifierKind, Stat};
use crate::systems::modifiers::ModifierSystem;
use crate::systems::weapons::WeaponKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterKind {
    #[default]
    Knight,
    Ranger,
}

/// Global combat bonuses that live outside the per-stat accumulators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalBonus {
    CritChance,
    DamageMultiplier,
}

/// Growth of one stat per level, applied as a cumulative multiplicative modifier.
#[derive(Debug, Clone, Copy)]
pub struct StatGrowth {
    pub stat: Stat,
    pub per_level: f32,
    /// Upper bound on the cumulative growth
    pub cap: Option<f32>,
}

impl StatGrowth {
    /// Cumulative growth after `growth_levels` level-ups, clamped to the cap.
    fn total(&self, growth_levels: u32) -> f32 {
        let total = self.per_level * growth_levels as f32;
        match self.cap {
            Some(cap) => total.min(cap),
            None => total,
        }
    }
}

/// Complete definition of a playable character
#[derive(Debug, Clone)]
pub struct CharacterDef {
    pub kind: CharacterKind,
    pub name: &'static str,
    pub starting_weapon: WeaponKind,
    pub base_stats: CharacterStats,
    pub per_level_growth: Vec<StatGrowth>,
    /// Cumulative bonuses at a level for effects that are not plain stat growth
    pub custom_growth: Option<fn(u32) -> Vec<(GlobalBonus, f32)>>,
}

/// Get the definition for a character
pub fn character_def(kind: CharacterKind) -> CharacterDef {
    match kind {
        CharacterKind::Knight => CharacterDef {
            kind,
            name: "Knight",
            starting_weapon: WeaponKind::Sword,
            base_stats: CharacterStats {
                max_hp: 100.0,
                armor: 0.0,
                damage_reduction: 0.0,
                move_speed: 1.0,
                pickup_range: 80.0,
                xp_gain: 1.0,
                luck: 0.0,
            },
            per_level_growth: vec![
                StatGrowth { stat: Stat::MaxHp, per_level: 0.01, cap: None },
                StatGrowth { stat: Stat::DamageReduction, per_level: 0.01, cap: Some(0.50) },
            ],
            custom_growth: None,
        },
        CharacterKind::Ranger => CharacterDef {
            kind,
            name: "Ranger",
            starting_weapon: WeaponKind::Longbow,
            base_stats: CharacterStats {
                max_hp: 50.0,
                armor: 0.0,
                damage_reduction: 0.0,
                move_speed: 1.5,
                pickup_range: 120.0,
                xp_gain: 1.0,
                luck: 5.0,
            },
            per_level_growth: Vec::new(),
            custom_growth: Some(ranger_growth),
        },
    }
}

/// +1% crit per level for the first 50 level-ups, +1% global damage per level forever
fn ranger_growth(level: u32) -> Vec<(GlobalBonus, f32)> {
    let effective_levels = level.saturating_sub(1);
    let crit_levels = effective_levels.min(50);
    vec![
        (GlobalBonus::CritChance, crit_levels as f32 * 0.01),
        (GlobalBonus::DamageMultiplier, effective_levels as f32 * 0.01),
    ]
}

/// The selected character and the level whose growth is currently applied.
#[derive(Debug, Clone)]
pub struct CharacterSystem {
    def: CharacterDef,
    applied_level: u32,
}

impl CharacterSystem {
    pub fn new(kind: CharacterKind) -> Self {
        Self {
            def: character_def(kind),
            applied_level: 1,
        }
    }

    pub fn def(&self) -> &CharacterDef {
        &self.def
    }

    pub fn kind(&self) -> CharacterKind {
        self.def.kind
    }

    pub fn base_stats(&self) -> CharacterStats {
        self.def.base_stats
    }

    pub fn starting_weapon(&self) -> WeaponKind {
        self.def.starting_weapon
    }

    pub fn applied_level(&self) -> u32 {
        self.applied_level
    }

    /// Base stats resolved through the modifier system
    pub fn final_stats(&self, modifiers: &ModifierSystem) -> CharacterStats {
        self.def
            .base_stats
            .map(|stat, base| modifiers.final_stat(stat, base))
    }

    /// Final value of one character stat
    pub fn final_stat(&self, stat: Stat, modifiers: &ModifierSystem) -> f32 {
        modifiers.final_stat(stat, self.def.base_stats.get(stat))
    }

    /// Swap the growth applied for the previous level with the growth for `level`.
    ///
    /// Growth is cumulative, so the old total is removed before the new total is
    /// added. Caps are applied to both totals the same way so removal leaves no residue.
    /// Calling this twice with the same level is a no-op the second time.
    pub fn apply_level_growth(&mut self, level: u32, modifiers: &mut ModifierSystem) {
        let previous_level = self.applied_level;
        let prev_growth_levels = previous_level.saturating_sub(1);
        let new_growth_levels = level.saturating_sub(1);

        for growth in &self.def.per_level_growth {
            let previous_total = growth.total(prev_growth_levels);
            if previous_total != 0.0 {
                modifiers.remove_modifier(growth.stat, ModifierKind::Mult, previous_total);
            }
        }
        for growth in &self.def.per_level_growth {
            let total = growth.total(new_growth_levels);
            if total != 0.0 {
                modifiers.add_modifier(growth.stat, ModifierKind::Mult, total);
            }
        }

        if let Some(custom) = self.def.custom_growth {
            apply_custom_growth(&custom(previous_level), modifiers, -1.0);
            apply_custom_growth(&custom(level), modifiers, 1.0);
        }

        self.applied_level = level;
        log::debug!("{} growth applied for level {}", self.def.name, level);
    }

    /// Forget applied growth (the modifier system is reset separately)
    pub fn reset(&mut self) {
        self.applied_level = 1;
    }
}

fn apply_custom_growth(growth: &[(GlobalBonus, f32)], modifiers: &mut ModifierSystem, sign: f32) {
    for &(bonus, value) in growth {
        if value == 0.0 {
            continue;
        }
        match bonus {
            GlobalBonus::CritChance => modifiers.add_global_crit_chance_bonus(sign * value),
            GlobalBonus::DamageMultiplier => modifiers.add_global_damage_multiplier(sign * value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_knight_damage_reduction_caps_at_half() {
        let mut mods = ModifierSystem::new();
        let mut knight = CharacterSystem::new(CharacterKind::Knight);
        knight.apply_level_growth(60, &mut mods);
        assert_eq!(mods.multiplicative(Stat::DamageReduction), 0.50);
        assert!((mods.multiplicative(Stat::MaxHp) - 0.59).abs() < EPS);
    }

    #[test]
    fn test_knight_stepwise_growth_matches_direct() {
        let mut stepped = ModifierSystem::new();
        let mut knight = CharacterSystem::new(CharacterKind::Knight);
        for level in 2..=60 {
            knight.apply_level_growth(level, &mut stepped);
        }
        assert!((stepped.multiplicative(Stat::DamageReduction) - 0.50).abs() < EPS);
        assert!((stepped.multiplicative(Stat::MaxHp) - 0.59).abs() < EPS);
    }

    #[test]
    fn test_repeat_growth_is_idempotent() {
        let mut once = ModifierSystem::new();
        let mut a = CharacterSystem::new(CharacterKind::Knight);
        a.apply_level_growth(5, &mut once);

        let mut twice = ModifierSystem::new();
        let mut b = CharacterSystem::new(CharacterKind::Knight);
        b.apply_level_growth(5, &mut twice);
        b.apply_level_growth(5, &mut twice);

        for stat in Stat::ALL {
            assert!((once.multiplicative(stat) - twice.multiplicative(stat)).abs() < EPS);
        }
    }

    #[test]
    fn test_growth_keeps_other_sources_intact() {
        let mut mods = ModifierSystem::new();
        mods.add_modifier(Stat::MaxHp, ModifierKind::Mult, 0.10);
        let mut knight = CharacterSystem::new(CharacterKind::Knight);
        knight.apply_level_growth(3, &mut mods);
        knight.apply_level_growth(4, &mut mods);
        assert!((mods.multiplicative(Stat::MaxHp) - 0.13).abs() < EPS);
    }

    #[test]
    fn test_ranger_custom_growth() {
        let mut mods = ModifierSystem::new();
        let mut ranger = CharacterSystem::new(CharacterKind::Ranger);
        ranger.apply_level_growth(11, &mut mods);
        assert!((mods.global_crit_chance_bonus() - 0.10).abs() < EPS);
        assert!((mods.global_damage_multiplier() - 0.10).abs() < EPS);

        ranger.apply_level_growth(71, &mut mods);
        assert!((mods.global_crit_chance_bonus() - 0.50).abs() < EPS);
        assert!((mods.global_damage_multiplier() - 0.70).abs() < EPS);
    }

    #[test]
    fn test_final_stats_use_modifiers() {
        let mut mods = ModifierSystem::new();
        let mut knight = CharacterSystem::new(CharacterKind::Knight);
        knight.apply_level_growth(11, &mut mods);
        let stats = knight.final_stats(&mods);
        assert!((stats.max_hp - 110.0).abs() < EPS);
        assert_eq!(stats.pickup_range, 80.0);
    }
}
