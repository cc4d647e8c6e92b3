//! Time-driven difficulty scaling.
//!
//! Multipliers compound exponentially per minute survived and are cached.
//! They are recomputed only when game time crosses a multiple of the
//! recompute interval, using that boundary time, so the result depends on
//! total elapsed time and not on how the frames were sliced.

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Named difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn modifier(self) -> f32 {
        match self {
            DifficultyPreset::Easy => DIFFICULTY_EASY,
            DifficultyPreset::Normal => DIFFICULTY_NORMAL,
            DifficultyPreset::Hard => DIFFICULTY_HARD,
        }
    }
}

/// Tuning for the difficulty curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DifficultyConfig {
    pub preset: DifficultyPreset,
    pub base_health_multiplier: f32,
    pub base_speed_multiplier: f32,
    pub health_growth_rate: f32,
    pub speed_growth_rate: f32,
    pub spawn_rate_growth_rate: f32,
    pub spawn_quantity_growth_rate: f32,
    /// Seconds between multiplier recomputes
    pub recalc_interval: f32,
    pub base_elite_chance: f32,
    pub elite_chance_growth_per_minute: f32,
    pub max_elite_chance: f32,
    pub boss_interval: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            preset: DifficultyPreset::Normal,
            base_health_multiplier: BASE_HEALTH_MULTIPLIER,
            base_speed_multiplier: BASE_SPEED_MULTIPLIER,
            health_growth_rate: HEALTH_GROWTH_RATE,
            speed_growth_rate: SPEED_GROWTH_RATE,
            spawn_rate_growth_rate: SPAWN_RATE_GROWTH_RATE,
            spawn_quantity_growth_rate: SPAWN_QUANTITY_GROWTH_RATE,
            recalc_interval: DIFFICULTY_RECALC_INTERVAL,
            base_elite_chance: BASE_ELITE_CHANCE,
            elite_chance_growth_per_minute: ELITE_CHANCE_GROWTH_PER_MINUTE,
            max_elite_chance: MAX_ELITE_CHANCE,
            boss_interval: BOSS_INTERVAL,
        }
    }
}

/// Debug snapshot of the difficulty state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyStats {
    pub minutes_survived: f32,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
    pub spawn_rate_multiplier: f32,
    pub spawn_quantity_multiplier: f32,
    pub spawn_quantity: u32,
    pub xp_multiplier: f32,
    pub elite_chance: f32,
    pub time_until_next_boss: f32,
    pub difficulty_modifier: f32,
}

#[derive(Debug, Clone)]
pub struct DifficultySystem {
    config: DifficultyConfig,
    difficulty_modifier: f32,
    current_time: f32,
    /// Boundary time the cached multipliers were computed for
    recalc_time: f32,
    next_recalc_time: f32,
    health_multiplier: f32,
    speed_multiplier: f32,
    spawn_rate_multiplier: f32,
    spawn_quantity_multiplier: f32,
    xp_multiplier: f32,
    next_boss_time: f32,
    first_boss_spawned: bool,
}

impl DifficultySystem {
    pub fn new(config: DifficultyConfig) -> Self {
        let mut system = Self {
            config,
            difficulty_modifier: config.preset.modifier(),
            current_time: 0.0,
            recalc_time: 0.0,
            next_recalc_time: config.recalc_interval,
            health_multiplier: 1.0,
            speed_multiplier: 1.0,
            spawn_rate_multiplier: 1.0,
            spawn_quantity_multiplier: 1.0,
            xp_multiplier: 1.0,
            next_boss_time: config.boss_interval,
            first_boss_spawned: false,
        };
        system.recalculate();
        system
    }

    /// Advance game time and recompute if a boundary was crossed
    pub fn update(&mut self, dt: f32) {
        self.current_time += dt;
        if self.current_time < self.next_recalc_time {
            return;
        }
        let interval = self.config.recalc_interval;
        let boundaries = (self.current_time / interval).floor();
        self.recalc_time = boundaries * interval;
        self.next_recalc_time = self.recalc_time + interval;
        self.recalculate();
        log::info!(
            "Difficulty update ({:.1} min): health x{:.2}, speed x{:.2}, spawn rate x{:.2}, quantity {}",
            self.recalc_time / 60.0,
            self.health_multiplier,
            self.speed_multiplier,
            self.spawn_rate_multiplier,
            self.spawn_quantity()
        );
    }

    fn recalculate(&mut self) {
        let minutes = self.recalc_time / 60.0;
        let c = &self.config;
        let m = self.difficulty_modifier;
        self.health_multiplier =
            c.base_health_multiplier * (1.0 + c.health_growth_rate).powf(minutes) * m;
        self.speed_multiplier =
            c.base_speed_multiplier * (1.0 + c.speed_growth_rate).powf(minutes) * m;
        self.xp_multiplier = self.health_multiplier;
        self.spawn_rate_multiplier = (1.0 + c.spawn_rate_growth_rate).powf(minutes) * m;
        self.spawn_quantity_multiplier = (1.0 + c.spawn_quantity_growth_rate).powf(minutes) * m;
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn minutes_survived(&self) -> f32 {
        self.current_time / 60.0
    }

    pub fn health_multiplier(&self) -> f32 {
        self.health_multiplier
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn spawn_rate_multiplier(&self) -> f32 {
        self.spawn_rate_multiplier
    }

    pub fn spawn_quantity_multiplier(&self) -> f32 {
        self.spawn_quantity_multiplier
    }

    pub fn xp_multiplier(&self) -> f32 {
        self.xp_multiplier
    }

    /// Enemies per spawn event, at least one
    pub fn spawn_quantity(&self) -> u32 {
        self.spawn_quantity_multiplier.round().max(1.0) as u32
    }

    /// Zero until the first boss, then grows per minute up to the cap
    pub fn elite_chance(&self) -> f32 {
        if !self.first_boss_spawned {
            return 0.0;
        }
        let c = &self.config;
        (c.base_elite_chance + self.minutes_survived() * c.elite_chance_growth_per_minute)
            .min(c.max_elite_chance)
    }

    pub fn first_boss_spawned(&self) -> bool {
        self.first_boss_spawned
    }

    /// Pull-based boss gate. Firing advances the schedule, so call it once
    /// per frame at most.
    pub fn should_spawn_boss(&mut self) -> bool {
        if self.current_time >= self.next_boss_time {
            self.next_boss_time += self.config.boss_interval;
            self.first_boss_spawned = true;
            return true;
        }
        false
    }

    pub fn time_until_next_boss(&self) -> f32 {
        (self.next_boss_time - self.current_time).max(0.0)
    }

    pub fn difficulty_modifier(&self) -> f32 {
        self.difficulty_modifier
    }

    /// Change the modifier and recompute immediately
    pub fn set_difficulty_modifier(&mut self, modifier: f32) {
        self.difficulty_modifier = modifier;
        self.recalculate();
        log::info!("Difficulty modifier set to {}", modifier);
    }

    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.recalc_time = 0.0;
        self.next_recalc_time = self.config.recalc_interval;
        self.next_boss_time = self.config.boss_interval;
        self.first_boss_spawned = false;
        self.recalculate();
    }

    pub fn stats(&self) -> DifficultyStats {
        DifficultyStats {
            minutes_survived: self.minutes_survived(),
            health_multiplier: self.health_multiplier,
            speed_multiplier: self.speed_multiplier,
            spawn_rate_multiplier: self.spawn_rate_multiplier,
            spawn_quantity_multiplier: self.spawn_quantity_multiplier,
            spawn_quantity: self.spawn_quantity(),
            xp_multiplier: self.xp_multiplier,
            elite_chance: self.elite_chance(),
            time_until_next_boss: self.time_until_next_boss(),
            difficulty_modifier: self.difficulty_modifier,
        }
    }
}

impl Default for DifficultySystem {
    fn default() -> Self {
        Self::new(DifficultyConfig::default())
    }
}
