//! Difficulty scaling constants.

/// Health multiplier at minute zero
pub const BASE_HEALTH_MULTIPLIER: f32 = 1.0;
/// Speed multiplier at minute zero
pub const BASE_SPEED_MULTIPLIER: f32 = 1.0;
/// Compound health growth per minute survived (4%)
pub const HEALTH_GROWTH_RATE: f32 = 0.04;
/// Compound speed growth per minute survived (2%)
pub const SPEED_GROWTH_RATE: f32 = 0.02;
/// Compound spawn rate growth per minute survived (6%)
pub const SPAWN_RATE_GROWTH_RATE: f32 = 0.06;
/// Compound spawn quantity growth per minute survived (20%, steep for 15 minute runs)
pub const SPAWN_QUANTITY_GROWTH_RATE: f32 = 0.20;

/// Game seconds between multiplier recalculations
pub const DIFFICULTY_RECALC_INTERVAL: f32 = 35.0;

/// Elite chance right after the first boss
pub const BASE_ELITE_CHANCE: f32 = 0.02;
/// Elite chance added per minute survived
pub const ELITE_CHANCE_GROWTH_PER_MINUTE: f32 = 0.01;
/// Hard cap on elite chance
pub const MAX_ELITE_CHANCE: f32 = 0.15;

/// Seconds between boss spawns (first boss at this time too)
pub const BOSS_INTERVAL: f32 = 120.0;

/// Difficulty preset multipliers
pub const DIFFICULTY_EASY: f32 = 0.7;
pub const DIFFICULTY_NORMAL: f32 = 1.0;
pub const DIFFICULTY_HARD: f32 = 1.3;
