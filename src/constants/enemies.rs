//! Enemy archetype constants.

/// Health of a normal enemy before any scaling
pub const ENEMY_BASE_HP: f32 = 30.0;
/// Chase speed of a normal enemy before any scaling (px/s)
pub const ENEMY_BASE_SPEED: f32 = 100.0;
/// XP dropped by a normal enemy before any scaling
pub const ENEMY_BASE_XP: f32 = 10.0;

/// Edge length of the skeleton sprites (px, square textures)
pub const ENEMY_SPRITE_DIMENSION: f32 = 640.0;
/// Hitbox is slightly smaller than the visual for gameplay feel
pub const ENEMY_COLLISION_MULTIPLIER: f32 = 0.8;
/// Melee reach relative to the hitbox
pub const ENEMY_ATTACK_RADIUS_MULTIPLIER: f32 = 1.1;

// NORMAL
pub const NORMAL_SPRITE_SCALE: f32 = 0.05;
pub const NORMAL_HEALTH_MULTIPLIER: f32 = 1.0;
pub const NORMAL_SPEED_MULTIPLIER: f32 = 1.0;
pub const NORMAL_XP_MULTIPLIER: f32 = 1.0;
pub const NORMAL_KNOCKBACK_RESISTANCE: f32 = 0.0;

// ELITE
/// 1.3x the normal sprite
pub const ELITE_SPRITE_SCALE: f32 = 0.065;
pub const ELITE_HEALTH_MULTIPLIER: f32 = 3.0;
pub const ELITE_SPEED_MULTIPLIER: f32 = 1.2;
pub const ELITE_XP_MULTIPLIER: f32 = 3.0;
/// Applied on top of health, speed and XP
pub const ELITE_BONUS_MULTIPLIER: f32 = 1.2;
pub const ELITE_KNOCKBACK_RESISTANCE: f32 = 0.5;

// BOSS
/// 2x the normal sprite
pub const BOSS_SPRITE_SCALE: f32 = 0.1;
pub const BOSS_HEALTH_MULTIPLIER: f32 = 10.0;
pub const BOSS_SPEED_MULTIPLIER: f32 = 0.8;
pub const BOSS_XP_MULTIPLIER: f32 = 10.0;
/// Applied on top of health, speed and XP
pub const BOSS_BONUS_MULTIPLIER: f32 = 1.5;
/// Bosses cannot be knocked back
pub const BOSS_KNOCKBACK_RESISTANCE: f32 = 1.0;
