//! Combat resolution constants.

/// Projectile hitbox as a fraction of its sprite
pub const PROJECTILE_COLLISION_MULTIPLIER: f32 = 0.9;
/// Projectile lifetime per point of range (seconds)
pub const PROJECTILE_LIFETIME_PER_RANGE: f32 = 1.5;

/// Knockback stat to impulse velocity (px/s per point)
pub const KNOCKBACK_FORCE: f32 = 200.0;
/// Fraction of knockback velocity left after one second
pub const KNOCKBACK_DECAY_PER_SECOND: f32 = 0.0001;
/// Knockback velocity below this is snapped to zero (px/s)
pub const KNOCKBACK_MIN_VELOCITY: f32 = 1.0;
/// Seconds before the same weapon can knock the same enemy back again
pub const KNOCKBACK_COOLDOWN: f32 = 0.5;

/// Damage an enemy deals on contact
pub const ENEMY_CONTACT_DAMAGE: f32 = 10.0;
/// Player invulnerability after being hit (seconds)
pub const PLAYER_INVULNERABILITY_DURATION: f32 = 1.0;

/// Seconds between shots of a multi-projectile volley
pub const VOLLEY_SHOT_INTERVAL: f32 = 0.08;
/// Absolute floor on any weapon cooldown (seconds)
pub const MIN_ATTACK_COOLDOWN: f32 = 0.1;
/// Damage reduction never exceeds this fraction
pub const MAX_DAMAGE_REDUCTION: f32 = 0.5;
