//! Spawn controller constants.

/// Seconds between spawn events at difficulty 1.0
pub const BASE_SPAWN_INTERVAL: f32 = 1.0;
/// Maximum live enemies before spawning stops
pub const MAX_ENEMIES: usize = 1000;
/// Inner radius of the spawn ring (just outside the camera)
pub const SPAWN_DISTANCE: f32 = 750.0;
/// Extra random distance on top of SPAWN_DISTANCE to keep spawns off-screen
pub const SPAWN_SAFETY_MARGIN: f32 = 250.0;
/// Bosses spawn this much farther out than regular enemies
pub const BOSS_SPAWN_DISTANCE_MULTIPLIER: f32 = 1.5;
