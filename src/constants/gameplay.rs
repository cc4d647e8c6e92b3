//! Core gameplay constants (player, XP, slots).

/// Base XP for reaching level 2 on the default curve
pub const XP_CURVE_BASE: f64 = 50.0;
/// Exponent of the default XP curve
pub const XP_CURVE_EXPONENT: f64 = 1.75;

/// Orbs inside pickup range are pulled toward the player at this speed (px/s)
pub const XP_ORB_PULL_SPEED: f32 = 400.0;
/// Orbs this close to the player are collected (px)
pub const XP_ORB_COLLECTION_RADIUS: f32 = 15.0;

/// Equip slot limits
pub const MAX_WEAPON_SLOTS: usize = 3;
pub const MAX_ITEM_SLOTS: usize = 3;
