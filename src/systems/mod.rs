//! Game systems organized by domain.
//!
//! Stat resolution, leveling, difficulty and upgrades are plain structs
//! owned by the engine. The per-frame entity passes (`combat`, `firing`,
//! `movement`, `pickups`, `projectile`) are free functions over the world.

pub mod character;
pub mod combat;
pub mod difficulty;
pub mod experience;
pub mod firing;
pub mod items;
pub mod modifiers;
pub mod movement;
pub mod pickups;
pub mod player;
pub mod projectile;
pub mod spawn_controller;
pub mod upgrades;
pub mod weapons;

// Re-export commonly used items
pub use character::{CharacterKind, CharacterSystem};
pub use combat::{remove_dead_enemies, resolve_projectile_hits, separate_enemies, CombatConfig};
pub use difficulty::{DifficultyConfig, DifficultyPreset, DifficultySystem};
pub use experience::{LevelSystem, XpCurve};
pub use firing::update_weapons;
pub use items::{ItemDef, ItemKind, ItemSystem};
pub use modifiers::ModifierSystem;
pub use movement::update_enemy_movement;
pub use pickups::update_xp_orbs;
pub use player::PlayerVitals;
pub use projectile::{despawn_projectiles, update_projectiles};
pub use spawn_controller::{SpawnConfig, SpawnController, SpawnRequest};
pub use upgrades::{UpgradeCard, UpgradeOutcome, UpgradeSystem, UpgradeTargets};
pub use weapons::{Weapon, WeaponId, WeaponKind, WeaponSystem};
