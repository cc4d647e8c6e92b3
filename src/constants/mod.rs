//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod combat;
mod difficulty;
mod enemies;
mod gameplay;
mod spawning;
mod upgrades;

pub use combat::*;
pub use difficulty::*;
pub use enemies::*;
pub use gameplay::*;
pub use spawning::*;
pub use upgrades::*;
