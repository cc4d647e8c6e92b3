//! Simulation core of a top-down survival game.
//!
//! The front end owns rendering, input and the player's position; it calls
//! [`GameEngine::tick`] once per frame and draws what comes back.

pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod events;
pub mod spawning;
pub mod stats;
pub mod systems;

pub use config::{ConfigError, GameConfig};
pub use engine::{DebugSnapshot, GameEngine, TickResult};
pub use events::GameEvent;
