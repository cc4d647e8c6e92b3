//! Game event system for decoupled communication between systems.
//!
//! Systems push events during `tick`; the front end drains them to spawn
//! damage numbers, sprites, sounds and the level-up popup.

use crate::components::EnemyType;
use crate::systems::upgrades::UpgradeOutcome;
use crate::systems::weapons::WeaponId;
use glam::Vec2;
use hecs::Entity;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An enemy (of any type) entered the world
    EnemySpawned {
        entity: Entity,
        position: Vec2,
        enemy_type: EnemyType,
    },
    /// A weapon launched a projectile
    ProjectileFired {
        projectile: Entity,
        weapon: WeaponId,
        position: Vec2,
        angle: f32,
    },
    /// A projectile damaged an enemy
    DamageDealt {
        target: Entity,
        position: Vec2,
        amount: f32,
        is_crit: bool,
    },
    /// An enemy died
    EnemyDied {
        entity: Entity,
        position: Vec2,
        enemy_type: EnemyType,
        xp_reward: u32,
    },
    /// The active boss died and normal spawning resumes
    BossDefeated {
        entity: Entity,
    },
    XpOrbSpawned {
        orb: Entity,
        position: Vec2,
        value: u32,
    },
    /// Player picked up an orb (amount after the xpGain stat)
    XpCollected {
        amount: u64,
    },
    /// Player leveled up
    LevelUp {
        new_level: u32,
    },
    PlayerDamaged {
        amount: f32,
        remaining: f32,
    },
    PlayerDied,
    UpgradeApplied(UpgradeOutcome),
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
