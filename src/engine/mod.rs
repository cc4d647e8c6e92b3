//! Game engine - owns all game state and provides a clean API to the front end.
//!
//! The engine handles:
//! - Frame simulation in a fixed subsystem order
//! - The level-up queue and upgrade card choices
//! - Pausing while a choice is pending, and game over
//!
//! The front end only handles:
//! - Feeding frame time and the player position
//! - Rendering spawn requests and events
//! - Forwarding the chosen card index

mod game_state;
mod simulation;

pub use game_state::GameState;
pub use simulation::{simulate_frame, FrameOutcome};

use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::stats::{CharacterStats, Stat};
use crate::systems::difficulty::{DifficultyPreset, DifficultyStats};
use crate::systems::experience::LevelStats;
use crate::systems::items::OwnedItem;
use crate::systems::modifiers::ModifierSnapshot;
use crate::systems::player::PlayerVitals;
use crate::systems::projectile;
use crate::systems::spawn_controller::{SpawnRequest, SpawnStats};
use crate::systems::upgrades::{UpgradeCard, UpgradeOutcome, UpgradeTargets};
use crate::systems::weapons::{WeaponId, WeaponKind, WeaponStats};

use glam::Vec2;
use serde::Serialize;
use std::collections::VecDeque;

/// Result of a game tick - everything the front end needs this frame
#[derive(Debug, Default)]
pub struct TickResult {
    /// Enemies to create sprites for
    pub spawn_requests: Vec<SpawnRequest>,
    pub events: Vec<GameEvent>,
}

/// Per-weapon line of the debug overlay
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSummary {
    pub id: WeaponId,
    pub kind: WeaponKind,
    pub level: u32,
    pub stats: WeaponStats,
}

/// Read-only aggregate for debug overlays
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSnapshot {
    pub difficulty: DifficultyStats,
    pub spawn: SpawnStats,
    pub level: LevelStats,
    pub modifiers: ModifierSnapshot,
    pub final_stats: CharacterStats,
    pub player: PlayerVitals,
    pub weapons: Vec<WeaponSummary>,
    pub items: Vec<OwnedItem>,
    pub paused: bool,
    pub game_over: bool,
    pub pending_level_ups: usize,
}

/// The game engine - owns all game state and simulation logic.
pub struct GameEngine {
    config: GameConfig,

    /// Core game state (world, systems, rng)
    pub state: GameState,

    /// Events produced since the last tick returned
    events: EventQueue,

    /// Set while an upgrade choice is on screen
    paused: bool,

    game_over: bool,

    /// Levels whose card choice has not been shown yet
    pending_level_ups: VecDeque<u32>,

    /// Cards of the choice currently on screen
    current_cards: Vec<UpgradeCard>,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            events: EventQueue::new(),
            paused: false,
            game_over: false,
            pending_level_ups: VecDeque::new(),
            current_cards: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance the simulation one frame. Does nothing while paused for an
    /// upgrade choice or after the player died.
    pub fn tick(&mut self, dt: f32, player_pos: Vec2) -> TickResult {
        puffin::profile_function!();

        if self.paused || self.game_over {
            return TickResult {
                spawn_requests: Vec::new(),
                events: self.events.drain().collect(),
            };
        }

        let outcome = simulate_frame(&mut self.state, dt.max(0.0), player_pos, &mut self.events);

        if outcome.player_died {
            self.game_over = true;
            projectile::despawn_projectiles(&mut self.state.world);
            log::info!(
                "Game over at level {} after {:.1} min",
                self.state.levels.level(),
                self.state.difficulty.minutes_survived()
            );
        } else if !outcome.level_ups.is_empty() {
            self.pending_level_ups.extend(outcome.level_ups);
            if self.current_cards.is_empty() {
                self.present_next_level_up();
            }
        }

        TickResult {
            spawn_requests: outcome.spawn_requests,
            events: self.events.drain().collect(),
        }
    }

    /// Roll cards for the next queued level-up and pause, or unpause if the
    /// queue is empty
    fn present_next_level_up(&mut self) {
        while let Some(level) = self.pending_level_ups.pop_front() {
            let luck = self.state.final_stat(Stat::Luck);
            let state = &mut self.state;
            let cards = state
                .upgrades
                .generate_upgrade_cards(&state.weapons, &state.items, luck, &mut state.rng);
            if cards.is_empty() {
                log::warn!("No upgrade cards available for level {}", level);
                continue;
            }
            log::debug!("Showing {} cards for level {}", cards.len(), level);
            self.current_cards = cards;
            self.paused = true;
            return;
        }
        self.current_cards.clear();
        self.paused = false;
    }

    /// Apply the card at `index` of the current choice and move on to the
    /// next queued level-up. None if no choice is pending or the index is out
    /// of range; a card whose target vanished is consumed without effect.
    pub fn select_upgrade(&mut self, index: usize) -> Option<UpgradeOutcome> {
        if self.current_cards.is_empty() {
            log::warn!("select_upgrade called with no pending choice");
            return None;
        }
        let Some(card) = self.current_cards.get(index).cloned() else {
            log::warn!(
                "Upgrade index {} out of range ({} cards)",
                index,
                self.current_cards.len()
            );
            return None;
        };

        let state = &mut self.state;
        let mut targets = UpgradeTargets {
            weapons: &mut state.weapons,
            items: &mut state.items,
            modifiers: &mut state.modifiers,
        };
        let outcome = state.upgrades.apply_upgrade(&card, &mut targets);
        state.sync_player_max_hp();
        if let Some(outcome) = outcome {
            self.events.push(GameEvent::UpgradeApplied(outcome));
        }

        self.current_cards.clear();
        self.present_next_level_up();
        outcome
    }

    /// Cards currently offered (empty when no choice is pending)
    pub fn current_cards(&self) -> &[UpgradeCard] {
        &self.current_cards
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Queued level-ups, not counting the one on screen
    pub fn pending_level_ups(&self) -> usize {
        self.pending_level_ups.len()
    }

    pub fn final_stat(&self, stat: Stat) -> f32 {
        self.state.final_stat(stat)
    }

    pub fn player(&self) -> &PlayerVitals {
        &self.state.player
    }

    pub fn set_difficulty(&mut self, preset: DifficultyPreset) {
        self.state.difficulty.set_difficulty_modifier(preset.modifier());
    }

    pub fn toggle_upgrade_testing_mode(&mut self) -> bool {
        self.state.upgrades.toggle_testing_mode()
    }

    /// Spawn a boss right away unless one is alive
    pub fn debug_spawn_boss(&mut self, player_pos: Vec2) -> Option<SpawnRequest> {
        let state = &mut self.state;
        let request = state.spawner.debug_spawn_boss(
            player_pos,
            &state.difficulty,
            &mut state.world,
            &mut state.rng,
        )?;
        self.events.push(GameEvent::EnemySpawned {
            entity: request.entity,
            position: request.position,
            enemy_type: request.enemy_type,
        });
        Some(request)
    }

    /// Start a fresh run with the same config
    pub fn reset(&mut self) {
        self.state.reset();
        self.events = EventQueue::new();
        self.paused = false;
        self.game_over = false;
        self.pending_level_ups.clear();
        self.current_cards.clear();
        log::info!("Run reset");
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        let state = &self.state;
        DebugSnapshot {
            difficulty: state.difficulty.stats(),
            spawn: state.spawner.stats(&state.difficulty, &state.world),
            level: state.levels.stats(),
            modifiers: state.modifiers.snapshot(),
            final_stats: state.character.final_stats(&state.modifiers),
            player: state.player,
            weapons: state
                .weapons
                .iter()
                .map(|w| WeaponSummary {
                    id: w.id,
                    kind: w.kind,
                    level: w.level,
                    stats: *w.stats(),
                })
                .collect(),
            items: state.items.owned().to_vec(),
            paused: self.paused,
            game_over: self.game_over,
            pending_level_ups: self.pending_level_ups.len(),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;
    use crate::components::Enemy;
    use crate::systems::pickups::spawn_xp_orb;

    fn seeded() -> GameEngine {
        GameEngine::new(GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_new_engine_equips_starting_weapon() {
        let engine = seeded();
        let weapons: Vec<WeaponKind> = engine.state.weapons.iter().map(|w| w.kind).collect();
        assert_eq!(weapons, vec![WeaponKind::Sword]);
        assert_eq!(engine.player().max_hp, 100.0);
    }

    #[test]
    fn test_level_up_pauses_until_choice() {
        let mut engine = seeded();
        // Enough XP for levels 2 and 3 in one pickup
        spawn_xp_orb(&mut engine.state.world, Vec2::ZERO, 200);
        let result = engine.tick(0.016, Vec2::ZERO);
        let level_ups: Vec<u32> = result
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::LevelUp { new_level } => Some(*new_level),
                _ => None,
            })
            .collect();
        assert_eq!(level_ups, vec![2, 3]);
        assert!(engine.is_paused());
        assert_eq!(engine.pending_level_ups(), 1);
        assert!(engine.current_cards().len() >= 3);

        let time = engine.state.difficulty.current_time();
        engine.tick(1.0, Vec2::ZERO);
        assert_eq!(engine.state.difficulty.current_time(), time);

        assert!(engine.select_upgrade(99).is_none());
        assert!(engine.is_paused());
        engine.select_upgrade(0);
        assert!(engine.is_paused());
        assert_eq!(engine.pending_level_ups(), 0);
        engine.select_upgrade(0);
        assert!(!engine.is_paused());
        assert!(engine.select_upgrade(0).is_none());
    }

    #[test]
    fn test_knight_growth_applied_on_level_up() {
        let mut engine = seeded();
        spawn_xp_orb(&mut engine.state.world, Vec2::ZERO, 50);
        engine.tick(0.016, Vec2::ZERO);
        assert_eq!(engine.state.levels.level(), 2);
        assert!((engine.final_stat(Stat::MaxHp) - 101.0).abs() < 1e-3);
        assert!((engine.player().max_hp - 101.0).abs() < 1e-3);
    }

    #[test]
    fn test_game_over_stops_simulation() {
        let mut engine = seeded();
        engine.state.player.hp = 5.0;
        let difficulty = &engine.state.difficulty;
        crate::spawning::enemies::SKELETON.spawn(&mut engine.state.world, Vec2::new(1.0, 0.0), difficulty);
        let result = engine.tick(0.016, Vec2::ZERO);
        assert!(result.events.contains(&GameEvent::PlayerDied));
        assert!(engine.is_game_over());
        let projectiles = engine
            .state
            .world
            .query::<&crate::components::Projectile>()
            .iter()
            .count();
        assert_eq!(projectiles, 0);
        let time = engine.state.difficulty.current_time();
        engine.tick(1.0, Vec2::ZERO);
        assert_eq!(engine.state.difficulty.current_time(), time);
    }

    #[test]
    fn test_reset_restores_fresh_run() {
        let mut engine = seeded();
        spawn_xp_orb(&mut engine.state.world, Vec2::ZERO, 200);
        engine.tick(0.016, Vec2::ZERO);
        while engine.is_paused() {
            engine.select_upgrade(0);
        }
        for _ in 0..200 {
            engine.tick(0.05, Vec2::ZERO);
            while engine.is_paused() {
                engine.select_upgrade(0);
            }
        }

        engine.reset();
        let snapshot = engine.debug_snapshot();
        assert_eq!(snapshot.level.level, 1);
        assert_eq!(snapshot.spawn.current_enemy_count, 0);
        assert_eq!(snapshot.spawn.total_enemies_spawned, 0);
        assert_eq!(snapshot.weapons.len(), 1);
        assert_eq!(snapshot.weapons[0].level, 1);
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.modifiers, crate::systems::modifiers::ModifierSystem::new().snapshot());
        assert_eq!(snapshot.final_stats.max_hp, 100.0);
        assert_eq!(engine.state.world.query::<&Enemy>().iter().count(), 0);
        assert_eq!(engine.state.world.query::<&Health>().iter().count(), 0);
    }

    #[test]
    fn test_debug_snapshot_serializes() {
        let engine = seeded();
        let json = serde_json::to_string(&engine.debug_snapshot()).unwrap();
        assert!(json.contains("\"finalStats\""));
        assert!(json.contains("\"Sword\""));
    }
}
