//! Decides when, where and what to spawn.
//!
//! Normal spawning runs on a timer scaled by the difficulty spawn rate and
//! stops entirely while a boss is alive.

use crate::components::{Enemy, EnemyType};
use crate::constants::*;
use crate::spawning::enemies;
use crate::systems::difficulty::DifficultySystem;
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Spawn ring and pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnConfig {
    pub base_spawn_interval: f32,
    pub max_enemies: usize,
    pub spawn_distance: f32,
    pub spawn_safety_margin: f32,
    pub boss_distance_multiplier: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            max_enemies: MAX_ENEMIES,
            spawn_distance: SPAWN_DISTANCE,
            spawn_safety_margin: SPAWN_SAFETY_MARGIN,
            boss_distance_multiplier: BOSS_SPAWN_DISTANCE_MULTIPLIER,
        }
    }
}

/// A spawned enemy the front end should create a sprite for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub entity: Entity,
    pub position: Vec2,
    pub enemy_type: EnemyType,
}

/// Debug snapshot of spawn state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnStats {
    pub total_enemies_spawned: u32,
    pub elites_spawned: u32,
    pub bosses_spawned: u32,
    pub current_enemy_count: usize,
    pub max_enemies: usize,
    pub current_spawn_interval: f32,
    pub base_spawn_interval: f32,
    pub spawn_quantity: u32,
    pub active_boss: bool,
    pub elite_chance: f32,
    pub time_until_next_boss: f32,
}

#[derive(Debug, Clone)]
pub struct SpawnController {
    config: SpawnConfig,
    spawn_timer: f32,
    active_boss: Option<Entity>,
    total_spawned: u32,
    elites_spawned: u32,
    bosses_spawned: u32,
}

impl SpawnController {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            spawn_timer: 0.0,
            active_boss: None,
            total_spawned: 0,
            elites_spawned: 0,
            bosses_spawned: 0,
        }
    }

    /// Run one frame of spawn logic.
    ///
    /// The boss gate is checked first. If it fires with no boss alive, the
    /// boss spawns and normal spawning is skipped this frame. A window that
    /// fires while a boss is alive is consumed.
    pub fn update(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        difficulty: &mut DifficultySystem,
        world: &mut World,
        rng: &mut impl Rng,
    ) -> Vec<SpawnRequest> {
        puffin::profile_function!();
        let mut spawned = Vec::new();

        if difficulty.should_spawn_boss() && self.active_boss.is_none() {
            spawned.push(self.spawn_boss(player_pos, difficulty, world, rng));
            return spawned;
        }

        if self.active_boss.is_some() {
            return spawned;
        }

        let mut enemy_count = enemy_count(world);
        if enemy_count >= self.config.max_enemies {
            return spawned;
        }

        self.spawn_timer += dt;
        if self.spawn_timer < self.current_spawn_interval(difficulty) {
            return spawned;
        }
        self.spawn_timer = 0.0;

        for _ in 0..difficulty.spawn_quantity() {
            if enemy_count >= self.config.max_enemies {
                break;
            }
            let min = self.config.spawn_distance;
            let distance = min + rng.gen::<f32>() * self.config.spawn_safety_margin;
            let position = ring_position(player_pos, distance, rng);
            let enemy_type = self.select_enemy_type(difficulty, rng);
            let entity = enemies::for_type(enemy_type).spawn(world, position, difficulty);

            self.total_spawned += 1;
            if enemy_type == EnemyType::Elite {
                self.elites_spawned += 1;
                log::debug!("Spawned elite (chance {:.1}%)", difficulty.elite_chance() * 100.0);
            }
            enemy_count += 1;
            spawned.push(SpawnRequest {
                entity,
                position,
                enemy_type,
            });
        }
        spawned
    }

    /// Seconds between spawn events at the current difficulty
    pub fn current_spawn_interval(&self, difficulty: &DifficultySystem) -> f32 {
        self.config.base_spawn_interval / difficulty.spawn_rate_multiplier()
    }

    /// Roll elite vs normal; bosses never come from this roll
    pub fn select_enemy_type(&self, difficulty: &DifficultySystem, rng: &mut impl Rng) -> EnemyType {
        if rng.gen::<f32>() < difficulty.elite_chance() {
            EnemyType::Elite
        } else {
            EnemyType::Normal
        }
    }

    fn spawn_boss(
        &mut self,
        player_pos: Vec2,
        difficulty: &DifficultySystem,
        world: &mut World,
        rng: &mut impl Rng,
    ) -> SpawnRequest {
        let distance = self.config.spawn_distance * self.config.boss_distance_multiplier;
        let position = ring_position(player_pos, distance, rng);
        let entity = enemies::SKELETON_BOSS.spawn(world, position, difficulty);
        self.active_boss = Some(entity);
        self.total_spawned += 1;
        self.bosses_spawned += 1;
        log::info!(
            "Boss spawned ({:.1} min survived), total bosses: {}",
            difficulty.minutes_survived(),
            self.bosses_spawned
        );
        SpawnRequest {
            entity,
            position,
            enemy_type: EnemyType::Boss,
        }
    }

    /// Force a boss now unless one is already alive
    pub fn debug_spawn_boss(
        &mut self,
        player_pos: Vec2,
        difficulty: &DifficultySystem,
        world: &mut World,
        rng: &mut impl Rng,
    ) -> Option<SpawnRequest> {
        if self.active_boss.is_some() {
            return None;
        }
        Some(self.spawn_boss(player_pos, difficulty, world, rng))
    }

    /// Clear the active boss, but only if `entity` is that boss
    pub fn on_boss_defeated(&mut self, entity: Entity) -> bool {
        if self.active_boss == Some(entity) {
            self.active_boss = None;
            log::info!("Boss defeated, normal spawning resumed");
            return true;
        }
        false
    }

    pub fn is_boss(&self, entity: Entity) -> bool {
        self.active_boss == Some(entity)
    }

    pub fn active_boss(&self) -> Option<Entity> {
        self.active_boss
    }

    pub fn reset(&mut self) {
        self.spawn_timer = 0.0;
        self.active_boss = None;
        self.total_spawned = 0;
        self.elites_spawned = 0;
        self.bosses_spawned = 0;
    }

    pub fn stats(&self, difficulty: &DifficultySystem, world: &World) -> SpawnStats {
        SpawnStats {
            total_enemies_spawned: self.total_spawned,
            elites_spawned: self.elites_spawned,
            bosses_spawned: self.bosses_spawned,
            current_enemy_count: enemy_count(world),
            max_enemies: self.config.max_enemies,
            current_spawn_interval: self.current_spawn_interval(difficulty),
            base_spawn_interval: self.config.base_spawn_interval,
            spawn_quantity: difficulty.spawn_quantity(),
            active_boss: self.active_boss.is_some(),
            elite_chance: difficulty.elite_chance(),
            time_until_next_boss: difficulty.time_until_next_boss(),
        }
    }
}

impl Default for SpawnController {
    fn default() -> Self {
        Self::new(SpawnConfig::default())
    }
}

fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

fn ring_position(center: Vec2, distance: f32, rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen::<f32>() * TAU;
    center + Vec2::from_angle(angle) * distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (SpawnController, DifficultySystem, World, StdRng) {
        (
            SpawnController::default(),
            DifficultySystem::default(),
            World::new(),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_spawns_on_interval_in_ring() {
        let (mut spawner, mut difficulty, mut world, mut rng) = setup();
        let player = Vec2::new(100.0, -50.0);
        assert!(spawner.update(0.5, player, &mut difficulty, &mut world, &mut rng).is_empty());
        let spawned = spawner.update(0.5, player, &mut difficulty, &mut world, &mut rng);
        assert_eq!(spawned.len(), 1);
        let distance = spawned[0].position.distance(player);
        assert!((SPAWN_DISTANCE - 0.01..=SPAWN_DISTANCE + SPAWN_SAFETY_MARGIN + 0.01).contains(&distance));
        assert_eq!(spawned[0].enemy_type, EnemyType::Normal);
    }

    #[test]
    fn test_boss_pauses_normal_spawning() {
        let (mut spawner, mut difficulty, mut world, mut rng) = setup();
        difficulty.update(BOSS_INTERVAL);
        let spawned = spawner.update(0.0, Vec2::ZERO, &mut difficulty, &mut world, &mut rng);
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].enemy_type, EnemyType::Boss);
        let boss = spawned[0].entity;
        assert!(spawner.is_boss(boss));
        assert!((spawned[0].position.length() - SPAWN_DISTANCE * 1.5).abs() < 0.1);

        for _ in 0..10 {
            assert!(spawner
                .update(1.0, Vec2::ZERO, &mut difficulty, &mut world, &mut rng)
                .is_empty());
        }

        let other = world.spawn((0u8,));
        assert!(!spawner.on_boss_defeated(other));
        assert!(spawner.on_boss_defeated(boss));
        assert!(!spawner
            .update(1.0, Vec2::ZERO, &mut difficulty, &mut world, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_boss_window_consumed_while_boss_alive() {
        let (mut spawner, mut difficulty, mut world, mut rng) = setup();
        assert!(spawner.debug_spawn_boss(Vec2::ZERO, &difficulty, &mut world, &mut rng).is_some());
        assert!(spawner.debug_spawn_boss(Vec2::ZERO, &difficulty, &mut world, &mut rng).is_none());
        difficulty.update(BOSS_INTERVAL);
        spawner.update(0.0, Vec2::ZERO, &mut difficulty, &mut world, &mut rng);
        assert!((difficulty.time_until_next_boss() - BOSS_INTERVAL).abs() < 1e-3);
    }

    #[test]
    fn test_max_enemies_cap() {
        let config = SpawnConfig {
            max_enemies: 2,
            ..SpawnConfig::default()
        };
        let mut spawner = SpawnController::new(config);
        let mut difficulty = DifficultySystem::default();
        difficulty.set_difficulty_modifier(3.0);
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);
        let spawned = spawner.update(1.0, Vec2::ZERO, &mut difficulty, &mut world, &mut rng);
        assert_eq!(spawned.len(), 2);
        assert!(spawner
            .update(5.0, Vec2::ZERO, &mut difficulty, &mut world, &mut rng)
            .is_empty());
        assert_eq!(spawner.stats(&difficulty, &world).current_enemy_count, 2);
    }

    #[test]
    fn test_no_elites_before_first_boss() {
        let (spawner, difficulty, _world, mut rng) = setup();
        for _ in 0..1000 {
            assert_eq!(spawner.select_enemy_type(&difficulty, &mut rng), EnemyType::Normal);
        }
    }
}
