//! Data-driven enemy spawning.
//!
//! Each archetype is an `EnemyDef`; spawning combines it with the current
//! difficulty multipliers and inserts the entity into the world.

use crate::components::{Enemy, EnemyType, Health, KnockbackCooldowns, Position, Velocity};
use crate::constants::*;
use crate::systems::difficulty::DifficultySystem;
use glam::Vec2;
use hecs::World;

/// Definition of an enemy archetype - all the data needed to spawn one
#[derive(Clone, Debug)]
pub struct EnemyDef {
    /// Display name (for logs)
    pub name: &'static str,
    pub enemy_type: EnemyType,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
    pub xp_multiplier: f32,
    /// Extra multiplier on health, speed and XP
    pub bonus_multiplier: f32,
}

/// Stats of a spawned enemy after all scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledEnemyStats {
    pub max_hp: f32,
    pub speed: f32,
    pub xp_reward: u32,
}

impl EnemyDef {
    /// Final stats under the given difficulty. Health and XP round up.
    pub fn scaled_stats(&self, difficulty: &DifficultySystem) -> ScaledEnemyStats {
        let health = self.health_multiplier * difficulty.health_multiplier() * self.bonus_multiplier;
        let speed = self.speed_multiplier * difficulty.speed_multiplier() * self.bonus_multiplier;
        let xp = self.xp_multiplier * difficulty.xp_multiplier() * self.bonus_multiplier;
        ScaledEnemyStats {
            max_hp: ceil_stable(ENEMY_BASE_HP * health),
            speed: ENEMY_BASE_SPEED * speed,
            xp_reward: ceil_stable(ENEMY_BASE_XP * xp) as u32,
        }
    }

    /// Spawn this enemy type at the given position
    pub fn spawn(&self, world: &mut World, pos: Vec2, difficulty: &DifficultySystem) -> hecs::Entity {
        let stats = self.scaled_stats(difficulty);
        log::debug!(
            "Spawned {} at ({:.0}, {:.0}) hp {} speed {:.1} xp {}",
            self.name,
            pos.x,
            pos.y,
            stats.max_hp,
            stats.speed,
            stats.xp_reward
        );
        world.spawn((
            Position(pos),
            Velocity::default(),
            Health::new(stats.max_hp),
            Enemy {
                enemy_type: self.enemy_type,
                speed: stats.speed,
                xp_reward: stats.xp_reward,
                hitbox_radius: self.enemy_type.hitbox_radius(),
                knockback_resistance: self.enemy_type.knockback_resistance(),
            },
            KnockbackCooldowns::default(),
        ))
    }
}

/// Round up, ignoring f32 noise from the multiplier chain (3.0 * 1.2 * 30 is 108, not 109)
fn ceil_stable(value: f32) -> f32 {
    (f64::from(value) * (1.0 - 1e-6)).ceil() as f32
}

/// Predefined enemy types
pub mod enemies {
    use super::*;

    pub const SKELETON: EnemyDef = EnemyDef {
        name: "Skeleton",
        enemy_type: EnemyType::Normal,
        health_multiplier: NORMAL_HEALTH_MULTIPLIER,
        speed_multiplier: NORMAL_SPEED_MULTIPLIER,
        xp_multiplier: NORMAL_XP_MULTIPLIER,
        bonus_multiplier: 1.0,
    };

    pub const SKELETON_ELITE: EnemyDef = EnemyDef {
        name: "Elite Skeleton",
        enemy_type: EnemyType::Elite,
        health_multiplier: ELITE_HEALTH_MULTIPLIER,
        speed_multiplier: ELITE_SPEED_MULTIPLIER,
        xp_multiplier: ELITE_XP_MULTIPLIER,
        bonus_multiplier: ELITE_BONUS_MULTIPLIER,
    };

    pub const SKELETON_BOSS: EnemyDef = EnemyDef {
        name: "Skeleton Lord",
        enemy_type: EnemyType::Boss,
        health_multiplier: BOSS_HEALTH_MULTIPLIER,
        speed_multiplier: BOSS_SPEED_MULTIPLIER,
        xp_multiplier: BOSS_XP_MULTIPLIER,
        bonus_multiplier: BOSS_BONUS_MULTIPLIER,
    };

    /// Definition for an archetype
    pub fn for_type(enemy_type: EnemyType) -> &'static EnemyDef {
        match enemy_type {
            EnemyType::Normal => &SKELETON,
            EnemyType::Elite => &SKELETON_ELITE,
            EnemyType::Boss => &SKELETON_BOSS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_stats_at_start() {
        let difficulty = DifficultySystem::default();
        let stats = enemies::SKELETON.scaled_stats(&difficulty);
        assert_eq!(stats.max_hp, 30.0);
        assert_eq!(stats.speed, 100.0);
        assert_eq!(stats.xp_reward, 10);
    }

    #[test]
    fn test_boss_and_elite_multipliers() {
        let difficulty = DifficultySystem::default();
        let boss = enemies::SKELETON_BOSS.scaled_stats(&difficulty);
        assert_eq!(boss.max_hp, 450.0);
        assert!((boss.speed - 120.0).abs() < 1e-3);
        assert_eq!(boss.xp_reward, 150);

        let elite = enemies::SKELETON_ELITE.scaled_stats(&difficulty);
        assert_eq!(elite.max_hp, 108.0);
        assert!((elite.speed - 144.0).abs() < 1e-3);
        assert_eq!(elite.xp_reward, 36);
    }

    #[test]
    fn test_scaled_values_round_up() {
        let mut difficulty = DifficultySystem::default();
        difficulty.update(35.0);
        let stats = enemies::SKELETON.scaled_stats(&difficulty);
        assert_eq!(stats.max_hp, 31.0);
        assert_eq!(stats.xp_reward, 11);
    }

    #[test]
    fn test_spawn_inserts_components() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let entity = enemies::SKELETON_BOSS.spawn(&mut world, Vec2::new(5.0, 5.0), &difficulty);
        let enemy = world.get::<&Enemy>(entity).unwrap();
        assert_eq!(enemy.enemy_type, EnemyType::Boss);
        assert_eq!(enemy.knockback_resistance, 1.0);
        assert_eq!(world.get::<&Health>(entity).unwrap().max, 450.0);
    }
}
