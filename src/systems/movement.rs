//! Enemy chase movement and knockback decay.

use crate::components::{Enemy, KnockbackCooldowns, Position, Velocity};
use crate::systems::combat::CombatConfig;
use glam::Vec2;
use hecs::World;

/// Move every enemy toward the player and apply its knockback velocity.
///
/// Knockback decays by `knockback_decay_per_second ^ dt` and snaps to zero
/// below `knockback_min_velocity`. Knockback cooldowns tick here as well.
pub fn update_enemy_movement(world: &mut World, player_pos: Vec2, dt: f32, config: &CombatConfig) {
    puffin::profile_function!();

    let decay = config.knockback_decay_per_second.powf(dt);
    for (_, (pos, velocity, enemy, cooldowns)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &Enemy,
        &mut KnockbackCooldowns,
    )>() {
        // Zero-length when standing on the player
        let direction = (player_pos - pos.0).normalize_or_zero();
        pos.0 += direction * enemy.speed * dt;

        if velocity.0 != Vec2::ZERO {
            pos.0 += velocity.0 * dt;
            velocity.0 *= decay;
            if velocity.0.length() < config.knockback_min_velocity {
                velocity.0 = Vec2::ZERO;
            }
        }

        cooldowns.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawning::enemies;
    use crate::systems::difficulty::DifficultySystem;

    #[test]
    fn test_enemy_chases_player() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let enemy = enemies::SKELETON.spawn(&mut world, Vec2::new(100.0, 0.0), &difficulty);
        update_enemy_movement(&mut world, Vec2::ZERO, 0.5, &CombatConfig::default());
        let pos = world.get::<&Position>(enemy).unwrap().0;
        assert!((pos.x - 50.0).abs() < 1e-3);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_enemy_on_player_does_not_move() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let enemy = enemies::SKELETON.spawn(&mut world, Vec2::new(3.0, 4.0), &difficulty);
        update_enemy_movement(&mut world, Vec2::new(3.0, 4.0), 0.1, &CombatConfig::default());
        let pos = world.get::<&Position>(enemy).unwrap().0;
        assert_eq!(pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_knockback_decays_and_snaps() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let enemy = enemies::SKELETON.spawn(&mut world, Vec2::ZERO, &difficulty);
        world.get::<&mut Velocity>(enemy).unwrap().0 = Vec2::new(200.0, 0.0);
        let config = CombatConfig::default();

        update_enemy_movement(&mut world, Vec2::ZERO, 0.25, &config);
        let v = world.get::<&Velocity>(enemy).unwrap().0;
        // 0.0001^0.25 = 0.1
        assert!((v.x - 20.0).abs() < 1e-2);

        update_enemy_movement(&mut world, Vec2::ZERO, 0.25, &config);
        update_enemy_movement(&mut world, Vec2::ZERO, 0.25, &config);
        assert_eq!(world.get::<&Velocity>(enemy).unwrap().0, Vec2::ZERO);
    }
}
