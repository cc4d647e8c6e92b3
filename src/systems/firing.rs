//! Auto-aim firing for every equipped weapon.
//!
//! A ready weapon only fires when an enemy is inside its effective range.
//! Multi-shot weapons start a volley instead: one shot every
//! `VOLLEY_SHOT_INTERVAL`, each at the nearest enemy the volley has not
//! targeted yet, falling back to the nearest enemy overall.

use crate::components::{Enemy, Position};
use crate::events::{EventQueue, GameEvent};
use crate::systems::weapons::{Weapon, WeaponSystem};
use glam::Vec2;
use hecs::{Entity, World};

/// Nearest enemy within `max_range` of `origin`, skipping `exclude`
pub fn nearest_enemy(
    enemies: &[(Entity, Vec2)],
    origin: Vec2,
    max_range: f32,
    exclude: &[Entity],
) -> Option<(Entity, Vec2)> {
    enemies
        .iter()
        .filter(|(e, _)| !exclude.contains(e))
        .map(|&(e, pos)| (e, pos, pos.distance_squared(origin)))
        .filter(|(_, _, d2)| *d2 <= max_range * max_range)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(e, pos, _)| (e, pos))
}

fn aim_angle(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    d.y.atan2(d.x)
}

/// Advance weapon timers and fire whatever is ready. Returns the projectiles spawned.
pub fn update_weapons(
    weapons: &mut WeaponSystem,
    world: &mut World,
    player_pos: Vec2,
    dt: f32,
    events: &mut EventQueue,
) -> Vec<Entity> {
    puffin::profile_function!();

    let enemies: Vec<(Entity, Vec2)> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .map(|(e, (pos, _))| (e, pos.0))
        .collect();

    let mut fired = Vec::new();
    for weapon in weapons.iter_mut() {
        weapon.update(dt);
        let range = weapon.stats().effective_range();

        if !weapon.volley_in_progress() && weapon.can_fire() {
            let Some((_, target)) = nearest_enemy(&enemies, player_pos, range, &[]) else {
                continue;
            };
            if weapon.stats().shot_count() > 1 {
                weapon.begin_volley();
            } else {
                let angle = aim_angle(player_pos, target);
                if let Some(projectile) = weapon.fire(world, player_pos, angle) {
                    push_fired(events, weapon, projectile, player_pos, angle);
                    fired.push(projectile);
                }
                continue;
            }
        }

        while weapon.volley_shot_due() {
            let target = nearest_enemy(&enemies, player_pos, range, weapon.volley_targets())
                .or_else(|| nearest_enemy(&enemies, player_pos, range, &[]));
            let Some((target_entity, target_pos)) = target else {
                weapon.cancel_volley();
                break;
            };
            let angle = aim_angle(player_pos, target_pos);
            let projectile = weapon.fire_volley_shot(world, player_pos, angle, target_entity);
            push_fired(events, weapon, projectile, player_pos, angle);
            fired.push(projectile);
        }
    }
    fired
}

fn push_fired(events: &mut EventQueue, weapon: &Weapon, projectile: Entity, position: Vec2, angle: f32) {
    events.push(GameEvent::ProjectileFired {
        projectile,
        weapon: weapon.id,
        position,
        angle,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Projectile;
    use crate::constants::*;
    use crate::spawning::enemies;
    use crate::systems::difficulty::DifficultySystem;
    use crate::systems::weapons::WeaponKind;

    fn projectiles(world: &World) -> Vec<Vec2> {
        world
            .query::<&Projectile>()
            .iter()
            .map(|(_, p)| p.velocity)
            .collect()
    }

    #[test]
    fn test_nearest_enemy_respects_range_and_exclusions() {
        let a = Entity::DANGLING;
        let mut world = World::new();
        let b = world.spawn((0u8,));
        let enemies = vec![(a, Vec2::new(10.0, 0.0)), (b, Vec2::new(20.0, 0.0))];
        assert_eq!(nearest_enemy(&enemies, Vec2::ZERO, 100.0, &[]).map(|t| t.0), Some(a));
        assert_eq!(nearest_enemy(&enemies, Vec2::ZERO, 100.0, &[a]).map(|t| t.0), Some(b));
        assert!(nearest_enemy(&enemies, Vec2::ZERO, 5.0, &[]).is_none());
    }

    #[test]
    fn test_no_fire_without_target_in_range() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let mut weapons = WeaponSystem::new();
        weapons.equip(WeaponKind::Sword);
        // Sword reach is 600 * 0.375 * 1.5 = 337.5
        enemies::SKELETON.spawn(&mut world, Vec2::new(400.0, 0.0), &difficulty);
        let mut events = EventQueue::new();
        assert!(update_weapons(&mut weapons, &mut world, Vec2::ZERO, 1.0, &mut events).is_empty());

        enemies::SKELETON.spawn(&mut world, Vec2::new(0.0, 300.0), &difficulty);
        let fired = update_weapons(&mut weapons, &mut world, Vec2::ZERO, 0.0, &mut events);
        assert_eq!(fired.len(), 1);
        let velocity = projectiles(&world)[0];
        assert!(velocity.x.abs() < 1e-2);
        assert!((velocity.y - 600.0).abs() < 1e-2);
    }

    #[test]
    fn test_volley_targets_distinct_enemies() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let mut weapons = WeaponSystem::new();
        weapons.equip(WeaponKind::MagicStaff);
        enemies::SKELETON.spawn(&mut world, Vec2::new(100.0, 0.0), &difficulty);
        enemies::SKELETON.spawn(&mut world, Vec2::new(0.0, 150.0), &difficulty);
        enemies::SKELETON.spawn(&mut world, Vec2::new(-200.0, 0.0), &difficulty);
        let mut events = EventQueue::new();

        let first = update_weapons(&mut weapons, &mut world, Vec2::ZERO, 1.0, &mut events);
        assert_eq!(first.len(), 1);
        let second = update_weapons(&mut weapons, &mut world, Vec2::ZERO, VOLLEY_SHOT_INTERVAL, &mut events);
        assert_eq!(second.len(), 1);
        let third = update_weapons(&mut weapons, &mut world, Vec2::ZERO, VOLLEY_SHOT_INTERVAL, &mut events);
        assert_eq!(third.len(), 1);

        let velocities = projectiles(&world);
        assert_eq!(velocities.len(), 3);
        assert!(velocities.iter().any(|v| v.x > 400.0));
        assert!(velocities.iter().any(|v| v.y > 400.0));
        assert!(velocities.iter().any(|v| v.x < -400.0));
        assert!(!weapons.iter().next().unwrap().volley_in_progress());
    }

    #[test]
    fn test_volley_reuses_nearest_when_targets_run_out() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        let mut weapons = WeaponSystem::new();
        weapons.equip(WeaponKind::MagicStaff);
        enemies::SKELETON.spawn(&mut world, Vec2::new(100.0, 0.0), &difficulty);
        let mut events = EventQueue::new();

        update_weapons(&mut weapons, &mut world, Vec2::ZERO, 1.0, &mut events);
        for _ in 0..2 {
            update_weapons(&mut weapons, &mut world, Vec2::ZERO, VOLLEY_SHOT_INTERVAL, &mut events);
        }
        assert_eq!(projectiles(&world).len(), 3);
    }
}
