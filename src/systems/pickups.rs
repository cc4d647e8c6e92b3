//! XP orb drops, magnet pull and collection.

use crate::components::{Position, XpOrb};
use crate::events::{EventQueue, GameEvent};
use crate::systems::combat::CombatConfig;
use glam::Vec2;
use hecs::{Entity, World};

pub fn spawn_xp_orb(world: &mut World, position: Vec2, value: u32) -> Entity {
    world.spawn((Position(position), XpOrb::new(value)))
}

/// Pull orbs inside `pickup_range` toward the player and collect the ones
/// that reach them. Each collected orb grants `round(value * xp_gain)`.
/// Returns the total XP collected this frame.
pub fn update_xp_orbs(
    world: &mut World,
    player_pos: Vec2,
    pickup_range: f32,
    xp_gain: f32,
    dt: f32,
    config: &CombatConfig,
    events: &mut EventQueue,
) -> u64 {
    puffin::profile_function!();

    let mut collected: Vec<(Entity, u64)> = Vec::new();
    for (entity, (pos, orb)) in world.query_mut::<(&mut Position, &mut XpOrb)>() {
        let offset = player_pos - pos.0;
        let distance = offset.length();

        if distance <= config.xp_orb_collection_radius {
            let amount = (orb.value as f32 * xp_gain).round().max(0.0) as u64;
            collected.push((entity, amount));
            continue;
        }

        if distance <= pickup_range {
            orb.being_pulled = true;
        }
        if orb.being_pulled {
            let step = (config.xp_orb_pull_speed * dt).min(distance);
            pos.0 += offset / distance * step;
        }
    }

    let mut total = 0;
    for (entity, amount) in collected {
        let _ = world.despawn(entity);
        events.push(GameEvent::XpCollected { amount });
        total += amount;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orb_out_of_range_stays() {
        let mut world = World::new();
        let orb = spawn_xp_orb(&mut world, Vec2::new(200.0, 0.0), 10);
        let mut events = EventQueue::new();
        let xp = update_xp_orbs(&mut world, Vec2::ZERO, 80.0, 1.0, 0.1, &CombatConfig::default(), &mut events);
        assert_eq!(xp, 0);
        assert_eq!(world.get::<&Position>(orb).unwrap().0, Vec2::new(200.0, 0.0));
    }

    #[test]
    fn test_orb_pulled_then_collected() {
        let mut world = World::new();
        let orb = spawn_xp_orb(&mut world, Vec2::new(60.0, 0.0), 10);
        let config = CombatConfig::default();
        let mut events = EventQueue::new();

        let xp = update_xp_orbs(&mut world, Vec2::ZERO, 80.0, 1.0, 0.1, &config, &mut events);
        assert_eq!(xp, 0);
        assert!((world.get::<&Position>(orb).unwrap().0.x - 20.0).abs() < 1e-3);
        assert!(world.get::<&XpOrb>(orb).unwrap().being_pulled);

        update_xp_orbs(&mut world, Vec2::ZERO, 80.0, 1.0, 0.1, &config, &mut events);
        let xp = update_xp_orbs(&mut world, Vec2::ZERO, 80.0, 1.0, 0.1, &config, &mut events);
        assert_eq!(xp, 10);
        assert!(!world.contains(orb));
    }

    #[test]
    fn test_xp_gain_is_rounded() {
        let mut world = World::new();
        spawn_xp_orb(&mut world, Vec2::new(5.0, 0.0), 36);
        let mut events = EventQueue::new();
        let xp = update_xp_orbs(&mut world, Vec2::ZERO, 80.0, 1.05, 0.0, &CombatConfig::default(), &mut events);
        // 36 * 1.05 = 37.8
        assert_eq!(xp, 38);
        assert!(events.drain().any(|e| e == GameEvent::XpCollected { amount: 38 }));
    }
}
