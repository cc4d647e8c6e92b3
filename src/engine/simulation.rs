//! Frame simulation - runs every subsystem in a fixed order.
//!
//! Order matters: later passes read what earlier ones wrote this frame.
//!
//! 1. difficulty clock
//! 2. spawning
//! 3. enemy movement and knockback
//! 4. enemy-enemy separation
//! 5. weapon firing
//! 6. projectile flight
//! 7. projectile-enemy hits
//! 8. deaths and XP orb drops
//! 9. contact damage to the player
//! 10. XP orb pickup
//! 11. level-ups

use super::GameState;
use crate::events::{EventQueue, GameEvent};
use crate::stats::Stat;
use crate::systems::spawn_controller::SpawnRequest;
use crate::systems::{combat, firing, movement, pickups, projectile};
use glam::Vec2;

/// What one frame produced besides events
#[derive(Debug, Default)]
pub struct FrameOutcome {
    pub spawn_requests: Vec<SpawnRequest>,
    /// Levels reached this frame, in order
    pub level_ups: Vec<u32>,
    pub player_died: bool,
}

/// Advance the world by `dt` seconds with the player at `player_pos`
pub fn simulate_frame(
    state: &mut GameState,
    dt: f32,
    player_pos: Vec2,
    events: &mut EventQueue,
) -> FrameOutcome {
    puffin::profile_function!();
    let mut outcome = FrameOutcome::default();

    state.difficulty.update(dt);

    outcome.spawn_requests = state.spawner.update(
        dt,
        player_pos,
        &mut state.difficulty,
        &mut state.world,
        &mut state.rng,
    );
    for request in &outcome.spawn_requests {
        events.push(GameEvent::EnemySpawned {
            entity: request.entity,
            position: request.position,
            enemy_type: request.enemy_type,
        });
    }

    movement::update_enemy_movement(&mut state.world, player_pos, dt, &state.combat);
    combat::separate_enemies(&mut state.world);

    firing::update_weapons(&mut state.weapons, &mut state.world, player_pos, dt, events);
    projectile::update_projectiles(&mut state.world, dt);
    combat::resolve_projectile_hits(
        &mut state.world,
        &state.weapons,
        &state.modifiers,
        player_pos,
        &state.combat,
        &mut state.rng,
        events,
    );
    combat::remove_dead_enemies(&mut state.world, &mut state.spawner, events);

    state.player.update(dt);
    let armor = state.final_stat(Stat::Armor);
    let damage_reduction = state.damage_reduction();
    state.player.apply_contact_damage(
        &state.world,
        player_pos,
        armor,
        damage_reduction,
        &state.combat,
        events,
    );
    outcome.player_died = state.player.is_dead();

    let pickup_range = state.final_stat(Stat::PickupRange);
    let xp_gain = state.final_stat(Stat::XpGain);
    let collected = pickups::update_xp_orbs(
        &mut state.world,
        player_pos,
        pickup_range,
        xp_gain,
        dt,
        &state.combat,
        events,
    );
    if collected > 0 {
        outcome.level_ups = state.levels.add_xp(collected);
    }

    for &level in &outcome.level_ups {
        state.character.apply_level_growth(level, &mut state.modifiers);
        events.push(GameEvent::LevelUp { new_level: level });
    }
    if !outcome.level_ups.is_empty() {
        state.sync_player_max_hp();
    }

    outcome
}
