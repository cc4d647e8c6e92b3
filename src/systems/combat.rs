//! Projectile hits, knockback, enemy separation and death handling.

use crate::components::{Enemy, Health, KnockbackCooldowns, Position, Projectile, Velocity};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::systems::modifiers::ModifierSystem;
use crate::systems::pickups::spawn_xp_orb;
use crate::systems::spawn_controller::SpawnController;
use crate::systems::weapons::{WeaponId, WeaponSystem};
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tunables for hits, knockback and the player's vitals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatConfig {
    pub knockback_force: f32,
    pub knockback_decay_per_second: f32,
    pub knockback_min_velocity: f32,
    pub contact_damage: f32,
    pub invulnerability_duration: f32,
    pub xp_orb_pull_speed: f32,
    pub xp_orb_collection_radius: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            knockback_force: KNOCKBACK_FORCE,
            knockback_decay_per_second: KNOCKBACK_DECAY_PER_SECOND,
            knockback_min_velocity: KNOCKBACK_MIN_VELOCITY,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            invulnerability_duration: PLAYER_INVULNERABILITY_DURATION,
            xp_orb_pull_speed: XP_ORB_PULL_SPEED,
            xp_orb_collection_radius: XP_ORB_COLLECTION_RADIUS,
        }
    }
}

/// Collide every projectile with the enemies it overlaps.
///
/// Each projectile damages the closest not-yet-hit enemies, at most its
/// remaining pierce budget per frame, and is despawned once the budget is
/// used up. Knockback is applied per (enemy, weapon) pair only when that
/// pair is off cooldown. Returns the number of hits.
pub fn resolve_projectile_hits(
    world: &mut World,
    weapons: &WeaponSystem,
    modifiers: &ModifierSystem,
    player_pos: Vec2,
    config: &CombatConfig,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> usize {
    puffin::profile_function!();

    let enemies: Vec<(Entity, Vec2, f32)> = world
        .query::<(&Position, &Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.is_dead())
        .map(|(e, (pos, enemy, _))| (e, pos.0, enemy.hitbox_radius))
        .collect();

    let mut hits: Vec<(WeaponId, Entity)> = Vec::new();
    let mut spent: Vec<Entity> = Vec::new();

    for (projectile_entity, (pos, projectile)) in world.query_mut::<(&Position, &mut Projectile)>() {
        if projectile.is_spent() {
            spent.push(projectile_entity);
            continue;
        }

        let mut candidates: Vec<(Entity, f32)> = enemies
            .iter()
            .filter(|(e, _, _)| !projectile.hit_enemies.contains(e))
            .filter_map(|&(e, enemy_pos, radius)| {
                let distance = pos.0.distance(enemy_pos);
                (distance <= projectile.radius + radius).then_some((e, distance))
            })
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let budget = projectile.remaining_pierce() as usize;
        for (enemy, _) in candidates.into_iter().take(budget) {
            projectile.hit_enemies.insert(enemy);
            projectile.hit_count += 1;
            hits.push((projectile.weapon, enemy));
        }

        if projectile.is_spent() {
            spent.push(projectile_entity);
        }
    }

    let hit_count = hits.len();
    for (weapon_id, enemy) in hits {
        let Some(weapon) = weapons.get(weapon_id) else {
            log::warn!("Projectile from unknown weapon {:?}", weapon_id);
            continue;
        };
        let roll = weapon.calculate_damage(
            modifiers.global_crit_chance_bonus(),
            modifiers.global_damage_multiplier(),
            rng,
        );

        let Ok((pos, health, stats, velocity, cooldowns)) = world.query_one_mut::<(
            &Position,
            &mut Health,
            &Enemy,
            &mut Velocity,
            &mut KnockbackCooldowns,
        )>(enemy) else {
            continue;
        };

        health.take_damage(roll.amount);
        events.push(GameEvent::DamageDealt {
            target: enemy,
            position: pos.0,
            amount: roll.amount,
            is_crit: roll.is_crit,
        });

        let impulse = weapon.stats().knockback
            * config.knockback_force
            * (1.0 - stats.knockback_resistance);
        // Zero-knockback hits leave existing knockback alone
        if impulse > 0.0 && cooldowns.is_ready(weapon_id) {
            let direction = (pos.0 - player_pos).normalize_or_zero();
            velocity.0 = direction * impulse;
            cooldowns.start(weapon_id);
        }

        log::debug!(
            "{} hit {:?} for {}{}",
            weapon.name(),
            enemy,
            roll.amount,
            if roll.is_crit { " (crit)" } else { "" }
        );
    }

    for entity in spent {
        let _ = world.despawn(entity);
    }

    hit_count
}

/// Push overlapping enemies apart, each by half the overlap along the
/// line between them. Coincident enemies have no separation axis and stay put.
pub fn separate_enemies(world: &mut World) {
    puffin::profile_function!();

    let mut bodies: Vec<(Entity, Vec2, f32)> = world
        .query::<(&Position, &Enemy)>()
        .iter()
        .map(|(e, (pos, enemy))| (e, pos.0, enemy.hitbox_radius))
        .collect();

    let mut moved = false;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let delta = bodies[j].1 - bodies[i].1;
            let distance = delta.length();
            let min_distance = bodies[i].2 + bodies[j].2;
            if distance >= min_distance || distance <= f32::EPSILON {
                continue;
            }
            let push = delta / distance * (min_distance - distance) / 2.0;
            bodies[i].1 -= push;
            bodies[j].1 += push;
            moved = true;
        }
    }

    if !moved {
        return;
    }
    for (entity, new_pos, _) in bodies {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            pos.0 = new_pos;
        }
    }
}

/// Despawn dead enemies, drop an XP orb for each, and release the boss gate
/// if the boss died. Returns the number of enemies removed.
pub fn remove_dead_enemies(
    world: &mut World,
    spawner: &mut SpawnController,
    events: &mut EventQueue,
) -> usize {
    puffin::profile_function!();

    let dead: Vec<(Entity, Vec2, Enemy)> = world
        .query::<(&Position, &Health, &Enemy)>()
        .iter()
        .filter(|(_, (_, health, _))| health.is_dead())
        .map(|(e, (pos, _, enemy))| (e, pos.0, *enemy))
        .collect();

    if dead.is_empty() {
        return 0;
    }

    let dead_set: HashSet<Entity> = dead.iter().map(|(e, _, _)| *e).collect();
    for (_, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.hit_enemies.retain(|e| !dead_set.contains(e));
    }

    for &(entity, position, enemy) in &dead {
        let _ = world.despawn(entity);
        events.push(GameEvent::EnemyDied {
            entity,
            position,
            enemy_type: enemy.enemy_type,
            xp_reward: enemy.xp_reward,
        });

        let orb = spawn_xp_orb(world, position, enemy.xp_reward);
        events.push(GameEvent::XpOrbSpawned {
            orb,
            position,
            value: enemy.xp_reward,
        });

        if spawner.on_boss_defeated(entity) {
            events.push(GameEvent::BossDefeated { entity });
        }
    }

    dead.len()
}
