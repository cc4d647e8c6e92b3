//! Projectile flight and expiry.

use crate::components::{Position, Projectile};
use hecs::{Entity, World};

/// Move projectiles along their velocity, age them, and despawn the ones
/// past their lifetime. Returns how many expired.
pub fn update_projectiles(world: &mut World, dt: f32) -> usize {
    puffin::profile_function!();

    let mut expired: Vec<Entity> = Vec::new();
    for (entity, (pos, projectile)) in world.query_mut::<(&mut Position, &mut Projectile)>() {
        pos.0 += projectile.velocity * dt;
        projectile.age += dt;
        if projectile.is_expired() {
            expired.push(entity);
        }
    }

    for entity in &expired {
        let _ = world.despawn(*entity);
    }
    expired.len()
}

/// Despawn every projectile (used on reset)
pub fn despawn_projectiles(world: &mut World) {
    let projectiles: Vec<Entity> = world.query::<&Projectile>().iter().map(|(e, _)| e).collect();
    for entity in projectiles {
        let _ = world.despawn(entity);
    }
}
