use crate::constants::*;
use crate::systems::weapons::WeaponId;
use glam::Vec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Position component - world coordinates in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Knockback velocity, decays every frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Health component
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current -= amount;
    }
}

/// Enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyType {
    Normal,
    Elite,
    Boss,
}

impl EnemyType {
    pub fn sprite_scale(self) -> f32 {
        match self {
            EnemyType::Normal => NORMAL_SPRITE_SCALE,
            EnemyType::Elite => ELITE_SPRITE_SCALE,
            EnemyType::Boss => BOSS_SPRITE_SCALE,
        }
    }

    pub fn knockback_resistance(self) -> f32 {
        match self {
            EnemyType::Normal => NORMAL_KNOCKBACK_RESISTANCE,
            EnemyType::Elite => ELITE_KNOCKBACK_RESISTANCE,
            EnemyType::Boss => BOSS_KNOCKBACK_RESISTANCE,
        }
    }

    /// Collision radius derived from the sprite footprint
    pub fn hitbox_radius(self) -> f32 {
        ENEMY_SPRITE_DIMENSION * self.sprite_scale() * ENEMY_COLLISION_MULTIPLIER / 2.0
    }
}

/// Enemy component - scaled stats fixed at spawn time
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub enemy_type: EnemyType,
    /// Chase speed in px/s
    pub speed: f32,
    pub xp_reward: u32,
    pub hitbox_radius: f32,
    /// 0 = full knockback, 1 = immune
    pub knockback_resistance: f32,
}

impl Enemy {
    /// Reach for contact damage against the player
    pub fn attack_radius(&self) -> f32 {
        self.hitbox_radius * ENEMY_ATTACK_RADIUS_MULTIPLIER
    }
}

/// Remaining knockback cooldown per weapon that hit this enemy
#[derive(Debug, Clone, Default)]
pub struct KnockbackCooldowns {
    timers: HashMap<WeaponId, f32>,
}

impl KnockbackCooldowns {
    pub fn is_ready(&self, weapon: WeaponId) -> bool {
        self.timers.get(&weapon).map_or(true, |t| *t <= 0.0)
    }

    pub fn start(&mut self, weapon: WeaponId) {
        self.timers.insert(weapon, KNOCKBACK_COOLDOWN);
    }

    pub fn tick(&mut self, dt: f32) {
        self.timers.retain(|_, t| {
            *t -= dt;
            *t > 0.0
        });
    }
}

/// Projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub weapon: WeaponId,
    pub velocity: Vec2,
    pub age: f32,
    pub lifetime: f32,
    pub radius: f32,
    /// Distinct enemies this projectile may damage
    pub piercing: u32,
    pub hit_count: u32,
    /// Enemies already damaged by this projectile instance
    pub hit_enemies: HashSet<Entity>,
}

impl Projectile {
    pub fn remaining_pierce(&self) -> u32 {
        self.piercing.saturating_sub(self.hit_count)
    }

    pub fn is_spent(&self) -> bool {
        self.hit_count >= self.piercing
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Experience orb dropped by a dead enemy
#[derive(Debug, Clone, Copy)]
pub struct XpOrb {
    pub value: u32,
    pub being_pulled: bool,
}

impl XpOrb {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            being_pulled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_radius_by_type() {
        assert!((EnemyType::Normal.hitbox_radius() - 12.8).abs() < 1e-4);
        assert!((EnemyType::Boss.hitbox_radius() - 25.6).abs() < 1e-4);
    }

    #[test]
    fn test_knockback_cooldown_per_weapon() {
        let mut cooldowns = KnockbackCooldowns::default();
        let a = WeaponId(1);
        let b = WeaponId(2);
        cooldowns.start(a);
        assert!(!cooldowns.is_ready(a));
        assert!(cooldowns.is_ready(b));
        cooldowns.tick(KNOCKBACK_COOLDOWN + 0.01);
        assert!(cooldowns.is_ready(a));
    }

    #[test]
    fn test_health_take_damage() {
        let mut health = Health::new(40.0);
        health.take_damage(10.0);
        assert_eq!(health.current, 30.0);
        assert!(!health.is_dead());
        health.take_damage(50.0);
        assert!(health.is_dead());
    }
}
