//! Player hit points, contact damage and invulnerability frames.
//!
//! The player has no entity in the world; the front end owns its position
//! and passes it in every tick.

use crate::components::{Enemy, Position};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::stats::Stat;
use crate::systems::character::CharacterSystem;
use crate::systems::combat::CombatConfig;
use crate::systems::modifiers::ModifierSystem;
use glam::Vec2;
use hecs::World;
use serde::Serialize;

/// Current and max HP plus the post-hit invulnerability timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerVitals {
    pub hp: f32,
    pub max_hp: f32,
    pub invulnerable_for: f32,
}

impl PlayerVitals {
    pub fn new(max_hp: f32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            invulnerable_for: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Change max HP, keeping the current HP ratio
    pub fn sync_max_hp(&mut self, max_hp: f32) {
        if max_hp <= 0.0 || (max_hp - self.max_hp).abs() < f32::EPSILON {
            return;
        }
        let ratio = if self.max_hp > 0.0 { self.hp / self.max_hp } else { 1.0 };
        self.max_hp = max_hp;
        self.hp = ratio * max_hp;
    }

    /// Take one contact hit from any enemy whose attack radius reaches the
    /// player. Returns the damage dealt, or None when invulnerable or untouched.
    pub fn apply_contact_damage(
        &mut self,
        world: &World,
        player_pos: Vec2,
        armor: f32,
        damage_reduction: f32,
        config: &CombatConfig,
        events: &mut EventQueue,
    ) -> Option<f32> {
        if self.is_invulnerable() || self.is_dead() {
            return None;
        }
        if !enemy_in_contact(world, player_pos) {
            return None;
        }

        let amount = mitigated_damage(config.contact_damage, armor, damage_reduction);
        self.hp -= amount;
        self.invulnerable_for = config.invulnerability_duration;
        events.push(GameEvent::PlayerDamaged {
            amount,
            remaining: self.hp,
        });
        log::debug!("Player hit for {} ({}/{})", amount, self.hp, self.max_hp);

        if self.is_dead() {
            log::info!("Player died");
            events.push(GameEvent::PlayerDied);
        }
        Some(amount)
    }
}

/// Damage after flat armor (floored at zero) and then the capped reduction fraction
pub fn mitigated_damage(raw: f32, armor: f32, damage_reduction: f32) -> f32 {
    let reduction = damage_reduction.clamp(0.0, MAX_DAMAGE_REDUCTION);
    ((raw - armor).max(0.0) * (1.0 - reduction)).round()
}

/// Damage reduction is a fraction: its base and both modifier accumulators
/// add up directly instead of scaling a zero base.
pub fn damage_reduction(character: &CharacterSystem, modifiers: &ModifierSystem) -> f32 {
    let base = character.base_stats().damage_reduction;
    (base + modifiers.additive(Stat::DamageReduction) + modifiers.multiplicative(Stat::DamageReduction))
        .min(MAX_DAMAGE_REDUCTION)
}

fn enemy_in_contact(world: &World, player_pos: Vec2) -> bool {
    world
        .query::<(&Position, &Enemy)>()
        .iter()
        .any(|(_, (pos, enemy))| pos.0.distance(player_pos) <= enemy.attack_radius())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawning::enemies;
    use crate::stats::ModifierKind;
    use crate::systems::character::CharacterKind;
    use crate::systems::difficulty::DifficultySystem;

    #[test]
    fn test_mitigation() {
        assert_eq!(mitigated_damage(10.0, 0.0, 0.0), 10.0);
        assert_eq!(mitigated_damage(10.0, 2.0, 0.0), 8.0);
        assert_eq!(mitigated_damage(10.0, 2.0, 0.25), 6.0);
        assert_eq!(mitigated_damage(10.0, 12.0, 0.0), 0.0);
        assert_eq!(mitigated_damage(10.0, 0.0, 0.9), 5.0);
    }

    #[test]
    fn test_knight_damage_reduction_growth() {
        let mut character = CharacterSystem::new(CharacterKind::Knight);
        let mut mods = ModifierSystem::new();
        assert_eq!(damage_reduction(&character, &mods), 0.0);
        character.apply_level_growth(11, &mut mods);
        assert!((damage_reduction(&character, &mods) - 0.10).abs() < 1e-5);
        mods.add_modifier(Stat::DamageReduction, ModifierKind::Add, 0.6);
        assert_eq!(damage_reduction(&character, &mods), MAX_DAMAGE_REDUCTION);
    }

    #[test]
    fn test_contact_damage_and_invulnerability() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        enemies::SKELETON.spawn(&mut world, Vec2::new(10.0, 0.0), &difficulty);
        let config = CombatConfig::default();
        let mut events = EventQueue::new();
        let mut vitals = PlayerVitals::new(100.0);

        assert_eq!(
            vitals.apply_contact_damage(&world, Vec2::ZERO, 0.0, 0.0, &config, &mut events),
            Some(10.0)
        );
        assert_eq!(vitals.hp, 90.0);
        assert!(vitals
            .apply_contact_damage(&world, Vec2::ZERO, 0.0, 0.0, &config, &mut events)
            .is_none());

        vitals.update(PLAYER_INVULNERABILITY_DURATION);
        assert!(vitals
            .apply_contact_damage(&world, Vec2::ZERO, 0.0, 0.0, &config, &mut events)
            .is_some());
        assert_eq!(vitals.hp, 80.0);
    }

    #[test]
    fn test_out_of_reach_enemy_does_no_damage() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        enemies::SKELETON.spawn(&mut world, Vec2::new(100.0, 0.0), &difficulty);
        let mut vitals = PlayerVitals::new(100.0);
        let hit = vitals.apply_contact_damage(
            &world,
            Vec2::ZERO,
            0.0,
            0.0,
            &CombatConfig::default(),
            &mut EventQueue::new(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_death_event() {
        let mut world = World::new();
        let difficulty = DifficultySystem::default();
        enemies::SKELETON.spawn(&mut world, Vec2::ZERO, &difficulty);
        let mut vitals = PlayerVitals::new(10.0);
        let mut events = EventQueue::new();
        vitals.apply_contact_damage(&world, Vec2::ZERO, 0.0, 0.0, &CombatConfig::default(), &mut events);
        assert!(vitals.is_dead());
        assert!(events.drain().any(|e| e == GameEvent::PlayerDied));
    }

    #[test]
    fn test_sync_max_hp_keeps_ratio() {
        let mut vitals = PlayerVitals::new(100.0);
        vitals.hp = 50.0;
        vitals.sync_max_hp(110.0);
        assert_eq!(vitals.max_hp, 110.0);
        assert!((vitals.hp - 55.0).abs() < 1e-4);
    }
}
