//! Weapon templates, upgrade stacking, and the firing state machine.
//!
//! A weapon keeps its template stats untouched and accumulates upgrade
//! deltas separately. Runtime stats are always recomputed from the template,
//! so two +10% damage upgrades give +20%, not +21%.

use crate::components::{Position, Projectile};
use crate::constants::*;
use crate::stats::{ModifierKind, WeaponStat};
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable identity of an equipped weapon (used as the knockback cooldown key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Sword,
    Longbow,
    MagicStaff,
    ThrowingAxe,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Sword,
        WeaponKind::Longbow,
        WeaponKind::MagicStaff,
        WeaponKind::ThrowingAxe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Sword => "Sword",
            WeaponKind::Longbow => "Longbow",
            WeaponKind::MagicStaff => "Magic Staff",
            WeaponKind::ThrowingAxe => "Throwing Axe",
        }
    }

    /// Template stats for a fresh weapon of this kind
    pub fn base_stats(self) -> WeaponStats {
        match self {
            WeaponKind::Sword => WeaponStats {
                damage: 10.0,
                attack_speed: 0.5,
                range: 0.375,
                piercing: 1.0,
                projectile_speed: 600.0,
                projectile_size: 0.03,
                crit_chance: 0.1,
                crit_damage: 2.0,
                knockback: 1.0,
                projectile_count: 1.0,
            },
            WeaponKind::Longbow => WeaponStats {
                damage: 20.0,
                attack_speed: 0.8,
                range: 1.0,
                piercing: 3.0,
                projectile_speed: 800.0,
                projectile_size: 0.02,
                crit_chance: 0.15,
                crit_damage: 2.0,
                knockback: 0.5,
                projectile_count: 1.0,
            },
            WeaponKind::MagicStaff => WeaponStats {
                damage: 8.0,
                attack_speed: 0.6,
                range: 0.8,
                piercing: 1.0,
                projectile_speed: 500.0,
                projectile_size: 0.025,
                crit_chance: 0.05,
                crit_damage: 1.5,
                knockback: 0.0,
                projectile_count: 3.0,
            },
            WeaponKind::ThrowingAxe => WeaponStats {
                damage: 40.0,
                attack_speed: 1.5,
                range: 0.6,
                piercing: 5.0,
                projectile_speed: 450.0,
                projectile_size: 0.04,
                crit_chance: 0.1,
                crit_damage: 2.5,
                knockback: 3.0,
                projectile_count: 1.0,
            },
        }
    }

    /// Edge length of the projectile texture in px
    pub fn sprite_dimension(self) -> f32 {
        match self {
            WeaponKind::Sword => 1024.0,
            WeaponKind::Longbow => 512.0,
            WeaponKind::MagicStaff => 512.0,
            WeaponKind::ThrowingAxe => 768.0,
        }
    }

    /// Stats that may appear on this weapon's upgrade cards
    pub fn upgradeable_stats(self) -> &'static [WeaponStat] {
        use WeaponStat::*;
        match self {
            WeaponKind::Sword | WeaponKind::ThrowingAxe => &[
                Damage,
                AttackSpeed,
                Knockback,
                Range,
                ProjectileSize,
                CritChance,
                CritDamage,
                Piercing,
            ],
            WeaponKind::Longbow => &[
                Damage,
                AttackSpeed,
                Knockback,
                Range,
                ProjectileSpeed,
                CritChance,
                CritDamage,
                Piercing,
            ],
            WeaponKind::MagicStaff => &[
                Damage,
                AttackSpeed,
                Range,
                ProjectileSize,
                CritChance,
                CritDamage,
                ProjectileCount,
            ],
        }
    }
}

/// Full set of weapon stats (template or resolved)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponStats {
    pub damage: f32,
    /// Cooldown between shots in seconds (lower is faster)
    pub attack_speed: f32,
    /// Lifetime multiplier
    pub range: f32,
    pub piercing: f32,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub knockback: f32,
    pub projectile_count: f32,
}

impl WeaponStats {
    pub fn get(&self, stat: WeaponStat) -> f32 {
        match stat {
            WeaponStat::Damage => self.damage,
            WeaponStat::AttackSpeed => self.attack_speed,
            WeaponStat::Range => self.range,
            WeaponStat::Piercing => self.piercing,
            WeaponStat::ProjectileSpeed => self.projectile_speed,
            WeaponStat::ProjectileSize => self.projectile_size,
            WeaponStat::CritChance => self.crit_chance,
            WeaponStat::CritDamage => self.crit_damage,
            WeaponStat::Knockback => self.knockback,
            WeaponStat::ProjectileCount => self.projectile_count,
        }
    }

    fn get_mut(&mut self, stat: WeaponStat) -> &mut f32 {
        match stat {
            WeaponStat::Damage => &mut self.damage,
            WeaponStat::AttackSpeed => &mut self.attack_speed,
            WeaponStat::Range => &mut self.range,
            WeaponStat::Piercing => &mut self.piercing,
            WeaponStat::ProjectileSpeed => &mut self.projectile_speed,
            WeaponStat::ProjectileSize => &mut self.projectile_size,
            WeaponStat::CritChance => &mut self.crit_chance,
            WeaponStat::CritDamage => &mut self.crit_damage,
            WeaponStat::Knockback => &mut self.knockback,
            WeaponStat::ProjectileCount => &mut self.projectile_count,
        }
    }

    /// Whole number of enemies a projectile may hit (at least one)
    pub fn piercing_count(&self) -> u32 {
        self.piercing.floor().max(1.0) as u32
    }

    /// Whole number of shots per attack (at least one)
    pub fn shot_count(&self) -> u32 {
        self.projectile_count.floor().max(1.0) as u32
    }

    /// Distance a projectile covers before expiring
    pub fn effective_range(&self) -> f32 {
        self.projectile_speed * self.range * PROJECTILE_LIFETIME_PER_RANGE
    }
}

/// Cumulative upgrade totals per stat
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModifierDeltas {
    pub flat: [f32; WeaponStat::COUNT],
    pub percent: [f32; WeaponStat::COUNT],
}

impl ModifierDeltas {
    pub fn add(&mut self, stat: WeaponStat, kind: ModifierKind, value: f32) {
        match kind {
            ModifierKind::Add => self.flat[stat.index()] += value,
            ModifierKind::Mult => self.percent[stat.index()] += value,
        }
    }

    pub fn total(&self, stat: WeaponStat) -> f32 {
        self.flat[stat.index()] + self.percent[stat.index()]
    }
}

/// Runtime stats from template plus deltas. The cooldown never drops below
/// `MIN_ATTACK_COOLDOWN` however negative its modifier gets.
pub fn resolve(base: &WeaponStats, deltas: &ModifierDeltas) -> WeaponStats {
    let mut out = *base;
    for stat in WeaponStat::ALL {
        let i = stat.index();
        *out.get_mut(stat) = (base.get(stat) + deltas.flat[i]) * (1.0 + deltas.percent[i]);
    }
    out.attack_speed = out.attack_speed.max(MIN_ATTACK_COOLDOWN);
    out
}

/// Result of a damage roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub amount: f32,
    pub is_crit: bool,
}

/// An equipped weapon instance
#[derive(Debug, Clone)]
pub struct Weapon {
    pub id: WeaponId,
    pub kind: WeaponKind,
    pub level: u32,
    base: WeaponStats,
    deltas: ModifierDeltas,
    stats: WeaponStats,
    fire_timer: f32,
    volley_remaining: u32,
    volley_timer: f32,
    volley_targets: Vec<Entity>,
}

impl Weapon {
    pub fn new(id: WeaponId, kind: WeaponKind) -> Self {
        let base = kind.base_stats();
        let deltas = ModifierDeltas::default();
        Self {
            id,
            kind,
            level: 1,
            base,
            deltas,
            stats: resolve(&base, &deltas),
            fire_timer: 0.0,
            volley_remaining: 0,
            volley_timer: 0.0,
            volley_targets: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn base_stats(&self) -> &WeaponStats {
        &self.base
    }

    pub fn deltas(&self) -> &ModifierDeltas {
        &self.deltas
    }

    pub fn update(&mut self, dt: f32) {
        self.fire_timer += dt;
        if self.volley_remaining > 0 {
            self.volley_timer += dt;
        }
    }

    /// Cooldown has elapsed and no volley is in progress
    pub fn can_fire(&self) -> bool {
        self.volley_remaining == 0 && self.fire_timer >= self.stats.attack_speed
    }

    pub fn reset_timer(&mut self) {
        self.fire_timer = 0.0;
    }

    /// Roll crit and compute damage. The base hit is rounded before the
    /// global multiplier is applied.
    pub fn calculate_damage(
        &self,
        global_crit_bonus: f32,
        global_damage_multiplier: f32,
        rng: &mut impl Rng,
    ) -> DamageRoll {
        let is_crit = rng.gen::<f32>() < self.stats.crit_chance + global_crit_bonus;
        let raw = if is_crit {
            self.stats.damage * self.stats.crit_damage
        } else {
            self.stats.damage
        };
        DamageRoll {
            amount: raw.round() * (1.0 + global_damage_multiplier),
            is_crit,
        }
    }

    /// Stack an already rarity-scaled upgrade and recompute from the template.
    /// Returns the stat's value before and after.
    pub fn apply_upgrade(&mut self, stat: WeaponStat, kind: ModifierKind, value: f32) -> (f32, f32) {
        let old = self.stats.get(stat);
        self.deltas.add(stat, kind, value);
        self.stats = resolve(&self.base, &self.deltas);
        self.level += 1;
        let new = self.stats.get(stat);
        log::info!(
            "{} upgraded: {} {:.3} -> {:.3} (level {})",
            self.name(),
            stat.display_name(),
            old,
            new,
            self.level
        );
        (old, new)
    }

    /// Spawn a single projectile if the cooldown allows it
    pub fn fire(&mut self, world: &mut World, origin: Vec2, angle: f32) -> Option<Entity> {
        if !self.can_fire() {
            return None;
        }
        let projectile = self.spawn_projectile(world, origin, angle);
        self.reset_timer();
        Some(projectile)
    }

    /// Start a sequential volley of `shot_count` shots; the first is due immediately
    pub fn begin_volley(&mut self) {
        self.volley_remaining = self.stats.shot_count();
        self.volley_timer = VOLLEY_SHOT_INTERVAL;
        self.volley_targets.clear();
        self.reset_timer();
    }

    pub fn volley_in_progress(&self) -> bool {
        self.volley_remaining > 0
    }

    pub fn volley_shot_due(&self) -> bool {
        self.volley_remaining > 0 && self.volley_timer >= VOLLEY_SHOT_INTERVAL
    }

    /// Enemies already aimed at by the current volley
    pub fn volley_targets(&self) -> &[Entity] {
        &self.volley_targets
    }

    pub fn fire_volley_shot(
        &mut self,
        world: &mut World,
        origin: Vec2,
        angle: f32,
        target: Entity,
    ) -> Entity {
        self.volley_timer -= VOLLEY_SHOT_INTERVAL;
        self.volley_remaining = self.volley_remaining.saturating_sub(1);
        self.volley_targets.push(target);
        if self.volley_remaining == 0 {
            self.volley_targets.clear();
        }
        self.spawn_projectile(world, origin, angle)
    }

    /// Abandon the rest of a volley (no targets left)
    pub fn cancel_volley(&mut self) {
        self.volley_remaining = 0;
        self.volley_timer = 0.0;
        self.volley_targets.clear();
    }

    pub fn projectile_radius(&self) -> f32 {
        self.kind.sprite_dimension() * self.stats.projectile_size * PROJECTILE_COLLISION_MULTIPLIER
            / 2.0
    }

    fn spawn_projectile(&self, world: &mut World, origin: Vec2, angle: f32) -> Entity {
        let velocity = Vec2::from_angle(angle) * self.stats.projectile_speed;
        world.spawn((
            Position(origin),
            Projectile {
                weapon: self.id,
                velocity,
                age: 0.0,
                lifetime: self.stats.range * PROJECTILE_LIFETIME_PER_RANGE,
                radius: self.projectile_radius(),
                piercing: self.stats.piercing_count(),
                hit_count: 0,
                hit_enemies: HashSet::new(),
            },
        ))
    }
}

/// Equipped weapons, slot-limited
#[derive(Debug, Clone)]
pub struct WeaponSystem {
    weapons: Vec<Weapon>,
    next_id: u32,
    max_slots: usize,
}

impl WeaponSystem {
    pub fn new() -> Self {
        Self {
            weapons: Vec::new(),
            next_id: 0,
            max_slots: MAX_WEAPON_SLOTS,
        }
    }

    /// Equip a new weapon. Rejected (with a warning) when slots are full or
    /// the kind is already equipped.
    pub fn equip(&mut self, kind: WeaponKind) -> Option<WeaponId> {
        if self.is_full() {
            log::warn!("WeaponSystem: no free slot for {}", kind.name());
            return None;
        }
        if self.has(kind) {
            log::warn!("WeaponSystem: {} already equipped", kind.name());
            return None;
        }
        let id = WeaponId(self.next_id);
        self.next_id += 1;
        self.weapons.push(Weapon::new(id, kind));
        log::info!("Equipped {} ({} / {})", kind.name(), self.weapons.len(), self.max_slots);
        Some(id)
    }

    pub fn get(&self, id: WeaponId) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WeaponId) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Weapon> {
        self.weapons.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn is_full(&self) -> bool {
        self.weapons.len() >= self.max_slots
    }

    pub fn has(&self, kind: WeaponKind) -> bool {
        self.weapons.iter().any(|w| w.kind == kind)
    }

    /// Kinds not yet equipped
    pub fn unlockable(&self) -> Vec<WeaponKind> {
        WeaponKind::ALL
            .into_iter()
            .filter(|k| !self.has(*k))
            .collect()
    }

    /// Apply an upgrade to an equipped weapon. None if the id is unknown.
    pub fn apply_upgrade(
        &mut self,
        id: WeaponId,
        stat: WeaponStat,
        kind: ModifierKind,
        value: f32,
    ) -> Option<(f32, f32)> {
        let Some(weapon) = self.get_mut(id) else {
            log::warn!("WeaponSystem: unknown weapon {:?}", id);
            return None;
        };
        Some(weapon.apply_upgrade(stat, kind, value))
    }

    /// Unequip everything
    pub fn reset(&mut self) {
        self.weapons.clear();
        self.next_id = 0;
    }
}

impl Default for WeaponSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_percent_upgrades_stack_additively() {
        let mut sword = Weapon::new(WeaponId(0), WeaponKind::Sword);
        sword.apply_upgrade(WeaponStat::Damage, ModifierKind::Mult, 0.10);
        sword.apply_upgrade(WeaponStat::Damage, ModifierKind::Mult, 0.10);
        assert!((sword.stats().damage - 12.0).abs() < EPS);
        assert_eq!(sword.base_stats().damage, 10.0);
        assert_eq!(sword.level, 3);
    }

    #[test]
    fn test_flat_upgrade_adds_to_base() {
        let mut bow = Weapon::new(WeaponId(0), WeaponKind::Longbow);
        let (old, new) = bow.apply_upgrade(WeaponStat::Piercing, ModifierKind::Add, 1.5);
        assert_eq!(old, 3.0);
        assert_eq!(new, 4.5);
        assert_eq!(bow.stats().piercing_count(), 4);
    }

    #[test]
    fn test_attack_speed_floor() {
        let mut sword = Weapon::new(WeaponId(0), WeaponKind::Sword);
        for _ in 0..10 {
            sword.apply_upgrade(WeaponStat::AttackSpeed, ModifierKind::Mult, -0.25);
        }
        assert_eq!(sword.stats().attack_speed, MIN_ATTACK_COOLDOWN);
    }

    #[test]
    fn test_resolve_is_pure() {
        let base = WeaponKind::Sword.base_stats();
        let mut deltas = ModifierDeltas::default();
        deltas.add(WeaponStat::Range, ModifierKind::Mult, 0.2);
        let a = resolve(&base, &deltas);
        let b = resolve(&base, &deltas);
        assert_eq!(a, b);
        assert!((a.range - 0.45).abs() < EPS);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut world = World::new();
        let mut sword = Weapon::new(WeaponId(0), WeaponKind::Sword);
        assert!(sword.fire(&mut world, Vec2::ZERO, 0.0).is_none());
        sword.update(0.5);
        assert!(sword.can_fire());
        let projectile = sword.fire(&mut world, Vec2::ZERO, 0.0);
        assert!(projectile.is_some());
        assert!(!sword.can_fire());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_projectile_geometry() {
        let mut world = World::new();
        let mut sword = Weapon::new(WeaponId(7), WeaponKind::Sword);
        sword.update(1.0);
        let entity = sword.fire(&mut world, Vec2::ZERO, 0.0).unwrap();
        let projectile = world.get::<&Projectile>(entity).unwrap();
        assert_eq!(projectile.weapon, WeaponId(7));
        assert!((projectile.lifetime - 0.5625).abs() < EPS);
        assert!((projectile.radius - 1024.0 * 0.03 * 0.9 / 2.0).abs() < EPS);
        assert!((projectile.velocity.x - 600.0).abs() < EPS);
    }

    #[test]
    fn test_damage_roll_crit_and_global_multiplier() {
        let mut rng = StdRng::seed_from_u64(1);
        let sword = Weapon::new(WeaponId(0), WeaponKind::Sword);
        // Guaranteed crit
        let roll = sword.calculate_damage(1.0, 0.5, &mut rng);
        assert!(roll.is_crit);
        assert!((roll.amount - 30.0).abs() < EPS);
        // Guaranteed non-crit
        let roll = sword.calculate_damage(-1.0, 0.0, &mut rng);
        assert!(!roll.is_crit);
        assert_eq!(roll.amount, 10.0);
    }

    #[test]
    fn test_volley_sequence() {
        let mut world = World::new();
        let mut staff = Weapon::new(WeaponId(0), WeaponKind::MagicStaff);
        staff.update(1.0);
        assert!(staff.can_fire());
        staff.begin_volley();
        assert!(!staff.can_fire());
        let target = world.spawn((Position::new(10.0, 0.0),));
        assert!(staff.volley_shot_due());
        staff.fire_volley_shot(&mut world, Vec2::ZERO, 0.0, target);
        assert!(!staff.volley_shot_due());
        staff.update(VOLLEY_SHOT_INTERVAL);
        assert!(staff.volley_shot_due());
        staff.fire_volley_shot(&mut world, Vec2::ZERO, 0.0, target);
        staff.update(VOLLEY_SHOT_INTERVAL);
        staff.fire_volley_shot(&mut world, Vec2::ZERO, 0.0, target);
        assert!(!staff.volley_in_progress());
        assert!(staff.volley_targets().is_empty());
    }

    #[test]
    fn test_loadout_slot_limit() {
        let mut weapons = WeaponSystem::new();
        assert!(weapons.equip(WeaponKind::Sword).is_some());
        assert!(weapons.equip(WeaponKind::Sword).is_none());
        assert!(weapons.equip(WeaponKind::Longbow).is_some());
        assert!(weapons.equip(WeaponKind::MagicStaff).is_some());
        assert!(weapons.is_full());
        assert!(weapons.equip(WeaponKind::ThrowingAxe).is_none());
        assert_eq!(weapons.len(), 3);
        assert_eq!(weapons.unlockable(), vec![WeaponKind::ThrowingAxe]);
    }
}
