//! Centralized stat modifier accumulators.
//!
//! Every source (level growth, items, upgrades) pushes flat and percentage
//! modifiers here, and readers resolve `(base + add) * (1 + mult)`.
//! Removal subtracts exactly what the caller says it added; the system does
//! not remember individual sources.

use crate::stats::{ModifierKind, Stat};
use serde::Serialize;

/// Additive and multiplicative totals per stat, plus the two global combat bonuses.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSystem {
    additive: [f32; Stat::COUNT],
    multiplicative: [f32; Stat::COUNT],
    global_crit_chance_bonus: f32,
    global_damage_multiplier: f32,
}

/// Plain copy of every accumulator for debug overlays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierSnapshot {
    pub additive: Vec<(Stat, f32)>,
    pub multiplicative: Vec<(Stat, f32)>,
    pub global_crit_chance_bonus: f32,
    pub global_damage_multiplier: f32,
}

impl ModifierSystem {
    pub fn new() -> Self {
        Self {
            additive: [0.0; Stat::COUNT],
            multiplicative: [0.0; Stat::COUNT],
            global_crit_chance_bonus: 0.0,
            global_damage_multiplier: 0.0,
        }
    }

    /// Accumulate a modifier. Returns false (and changes nothing) if the stat
    /// does not accept this kind of modifier.
    pub fn add_modifier(&mut self, stat: Stat, kind: ModifierKind, value: f32) -> bool {
        let Some(slot) = self.slot_mut(stat, kind) else {
            log::warn!("ModifierSystem: {:?} does not support {:?} modifiers", stat, kind);
            return false;
        };
        *slot += value;
        true
    }

    /// Subtract a value previously passed to `add_modifier`.
    pub fn remove_modifier(&mut self, stat: Stat, kind: ModifierKind, value: f32) -> bool {
        let Some(slot) = self.slot_mut(stat, kind) else {
            log::warn!("ModifierSystem: {:?} does not support {:?} modifiers", stat, kind);
            return false;
        };
        *slot -= value;
        true
    }

    /// Resolve a base value: flat modifiers first, then the multiplier.
    pub fn final_stat(&self, stat: Stat, base: f32) -> f32 {
        (base + self.additive[stat.index()]) * (1.0 + self.multiplicative[stat.index()])
    }

    pub fn additive(&self, stat: Stat) -> f32 {
        self.additive[stat.index()]
    }

    pub fn multiplicative(&self, stat: Stat) -> f32 {
        self.multiplicative[stat.index()]
    }

    pub fn add_global_crit_chance_bonus(&mut self, amount: f32) {
        self.global_crit_chance_bonus += amount;
    }

    pub fn add_global_damage_multiplier(&mut self, amount: f32) {
        self.global_damage_multiplier += amount;
    }

    pub fn global_crit_chance_bonus(&self) -> f32 {
        self.global_crit_chance_bonus
    }

    pub fn global_damage_multiplier(&self) -> f32 {
        self.global_damage_multiplier
    }

    /// Zero every accumulator (new run)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> ModifierSnapshot {
        let collect = |values: &[f32; Stat::COUNT]| {
            Stat::ALL
                .iter()
                .filter(|s| values[s.index()] != 0.0)
                .map(|s| (*s, values[s.index()]))
                .collect()
        };
        ModifierSnapshot {
            additive: collect(&self.additive),
            multiplicative: collect(&self.multiplicative),
            global_crit_chance_bonus: self.global_crit_chance_bonus,
            global_damage_multiplier: self.global_damage_multiplier,
        }
    }

    fn slot_mut(&mut self, stat: Stat, kind: ModifierKind) -> Option<&mut f32> {
        if !stat.supports(kind) {
            return None;
        }
        match kind {
            ModifierKind::Add => Some(&mut self.additive[stat.index()]),
            ModifierKind::Mult => Some(&mut self.multiplicative[stat.index()]),
        }
    }
}

impl Default for ModifierSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_final_stat_without_modifiers_is_base() {
        let mods = ModifierSystem::new();
        assert_eq!(mods.final_stat(Stat::MaxHp, 100.0), 100.0);
    }

    #[test]
    fn test_final_stat_composition() {
        let mut mods = ModifierSystem::new();
        mods.add_modifier(Stat::Armor, ModifierKind::Add, 2.0);
        mods.add_modifier(Stat::Armor, ModifierKind::Add, 0.5);
        mods.add_modifier(Stat::Armor, ModifierKind::Mult, 0.1);
        mods.add_modifier(Stat::Armor, ModifierKind::Mult, 0.15);
        let expected = (4.0 + 2.0 + 0.5) * (1.0 + 0.1 + 0.15);
        assert!((mods.final_stat(Stat::Armor, 4.0) - expected).abs() < EPS);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut mods = ModifierSystem::new();
        mods.add_modifier(Stat::XpGain, ModifierKind::Mult, 0.05);
        let before = mods.clone();
        mods.add_modifier(Stat::XpGain, ModifierKind::Mult, 0.125);
        mods.remove_modifier(Stat::XpGain, ModifierKind::Mult, 0.125);
        assert!((mods.multiplicative(Stat::XpGain) - before.multiplicative(Stat::XpGain)).abs() < EPS);
    }

    #[test]
    fn test_removing_unadded_value_leaves_negative_residual() {
        let mut mods = ModifierSystem::new();
        mods.remove_modifier(Stat::Luck, ModifierKind::Add, 1.0);
        assert_eq!(mods.additive(Stat::Luck), -1.0);
    }

    #[test]
    fn test_unsupported_kind_is_noop() {
        let mut mods = ModifierSystem::new();
        assert!(!mods.add_modifier(Stat::AttackSpeed, ModifierKind::Add, 1.0));
        assert_eq!(mods, ModifierSystem::new());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut mods = ModifierSystem::new();
        mods.add_modifier(Stat::MaxHp, ModifierKind::Mult, 0.2);
        mods.add_global_damage_multiplier(0.3);
        mods.reset();
        assert_eq!(mods, ModifierSystem::new());
    }

    #[test]
    fn test_snapshot_lists_only_nonzero() {
        let mut mods = ModifierSystem::new();
        mods.add_modifier(Stat::Luck, ModifierKind::Add, 2.0);
        let snap = mods.snapshot();
        assert_eq!(snap.additive, vec![(Stat::Luck, 2.0)]);
        assert!(snap.multiplicative.is_empty());
    }
}
