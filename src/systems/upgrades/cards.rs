//! Upgrade cards and their rarity-scaled values.

use crate::constants::*;
use crate::stats::{ModifierKind, Rarity, Stat, WeaponStat};
use crate::systems::items::{ItemDef, ItemKind};
use crate::systems::weapons::{WeaponId, WeaponKind};
use serde::Serialize;

/// What a card changes when picked
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CardTarget {
    Weapon {
        id: WeaponId,
        kind: WeaponKind,
        stat: WeaponStat,
    },
    Item {
        kind: ItemKind,
        stat: Stat,
    },
    UnlockWeapon(WeaponKind),
    UnlockItem(ItemKind),
}

/// Card category, mainly for UI borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Weapon,
    Item,
    Unlock,
    WeaponUnlock,
}

/// One choice offered on level-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeCard {
    pub target: CardTarget,
    pub op: ModifierKind,
    /// Already scaled by rarity
    pub value: f32,
    /// None for unlocks
    pub rarity: Option<Rarity>,
    pub description: String,
    /// Weapon level at generation time
    pub level: Option<u32>,
}

impl UpgradeCard {
    pub fn kind(&self) -> CardKind {
        match self.target {
            CardTarget::Weapon { .. } => CardKind::Weapon,
            CardTarget::Item { .. } => CardKind::Item,
            CardTarget::UnlockItem(_) => CardKind::Unlock,
            CardTarget::UnlockWeapon(_) => CardKind::WeaponUnlock,
        }
    }

    pub fn is_unlock(&self) -> bool {
        matches!(self.kind(), CardKind::Unlock | CardKind::WeaponUnlock)
    }

    pub fn weapon_card(
        id: WeaponId,
        kind: WeaponKind,
        level: u32,
        stat: WeaponStat,
        rarity: Rarity,
    ) -> Self {
        let op = stat.upgrade_kind();
        let value = weapon_upgrade_value(stat, rarity);
        Self {
            target: CardTarget::Weapon { id, kind, stat },
            op,
            value,
            rarity: Some(rarity),
            description: describe(stat.display_name(), op, value, stat == WeaponStat::CritChance),
            level: Some(level),
        }
    }

    pub fn item_card(def: &ItemDef, rarity: Rarity) -> Self {
        let scaling = def.upgrade_scaling;
        let value = def.upgrade_value(rarity);
        Self {
            target: CardTarget::Item {
                kind: def.kind,
                stat: scaling.stat,
            },
            op: scaling.kind,
            value,
            rarity: Some(rarity),
            description: describe(scaling.stat.display_name(), scaling.kind, value, true),
            level: None,
        }
    }

    pub fn unlock_weapon(kind: WeaponKind) -> Self {
        Self {
            target: CardTarget::UnlockWeapon(kind),
            op: ModifierKind::Add,
            value: 0.0,
            rarity: None,
            description: format!("Unlock: {}", kind.name()),
            level: None,
        }
    }

    pub fn unlock_item(def: &ItemDef) -> Self {
        let effect = def.base_effect;
        Self {
            target: CardTarget::UnlockItem(def.kind),
            op: effect.kind,
            value: effect.value,
            rarity: None,
            description: format!(
                "Unlock: {} ({})",
                def.name,
                describe(effect.stat.display_name(), effect.kind, effect.value, true)
            ),
            level: None,
        }
    }
}

/// Per-stat value table (Common..Legendary), if the stat has one
pub fn stat_rarity_table(stat: WeaponStat) -> Option<[f32; 5]> {
    match stat {
        WeaponStat::Damage => Some([0.20, 0.40, 0.60, 0.80, 1.00]),
        WeaponStat::AttackSpeed | WeaponStat::Knockback | WeaponStat::Range => {
            Some([0.05, 0.10, 0.15, 0.20, 0.25])
        }
        WeaponStat::ProjectileSize => Some([0.10, 0.15, 0.20, 0.25, 0.30]),
        WeaponStat::CritChance => Some([0.025, 0.05, 0.075, 0.10, 0.15]),
        WeaponStat::CritDamage => Some([0.15, 0.20, 0.25, 0.30, 0.40]),
        WeaponStat::Piercing => Some([1.0, 1.2, 1.5, 1.7, 2.0]),
        WeaponStat::ProjectileSpeed | WeaponStat::ProjectileCount => None,
    }
}

/// Card value for a weapon stat at a rarity. Attack speed is negated
/// because a lower cooldown is the upgrade.
pub fn weapon_upgrade_value(stat: WeaponStat, rarity: Rarity) -> f32 {
    match stat_rarity_table(stat) {
        Some(table) if stat == WeaponStat::AttackSpeed => -table[rarity.index()],
        Some(table) => table[rarity.index()],
        None => stat.base_upgrade_value() * (1.0 + GENERIC_RARITY_MULTIPLIERS[rarity.index()]),
    }
}

/// "2" for whole numbers, "2.5" otherwise
fn trim_number(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Card text. Percentages are whole numbers unless `fine` asks for one decimal.
fn describe(name: &str, op: ModifierKind, value: f32, fine: bool) -> String {
    match op {
        ModifierKind::Mult => {
            let pct = value.abs() * 100.0;
            let shown = if fine {
                trim_number(pct)
            } else {
                format!("{}", pct.round() as i64)
            };
            format!("+{}% {}", shown, name)
        }
        ModifierKind::Add if name == WeaponStat::CritChance.display_name() => {
            format!("+{}% {}", trim_number(value * 100.0), name)
        }
        ModifierKind::Add => format!("+{} {}", trim_number(value), name),
    }
}
