//! Passive items: catalog, ownership, and rarity-scaled upgrades.
//!
//! Items never hold stats themselves. Acquiring or upgrading one pushes a
//! modifier into the `ModifierSystem`.

use crate::constants::*;
use crate::stats::{ModifierKind, Rarity, Stat, StatEffect};
use crate::systems::modifiers::ModifierSystem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    ScholarsTomb,
    SoulCatcher,
    RabbitsFoot,
    Gambeson,
    BloodstoneAmulet,
}

/// Definition of a passive item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDef {
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Applied once, on first acquisition
    pub base_effect: StatEffect,
    /// Stat and kind of later upgrades; `value` is the fallback base value
    pub upgrade_scaling: StatEffect,
    /// Upgrade value per rarity (Common..Legendary), overrides the fallback
    #[serde(default)]
    pub rarity_values: Option<[f32; 5]>,
}

impl ItemDef {
    /// Upgrade value for a rarity, from the custom table or `base * (1 + generic)`
    pub fn upgrade_value(&self, rarity: Rarity) -> f32 {
        match self.rarity_values {
            Some(values) => values[rarity.index()],
            None => {
                self.upgrade_scaling.value * (1.0 + GENERIC_RARITY_MULTIPLIERS[rarity.index()])
            }
        }
    }
}

/// Built-in item catalog
pub fn default_items() -> Vec<ItemDef> {
    use ModifierKind::{Add, Mult};
    let def = |kind, name: &str, description: &str, stat, op, base, upgrade, values| ItemDef {
        kind,
        name: name.to_string(),
        description: description.to_string(),
        base_effect: StatEffect::new(stat, op, base),
        upgrade_scaling: StatEffect::new(stat, op, upgrade),
        rarity_values: Some(values),
    };
    vec![
        def(
            ItemKind::ScholarsTomb,
            "Scholar's Tomb",
            "Ancient tome that grants insight.",
            Stat::XpGain,
            Mult,
            0.05,
            0.05,
            [0.025, 0.05, 0.075, 0.10, 0.15],
        ),
        def(
            ItemKind::SoulCatcher,
            "Soul Catcher",
            "Draws experience from further away.",
            Stat::PickupRange,
            Mult,
            0.10,
            0.05,
            [0.05, 0.075, 0.10, 0.125, 0.15],
        ),
        def(
            ItemKind::RabbitsFoot,
            "Rabbit's Foot",
            "Fortune favours the bearer.",
            Stat::Luck,
            Add,
            2.0,
            1.0,
            [1.0, 1.5, 2.0, 2.5, 3.0],
        ),
        def(
            ItemKind::Gambeson,
            "Gambeson",
            "Padded armor that blunts every blow.",
            Stat::Armor,
            Add,
            2.0,
            0.5,
            [0.5, 0.75, 1.0, 1.5, 2.0],
        ),
        def(
            ItemKind::BloodstoneAmulet,
            "Bloodstone Amulet",
            "Pulses with borrowed vitality.",
            Stat::MaxHp,
            Mult,
            0.10,
            0.075,
            [0.075, 0.10, 0.125, 0.15, 0.20],
        ),
    ]
}

/// An item the player owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnedItem {
    pub kind: ItemKind,
    pub level: u32,
}

#[derive(Debug, Clone)]
pub struct ItemSystem {
    catalog: Vec<ItemDef>,
    owned: Vec<OwnedItem>,
    max_slots: usize,
}

impl ItemSystem {
    pub fn new() -> Self {
        Self::with_catalog(default_items())
    }

    pub fn with_catalog(catalog: Vec<ItemDef>) -> Self {
        Self {
            catalog,
            owned: Vec::new(),
            max_slots: MAX_ITEM_SLOTS,
        }
    }

    pub fn def(&self, kind: ItemKind) -> Option<&ItemDef> {
        self.catalog.iter().find(|d| d.kind == kind)
    }

    pub fn catalog(&self) -> &[ItemDef] {
        &self.catalog
    }

    pub fn owned(&self) -> &[OwnedItem] {
        &self.owned
    }

    pub fn is_owned(&self, kind: ItemKind) -> bool {
        self.owned.iter().any(|o| o.kind == kind)
    }

    pub fn level(&self, kind: ItemKind) -> Option<u32> {
        self.owned.iter().find(|o| o.kind == kind).map(|o| o.level)
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn is_full(&self) -> bool {
        self.owned.len() >= self.max_slots
    }

    /// Catalog items not yet owned
    pub fn unlockable(&self) -> Vec<ItemKind> {
        self.catalog
            .iter()
            .map(|d| d.kind)
            .filter(|k| !self.is_owned(*k))
            .collect()
    }

    /// Acquire an item. The base effect is applied only the first time;
    /// adding an owned item just raises its level.
    pub fn add_item(&mut self, kind: ItemKind, modifiers: &mut ModifierSystem) -> bool {
        let Some(def) = self.catalog.iter().find(|d| d.kind == kind) else {
            log::warn!("ItemSystem: unknown item {:?}", kind);
            return false;
        };

        if let Some(owned) = self.owned.iter_mut().find(|o| o.kind == kind) {
            owned.level += 1;
            log::info!("Item added: {} (level {})", def.name, owned.level);
            return true;
        }

        if self.owned.len() >= self.max_slots {
            log::warn!("ItemSystem: no free slot for {}", def.name);
            return false;
        }

        let effect = def.base_effect;
        modifiers.add_modifier(effect.stat, effect.kind, effect.value);
        self.owned.push(OwnedItem { kind, level: 1 });
        log::info!("Item added: {} (level 1)", def.name);
        true
    }

    /// Upgrade value this item would get at a rarity
    pub fn upgrade_value(&self, kind: ItemKind, rarity: Rarity) -> Option<f32> {
        self.def(kind).map(|d| d.upgrade_value(rarity))
    }

    /// Apply one rarity-scaled upgrade level. Returns the value added.
    pub fn upgrade_item(
        &mut self,
        kind: ItemKind,
        rarity: Rarity,
        modifiers: &mut ModifierSystem,
    ) -> Option<f32> {
        let Some(def) = self.catalog.iter().find(|d| d.kind == kind) else {
            log::warn!("ItemSystem: unknown item {:?}", kind);
            return None;
        };
        let Some(owned) = self.owned.iter_mut().find(|o| o.kind == kind) else {
            log::warn!("ItemSystem: cannot upgrade unowned item {}", def.name);
            return None;
        };

        let value = def.upgrade_value(rarity);
        let scaling = def.upgrade_scaling;
        modifiers.add_modifier(scaling.stat, scaling.kind, value);
        owned.level += 1;
        log::info!(
            "Item upgraded: {} (level {}) {} +{}",
            def.name,
            owned.level,
            scaling.stat.display_name(),
            value
        );
        Some(value)
    }

    /// Drop every item and remove the base effects. Upgrade levels are not
    /// tracked individually, so their modifiers stay until the modifier
    /// system itself is reset.
    pub fn reset(&mut self, modifiers: &mut ModifierSystem) {
        for owned in &self.owned {
            if let Some(def) = self.catalog.iter().find(|d| d.kind == owned.kind) {
                let effect = def.base_effect;
                modifiers.remove_modifier(effect.stat, effect.kind, effect.value);
            }
        }
        self.owned.clear();
    }
}

impl Default for ItemSystem {
    fn default() -> Self {
        Self::new()
    }
}
