//! Level-up card generation and application.
//!
//! Generation rolls a card count from luck, forces one unlock card when a
//! slot is free, then fills the rest with a balanced type -> target -> stat
//! roll so a weapon with many upgradeable stats cannot crowd out the others.

mod cards;
mod rarity;

pub use cards::*;
pub use rarity::*;

use crate::stats::{Rarity, WeaponStat};
use crate::systems::items::{ItemKind, ItemSystem};
use crate::systems::modifiers::ModifierSystem;
use crate::systems::weapons::{WeaponId, WeaponKind, WeaponSystem};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// One upgrade that could be offered, before rarity is rolled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeOption {
    Weapon { id: WeaponId, stat: WeaponStat },
    Item(ItemKind),
}

/// Systems an upgrade card can modify
pub struct UpgradeTargets<'a> {
    pub weapons: &'a mut WeaponSystem,
    pub items: &'a mut ItemSystem,
    pub modifiers: &'a mut ModifierSystem,
}

/// What applying a card did
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum UpgradeOutcome {
    WeaponUpgraded {
        id: WeaponId,
        stat: WeaponStat,
        old_value: f32,
        new_value: f32,
    },
    ItemUpgraded {
        kind: ItemKind,
        value: f32,
    },
    WeaponUnlocked {
        kind: WeaponKind,
        id: WeaponId,
    },
    ItemUnlocked(ItemKind),
}

/// Pick one option with the three-stage roll and remove it from the pool.
///
/// 1. weapon vs item, 50/50 when both exist
/// 2. a weapon uniformly among weapons still in the pool
/// 3. an entry uniformly among that weapon's (or the items') remaining entries
pub fn select_balanced_upgrade(
    pool: &mut Vec<UpgradeOption>,
    rng: &mut impl Rng,
) -> Option<UpgradeOption> {
    let has_weapon = pool.iter().any(|o| matches!(o, UpgradeOption::Weapon { .. }));
    let has_item = pool.iter().any(|o| matches!(o, UpgradeOption::Item(_)));
    let pick_weapon = match (has_weapon, has_item) {
        (false, false) => return None,
        (true, true) => rng.gen_bool(0.5),
        (weapon, _) => weapon,
    };

    let candidates: Vec<usize> = if pick_weapon {
        let mut ids: Vec<WeaponId> = pool
            .iter()
            .filter_map(|o| match o {
                UpgradeOption::Weapon { id, .. } => Some(*id),
                UpgradeOption::Item(_) => None,
            })
            .collect();
        ids.sort();
        ids.dedup();
        let chosen = *ids.choose(rng)?;
        pool.iter()
            .enumerate()
            .filter(|(_, o)| matches!(o, UpgradeOption::Weapon { id, .. } if *id == chosen))
            .map(|(i, _)| i)
            .collect()
    } else {
        pool.iter()
            .enumerate()
            .filter(|(_, o)| matches!(o, UpgradeOption::Item(_)))
            .map(|(i, _)| i)
            .collect()
    };

    let index = *candidates.choose(rng)?;
    Some(pool.remove(index))
}

/// Card generation and application
#[derive(Debug, Clone)]
pub struct UpgradeSystem {
    testing_mode: bool,
}

impl UpgradeSystem {
    /// Card values are multiplied by this in testing mode
    pub const TESTING_MULTIPLIER: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            testing_mode: false,
        }
    }

    pub fn testing_mode(&self) -> bool {
        self.testing_mode
    }

    pub fn toggle_testing_mode(&mut self) -> bool {
        self.testing_mode = !self.testing_mode;
        log::info!("Upgrade testing mode {}", if self.testing_mode { "enabled" } else { "disabled" });
        self.testing_mode
    }

    /// Every weapon stat and owned item upgrade currently possible
    pub fn upgrade_pool(&self, weapons: &WeaponSystem, items: &ItemSystem) -> Vec<UpgradeOption> {
        let mut pool = Vec::new();
        for weapon in weapons.iter() {
            for &stat in weapon.kind.upgradeable_stats() {
                pool.push(UpgradeOption::Weapon { id: weapon.id, stat });
            }
        }
        for owned in items.owned() {
            pool.push(UpgradeOption::Item(owned.kind));
        }
        pool
    }

    /// Roll the cards offered for one level-up
    pub fn generate_upgrade_cards(
        &self,
        weapons: &WeaponSystem,
        items: &ItemSystem,
        luck: f32,
        rng: &mut impl Rng,
    ) -> Vec<UpgradeCard> {
        let card_count = calculate_card_count(luck, rng);
        let mut cards = Vec::with_capacity(card_count);

        let mut unlocks: Vec<UpgradeCard> = Vec::new();
        if !weapons.is_full() {
            unlocks.extend(weapons.unlockable().into_iter().map(UpgradeCard::unlock_weapon));
        }
        if !items.is_full() {
            unlocks.extend(
                items
                    .unlockable()
                    .into_iter()
                    .filter_map(|k| items.def(k))
                    .map(UpgradeCard::unlock_item),
            );
        }

        let mut exclude_weapons = false;
        let mut exclude_items = false;
        if !unlocks.is_empty() {
            let forced = unlocks.swap_remove(rng.gen_range(0..unlocks.len()));
            match forced.kind() {
                CardKind::WeaponUnlock => exclude_items = items.is_full(),
                _ => exclude_weapons = weapons.is_full(),
            }
            cards.push(forced);
        }

        let mut pool: Vec<UpgradeOption> = self
            .upgrade_pool(weapons, items)
            .into_iter()
            .filter(|o| match o {
                UpgradeOption::Weapon { .. } => !exclude_weapons,
                UpgradeOption::Item(_) => !exclude_items,
            })
            .collect();

        while cards.len() < card_count {
            let Some(option) = select_balanced_upgrade(&mut pool, rng) else {
                break;
            };
            let rarity = calculate_rarity(luck, rng);
            let card = match option {
                UpgradeOption::Weapon { id, stat } => weapons
                    .get(id)
                    .map(|w| UpgradeCard::weapon_card(id, w.kind, w.level, stat, rarity)),
                UpgradeOption::Item(kind) => items.def(kind).map(|d| UpgradeCard::item_card(d, rarity)),
            };
            if let Some(mut card) = card {
                if self.testing_mode {
                    card.value *= Self::TESTING_MULTIPLIER;
                }
                cards.push(card);
            }
        }

        log::debug!("Generated {} upgrade cards (luck {:.1})", cards.len(), luck);
        cards
    }

    /// Apply a chosen card. None (with a warning) if its target no longer exists.
    pub fn apply_upgrade(
        &self,
        card: &UpgradeCard,
        targets: &mut UpgradeTargets<'_>,
    ) -> Option<UpgradeOutcome> {
        match card.target {
            CardTarget::Weapon { id, stat, .. } => {
                let (old_value, new_value) = targets.weapons.apply_upgrade(id, stat, card.op, card.value)?;
                Some(UpgradeOutcome::WeaponUpgraded {
                    id,
                    stat,
                    old_value,
                    new_value,
                })
            }
            CardTarget::Item { kind, .. } => {
                let rarity = card.rarity.unwrap_or(Rarity::Common);
                let value = targets.items.upgrade_item(kind, rarity, targets.modifiers)?;
                // Testing mode scales the shown value; top up the difference
                if self.testing_mode {
                    if let Some(def) = targets.items.def(kind) {
                        let stat = def.upgrade_scaling.stat;
                        targets.modifiers.add_modifier(stat, card.op, card.value - value);
                    }
                }
                Some(UpgradeOutcome::ItemUpgraded {
                    kind,
                    value: if self.testing_mode { card.value } else { value },
                })
            }
            CardTarget::UnlockWeapon(kind) => {
                let id = targets.weapons.equip(kind)?;
                log::info!("Unlocked weapon {}", kind.name());
                Some(UpgradeOutcome::WeaponUnlocked { kind, id })
            }
            CardTarget::UnlockItem(kind) => {
                if targets.items.is_owned(kind) {
                    log::warn!("UpgradeSystem: {:?} is already owned", kind);
                    return None;
                }
                if !targets.items.add_item(kind, targets.modifiers) {
                    return None;
                }
                log::info!("Unlocked item {:?}", kind);
                Some(UpgradeOutcome::ItemUnlocked(kind))
            }
        }
    }
}

impl Default for UpgradeSystem {
    fn default() -> Self {
        Self::new()
    }
}
