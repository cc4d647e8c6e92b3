//! Stat vocabulary shared by every subsystem.
//!
//! Stats are closed enums rather than string keys, so a typo is a compile
//! error. The only place names are parsed is config deserialization.

use serde::{Deserialize, Serialize};

/// Player-facing stats tracked by the modifier system.
///
/// The first seven are character stats; the rest are weapon stats that can
/// also carry global modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    #[serde(rename = "maxHP")]
    MaxHp,
    Armor,
    DamageReduction,
    MoveSpeed,
    PickupRange,
    XpGain,
    Luck,
    Damage,
    AttackSpeed,
    Range,
    Piercing,
    ProjectileSpeed,
    ProjectileSize,
    CritChance,
    CritDamage,
    Knockback,
}

impl Stat {
    pub const COUNT: usize = 16;

    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::MaxHp,
        Stat::Armor,
        Stat::DamageReduction,
        Stat::MoveSpeed,
        Stat::PickupRange,
        Stat::XpGain,
        Stat::Luck,
        Stat::Damage,
        Stat::AttackSpeed,
        Stat::Range,
        Stat::Piercing,
        Stat::ProjectileSpeed,
        Stat::ProjectileSize,
        Stat::CritChance,
        Stat::CritDamage,
        Stat::Knockback,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether flat modifiers are meaningful for this stat.
    /// Cooldown, range and crit multiplier only scale by percentage.
    pub fn supports(self, kind: ModifierKind) -> bool {
        match kind {
            ModifierKind::Mult => true,
            ModifierKind::Add => !matches!(self, Stat::AttackSpeed | Stat::Range | Stat::CritDamage),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Stat::MaxHp => "Max HP",
            Stat::Armor => "Armor",
            Stat::DamageReduction => "Damage Reduction",
            Stat::MoveSpeed => "Move Speed",
            Stat::PickupRange => "Pickup Range",
            Stat::XpGain => "XP Gain",
            Stat::Luck => "Luck",
            Stat::Damage => "Damage",
            Stat::AttackSpeed => "Attack Speed",
            Stat::Range => "Range",
            Stat::Piercing => "Piercing",
            Stat::ProjectileSpeed => "Projectile Speed",
            Stat::ProjectileSize => "Projectile Size",
            Stat::CritChance => "Critical Chance",
            Stat::CritDamage => "Critical Damage",
            Stat::Knockback => "Knockback",
        }
    }
}

/// How a modifier combines with the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// Flat value added before multiplication
    Add,
    /// Fraction added to the multiplier (0.1 = +10%)
    Mult,
}

/// Per-weapon stats. Every weapon instance carries its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponStat {
    Damage,
    AttackSpeed,
    Range,
    Piercing,
    ProjectileSpeed,
    ProjectileSize,
    CritChance,
    CritDamage,
    Knockback,
    ProjectileCount,
}

impl WeaponStat {
    pub const COUNT: usize = 10;

    pub const ALL: [WeaponStat; WeaponStat::COUNT] = [
        WeaponStat::Damage,
        WeaponStat::AttackSpeed,
        WeaponStat::Range,
        WeaponStat::Piercing,
        WeaponStat::ProjectileSpeed,
        WeaponStat::ProjectileSize,
        WeaponStat::CritChance,
        WeaponStat::CritDamage,
        WeaponStat::Knockback,
        WeaponStat::ProjectileCount,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The modifier kind upgrade cards use for this stat.
    /// Counts and chances stack flat; everything else stacks as a percentage.
    pub fn upgrade_kind(self) -> ModifierKind {
        match self {
            WeaponStat::Piercing | WeaponStat::CritChance | WeaponStat::ProjectileCount => {
                ModifierKind::Add
            }
            _ => ModifierKind::Mult,
        }
    }

    /// Unscaled card value before rarity is applied.
    /// Attack speed is negative because a lower cooldown is faster.
    pub fn base_upgrade_value(self) -> f32 {
        match self {
            WeaponStat::Damage => 0.10,
            WeaponStat::AttackSpeed => -0.10,
            WeaponStat::Range => 0.05,
            WeaponStat::Piercing => 1.0,
            WeaponStat::ProjectileSpeed => 0.10,
            WeaponStat::ProjectileSize => 0.10,
            WeaponStat::CritChance => 0.025,
            WeaponStat::CritDamage => 0.15,
            WeaponStat::Knockback => 0.10,
            WeaponStat::ProjectileCount => 1.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WeaponStat::Damage => "Damage",
            WeaponStat::AttackSpeed => "Attack Speed",
            WeaponStat::Range => "Range",
            WeaponStat::Piercing => "Piercing",
            WeaponStat::ProjectileSpeed => "Projectile Speed",
            WeaponStat::ProjectileSize => "Projectile Size",
            WeaponStat::CritChance => "Critical Chance",
            WeaponStat::CritDamage => "Critical Damage",
            WeaponStat::Knockback => "Knockback",
            WeaponStat::ProjectileCount => "Projectile",
        }
    }
}

/// Upgrade rarity tiers, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Border color for card UIs (hex RGB)
    pub fn color(self) -> u32 {
        match self {
            Rarity::Common => 0x808080,
            Rarity::Uncommon => 0x00FF00,
            Rarity::Rare => 0x0080FF,
            Rarity::Epic => 0xA020F0,
            Rarity::Legendary => 0xFFD700,
        }
    }
}

/// A single (stat, kind, value) effect, used by item configs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatEffect {
    pub stat: Stat,
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    pub value: f32,
}

impl StatEffect {
    pub const fn new(stat: Stat, kind: ModifierKind, value: f32) -> Self {
        Self { stat, kind, value }
    }
}

/// Character base stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    #[serde(rename = "maxHP")]
    pub max_hp: f32,
    pub armor: f32,
    pub damage_reduction: f32,
    pub move_speed: f32,
    pub pickup_range: f32,
    pub xp_gain: f32,
    pub luck: f32,
}

impl CharacterStats {
    pub const STATS: [Stat; 7] = [
        Stat::MaxHp,
        Stat::Armor,
        Stat::DamageReduction,
        Stat::MoveSpeed,
        Stat::PickupRange,
        Stat::XpGain,
        Stat::Luck,
    ];

    /// Base value for a stat. Weapon stats have no character base and read as zero.
    pub fn get(&self, stat: Stat) -> f32 {
        match stat {
            Stat::MaxHp => self.max_hp,
            Stat::Armor => self.armor,
            Stat::DamageReduction => self.damage_reduction,
            Stat::MoveSpeed => self.move_speed,
            Stat::PickupRange => self.pickup_range,
            Stat::XpGain => self.xp_gain,
            Stat::Luck => self.luck,
            _ => 0.0,
        }
    }

    fn get_mut(&mut self, stat: Stat) -> Option<&mut f32> {
        match stat {
            Stat::MaxHp => Some(&mut self.max_hp),
            Stat::Armor => Some(&mut self.armor),
            Stat::DamageReduction => Some(&mut self.damage_reduction),
            Stat::MoveSpeed => Some(&mut self.move_speed),
            Stat::PickupRange => Some(&mut self.pickup_range),
            Stat::XpGain => Some(&mut self.xp_gain),
            Stat::Luck => Some(&mut self.luck),
            _ => None,
        }
    }

    /// Copy with every stat passed through `f`
    pub fn map(&self, mut f: impl FnMut(Stat, f32) -> f32) -> Self {
        let mut out = *self;
        for stat in Self::STATS {
            if let Some(slot) = out.get_mut(stat) {
                *slot = f(stat, *slot);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_indices_match_all_table() {
        for (i, stat) in Stat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
        for (i, stat) in WeaponStat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }

    #[test]
    fn test_percentage_only_stats_reject_flat() {
        assert!(!Stat::AttackSpeed.supports(ModifierKind::Add));
        assert!(!Stat::CritDamage.supports(ModifierKind::Add));
        assert!(Stat::AttackSpeed.supports(ModifierKind::Mult));
        assert!(Stat::Luck.supports(ModifierKind::Add));
    }

    #[test]
    fn test_stat_names_deserialize_camel_case() {
        let stat: Stat = serde_json::from_str("\"maxHP\"").unwrap();
        assert_eq!(stat, Stat::MaxHp);
        let stat: Stat = serde_json::from_str("\"xpGain\"").unwrap();
        assert_eq!(stat, Stat::XpGain);
        assert!(serde_json::from_str::<Stat>("\"mana\"").is_err());
    }

    #[test]
    fn test_character_stats_map_skips_nothing() {
        let stats = CharacterStats {
            max_hp: 100.0,
            armor: 1.0,
            damage_reduction: 0.0,
            move_speed: 1.0,
            pickup_range: 80.0,
            xp_gain: 1.0,
            luck: 0.0,
        };
        let doubled = stats.map(|_, v| v * 2.0);
        assert_eq!(doubled.max_hp, 200.0);
        assert_eq!(doubled.pickup_range, 160.0);
        assert_eq!(doubled.get(Stat::Damage), 0.0);
    }
}
