//! Upgrade rarity and card roll constants.

/// Luck where each bracket ends (the last bracket runs to LUCK_CAP)
pub const LUCK_BRACKET_SIZE: f32 = 10.0;
/// Luck at which the final bracket stops improving
pub const LUCK_CAP: f32 = 50.0;

/// Rarity weights (Common, Uncommon, Rare, Epic, Legendary) at luck 0, 10, 20, 30 and 50
pub const RARITY_WEIGHTS_AT_BOUNDARIES: [[f32; 5]; 5] = [
    [70.0, 20.0, 8.0, 2.0, 0.1],
    [30.0, 45.0, 15.0, 8.0, 2.0],
    [10.0, 20.0, 45.0, 15.0, 10.0],
    [3.0, 10.0, 20.0, 40.0, 27.0],
    [2.0, 5.0, 10.0, 23.0, 60.0],
];

/// Possible card counts per level-up
pub const CARD_COUNTS: [usize; 4] = [3, 4, 5, 6];

/// Card count weights (3, 4, 5, 6 cards) at luck 0, 10, 20, 30 and 50
pub const CARD_COUNT_WEIGHTS_AT_BOUNDARIES: [[f32; 4]; 5] = [
    [80.0, 15.0, 4.0, 1.0],
    [50.0, 35.0, 12.0, 3.0],
    [25.0, 40.0, 25.0, 10.0],
    [10.0, 30.0, 40.0, 20.0],
    [5.0, 15.0, 35.0, 45.0],
];

/// Generic rarity multipliers for values without a custom table
pub const GENERIC_RARITY_MULTIPLIERS: [f32; 5] = [0.05, 0.10, 0.20, 0.35, 0.50];
