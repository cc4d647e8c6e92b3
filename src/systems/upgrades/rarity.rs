//! Luck-weighted rolls for upgrade rarity and card count.
//!
//! Luck is split into brackets (0-10, 10-20, 20-30, 30-50). Inside a bracket
//! every weight moves linearly from one boundary row to the next; past luck
//! 50 the last row holds.

use crate::constants::*;
use crate::stats::Rarity;
use rand::Rng;

/// Interpolate a boundary table at `luck`
pub fn bracket_weights<const N: usize>(luck: f32, table: &[[f32; N]; 5]) -> [f32; N] {
    let luck = luck.max(0.0);
    let (from, t) = if luck <= LUCK_BRACKET_SIZE {
        (0, luck / LUCK_BRACKET_SIZE)
    } else if luck <= 2.0 * LUCK_BRACKET_SIZE {
        (1, (luck - LUCK_BRACKET_SIZE) / LUCK_BRACKET_SIZE)
    } else if luck <= 3.0 * LUCK_BRACKET_SIZE {
        (2, (luck - 2.0 * LUCK_BRACKET_SIZE) / LUCK_BRACKET_SIZE)
    } else {
        let span = LUCK_CAP - 3.0 * LUCK_BRACKET_SIZE;
        (3, ((luck - 3.0 * LUCK_BRACKET_SIZE) / span).min(1.0))
    };
    let (a, b) = (&table[from], &table[from + 1]);
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Rarity weights (Common..Legendary) at a luck value, not normalized
pub fn rarity_weights(luck: f32) -> [f32; 5] {
    bracket_weights(luck, &RARITY_WEIGHTS_AT_BOUNDARIES)
}

/// Card count weights (3, 4, 5, 6) at a luck value, not normalized
pub fn card_count_weights(luck: f32) -> [f32; 4] {
    bracket_weights(luck, &CARD_COUNT_WEIGHTS_AT_BOUNDARIES)
}

/// Roll an index from unnormalized weights via the cumulative distribution
pub fn sample_weighted(weights: &[f32], rng: &mut impl Rng) -> usize {
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }
    let roll = rng.gen::<f32>();
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w / total;
        if *w > 0.0 && roll <= cumulative {
            return i;
        }
    }
    // Rounding left the cumulative sum just under 1
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}

pub fn calculate_rarity(luck: f32, rng: &mut impl Rng) -> Rarity {
    Rarity::ALL[sample_weighted(&rarity_weights(luck), rng)]
}

pub fn calculate_card_count(luck: f32, rng: &mut impl Rng) -> usize {
    CARD_COUNTS[sample_weighted(&card_count_weights(luck), rng)]
}
