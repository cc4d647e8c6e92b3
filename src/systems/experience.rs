//! Experience and leveling system.

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Cumulative XP curve. `xp_for_level(1)` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum XpCurve {
    /// `floor(base * (level - 1)^exponent)`
    Power { base: f64, exponent: f64 },
    /// First level-up costs `first`, each later one costs `step` more than the last
    Arithmetic { first: u64, step: u64 },
}

impl Default for XpCurve {
    fn default() -> Self {
        XpCurve::Power {
            base: XP_CURVE_BASE,
            exponent: XP_CURVE_EXPONENT,
        }
    }
}

impl XpCurve {
    /// Total XP needed to reach `level`
    pub fn xp_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        let k = u64::from(level - 1);
        match *self {
            XpCurve::Power { base, exponent } => (base * (k as f64).powf(exponent)).floor() as u64,
            XpCurve::Arithmetic { first, step } => k * first + step * k * (k - 1) / 2,
        }
    }

    /// Whether every level costs strictly more total XP than the one before
    pub fn is_strictly_increasing(&self) -> bool {
        match *self {
            XpCurve::Power { base, exponent } => base >= 1.0 && exponent >= 1.0,
            XpCurve::Arithmetic { first, .. } => first >= 1,
        }
    }
}

/// Debug snapshot of the level system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStats {
    pub level: u32,
    pub current_xp: u64,
    pub current_level_xp: u64,
    pub needed_xp: u64,
    pub next_level_total_xp: u64,
}

/// Player level and total XP
#[derive(Debug, Clone)]
pub struct LevelSystem {
    curve: XpCurve,
    level: u32,
    current_xp: u64,
}

impl LevelSystem {
    pub fn new(curve: XpCurve) -> Self {
        Self {
            curve,
            level: 1,
            current_xp: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total XP collected this run
    pub fn current_xp(&self) -> u64 {
        self.current_xp
    }

    pub fn curve(&self) -> &XpCurve {
        &self.curve
    }

    pub fn xp_for_level(&self, level: u32) -> u64 {
        self.curve.xp_for_level(level)
    }

    pub fn xp_for_next_level(&self) -> u64 {
        self.xp_for_level(self.level + 1)
    }

    /// XP earned since reaching the current level
    pub fn current_level_xp(&self) -> u64 {
        self.current_xp.saturating_sub(self.xp_for_level(self.level))
    }

    /// XP span of the current level
    pub fn xp_needed_for_current_level(&self) -> u64 {
        self.xp_for_next_level() - self.xp_for_level(self.level)
    }

    /// Progress toward the next level (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let needed = self.xp_needed_for_current_level();
        if needed == 0 {
            return 0.0;
        }
        (self.current_level_xp() as f32 / needed as f32).clamp(0.0, 1.0)
    }

    /// Add XP and return every level reached, in order. XP carries over.
    pub fn add_xp(&mut self, amount: u64) -> Vec<u32> {
        self.current_xp += amount;
        let mut gained = Vec::new();
        while self.current_xp >= self.xp_for_next_level() {
            self.level += 1;
            gained.push(self.level);
            log::info!("Level up! Now level {}", self.level);
        }
        gained
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.current_xp = 0;
    }

    pub fn stats(&self) -> LevelStats {
        LevelStats {
            level: self.level,
            current_xp: self.current_xp,
            current_level_xp: self.current_level_xp(),
            needed_xp: self.xp_needed_for_current_level(),
            next_level_total_xp: self.xp_for_next_level(),
        }
    }
}

impl Default for LevelSystem {
    fn default() -> Self {
        Self::new(XpCurve::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_for_level_default_curve() {
        let levels = LevelSystem::default();
        assert_eq!(levels.xp_for_level(1), 0);
        assert_eq!(levels.xp_for_level(2), 50);
        // floor(50 * 2^1.75) = floor(168.17)
        assert_eq!(levels.xp_for_level(3), 168);
    }

    #[test]
    fn test_xp_curve_is_monotonic() {
        for curve in [
            XpCurve::default(),
            XpCurve::Arithmetic { first: 50, step: 20 },
        ] {
            for n in 1..500 {
                assert!(curve.xp_for_level(n) < curve.xp_for_level(n + 1), "level {}", n);
            }
        }
    }

    #[test]
    fn test_grant_xp_no_level_up() {
        let mut levels = LevelSystem::default();
        assert!(levels.add_xp(10).is_empty());
        assert_eq!(levels.level(), 1);
        assert_eq!(levels.current_level_xp(), 10);
    }

    #[test]
    fn test_grant_xp_multiple_level_ups() {
        let mut levels = LevelSystem::new(XpCurve::Arithmetic { first: 50, step: 20 });
        assert_eq!(levels.xp_for_level(2), 50);
        assert_eq!(levels.xp_for_level(3), 120);
        assert_eq!(levels.add_xp(130), vec![2, 3]);
        assert_eq!(levels.current_xp(), 130);
        assert_eq!(levels.current_level_xp(), 10);
    }

    #[test]
    fn test_progress_and_stats() {
        let mut levels = LevelSystem::default();
        levels.add_xp(25);
        assert_eq!(levels.progress(), 0.5);
        let stats = levels.stats();
        assert_eq!(stats.needed_xp, 50);
        assert_eq!(stats.next_level_total_xp, 50);
    }

    #[test]
    fn test_reset() {
        let mut levels = LevelSystem::default();
        levels.add_xp(1_000);
        levels.reset();
        assert_eq!(levels.level(), 1);
        assert_eq!(levels.current_xp(), 0);
    }

    #[test]
    fn test_curve_deserializes_tagged() {
        let curve: XpCurve =
            serde_json::from_str(r#"{"type":"arithmetic","first":50,"step":20}"#).unwrap();
        assert_eq!(curve, XpCurve::Arithmetic { first: 50, step: 20 });
    }
}
