//! Duel configuration.
//!
//! Embedders configure the engine at startup with a `DuelConfig`. Every
//! numeric rule the engine applies (baseline stats, clamp bounds, failure
//! streak length, crafting bound) lives here rather than being hardcoded.

use serde::{Deserialize, Serialize};

use super::stats::BaseStats;

/// Inclusive clamp range applied at use-sites.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into this range.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Stats every duelist starts with.
    pub baseline: BaseStats,

    /// Clamp for accuracy before hit-chance math.
    pub accuracy_bounds: Bounds,

    /// Clamp for evasion before hit-chance math.
    pub evasion_bounds: Bounds,

    /// Clamp for pain wherever it is subtracted.
    pub pain_bounds: Bounds,

    /// Consecutive failed casts that forfeit the duel.
    pub max_consecutive_failures: u32,

    /// Upper bound on combination rounds per `add_effect`.
    pub max_combination_rounds: usize,

    /// How many times one incantation may be redirected to another spell.
    pub max_redirects: u32,

    /// Hit modifier value that forces a hit.
    pub auto_hit_modifier: f64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            baseline: BaseStats::default(),
            accuracy_bounds: Bounds::new(5.0, 95.0),
            evasion_bounds: Bounds::new(5.0, 95.0),
            pain_bounds: Bounds::new(0.0, 100.0),
            max_consecutive_failures: 5,
            max_combination_rounds: 64,
            max_redirects: 3,
            auto_hit_modifier: 99999.0,
        }
    }
}

impl DuelConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the baseline stats.
    #[must_use]
    pub fn with_baseline(mut self, baseline: BaseStats) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set the failure streak that ends a duel.
    #[must_use]
    pub fn with_max_consecutive_failures(mut self, failures: u32) -> Self {
        self.max_consecutive_failures = failures;
        self
    }

    /// Set the combination round bound.
    #[must_use]
    pub fn with_max_combination_rounds(mut self, rounds: usize) -> Self {
        self.max_combination_rounds = rounds;
        self
    }

    /// Set the redirect bound.
    #[must_use]
    pub fn with_max_redirects(mut self, redirects: u32) -> Self {
        self.max_redirects = redirects;
        self
    }

    /// Whether a hit modifier is the auto-hit sentinel.
    #[must_use]
    pub fn is_auto_hit(&self, hit_modifier: f64) -> bool {
        hit_modifier >= self.auto_hit_modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DuelConfig::default();

        assert_eq!(config.baseline.spellcasting, 100.0);
        assert_eq!(config.baseline.accuracy, 95.0);
        assert_eq!(config.baseline.evasion, 5.0);
        assert_eq!(config.baseline.pain, 0.0);
        assert_eq!(config.max_consecutive_failures, 5);
        assert_eq!(config.max_combination_rounds, 64);
        assert!(config.is_auto_hit(99999.0));
        assert!(!config.is_auto_hit(50.0));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(5.0, 95.0);
        assert_eq!(bounds.clamp(100.0), 95.0);
        assert_eq!(bounds.clamp(0.0), 5.0);
        assert_eq!(bounds.clamp(42.0), 42.0);
    }

    #[test]
    fn test_builder() {
        let config = DuelConfig::new()
            .with_max_consecutive_failures(3)
            .with_max_combination_rounds(8)
            .with_max_redirects(1);

        assert_eq!(config.max_consecutive_failures, 3);
        assert_eq!(config.max_combination_rounds, 8);
        assert_eq!(config.max_redirects, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DuelConfig =
            serde_json::from_str(r#"{ "max_consecutive_failures": 7 }"#).unwrap();

        assert_eq!(config.max_consecutive_failures, 7);
        assert_eq!(config.max_combination_rounds, 64);
        assert_eq!(config.pain_bounds, Bounds::new(0.0, 100.0));
    }
}
