//! Tunable costs, gains and bounds of the cognitive cycle.
//!
//! The defaults are the canonical simulation numbers; a config file may
//! override any of them (see [`crate::utilities::config`]).

use serde::{Deserialize, Serialize};

use crate::utilities::errors::ConfigError;

/// Costs, gains and bounds used by every mode handler and by evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitiveRules {
    /// Energy paid to leave Idle for Thinking, Reflecting or Acting.
    pub transition_cost: i64,
    /// Energy restored by `recharge` (capped at max energy).
    pub recharge_amount: i64,
    /// Energy paid to generate a thought.
    pub generate_cost: i64,
    /// Energy paid to focus a thought.
    pub focus_cost: i64,
    /// Clarity a freshly focused thought starts at.
    pub initial_focus_clarity: f64,
    /// Energy paid per introspection.
    pub introspect_cost: i64,
    /// Fixed clarity gain per introspection.
    pub introspect_base_gain: f64,
    /// Upper bound of the uniform jitter added on top of the base gain.
    pub introspect_jitter: f64,
    /// Energy paid for a successful expression.
    pub express_cost: i64,
    /// Energy paid for a successful evolution.
    pub evolve_cost: i64,
    /// Clarity the focused thought must reach before evolution.
    pub evolve_min_clarity: f64,
    /// Max energy gained by `evolve max_energy increase`.
    pub max_energy_step: i64,
    /// Threshold change applied by `evolve threshold ...`.
    pub threshold_step: f64,
    /// Lower edge of the expression threshold band.
    pub threshold_min: f64,
    /// Upper edge of the expression threshold band.
    pub threshold_max: f64,
}

impl Default for CognitiveRules {
    fn default() -> Self {
        Self {
            transition_cost: 5,
            recharge_amount: 25,
            generate_cost: 10,
            focus_cost: 5,
            initial_focus_clarity: 0.1,
            introspect_cost: 15,
            introspect_base_gain: 0.15,
            introspect_jitter: 0.1,
            express_cost: 20,
            evolve_cost: 50,
            evolve_min_clarity: 0.95,
            max_energy_step: 10,
            threshold_step: 0.05,
            threshold_min: 0.10,
            threshold_max: 0.95,
        }
    }
}

impl CognitiveRules {
    /// Clamp an expression threshold into the configured band.
    pub fn clamp_threshold(&self, threshold: f64) -> f64 {
        threshold.clamp(self.threshold_min, self.threshold_max)
    }

    /// Reject rule sets that would break the mind invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let costs = [
            ("transition_cost", self.transition_cost),
            ("recharge_amount", self.recharge_amount),
            ("generate_cost", self.generate_cost),
            ("focus_cost", self.focus_cost),
            ("introspect_cost", self.introspect_cost),
            ("express_cost", self.express_cost),
            ("evolve_cost", self.evolve_cost),
            ("max_energy_step", self.max_energy_step),
        ];
        for (field, value) in costs {
            if value < 0 {
                return Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        let unit = [
            ("initial_focus_clarity", self.initial_focus_clarity),
            ("introspect_base_gain", self.introspect_base_gain),
            ("introspect_jitter", self.introspect_jitter),
            ("evolve_min_clarity", self.evolve_min_clarity),
            ("threshold_step", self.threshold_step),
            ("threshold_min", self.threshold_min),
            ("threshold_max", self.threshold_max),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("must lie in [0, 1], got {value}")));
            }
        }

        if self.threshold_min > self.threshold_max {
            return Err(ConfigError::invalid(
                "threshold_min",
                format!(
                    "band is inverted: {} > {}",
                    self.threshold_min, self.threshold_max
                ),
            ));
        }
        Ok(())
    }
}

/// Starting values for a fresh mind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindDefaults {
    pub energy: i64,
    pub max_energy: i64,
    pub expression_threshold: f64,
}

impl Default for MindDefaults {
    fn default() -> Self {
        Self {
            energy: 70,
            max_energy: 100,
            expression_threshold: 0.7,
        }
    }
}

impl MindDefaults {
    /// Check the starting values against the rules they will run under.
    pub fn validate(&self, rules: &CognitiveRules) -> Result<(), ConfigError> {
        if self.max_energy < 0 {
            return Err(ConfigError::invalid("max_energy", "must be >= 0"));
        }
        if self.energy < 0 || self.energy > self.max_energy {
            return Err(ConfigError::invalid(
                "energy",
                format!("must lie in [0, {}], got {}", self.max_energy, self.energy),
            ));
        }
        let band = rules.threshold_min..=rules.threshold_max;
        if !band.contains(&self.expression_threshold) {
            return Err(ConfigError::invalid(
                "expression_threshold",
                format!(
                    "must lie in [{}, {}], got {}",
                    rules.threshold_min, rules.threshold_max, self.expression_threshold
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(CognitiveRules::default().validate().is_ok());
        let defaults = MindDefaults::default();
        assert!(defaults.validate(&CognitiveRules::default()).is_ok());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let rules = CognitiveRules {
            threshold_min: 0.9,
            threshold_max: 0.2,
            ..CognitiveRules::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("threshold_min"));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let rules = CognitiveRules {
            express_cost: -1,
            ..CognitiveRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_clamp_threshold() {
        let rules = CognitiveRules::default();
        assert_eq!(rules.clamp_threshold(0.01), 0.10);
        assert_eq!(rules.clamp_threshold(0.99), 0.95);
        assert_eq!(rules.clamp_threshold(0.5), 0.5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let rules: CognitiveRules = serde_yaml::from_str("recharge_amount: 20\n").unwrap();
        assert_eq!(rules.recharge_amount, 20);
        assert_eq!(rules.express_cost, 20);
        assert_eq!(rules.threshold_max, 0.95);
    }

    #[test]
    fn test_defaults_outside_band_rejected() {
        let defaults = MindDefaults {
            expression_threshold: 0.99,
            ..MindDefaults::default()
        };
        assert!(defaults.validate(&CognitiveRules::default()).is_err());

        let defaults = MindDefaults {
            energy: 120,
            ..MindDefaults::default()
        };
        assert!(defaults.validate(&CognitiveRules::default()).is_err());
    }
}
