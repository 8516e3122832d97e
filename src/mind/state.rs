//! The `MindState` record and its invariant checks.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::rules::MindDefaults;

/// Mutable resource/knowledge record for one agent.
///
/// Field names on the wire are kept identical to the historic save format
/// (`Thoughts`, `CurrentFocusIndex`, ...), with `-1` standing for "no focus".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindState {
    /// Thoughts in insertion order; referenced by index.
    #[serde(rename = "Thoughts", default, deserialize_with = "null_as_empty")]
    pub thoughts: Vec<String>,

    /// Index of the focused thought, if any.
    #[serde(rename = "CurrentFocusIndex", with = "focus_sentinel")]
    pub focus: Option<usize>,

    /// Refinement of the focused thought (0.0–1.0).
    #[serde(rename = "Clarity")]
    pub clarity: f64,

    /// Current energy; every action is paid from it.
    #[serde(rename = "Energy")]
    pub energy: i64,

    /// Energy ceiling.
    #[serde(rename = "MaxEnergy")]
    pub max_energy: i64,

    /// Minimum clarity for a successful expression.
    #[serde(rename = "ExpressionThreshold")]
    pub expression_threshold: f64,
}

impl Default for MindState {
    fn default() -> Self {
        Self::new(&MindDefaults::default())
    }
}

impl MindState {
    /// Create a fresh mind: no thoughts, no focus, starting energy and threshold.
    pub fn new(defaults: &MindDefaults) -> Self {
        Self {
            thoughts: Vec::new(),
            focus: None,
            clarity: 0.0,
            energy: defaults.energy,
            max_energy: defaults.max_energy,
            expression_threshold: defaults.expression_threshold,
        }
    }

    /// The focused thought's text, if a valid focus is set.
    pub fn focused_thought(&self) -> Option<&str> {
        self.focus
            .and_then(|idx| self.thoughts.get(idx))
            .map(String::as_str)
    }

    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.energy >= cost
    }

    /// Drop the focus and reset clarity.
    pub fn clear_focus(&mut self) {
        self.focus = None;
        self.clarity = 0.0;
    }

    /// Add energy, capped at `max_energy`.  Returns the energy before the change.
    pub fn restore_energy(&mut self, amount: i64) -> i64 {
        let before = self.energy;
        self.energy = (self.energy + amount).min(self.max_energy).max(before);
        before
    }

    /// Check every invariant of the record.
    pub fn validate(&self) -> Result<(), MindViolation> {
        if self.max_energy < 0 {
            return Err(MindViolation::NegativeMaxEnergy(self.max_energy));
        }
        if self.energy < 0 || self.energy > self.max_energy {
            return Err(MindViolation::EnergyOutOfRange {
                energy: self.energy,
                max_energy: self.max_energy,
            });
        }
        if !(0.0..=1.0).contains(&self.clarity) {
            return Err(MindViolation::ClarityOutOfRange(self.clarity));
        }
        if !(0.0..=1.0).contains(&self.expression_threshold) {
            return Err(MindViolation::ThresholdOutOfRange(self.expression_threshold));
        }
        match self.focus {
            Some(idx) if idx >= self.thoughts.len() => Err(MindViolation::FocusOutOfRange {
                index: idx,
                len: self.thoughts.len(),
            }),
            None if self.clarity != 0.0 => Err(MindViolation::ClarityWithoutFocus(self.clarity)),
            _ => Ok(()),
        }
    }
}

/// A broken `MindState` invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MindViolation {
    #[error("max energy {0} is negative")]
    NegativeMaxEnergy(i64),

    #[error("energy {energy} outside [0, {max_energy}]")]
    EnergyOutOfRange { energy: i64, max_energy: i64 },

    #[error("clarity {0} outside [0, 1]")]
    ClarityOutOfRange(f64),

    #[error("expression threshold {0} outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("focus index {index} out of range for {len} thoughts")]
    FocusOutOfRange { index: usize, len: usize },

    #[error("clarity {0} set without a focused thought")]
    ClarityWithoutFocus(f64),
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `Option<usize>` on the wire as a signed index with `-1` for `None`.
mod focus_sentinel {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(focus: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match focus {
            Some(idx) => serializer.serialize_i64(*idx as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match i64::deserialize(deserializer)? {
            -1 => Ok(None),
            idx if idx >= 0 => Ok(Some(idx as usize)),
            other => Err(de::Error::custom(format!(
                "focus index must be -1 or non-negative, got {other}"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
