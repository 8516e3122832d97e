//! Simulation configuration.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! canonical simulation.  Precedence: defaults < YAML file < environment.
//!
//! # Environment Variables
//!
//! - `QUALIA_CONFIG`: path to a YAML config file
//! - `QUALIA_SEED`: u64 seed for the simulation RNG
//! - `QUALIA_AUTOPILOT`: `1`/`true`/`0`/`false`, start with autopilot on or off

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::mind::{CognitiveRules, MindDefaults};
use crate::policy::PolicyConfig;
use crate::utilities::errors::ConfigError;

pub const ENV_CONFIG_PATH: &str = "QUALIA_CONFIG";
pub const ENV_SEED: &str = "QUALIA_SEED";
pub const ENV_AUTOPILOT: &str = "QUALIA_AUTOPILOT";

/// Full configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Identity of the manually controlled agent.
    pub player_id: String,
    /// Identities of the autonomous agents, in turn order after the player.
    pub ai_ids: Vec<String>,
    /// Pause after each autopilot tick.
    pub tick_interval_ms: u64,
    /// Number of recent events the log retains.
    pub event_log_capacity: usize,
    /// Passive energy regained by every agent at the start of its turn.
    pub regeneration_per_tick: i64,
    /// RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Start with the player on autopilot.
    pub autopilot: bool,
    pub mind: MindDefaults,
    pub rules: CognitiveRules,
    pub policy: PolicyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            player_id: "Player-1".to_string(),
            ai_ids: vec!["AI-Alpha".to_string()],
            tick_interval_ms: 1000,
            event_log_capacity: 7,
            regeneration_per_tick: 1,
            seed: None,
            autopilot: false,
            mind: MindDefaults::default(),
            rules: CognitiveRules::default(),
            policy: PolicyConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from `QUALIA_CONFIG` (if set) and apply environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUALIA_SEED` and `QUALIA_AUTOPILOT` on top of the current values.
    pub fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|e| ConfigError::Env {
                name: ENV_SEED.to_string(),
                message: format!("'{raw}' is not a u64: {e}"),
            })?;
            self.seed = Some(seed);
        }
        if let Some(raw) = lookup(ENV_AUTOPILOT) {
            self.autopilot = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Env {
                        name: ENV_AUTOPILOT.to_string(),
                        message: format!("'{raw}' is not a boolean"),
                    })
                }
            };
        }
        Ok(())
    }

    /// Reject configurations that would break mind invariants or the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        self.mind.validate(&self.rules)?;
        if self.event_log_capacity == 0 {
            return Err(ConfigError::invalid("event_log_capacity", "must be at least 1"));
        }
        if self.regeneration_per_tick < 0 {
            return Err(ConfigError::invalid("regeneration_per_tick", "must be >= 0"));
        }
        if self.player_id.trim().is_empty() {
            return Err(ConfigError::invalid("player_id", "must not be empty"));
        }
        let mut seen = std::collections::HashSet::new();
        for id in std::iter::once(&self.player_id).chain(&self.ai_ids) {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::invalid("ai_ids", format!("duplicate agent id '{id}'")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
