//! Session snapshots as JSON files.
//!
//! The wire format keeps exact field fidelity with existing save files:
//!
//! ```json
//! {
//!   "entities": [
//!     { "id": "Player-1", "is_player": true,
//!       "mind": { "Thoughts": [], "CurrentFocusIndex": -1, "Clarity": 0,
//!                 "Energy": 70, "MaxEnergy": 100, "ExpressionThreshold": 0.7 },
//!       "current_fsm_state_name": "Idle" }
//!   ],
//!   "event_log": ["[12:00:01] Player-1 started thinking."],
//!   "auto_pilot_enabled": false
//! }
//! ```
//!
//! Loading validates the roster (exactly one player, unique ids) and every
//! mind before anything is built, so a bad file leaves the running session
//! untouched.  An unknown mode name restores as Idle and a threshold outside
//! the configured band is clamped; both are reported back as warnings.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::Session;
use crate::agent::{Agent, Control};
use crate::cognition::CognitiveMode;
use crate::mind::{CognitiveRules, MindState};
use crate::utilities::config::SimulationConfig;
use crate::utilities::errors::SnapshotError;

/// One persisted agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: String,
    pub is_player: bool,
    pub mind: MindState,
    pub current_fsm_state_name: String,
}

impl EntitySnapshot {
    pub fn capture(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            is_player: agent.is_manual(),
            mind: agent.mind.clone(),
            current_fsm_state_name: agent.mode.name().to_string(),
        }
    }

    /// Rebuild the agent under `rules`, collecting warnings for anything
    /// that had to be corrected (unknown mode, threshold outside the band).
    pub fn into_agent(
        mut self,
        rules: &CognitiveRules,
        warnings: &mut Vec<String>,
    ) -> Result<Agent, SnapshotError> {
        self.mind
            .validate()
            .map_err(|violation| SnapshotError::InvalidMind {
                agent_id: self.id.clone(),
                violation,
            })?;

        let threshold = self.mind.expression_threshold;
        let clamped = rules.clamp_threshold(threshold);
        if clamped != threshold {
            warnings.push(format!(
                "Warning: expression threshold {threshold} for '{}' outside [{}, {}]. Clamped to {clamped}.",
                self.id, rules.threshold_min, rules.threshold_max
            ));
            tracing::warn!(agent = %self.id, threshold, clamped, "threshold outside band in snapshot");
            self.mind.expression_threshold = clamped;
        }

        let mode = match self.current_fsm_state_name.parse::<CognitiveMode>() {
            Ok(mode) => mode,
            Err(unknown) => {
                warnings.push(format!(
                    "Warning: {} for '{}' during load. Defaulting to Idle.",
                    unknown, self.id
                ));
                tracing::warn!(agent = %self.id, mode = %unknown.0, "unknown mode in snapshot");
                CognitiveMode::Idle
            }
        };

        let control = Control::from_is_player(self.is_player);
        Ok(Agent::restore(self.id, control, self.mind, mode))
    }
}

/// A whole persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub entities: Vec<EntitySnapshot>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_log: Vec<String>,
    #[serde(default)]
    pub auto_pilot_enabled: bool,
}

impl SimulationSnapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            entities: session.agents.iter().map(EntitySnapshot::capture).collect(),
            event_log: session.event_log.to_vec(),
            auto_pilot_enabled: session.autopilot,
        }
    }

    /// Check the roster: at least one entity, exactly one player, unique ids.
    pub fn validate_roster(&self) -> Result<(), SnapshotError> {
        if self.entities.is_empty() {
            return Err(SnapshotError::invalid_roster("no entities"));
        }
        let players = self.entities.iter().filter(|e| e.is_player).count();
        if players != 1 {
            return Err(SnapshotError::invalid_roster(format!(
                "expected exactly one player, found {players}"
            )));
        }
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.id.as_str()) {
                return Err(SnapshotError::invalid_roster(format!(
                    "duplicate agent id '{}'",
                    entity.id
                )));
            }
        }
        Ok(())
    }

    /// Build a new session under `config`.  All-or-nothing.
    pub fn restore(self, config: &SimulationConfig) -> Result<Restored, SnapshotError> {
        self.validate_roster()?;
        let mut agents = Vec::with_capacity(self.entities.len());
        let mut warnings = Vec::new();
        for entity in self.entities {
            agents.push(entity.into_agent(&config.rules, &mut warnings)?);
        }
        let session = Session::from_parts(
            config.clone(),
            agents,
            self.event_log,
            self.auto_pilot_enabled,
        );
        Ok(Restored { session, warnings })
    }
}

/// A session rebuilt from a snapshot, plus anything the caller should show.
#[derive(Debug)]
pub struct Restored {
    pub session: Session,
    pub warnings: Vec<String>,
}

/// Write `session` to `path` as pretty JSON.
pub fn save_snapshot(path: impl AsRef<Path>, session: &Session) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let snapshot = SimulationSnapshot::capture(session);
    let data = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, data).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), agents = snapshot.entities.len(), "session saved");
    Ok(())
}

/// Read and validate a snapshot file into a fresh session.
pub fn load_snapshot(
    path: impl AsRef<Path>,
    config: &SimulationConfig,
) -> Result<Restored, SnapshotError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot: SimulationSnapshot = serde_json::from_str(&data)?;
    let restored = snapshot.restore(config)?;
    tracing::info!(
        path = %path.display(),
        agents = restored.session.agents.len(),
        warnings = restored.warnings.len(),
        "session loaded"
    );
    Ok(restored)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Tests
// ============================================================================
