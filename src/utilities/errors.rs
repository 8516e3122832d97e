//! Error types for the collaborators around the cognitive core.
//!
//! The core itself never fails: rejected commands are events.  Only
//! configuration and snapshot persistence can return errors.

use thiserror::Error;

use crate::mind::MindViolation;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for the schema.
    #[error("Malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value parsed but breaks a rule.
    #[error("Invalid config value for '{field}': {message}")]
    Invalid { field: String, message: String },

    /// An environment override could not be parsed.
    #[error("Invalid environment variable {name}: {message}")]
    Env { name: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by snapshot save/load.  A failed load never touches the
/// running session.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("Snapshot I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed snapshot.
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted mind breaks an invariant.
    #[error("Snapshot entity '{agent_id}' has an invalid mind: {violation}")]
    InvalidMind {
        agent_id: String,
        #[source]
        violation: MindViolation,
    },

    /// The set of entities cannot form a session.
    #[error("Snapshot has an invalid roster: {0}")]
    InvalidRoster(String),
}

impl SnapshotError {
    pub fn invalid_roster(reason: impl Into<String>) -> Self {
        Self::InvalidRoster(reason.into())
    }
}
