//! Events produced by a dispatch.
//!
//! Events are for logging only; nothing branches on them.  The `kind`
//! records the cause category so observers can filter without parsing text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cause category of a [`MindEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The agent moved to another mode (or explicitly stayed).
    Transition,
    /// A command succeeded and mutated the mind.
    Mutation,
    /// A thought was expressed.
    Expressed,
    /// Expression was attempted below the clarity threshold.
    ExpressionFailed,
    /// Evolution succeeded.
    Evolved,
    InsufficientEnergy,
    InvalidIndex,
    NoFocus,
    ClarityTooLow,
    InvalidParameter,
    InvalidDirection,
    UsageError,
    UnknownCommand,
}

impl EventKind {
    /// Whether this event reports a rejected attempt.
    pub fn is_diagnostic(&self) -> bool {
        !matches!(
            self,
            Self::Transition | Self::Mutation | Self::Expressed | Self::Evolved
        )
    }
}

/// One human-readable event line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindEvent {
    pub kind: EventKind,
    pub message: String,
}

impl MindEvent {
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build the single event for a command the current mode does not know.
    pub fn unknown_command(agent_id: &str, command: &str, mode_name: &str) -> Self {
        Self::new(
            EventKind::UnknownCommand,
            format!("{agent_id} tried unknown command '{command}' in {mode_name}."),
        )
    }
}

impl fmt::Display for MindEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
