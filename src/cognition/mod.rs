//! Cognitive state machine: four modes and their command handlers.
//!
//! Every mode exposes the same contract: take a [`Command`], mutate the
//! agent's [`MindState`] and return the next mode plus the events that
//! describe what happened.  Failures are soft: a rejected command leaves
//! the mind untouched and yields exactly one diagnostic event.
//!
//! # Transitions
//!
//! ```text
//!            think / reflect / act (-5 energy)
//!   Idle ───────────────────────────────────▶ Thinking | Reflecting | Acting
//!    ▲  recharge (+25, capped)                          │
//!    └──────────────────────── idle ◀──────────────────┘
//!
//!   Thinking    generate | focus <i>
//!   Reflecting  introspect | unfocus
//!   Acting      express | evolve <param> <direction>
//! ```
//!
//! The "view" and "quit" commands never reach this module; the session
//! handles them before dispatch.

pub mod acting;
pub mod command;
pub mod evolution;
pub mod events;
pub mod idle;
pub mod reflecting;
pub mod thinking;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::mind::{CognitiveRules, MindState};

// Re-exports
pub use command::Command;
pub use events::{EventKind, MindEvent};
pub use thinking::THOUGHT_POOL;

// ============================================================================
// Modes
// ============================================================================

/// The active cognitive behaviour of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CognitiveMode {
    #[default]
    Idle,
    Thinking,
    Reflecting,
    Acting,
}

impl CognitiveMode {
    /// All modes, in declaration order.
    pub const ALL: [CognitiveMode; 4] = [
        CognitiveMode::Idle,
        CognitiveMode::Thinking,
        CognitiveMode::Reflecting,
        CognitiveMode::Acting,
    ];

    /// Display and persistence name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Thinking => "Thinking",
            Self::Reflecting => "Reflecting",
            Self::Acting => "Acting",
        }
    }

    /// Commands the mode recognizes, for prompts and help text.
    pub fn commands(&self) -> &'static str {
        match self {
            Self::Idle => "think | reflect | act | recharge",
            Self::Thinking => "generate | focus <index> | idle",
            Self::Reflecting => "introspect | unfocus | idle",
            Self::Acting => "express | evolve <max_energy|threshold> <increase|decrease> | idle",
        }
    }

    /// Dispatch one command against `mind`.
    ///
    /// Randomized effects (thought selection, clarity jitter) draw from `rng`.
    pub fn handle<R>(
        &self,
        agent_id: &str,
        mind: &mut MindState,
        command: &Command,
        rules: &CognitiveRules,
        rng: &mut R,
    ) -> Outcome
    where
        R: Rng + ?Sized,
    {
        let outcome = match self {
            Self::Idle => idle::handle(agent_id, mind, command, rules),
            Self::Thinking => thinking::handle(agent_id, mind, command, rules, rng),
            Self::Reflecting => reflecting::handle(agent_id, mind, command, rules, rng),
            Self::Acting => acting::handle(agent_id, mind, command, rules),
        };

        tracing::debug!(
            agent = agent_id,
            mode = self.name(),
            command = %command,
            next = outcome.next.name(),
            events = outcome.events.len(),
            "dispatched command"
        );
        outcome
    }

    /// One-line console prompt for an agent in this mode.
    pub fn prompt(&self, agent_id: &str, mind: &MindState) -> String {
        let mut prompt = format!(
            "Entity {} ({}) | Energy: {}/{}",
            agent_id,
            self.name(),
            mind.energy,
            mind.max_energy
        );
        match self {
            Self::Idle => {}
            Self::Thinking => {
                prompt.push_str(&format!(" | Thoughts: {}", mind.thoughts.len()));
                if let Some(thought) = mind.focused_thought() {
                    prompt.push_str(&format!(
                        " | Focus: '{}' (Clarity: {:.2})",
                        thought, mind.clarity
                    ));
                }
            }
            Self::Reflecting | Self::Acting => match mind.focused_thought() {
                Some(thought) => prompt.push_str(&format!(
                    " | Focus: '{}' (Clarity: {:.2})",
                    thought, mind.clarity
                )),
                None => prompt.push_str(" | Focus: None"),
            },
        }
        prompt.push_str(&format!(" | Commands: [{} | view | quit]", self.commands()));
        prompt
    }
}

impl fmt::Display for CognitiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mode name that does not match any [`CognitiveMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cognitive mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for CognitiveMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of one dispatch: the next mode and what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub next: CognitiveMode,
    pub events: Vec<MindEvent>,
}

impl Outcome {
    /// Move to (or stay in) `next` with a single event.
    pub fn single(next: CognitiveMode, kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            next,
            events: vec![MindEvent::new(kind, message)],
        }
    }

    /// Stay in `mode` after an unrecognized command.
    pub fn unknown(mode: CognitiveMode, agent_id: &str, command: &Command) -> Self {
        Self {
            next: mode,
            events: vec![MindEvent::unknown_command(agent_id, &command.name, mode.name())],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
