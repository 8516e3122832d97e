//! # Qualia
//!
//! A turn-based simulation of agents with an internal cognitive life.
//!
//! Each agent owns a [`MindState`] (thoughts, focus, clarity, energy and the
//! expression threshold) and sits in one of four cognitive modes: Idle,
//! Thinking, Reflecting or Acting.  Commands are dispatched through the
//! current mode, which mutates the mind and names the next mode.  Expressing
//! a clear enough thought succeeds; at very high clarity a thought can
//! instead be consumed to evolve the mind's own parameters.
//!
//! Autonomous agents pick their commands through [`policy::select_command`];
//! the manual player types them on the console, or hands control to the same
//! policy with autopilot.  The [`Session`] runs the ticks, keeps the bounded
//! event log and saves or loads whole sessions as JSON.

pub mod agent;
pub mod cognition;
pub mod dashboard;
pub mod mind;
pub mod policy;
pub mod session;
pub mod utilities;

pub use agent::{Agent, Control, StatusView};
pub use cognition::{CognitiveMode, Command, EventKind, MindEvent, Outcome};
pub use mind::{CognitiveRules, MindDefaults, MindState};
pub use policy::PolicyConfig;
pub use session::{Session, TickFlow};
pub use utilities::config::SimulationConfig;
pub use utilities::errors::{ConfigError, SnapshotError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
