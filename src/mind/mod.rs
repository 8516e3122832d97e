//! Mind data model: the per-agent resource and knowledge record.
//!
//! A [`MindState`] is pure data: it holds the agent's thoughts, its current
//! focus, the clarity of that focus, and the energy budget every action is
//! paid from.  All behaviour lives in [`crate::cognition`]; the numbers that
//! behaviour is tuned with live in [`CognitiveRules`].
//!
//! # Invariants
//!
//! ```text
//! 0 <= energy <= max_energy
//! 0.0 <= clarity <= 1.0
//! focus is None or a valid index into thoughts
//! clarity == 0.0 whenever focus is None
//! ```

pub mod rules;
pub mod state;

// Re-exports
pub use rules::{CognitiveRules, MindDefaults};
pub use state::{MindState, MindViolation};
