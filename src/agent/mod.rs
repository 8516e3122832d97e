//! Agent module: one simulated mind and how it is driven.
//!
//! An [`Agent`] binds an identity, a control classification, a
//! [`MindState`](crate::mind::MindState) and the current
//! [`CognitiveMode`](crate::cognition::CognitiveMode).  It is the unit the
//! session's turn loop iterates.

pub mod core;
pub mod status;

// Re-export the main Agent type.
pub use self::core::{Agent, Control};
pub use self::status::StatusView;
