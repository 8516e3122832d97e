//! Read-only status projection of an agent.

use serde::Serialize;
use std::fmt;

use super::core::Agent;

/// What the "view" command shows: resources, thoughts, focus and mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub id: String,
    pub mode: &'static str,
    pub energy: i64,
    pub max_energy: i64,
    pub thoughts: Vec<String>,
    pub focus: Option<usize>,
    pub clarity: f64,
    pub expression_threshold: f64,
}

impl StatusView {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            mode: agent.mode.name(),
            energy: agent.mind.energy,
            max_energy: agent.mind.max_energy,
            thoughts: agent.mind.thoughts.clone(),
            focus: agent.mind.focus,
            clarity: agent.mind.clarity,
            expression_threshold: agent.mind.expression_threshold,
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Status for Entity {} ---", self.id)?;
        writeln!(f, "Energy: {}/{}", self.energy, self.max_energy)?;
        writeln!(f, "Current State: {}", self.mode)?;
        writeln!(f, "Expression Threshold: {:.2}", self.expression_threshold)?;
        writeln!(f, "Thoughts:")?;
        if self.thoughts.is_empty() {
            writeln!(f, "  (No thoughts yet)")?;
        }
        for (i, thought) in self.thoughts.iter().enumerate() {
            if Some(i) == self.focus {
                writeln!(f, "  [{i}] * {thought} (Clarity: {:.2})", self.clarity)?;
            } else {
                writeln!(f, "  [{i}]   {thought}")?;
            }
        }
        match self.focus {
            Some(i) => writeln!(f, "Focused Thought Index: {i}")?,
            None => writeln!(f, "Focused Thought Index: None")?,
        }
        write!(f, "------------------------")
    }
}
