//! Core Agent struct.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::StatusView;
use crate::cognition::{CognitiveMode, Command, MindEvent};
use crate::mind::{CognitiveRules, MindDefaults, MindState};
use crate::policy::{self, PolicyConfig};

/// Who chooses an agent's commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    /// Console input, or the policy while autopilot is on.
    Manual,
    /// Always the policy.
    Autonomous,
}

impl Control {
    pub fn from_is_player(is_player: bool) -> Self {
        if is_player {
            Self::Manual
        } else {
            Self::Autonomous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual => "Player",
            Self::Autonomous => "AI",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One simulated mind.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Identity used in every event line.
    pub id: String,
    pub control: Control,
    /// Exclusively owned; never shared with another agent.
    pub mind: MindState,
    pub mode: CognitiveMode,
}

impl Agent {
    /// Create an agent with a fresh mind in Idle mode.
    pub fn new(id: impl Into<String>, control: Control, defaults: &MindDefaults) -> Self {
        Self {
            id: id.into(),
            control,
            mind: MindState::new(defaults),
            mode: CognitiveMode::Idle,
        }
    }

    pub fn manual(id: impl Into<String>, defaults: &MindDefaults) -> Self {
        Self::new(id, Control::Manual, defaults)
    }

    pub fn autonomous(id: impl Into<String>, defaults: &MindDefaults) -> Self {
        Self::new(id, Control::Autonomous, defaults)
    }

    /// Rebuild an agent from persisted parts.
    pub fn restore(
        id: impl Into<String>,
        control: Control,
        mind: MindState,
        mode: CognitiveMode,
    ) -> Self {
        Self {
            id: id.into(),
            control,
            mind,
            mode,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.control == Control::Manual
    }

    /// Run one command through the current mode and adopt the next mode.
    pub fn dispatch<R>(
        &mut self,
        command: &Command,
        rules: &CognitiveRules,
        rng: &mut R,
    ) -> Vec<MindEvent>
    where
        R: Rng + ?Sized,
    {
        let outcome = self.mode.handle(&self.id, &mut self.mind, command, rules, rng);
        self.mode = outcome.next;
        outcome.events
    }

    /// Ask the autonomous policy for this tick's command.
    pub fn decide<R>(
        &self,
        rules: &CognitiveRules,
        config: &PolicyConfig,
        rng: &mut R,
    ) -> Option<Command>
    where
        R: Rng + ?Sized,
    {
        policy::select_command(self.mode, &self.mind, rules, config, rng)
    }

    /// Passive per-tick regeneration, capped at max energy.
    pub fn regenerate(&mut self, amount: i64) {
        self.mind.restore_energy(amount);
    }

    /// Console prompt for the current mode.
    pub fn prompt(&self) -> String {
        self.mode.prompt(&self.id, &self.mind)
    }

    /// Read-only projection for display.
    pub fn status(&self) -> StatusView {
        StatusView::of(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognition::EventKind;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_new_agent_is_idle_and_fresh() {
        let agent = Agent::autonomous("AI-Alpha", &MindDefaults::default());
        assert_eq!(agent.mode, CognitiveMode::Idle);
        assert_eq!(agent.mind, MindState::default());
        assert!(!agent.is_manual());
        assert_eq!(agent.control.label(), "AI");
    }

    #[test]
    fn test_dispatch_walks_the_cycle() {
        let rules = CognitiveRules::default();
        let mut rng = StepRng::new(0, 0);
        let mut agent = Agent::manual("Player-1", &MindDefaults::default());
        agent.mind.energy = 100;

        let steps = [
            Command::new("think"),
            Command::new("generate"),
            Command::with_args("focus", ["0"]),
            Command::new("idle"),
            Command::new("reflect"),
        ];
        for cmd in &steps {
            let events = agent.dispatch(cmd, &rules, &mut rng);
            assert_eq!(events.len(), 1, "{cmd}");
        }
        assert_eq!(agent.mode, CognitiveMode::Reflecting);
        assert_eq!(agent.mind.focus, Some(0));
        // 100 - 5 think - 10 generate - 5 focus - 5 reflect
        assert_eq!(agent.mind.energy, 75);

        for _ in 0..4 {
            agent.dispatch(&Command::new("introspect"), &rules, &mut rng);
        }
        // 0.1 + 4 * 0.15 with a zero jitter source
        assert!((agent.mind.clarity - 0.7).abs() < 1e-9);
        assert_eq!(agent.mind.energy, 15);

        agent.dispatch(&Command::new("idle"), &rules, &mut rng);
        agent.dispatch(&Command::new("act"), &rules, &mut rng);
        assert_eq!(agent.mode, CognitiveMode::Acting);
        assert_eq!(agent.mind.energy, 10);

        let events = agent.dispatch(&Command::new("express"), &rules, &mut rng);
        assert_eq!(events[0].kind, EventKind::InsufficientEnergy);
        assert_eq!(agent.mind.focus, Some(0));
    }

    #[test]
    fn test_regenerate_caps() {
        let mut agent = Agent::autonomous("AI", &MindDefaults::default());
        agent.mind.energy = 99;
        agent.regenerate(1);
        agent.regenerate(1);
        assert_eq!(agent.mind.energy, 100);
    }

    #[test]
    fn test_decide_does_not_mutate() {
        let agent = Agent::autonomous("AI", &MindDefaults::default());
        let before = agent.clone();
        let choice = agent.decide(
            &CognitiveRules::default(),
            &PolicyConfig::default(),
            &mut StepRng::new(0, 0),
        );
        assert_eq!(choice, Some(Command::new("think")));
        assert_eq!(agent, before);
    }
}
