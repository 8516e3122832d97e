//! Session: the explicit simulation context and its turn loop.
//!
//! A [`Session`] owns the agents, the bounded event log and the player's
//! autopilot flag.  [`Session::tick`] visits every agent once, in order:
//!
//! ```text
//! for agent in agents:
//!     regenerate (+1, capped)
//!     manual & !autopilot  → console turn (view | quit | autopilot | save | load | command)
//!     otherwise            → policy decides (or passes)
//!     dispatch → events → log
//! ```
//!
//! Blocking on console input happens here, strictly before the core runs.

pub mod console;
pub mod event_log;
pub mod interrupt;
pub mod persistence;

use rand::Rng;

use crate::agent::Agent;
use crate::cognition::Command;
use crate::utilities::config::SimulationConfig;

// Re-exports
pub use console::{parse_line, Console, LineConsole, Turn};
pub use event_log::EventLog;
pub use interrupt::{InterruptAction, Interrupts};
pub use persistence::{load_snapshot, save_snapshot, Restored, SimulationSnapshot};

/// Whether the loop should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Quit,
}

/// How a single manual turn ended.
enum TurnFlow {
    Next,
    Quit,
    /// Agents were replaced by a load; the rest of this tick is dropped.
    Reloaded,
}

/// The running simulation.
#[derive(Debug)]
pub struct Session {
    pub config: SimulationConfig,
    pub agents: Vec<Agent>,
    pub event_log: EventLog,
    /// When set, the manual agent is driven by the policy too.
    pub autopilot: bool,
}

impl Session {
    /// Fresh session: the player first, then every autonomous agent, all Idle.
    pub fn new(config: SimulationConfig) -> Self {
        let mut agents = Vec::with_capacity(1 + config.ai_ids.len());
        agents.push(Agent::manual(config.player_id.clone(), &config.mind));
        agents.extend(
            config
                .ai_ids
                .iter()
                .map(|id| Agent::autonomous(id.clone(), &config.mind)),
        );
        let event_log = EventLog::new(config.event_log_capacity);
        let autopilot = config.autopilot;
        Self {
            config,
            agents,
            event_log,
            autopilot,
        }
    }

    /// Assemble a session from restored parts.
    pub fn from_parts(
        config: SimulationConfig,
        agents: Vec<Agent>,
        event_log: Vec<String>,
        autopilot: bool,
    ) -> Self {
        let event_log = EventLog::restore(config.event_log_capacity, event_log);
        Self {
            config,
            agents,
            event_log,
            autopilot,
        }
    }

    /// Swap in a loaded session wholesale.  The config stays.
    pub fn replace_with(&mut self, restored: Session) {
        self.agents = restored.agents;
        self.event_log = restored.event_log;
        self.autopilot = restored.autopilot;
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        tracing::info!(enabled = self.autopilot, "player autopilot toggled");
        self.autopilot
    }

    /// Run one tick: every agent gets exactly one turn, in order.
    pub fn tick<C, R>(&mut self, console: &mut C, rng: &mut R) -> TickFlow
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        let mut idx = 0;
        while idx < self.agents.len() {
            let regen = self.config.regeneration_per_tick;
            self.agents[idx].regenerate(regen);

            if self.agents[idx].is_manual() && !self.autopilot {
                match self.manual_turn(idx, console, rng) {
                    TurnFlow::Next => {}
                    TurnFlow::Quit => return TickFlow::Quit,
                    TurnFlow::Reloaded => return TickFlow::Continue,
                }
            } else {
                self.policy_turn(idx, console, rng);
            }
            idx += 1;
        }
        TickFlow::Continue
    }

    fn manual_turn<C, R>(&mut self, idx: usize, console: &mut C, rng: &mut R) -> TurnFlow
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        let prompt = self.agents[idx].prompt();
        match console.read_turn(&prompt) {
            Turn::Skip => {}
            Turn::Quit => {
                console.show("Exiting simulation.");
                return TurnFlow::Quit;
            }
            Turn::View => console.show(&self.agents[idx].status().to_string()),
            Turn::Usage(usage) => console.show(usage),
            Turn::ToggleAutopilot => {
                let state = if self.toggle_autopilot() {
                    "ENABLED"
                } else {
                    "DISABLED"
                };
                console.show(&format!("Player autopilot {state}."));
            }
            Turn::Save(path) => match save_snapshot(&path, self) {
                Ok(()) => {
                    console.show(&format!("Game saved to {path}"));
                    let by = &self.agents[idx].id;
                    let line = format!("Game state saved to {path} by {by}");
                    self.event_log.push(line);
                }
                Err(e) => console.show(&format!("Error saving game: {e}")),
            },
            Turn::Load(path) => match load_snapshot(&path, &self.config) {
                Ok(restored) => {
                    let by = self.agents[idx].id.clone();
                    for warning in &restored.warnings {
                        console.show(warning);
                    }
                    self.replace_with(restored.session);
                    console.show(&format!("Game loaded from {path}"));
                    self.event_log
                        .push(format!("Game state loaded from {path} by {by}"));
                    return TurnFlow::Reloaded;
                }
                Err(e) => console.show(&format!("Error loading game: {e}")),
            },
            Turn::Command(command) => {
                self.run_command(idx, &command, rng);
                console.show(&self.agents[idx].status().to_string());
            }
        }
        TurnFlow::Next
    }

    fn policy_turn<C, R>(&mut self, idx: usize, console: &mut C, rng: &mut R)
    where
        C: Console + ?Sized,
        R: Rng + ?Sized,
    {
        let agent = &self.agents[idx];
        let choice = agent.decide(&self.config.rules, &self.config.policy, rng);
        let narrate = !self.autopilot;

        match choice {
            Some(command) => {
                if narrate {
                    console.show(&format!("--- {} {}'s Turn ---", agent.control, agent.id));
                    console.show(&format!(
                        "{} {} attempts: {}",
                        agent.control, agent.id, command
                    ));
                }
                self.run_command(idx, &command, rng);
                if narrate {
                    console.show(&self.agents[idx].status().to_string());
                }
            }
            None => {
                let line = format!("{} decides to do nothing this turn.", agent.id);
                if narrate {
                    console.show(&line);
                }
                // The autopiloted player passes silently.
                if !agent.is_manual() {
                    self.event_log.push(line);
                }
            }
        }
    }

    /// Dispatch through the agent's current mode and log the events.
    fn run_command<R>(&mut self, idx: usize, command: &Command, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let agent = &mut self.agents[idx];
        let events = agent.dispatch(command, &self.config.rules, rng);
        for event in events {
            if event.kind.is_diagnostic() {
                tracing::debug!(agent = %agent.id, kind = ?event.kind, "command rejected");
            }
            self.event_log.push(event);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognition::CognitiveMode;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Console that replays scripted lines and records what was shown.
    #[derive(Default)]
    struct Script {
        lines: VecDeque<String>,
        prompts: Vec<String>,
        shown: Vec<String>,
    }

    impl Script {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl Console for Script {
        fn read_turn(&mut self, prompt: &str) -> Turn {
            self.prompts.push(prompt.to_string());
            match self.lines.pop_front() {
                Some(line) => parse_line(&line),
                None => Turn::Quit,
            }
        }

        fn show(&mut self, text: &str) {
            self.shown.push(text.to_string());
        }
    }

    fn session() -> Session {
        Session::new(SimulationConfig::default())
    }

    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_new_session_layout() {
        let s = session();
        assert_eq!(s.agents.len(), 2);
        assert!(s.agents[0].is_manual());
        assert_eq!(s.agents[0].id, "Player-1");
        assert_eq!(s.agents[1].id, "AI-Alpha");
        assert!(s.agents.iter().all(|a| a.mode == CognitiveMode::Idle));
        assert!(!s.autopilot);
    }

    #[test]
    fn test_regeneration_precedes_dispatch() {
        let mut s = session();
        s.agents[0].mind.energy = 4;
        let mut console = Script::new(&["think"]);
        s.tick(&mut console, &mut zero_rng());
        // 4 + 1 regen = 5, enough for the transition.
        assert_eq!(s.agents[0].mode, CognitiveMode::Thinking);
        assert_eq!(s.agents[0].mind.energy, 0);
    }

    #[test]
    fn test_regeneration_capped() {
        let mut s = session();
        s.agents[0].mind.energy = 100;
        s.agents[1].mind.energy = 100;
        s.tick(&mut Script::new(&["view"]), &mut zero_rng());
        assert_eq!(s.agents[0].mind.energy, 100);
    }

    #[test]
    fn test_manual_command_logged_and_status_shown() {
        let mut s = session();
        let mut console = Script::new(&["recharge"]);
        s.tick(&mut console, &mut StepRng::new(u64::MAX, 0));
        assert!(console.prompts[0].starts_with("Entity Player-1 (Idle)"));
        let log = s.event_log.to_vec();
        assert!(log[0].ends_with("Player-1 recharged. Energy 71 -> 96."), "{log:?}");
        assert!(console.shown.iter().any(|t| t.contains("Status for Entity Player-1")));
    }

    #[test]
    fn test_view_does_not_dispatch() {
        let mut s = session();
        let before = s.agents[0].clone();
        let mut console = Script::new(&["view"]);
        s.tick(&mut console, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(s.agents[0].mode, before.mode);
        assert_eq!(s.agents[0].mind.thoughts, before.mind.thoughts);
        assert!(console.shown[0].contains("Status for Entity Player-1"));
    }

    #[test]
    fn test_quit_stops_before_other_agents() {
        let mut s = session();
        let ai_before = s.agents[1].clone();
        let flow = s.tick(&mut Script::new(&["quit"]), &mut zero_rng());
        assert_eq!(flow, TickFlow::Quit);
        assert_eq!(s.agents[1], ai_before);
    }

    #[test]
    fn test_unknown_manual_command_logged_once() {
        let mut s = session();
        s.tick(&mut Script::new(&["dance"]), &mut StepRng::new(u64::MAX, 0));
        let log = s.event_log.to_vec();
        assert!(log[0].ends_with("Player-1 tried unknown command 'dance' in Idle."));
    }

    #[test]
    fn test_ai_inaction_is_logged() {
        let mut s = session();
        // AI-Alpha idle at 71 energy with every coin "no": passes.
        s.tick(&mut Script::new(&[""]), &mut StepRng::new(u64::MAX, 0));
        let log = s.event_log.to_vec();
        assert_eq!(log.len(), 1);
        assert!(log[0].ends_with("AI-Alpha decides to do nothing this turn."));
    }

    #[test]
    fn test_ai_turn_narrated_with_status() {
        let mut s = session();
        let mut console = Script::new(&[""]);
        s.tick(&mut console, &mut zero_rng());
        assert_eq!(
            console.shown,
            vec![
                "--- AI AI-Alpha's Turn ---".to_string(),
                "AI AI-Alpha attempts: think".to_string(),
                s.agents[1].status().to_string(),
            ]
        );
        assert!(console.shown[2].contains("Current State: Thinking"));
    }

    #[test]
    fn test_autopilot_drives_player_without_console() {
        let mut s = session();
        s.autopilot = true;
        let mut console = Script::new(&[]);
        let flow = s.tick(&mut console, &mut zero_rng());
        assert_eq!(flow, TickFlow::Continue);
        assert!(console.prompts.is_empty());
        assert!(console.shown.is_empty());
        assert_eq!(s.agents[0].mode, CognitiveMode::Thinking);
        assert_eq!(s.agents[1].mode, CognitiveMode::Thinking);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut s = session();
        let mut console = Script::new(&["autopilot"]);
        s.tick(&mut console, &mut StepRng::new(u64::MAX, 0));
        assert!(s.autopilot);
        assert!(console.shown.iter().any(|t| t == "Player autopilot ENABLED."));
    }

    #[test]
    fn test_save_and_load_through_console() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let path_str = path.display().to_string();

        let mut s = session();
        s.tick(&mut Script::new(&["think"]), &mut zero_rng());
        let saved_player = s.agents[0].clone();
        s.tick(&mut Script::new(&[format!("save {path_str}").as_str()]), &mut zero_rng());
        assert!(path.exists());

        s.tick(&mut Script::new(&["generate"]), &mut zero_rng());
        assert_ne!(s.agents[0].mind.thoughts, saved_player.mind.thoughts);

        let mut console = Script::new(&[format!("load {path_str}").as_str()]);
        let flow = s.tick(&mut console, &mut zero_rng());
        assert_eq!(flow, TickFlow::Continue);
        // The saved copy was taken after the save turn's regeneration.
        assert_eq!(s.agents[0].mind.thoughts, saved_player.mind.thoughts);
        assert_eq!(s.agents[0].mode, CognitiveMode::Thinking);
        assert!(console.shown.iter().any(|t| t.starts_with("Game loaded from")));
        assert!(s
            .event_log
            .newest_first()
            .next()
            .unwrap()
            .contains("Game state loaded from"));
    }

    #[test]
    fn test_failed_load_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[]").unwrap();

        let mut s = session();
        let mut console = Script::new(&[format!("load {}", path.display()).as_str()]);
        s.tick(&mut console, &mut StepRng::new(u64::MAX, 0));
        assert!(console.shown.iter().any(|t| t.starts_with("Error loading game")));
        assert_eq!(s.agents.len(), 2);
        assert_eq!(s.agents[0].mode, CognitiveMode::Idle);
    }

    #[test]
    fn test_load_without_player_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(
            &path,
            r#"{"entities": [], "event_log": [], "auto_pilot_enabled": false}"#,
        )
        .unwrap();

        let mut s = session();
        let mut console = Script::new(&[format!("load {}", path.display()).as_str()]);
        assert_eq!(s.tick(&mut console, &mut StepRng::new(u64::MAX, 0)), TickFlow::Continue);
        assert!(console
            .shown
            .iter()
            .any(|t| t.starts_with("Error loading game") && t.contains("no entities")));
        assert_eq!(s.agents.len(), 2);
        assert!(s.agents[0].is_manual());

        // The player still gets the console on the next tick.
        let mut next = Script::new(&["view"]);
        s.tick(&mut next, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(next.prompts.len(), 1);
    }

    #[test]
    fn test_long_autopilot_run_keeps_invariants() {
        let mut config = SimulationConfig::default();
        config.ai_ids = vec!["AI-Alpha".into(), "AI-Beta".into()];
        config.autopilot = true;
        let mut s = Session::new(config);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut console = Script::new(&[]);
        for _ in 0..2_000 {
            assert_eq!(s.tick(&mut console, &mut rng), TickFlow::Continue);
            for agent in &s.agents {
                assert!(agent.mind.validate().is_ok(), "{:?}", agent);
                assert!(agent.mind.expression_threshold >= 0.10);
                assert!(agent.mind.expression_threshold <= 0.95);
            }
        }
        assert!(s.event_log.len() <= 7);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let run = || {
            let mut s = Session::new(SimulationConfig {
                autopilot: true,
                ..SimulationConfig::default()
            });
            let mut rng = StdRng::seed_from_u64(5);
            for _ in 0..300 {
                s.tick(&mut Script::new(&[]), &mut rng);
            }
            s.agents
        };
        assert_eq!(run(), run());
    }
}
