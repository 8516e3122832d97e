//! Evolution: the costly, irreversible self-modification path.
//!
//! `evolve <param> <direction>` sacrifices the focused thought and a large
//! chunk of energy to permanently change a capability of the mind.
//! Preconditions are checked in a fixed order and the first failure wins:
//!
//! 1. both arguments present
//! 2. parameter recognized
//! 3. a thought is focused
//! 4. clarity at or above the evolution bar
//! 5. enough energy
//! 6. direction valid for the parameter (`max_energy` only grows)

use std::fmt;
use std::str::FromStr;

use super::{CognitiveMode, Command, EventKind, Outcome};
use crate::mind::{CognitiveRules, MindState};

/// The capability an evolution changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveParam {
    MaxEnergy,
    Threshold,
}

impl EvolveParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxEnergy => "max_energy",
            Self::Threshold => "threshold",
        }
    }

    /// Whether `direction` is allowed for this parameter.
    pub fn accepts(&self, direction: Direction) -> bool {
        match self {
            Self::MaxEnergy => direction == Direction::Increase,
            Self::Threshold => true,
        }
    }
}

impl FromStr for EvolveParam {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max_energy" => Ok(Self::MaxEnergy),
            "threshold" => Ok(Self::Threshold),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EvolveParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => f.write_str("increase"),
            Self::Decrease => f.write_str("decrease"),
        }
    }
}

/// Handle `evolve <param> <direction>` in Acting mode.
pub(crate) fn evolve(
    agent_id: &str,
    mind: &mut MindState,
    command: &Command,
    rules: &CognitiveRules,
) -> Outcome {
    const MODE: CognitiveMode = CognitiveMode::Acting;
    let emit = |kind: EventKind, message: String| Outcome::single(MODE, kind, message);

    let (Some(raw_param), Some(raw_direction)) = (command.arg(0), command.arg(1)) else {
        return emit(
            EventKind::UsageError,
            format!(
                "{agent_id} evolve usage: evolve <max_energy|threshold> <increase|decrease>."
            ),
        );
    };
    let Ok(param) = raw_param.parse::<EvolveParam>() else {
        return emit(
            EventKind::InvalidParameter,
            format!("{agent_id} tried to evolve unknown parameter '{raw_param}'."),
        );
    };
    let Some(idx) = mind.focus else {
        return emit(
            EventKind::NoFocus,
            format!("{agent_id} cannot evolve: no focused thought to sacrifice."),
        );
    };
    if mind.clarity < rules.evolve_min_clarity {
        return emit(
            EventKind::ClarityTooLow,
            format!(
                "{agent_id} cannot evolve: clarity {:.2} is below {:.2}.",
                mind.clarity, rules.evolve_min_clarity
            ),
        );
    }
    if !mind.can_afford(rules.evolve_cost) {
        return emit(
            EventKind::InsufficientEnergy,
            format!(
                "{agent_id} has not enough energy to evolve (needs {}, has {}).",
                rules.evolve_cost, mind.energy
            ),
        );
    }
    let direction = match raw_direction.parse::<Direction>() {
        Ok(direction) if param.accepts(direction) => direction,
        _ => {
            return emit(
                EventKind::InvalidDirection,
                format!("{agent_id} cannot evolve {param} in direction '{raw_direction}'."),
            )
        }
    };

    mind.energy -= rules.evolve_cost;
    let consumed = mind.thoughts.remove(idx);
    mind.clear_focus();

    let result = match (param, direction) {
        (EvolveParam::MaxEnergy, _) => {
            mind.max_energy += rules.max_energy_step;
            mind.max_energy.to_string()
        }
        (EvolveParam::Threshold, Direction::Increase) => {
            mind.expression_threshold =
                (mind.expression_threshold + rules.threshold_step).min(rules.threshold_max);
            format!("{:.2}", mind.expression_threshold)
        }
        (EvolveParam::Threshold, Direction::Decrease) => {
            mind.expression_threshold =
                (mind.expression_threshold - rules.threshold_step).max(rules.threshold_min);
            format!("{:.2}", mind.expression_threshold)
        }
    };

    tracing::info!(agent = agent_id, %param, %direction, %result, "agent evolved");
    emit(
        EventKind::Evolved,
        format!("{agent_id} EVOLVED: {param} {direction} -> {result} (consumed '{consumed}')."),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(energy: i64) -> MindState {
        MindState {
            thoughts: vec!["the internal world is vast".into()],
            focus: Some(0),
            clarity: 0.95,
            energy,
            max_energy: 100,
            ..MindState::default()
        }
    }

    fn evolve_cmd(args: &[&str]) -> Command {
        Command::with_args("evolve", args.iter().copied())
    }

    fn run(mind: &mut MindState, args: &[&str]) -> Outcome {
        handle_evolve(mind, args, &CognitiveRules::default())
    }

    fn handle_evolve(mind: &mut MindState, args: &[&str], rules: &CognitiveRules) -> Outcome {
        evolve("AI-Alpha", mind, &evolve_cmd(args), rules)
    }

    #[test]
    fn test_max_energy_increase() {
        let mut mind = ready(70);
        let out = run(&mut mind, &["max_energy", "increase"]);
        assert_eq!(mind.max_energy, 110);
        assert_eq!(mind.energy, 20);
        assert!(mind.thoughts.is_empty());
        assert_eq!(mind.focus, None);
        assert_eq!(mind.clarity, 0.0);
        assert_eq!(out.next, CognitiveMode::Acting);
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.events[0].kind, EventKind::Evolved);
        assert!(out.events[0].message.contains("EVOLVED"));
        assert!(out.events[0].message.contains("max_energy increase -> 110"));
    }

    #[test]
    fn test_consumes_only_the_focused_thought() {
        let mut mind = ready(70);
        mind.thoughts = vec!["a".into(), "b".into(), "c".into()];
        mind.focus = Some(1);
        run(&mut mind, &["threshold", "increase"]);
        assert_eq!(mind.thoughts, vec!["a".to_string(), "c".to_string()]);
        assert!(mind.validate().is_ok());
    }

    #[test]
    fn test_threshold_decrease_floors() {
        let mut mind = ready(70);
        mind.max_energy = 10_000;
        mind.energy = 10_000;
        for _ in 0..30 {
            mind.thoughts.push("t".into());
            mind.focus = Some(mind.thoughts.len() - 1);
            mind.clarity = 1.0;
            let out = run(&mut mind, &["threshold", "decrease"]);
            assert_eq!(out.events[0].kind, EventKind::Evolved);
            assert!(mind.expression_threshold >= 0.10);
        }
        assert_eq!(mind.expression_threshold, 0.10);
    }

    #[test]
    fn test_threshold_increase_caps() {
        let mut mind = ready(70);
        mind.max_energy = 10_000;
        mind.energy = 10_000;
        for _ in 0..30 {
            mind.thoughts.push("t".into());
            mind.focus = Some(mind.thoughts.len() - 1);
            mind.clarity = 1.0;
            run(&mut mind, &["threshold", "increase"]);
            assert!(mind.expression_threshold <= 0.95);
        }
        assert_eq!(mind.expression_threshold, 0.95);
    }

    #[test]
    fn test_precondition_order() {
        // Each case fails exactly one precondition, with everything earlier satisfied.
        let cases: Vec<(MindState, Vec<&str>, EventKind)> = vec![
            (ready(70), vec!["max_energy"], EventKind::UsageError),
            (ready(70), vec![], EventKind::UsageError),
            (ready(70), vec!["wisdom", "increase"], EventKind::InvalidParameter),
            (
                MindState {
                    focus: None,
                    clarity: 0.0,
                    ..ready(70)
                },
                vec!["max_energy", "increase"],
                EventKind::NoFocus,
            ),
            (
                MindState {
                    clarity: 0.94,
                    ..ready(70)
                },
                vec!["max_energy", "increase"],
                EventKind::ClarityTooLow,
            ),
            (ready(49), vec!["max_energy", "increase"], EventKind::InsufficientEnergy),
            (ready(70), vec!["max_energy", "decrease"], EventKind::InvalidDirection),
            (ready(70), vec!["threshold", "sideways"], EventKind::InvalidDirection),
        ];

        for (mut mind, args, expected) in cases {
            let original = mind.clone();
            let out = run(&mut mind, &args);
            assert_eq!(out.events.len(), 1, "{args:?}");
            assert_eq!(out.events[0].kind, expected, "{args:?}");
            assert_eq!(mind, original, "{args:?} mutated the mind");
            assert_eq!(out.next, CognitiveMode::Acting);
        }
    }

    #[test]
    fn test_unknown_parameter_reported_before_missing_focus() {
        let mut mind = MindState::default();
        let out = run(&mut mind, &["wisdom", "increase"]);
        assert_eq!(out.events[0].kind, EventKind::InvalidParameter);
    }

    #[test]
    fn test_custom_band() {
        let rules = CognitiveRules {
            threshold_min: 0.6,
            ..CognitiveRules::default()
        };
        let mut mind = ready(70);
        mind.expression_threshold = 0.62;
        handle_evolve(&mut mind, &["threshold", "decrease"], &rules);
        assert_eq!(mind.expression_threshold, 0.6);
    }
}
