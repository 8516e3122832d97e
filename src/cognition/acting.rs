//! Acting mode: express the focused thought, or evolve.

use super::{evolution, CognitiveMode, Command, EventKind, Outcome};
use crate::mind::{CognitiveRules, MindState};

pub(crate) fn handle(
    agent_id: &str,
    mind: &mut MindState,
    command: &Command,
    rules: &CognitiveRules,
) -> Outcome {
    match command.name.as_str() {
        "express" => express(agent_id, mind, rules),
        "evolve" => evolution::evolve(agent_id, mind, command, rules),
        "idle" => Outcome::single(
            CognitiveMode::Idle,
            EventKind::Transition,
            format!("{agent_id} transitioned to Idle from Acting."),
        ),
        _ => Outcome::unknown(CognitiveMode::Acting, agent_id, command),
    }
}

/// Externalize the focused thought.  Only a successful expression costs energy.
fn express(agent_id: &str, mind: &mut MindState, rules: &CognitiveRules) -> Outcome {
    const MODE: CognitiveMode = CognitiveMode::Acting;

    if !mind.can_afford(rules.express_cost) {
        return Outcome::single(
            MODE,
            EventKind::InsufficientEnergy,
            format!(
                "{agent_id} has low energy for expressing thoughts (needs {}, has {}).",
                rules.express_cost, mind.energy
            ),
        );
    }
    let Some(thought) = mind.focused_thought().map(str::to_owned) else {
        return Outcome::single(
            MODE,
            EventKind::NoFocus,
            format!("{agent_id} tried to express without focus."),
        );
    };
    if mind.clarity < mind.expression_threshold {
        return Outcome::single(
            MODE,
            EventKind::ExpressionFailed,
            format!(
                "{agent_id} FAILED TO EXPRESS: '{thought}'. Clarity {:.2} is below threshold {:.2}.",
                mind.clarity, mind.expression_threshold
            ),
        );
    }

    mind.energy -= rules.express_cost;
    let clarity = mind.clarity;
    mind.clear_focus();
    Outcome::single(
        MODE,
        EventKind::Expressed,
        format!("{agent_id} SUCCESSFULLY EXPRESSED: '{thought}'! (clarity {clarity:.2})"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(clarity: f64, energy: i64) -> MindState {
        MindState {
            thoughts: vec!["meaning is constructed, not inherent".into()],
            focus: Some(0),
            clarity,
            energy,
            ..MindState::default()
        }
    }

    fn express(mind: &mut MindState) -> Outcome {
        handle("P", mind, &Command::new("express"), &CognitiveRules::default())
    }

    #[test]
    fn test_express_success() {
        let mut mind = focused(0.8, 70);
        let out = express(&mut mind);
        assert_eq!(out.next, CognitiveMode::Acting);
        assert_eq!(mind.energy, 50);
        assert_eq!(mind.focus, None);
        assert_eq!(mind.clarity, 0.0);
        assert_eq!(mind.thoughts.len(), 1);
        assert_eq!(out.events[0].kind, EventKind::Expressed);
        assert!(out.events[0].message.contains("SUCCESSFULLY EXPRESSED"));
    }

    #[test]
    fn test_express_at_exact_threshold() {
        let mut mind = focused(0.7, 20);
        express(&mut mind);
        assert_eq!(mind.energy, 0);
        assert_eq!(mind.focus, None);
    }

    #[test]
    fn test_failed_expression_is_free() {
        let mut mind = focused(0.5, 70);
        let original = mind.clone();
        let out = express(&mut mind);
        assert_eq!(mind, original);
        assert_eq!(out.next, CognitiveMode::Acting);
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.events[0].kind, EventKind::ExpressionFailed);
        assert!(out.events[0].message.contains("below threshold 0.70"));
    }

    #[test]
    fn test_express_without_focus() {
        let mut mind = MindState::default();
        let out = express(&mut mind);
        assert_eq!(mind, MindState::default());
        assert_eq!(out.events[0].kind, EventKind::NoFocus);
    }

    #[test]
    fn test_express_without_energy() {
        let mut mind = focused(0.9, 19);
        let original = mind.clone();
        let out = express(&mut mind);
        assert_eq!(mind, original);
        assert_eq!(out.events[0].kind, EventKind::InsufficientEnergy);
    }
}
