//! Reflecting mode: raise the clarity of the focused thought.

use rand::Rng;

use super::{CognitiveMode, Command, EventKind, Outcome};
use crate::mind::{CognitiveRules, MindState};

pub(crate) fn handle<R>(
    agent_id: &str,
    mind: &mut MindState,
    command: &Command,
    rules: &CognitiveRules,
    rng: &mut R,
) -> Outcome
where
    R: Rng + ?Sized,
{
    const MODE: CognitiveMode = CognitiveMode::Reflecting;

    match command.name.as_str() {
        "introspect" => {
            if !mind.can_afford(rules.introspect_cost) {
                return Outcome::single(
                    MODE,
                    EventKind::InsufficientEnergy,
                    format!(
                        "{agent_id} has low energy for introspection (needs {}, has {}).",
                        rules.introspect_cost, mind.energy
                    ),
                );
            }
            let Some(idx) = mind.focus else {
                return Outcome::single(
                    MODE,
                    EventKind::NoFocus,
                    format!("{agent_id} tried to introspect without focus."),
                );
            };
            mind.energy -= rules.introspect_cost;
            let gain = rules.introspect_base_gain + rng.gen::<f64>() * rules.introspect_jitter;
            mind.clarity = (mind.clarity + gain).min(1.0);
            Outcome::single(
                MODE,
                EventKind::Mutation,
                format!(
                    "{agent_id} introspected on '{}'. Clarity now {:.2}.",
                    mind.thoughts[idx], mind.clarity
                ),
            )
        }
        "unfocus" => match mind.focused_thought().map(str::to_owned) {
            Some(thought) => {
                mind.clear_focus();
                Outcome::single(
                    MODE,
                    EventKind::Mutation,
                    format!("{agent_id} unfocused from '{thought}'."),
                )
            }
            None => Outcome::single(
                MODE,
                EventKind::NoFocus,
                format!("{agent_id} tried to unfocus but no thought was focused."),
            ),
        },
        "idle" => Outcome::single(
            CognitiveMode::Idle,
            EventKind::Transition,
            format!("{agent_id} transitioned to Idle from Reflecting."),
        ),
        _ => Outcome::unknown(MODE, agent_id, command),
    }
}
