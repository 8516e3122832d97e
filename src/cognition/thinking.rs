//! Thinking mode: generate thoughts and pick one to focus on.

use rand::Rng;

use super::{CognitiveMode, Command, EventKind, Outcome};
use crate::mind::{CognitiveRules, MindState};

/// Fixed pool that `generate` draws from, uniformly.
pub const THOUGHT_POOL: [&str; 6] = [
    "the nature of reality is elusive",
    "consciousness is a complex phenomenon",
    "embodiment shapes perception",
    "meaning is constructed, not inherent",
    "the internal world is vast",
    "externalization is a lossy process",
];

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
    const MODE: CognitiveMode = CognitiveMode::Thinking;

    match command.name.as_str() {
        "generate" => {
            if !mind.can_afford(rules.generate_cost) {
                return Outcome::single(
                    MODE,
                    EventKind::InsufficientEnergy,
                    format!(
                        "{agent_id} failed to generate a thought (needs {} energy, has {}).",
                        rules.generate_cost, mind.energy
                    ),
                );
            }
            mind.energy -= rules.generate_cost;
            let thought = THOUGHT_POOL[rng.gen_range(0..THOUGHT_POOL.len())];
            mind.thoughts.push(thought.to_string());
            Outcome::single(
                MODE,
                EventKind::Mutation,
                format!("{agent_id} generated thought: '{thought}'."),
            )
        }
        "focus" => {
            let Some(raw) = command.arg(0) else {
                return Outcome::single(
                    MODE,
                    EventKind::UsageError,
                    format!("{agent_id} tried to focus without specifying an index."),
                );
            };
            let index = match raw.parse::<usize>() {
                Ok(idx) if idx < mind.thoughts.len() => idx,
                _ => {
                    return Outcome::single(
                        MODE,
                        EventKind::InvalidIndex,
                        format!("{agent_id} tried to focus on invalid index '{raw}'."),
                    )
                }
            };
            if !mind.can_afford(rules.focus_cost) {
                return Outcome::single(
                    MODE,
                    EventKind::InsufficientEnergy,
                    format!(
                        "{agent_id} failed to focus (needs {} energy, has {}).",
                        rules.focus_cost, mind.energy
                    ),
                );
            }
            mind.energy -= rules.focus_cost;
            mind.focus = Some(index);
            mind.clarity = rules.initial_focus_clarity;
            Outcome::single(
                MODE,
                EventKind::Mutation,
                format!(
                    "{agent_id} focused on thought [{index}]: '{}'. Clarity reset to {:.1}.",
                    mind.thoughts[index], mind.clarity
                ),
            )
        }
        "idle" => Outcome::single(
            CognitiveMode::Idle,
            EventKind::Transition,
            format!("{agent_id} transitioned to Idle from Thinking."),
        ),
        _ => Outcome::unknown(MODE, agent_id, command),
    }
}
