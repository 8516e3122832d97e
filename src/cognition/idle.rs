//! Idle mode: rest, recharge, or pay to enter an active mode.

use super::{CognitiveMode, Command, EventKind, Outcome};
use crate::mind::{CognitiveRules, MindState};

pub(crate) fn handle(
    agent_id: &str,
    mind: &mut MindState,
    command: &Command,
    rules: &CognitiveRules,
) -> Outcome {
    match command.name.as_str() {
        "think" => enter(
            agent_id,
            mind,
            rules,
            CognitiveMode::Thinking,
            "started thinking",
            "start thinking",
        ),
        "reflect" => enter(
            agent_id,
            mind,
            rules,
            CognitiveMode::Reflecting,
            "started reflecting",
            "start reflecting",
        ),
        "act" => enter(
            agent_id,
            mind,
            rules,
            CognitiveMode::Acting,
            "prepared to act",
            "prepare to act",
        ),
        "recharge" => {
            let before = mind.restore_energy(rules.recharge_amount);
            Outcome::single(
                CognitiveMode::Idle,
                EventKind::Mutation,
                format!("{agent_id} recharged. Energy {before} -> {}.", mind.energy),
            )
        }
        "idle" => Outcome::single(
            CognitiveMode::Idle,
            EventKind::Transition,
            format!("{agent_id} stays idle."),
        ),
        _ => Outcome::unknown(CognitiveMode::Idle, agent_id, command),
    }
}

fn enter(
    agent_id: &str,
    mind: &mut MindState,
    rules: &CognitiveRules,
    target: CognitiveMode,
    done: &str,
    attempt: &str,
) -> Outcome {
    if !mind.can_afford(rules.transition_cost) {
        return Outcome::single(
            CognitiveMode::Idle,
            EventKind::InsufficientEnergy,
            format!(
                "{agent_id} has not enough energy to {attempt} (needs {}, has {}).",
                rules.transition_cost, mind.energy
            ),
        );
    }
    mind.energy -= rules.transition_cost;
    Outcome::single(target, EventKind::Transition, format!("{agent_id} {done}."))
}
