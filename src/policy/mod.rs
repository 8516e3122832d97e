//! Autonomous policy: the fixed heuristic that drives unattended agents.
//!
//! [`select_command`] is a pure function of the current mode, a read-only
//! view of the mind and the injected random source.  It returns at most one
//! [`Command`]; `None` means the agent does nothing this tick.
//!
//! Coin flips are only drawn after the deterministic part of a condition
//! holds, so a seeded source always yields the same sequence of decisions.
//!
//! | Mode       | Preference (first match wins)                                   |
//! |------------|-----------------------------------------------------------------|
//! | Idle       | recharge when low · think (50%) · reflect/act (1/3) · nothing   |
//! | Thinking   | generate (50%) · focus a random thought (50%) · reflect · idle  |
//! | Reflecting | introspect until clear (50%) · act once expressible (50%) · idle|
//! | Acting     | evolve when eligible · express (50%) · idle                      |

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cognition::{CognitiveMode, Command};
use crate::mind::{CognitiveRules, MindState};

/// Below this energy an idle agent recharges.
const RECHARGE_BELOW: i64 = 30;
/// Above this energy an idle agent considers thinking.
const THINK_ABOVE: i64 = 50;
/// Above this energy a thinking agent considers generating.
const GENERATE_ABOVE: i64 = 15;
/// Above this energy a focused agent moves on to reflecting or acting.
const ADVANCE_ABOVE: i64 = 30;
/// Above this energy a reflecting agent considers introspecting.
const INTROSPECT_ABOVE: i64 = 20;
/// Introspection stops being attractive at this clarity.
const INTROSPECT_UNTIL: f64 = 0.9;
/// Above this energy an acting agent considers expressing.
const EXPRESS_ABOVE: i64 = 25;

/// Tuning for the evolution choices of the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Evolve max energy while it is below this cap.
    pub max_energy_soft_cap: i64,
    /// Past the cap, lower the threshold while it is above this floor.
    pub threshold_floor: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_energy_soft_cap: 150,
            threshold_floor: 0.20,
        }
    }
}

/// Pick the next command for an unattended agent, or `None` to pass.
pub fn select_command<R>(
    mode: CognitiveMode,
    mind: &MindState,
    rules: &CognitiveRules,
    config: &PolicyConfig,
    rng: &mut R,
) -> Option<Command>
where
    R: Rng + ?Sized,
{
    let choice = match mode {
        CognitiveMode::Idle => idle(mind, rng),
        CognitiveMode::Thinking => Some(thinking(mind, rng)),
        CognitiveMode::Reflecting => Some(reflecting(mind, rng)),
        CognitiveMode::Acting => Some(acting(mind, rules, config, rng)),
    };
    let label = choice
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string);
    tracing::debug!(
        mode = mode.name(),
        energy = mind.energy,
        choice = %label,
        "policy decision"
    );
    choice
}

fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

fn idle<R: Rng + ?Sized>(mind: &MindState, rng: &mut R) -> Option<Command> {
    if mind.energy < RECHARGE_BELOW && mind.energy < mind.max_energy {
        Some(Command::new("recharge"))
    } else if mind.energy > THINK_ABOVE && coin(rng) {
        Some(Command::new("think"))
    } else if rng.gen_ratio(1, 3) {
        if coin(rng) {
            Some(Command::new("reflect"))
        } else {
            Some(Command::new("act"))
        }
    } else {
        None
    }
}

fn thinking<R: Rng + ?Sized>(mind: &MindState, rng: &mut R) -> Command {
    if mind.energy > GENERATE_ABOVE && coin(rng) {
        Command::new("generate")
    } else if !mind.thoughts.is_empty() && !mind.has_focus() && coin(rng) {
        let index = rng.gen_range(0..mind.thoughts.len());
        Command::with_args("focus", [index.to_string()])
    } else if mind.has_focus() && mind.energy > ADVANCE_ABOVE && coin(rng) {
        // Not a Thinking command: the dispatch is a logged no-op.
        Command::new("reflect")
    } else {
        Command::new("idle")
    }
}

fn reflecting<R: Rng + ?Sized>(mind: &MindState, rng: &mut R) -> Command {
    let focused = mind.has_focus();
    if focused && mind.energy > INTROSPECT_ABOVE && mind.clarity < INTROSPECT_UNTIL && coin(rng) {
        Command::new("introspect")
    } else if focused
        && mind.clarity >= mind.expression_threshold
        && mind.energy > ADVANCE_ABOVE
        && coin(rng)
    {
        // Not a Reflecting command: the dispatch is a logged no-op.
        Command::new("act")
    } else {
        Command::new("idle")
    }
}

fn acting<R: Rng + ?Sized>(
    mind: &MindState,
    rules: &CognitiveRules,
    config: &PolicyConfig,
    rng: &mut R,
) -> Command {
    let can_evolve = mind.has_focus()
        && mind.clarity >= rules.evolve_min_clarity
        && mind.energy >= rules.evolve_cost;
    if can_evolve {
        if mind.max_energy < config.max_energy_soft_cap {
            return Command::with_args("evolve", ["max_energy", "increase"]);
        }
        if mind.expression_threshold > config.threshold_floor {
            return Command::with_args("evolve", ["threshold", "decrease"]);
        }
    }

    if mind.has_focus()
        && mind.energy > EXPRESS_ABOVE
        && mind.clarity >= mind.expression_threshold
        && coin(rng)
    {
        Command::new("express")
    } else {
        Command::new("idle")
    }
}

// ============================================================================
// Tests
// ============================================================================
