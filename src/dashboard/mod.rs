//! Observer dashboard, redrawn every tick while the player is on autopilot.
//!
//! Purely a projection of the [`Session`]: it reads agents and the event log
//! and returns the full screen as a string.

use chrono::Local;
use std::fmt::Write;

use crate::session::Session;
use crate::utilities::printer::{bar, paint, PrinterColor};

/// Width of the energy and clarity bars, in cells.
pub const BAR_WIDTH: usize = 20;
/// Longest focused-thought excerpt shown before truncation.
const FOCUS_EXCERPT: usize = 25;

const RULE: &str = "=========================================================";

/// Render the whole dashboard for `session`.
pub fn render_dashboard(session: &Session) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, session);
    out
}

fn write_dashboard(out: &mut String, session: &Session) -> std::fmt::Result {
    writeln!(
        out,
        "{}",
        paint(
            "====== Qualia Simulation Dashboard (Observer Mode) ======",
            PrinterColor::BoldCyan
        )
    )?;
    writeln!(out, "Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    let autopilot = if session.autopilot {
        paint("ON", PrinterColor::BoldGreen)
    } else {
        paint("OFF", PrinterColor::Yellow)
    };
    writeln!(out, "Player autopilot: {autopilot}")?;
    writeln!(out, "{RULE}")?;

    for agent in &session.agents {
        let mind = &agent.mind;
        writeln!(
            out,
            "{} ({}) | Mode: {}",
            paint(&agent.id, PrinterColor::BoldYellow),
            agent.control,
            paint(agent.mode.name(), PrinterColor::Cyan)
        )?;

        let ratio = if mind.max_energy > 0 {
            mind.energy as f64 / mind.max_energy as f64
        } else {
            0.0
        };
        writeln!(
            out,
            "  Energy:  [{}] {}/{}",
            bar(
                mind.energy,
                mind.max_energy,
                BAR_WIDTH,
                PrinterColor::for_level(ratio, PrinterColor::Green)
            ),
            mind.energy,
            mind.max_energy
        )?;
        writeln!(
            out,
            "  Thoughts: {} | Threshold: {:.2}",
            mind.thoughts.len(),
            mind.expression_threshold
        )?;

        match mind.focused_thought() {
            Some(thought) => {
                writeln!(out, "  Focus:   \"{}\"", excerpt(thought, FOCUS_EXCERPT))?;
                let cells = (mind.clarity * 100.0).round() as i64;
                writeln!(
                    out,
                    "  Clarity: [{}] {:.2}",
                    bar(
                        cells,
                        100,
                        BAR_WIDTH,
                        PrinterColor::for_level(mind.clarity, PrinterColor::Blue)
                    ),
                    mind.clarity
                )?;
            }
            None => writeln!(out, "  Focus:   None")?,
        }
        writeln!(out, "{}", "-".repeat(RULE.len()))?;
    }

    writeln!(out, "Recent events:")?;
    if session.event_log.is_empty() {
        writeln!(out, "  (No events yet)")?;
    }
    for line in session.event_log.newest_first() {
        writeln!(out, "  {line}")?;
    }
    write!(out, "{RULE}")
}

/// Truncate to `max` characters, marking the cut with "...".
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
