//! qualia-sim console binary.
//!
//! Runs the turn-based simulation: the player types commands for
//! `Player-1` while the autonomous agents act on their own.  With autopilot
//! on, the player is driven by the policy too and the observer dashboard is
//! redrawn every tick.
//!
//! # Environment Variables
//!
//! - `QUALIA_CONFIG`: Path to a YAML `SimulationConfig` (default: built-in defaults)
//! - `QUALIA_SEED`: Seed for the random source (default: entropy)
//! - `QUALIA_AUTOPILOT`: Start with the player on autopilot (`true`/`false`)
//! - `RUST_LOG`: Tracing filter (default: "info,qualia=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin qualia-sim
//! # observer mode, reproducible:
//! QUALIA_AUTOPILOT=true QUALIA_SEED=7 cargo run --bin qualia-sim
//! ```
//!
//! Console commands besides the mode commands: `view`, `autopilot`,
//! `save <file.json>`, `load <file.json>`, `quit`.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

use qualia::dashboard::render_dashboard;
use qualia::session::{InterruptAction, Interrupts, LineConsole, Session, TickFlow};
use qualia::utilities::config::SimulationConfig;
use qualia::utilities::printer::{Printer, PrinterColor, CLEAR_SCREEN};

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so it never interleaves with the prompt.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,qualia=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimulationConfig::from_env().context("failed to load simulation config")?;
    let mut rng = match config.seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let tick_interval = Duration::from_millis(config.tick_interval_ms);

    let interrupts = Arc::new(Interrupts::new());
    {
        let interrupts = Arc::clone(&interrupts);
        ctrlc::set_handler(move || {
            if interrupts.on_signal() == InterruptAction::Exit {
                std::process::exit(130);
            }
        })
        .context("failed to install Ctrl-C handler")?;
    }

    let printer = Printer::new();
    let mut session = Session::new(config);
    let mut console = LineConsole::stdio();

    printer.print("Qualia simulation started.", PrinterColor::BoldGreen);
    printer.plain("Type 'autopilot' to hand the player to the policy.");
    printer.plain("Ctrl-C exits; in observer mode it stops autopilot, and a second press exits.");
    tracing::info!(agents = session.agents.len(), "simulation started");

    let mut ticks: u64 = 0;
    loop {
        if interrupts.take_stop() && session.autopilot {
            session.toggle_autopilot();
            printer.print("Autopilot stopped.", PrinterColor::Yellow);
        }
        interrupts.set_observing(session.autopilot);

        let flow = session.tick(&mut console, &mut rng);
        interrupts.set_observing(session.autopilot);
        if flow == TickFlow::Quit {
            break;
        }
        ticks += 1;

        if session.autopilot {
            print!("{CLEAR_SCREEN}");
            printer.plain(&render_dashboard(&session));
            std::thread::sleep(tick_interval);
        }
    }

    tracing::info!(ticks, "simulation ended");
    Ok(())
}
