//! Line-oriented console intake for the manually controlled agent.
//!
//! Raw lines are parsed here, never in the cognitive core.  Session-level
//! commands (`view`, `quit`, `autopilot`, `save`, `load`) are separated from
//! the tokenized [`Command`]s that go to the state machine.

use std::io::{self, BufRead, Write};

use crate::cognition::Command;

/// What the player asked for on one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Blank line: skip the turn.
    Skip,
    /// Show the status view.
    View,
    /// End the simulation.
    Quit,
    /// Flip the player's autopilot.
    ToggleAutopilot,
    Save(String),
    Load(String),
    /// A session command was missing its argument.
    Usage(&'static str),
    /// Anything else goes to the state machine.
    Command(Command),
}

/// Parse one raw console line.
pub fn parse_line(line: &str) -> Turn {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Turn::Skip;
    };
    match head {
        "view" => Turn::View,
        "quit" => Turn::Quit,
        "autopilot" => Turn::ToggleAutopilot,
        "save" => match tokens.next() {
            Some(path) => Turn::Save(path.to_string()),
            None => Turn::Usage("Usage: save <filename.json>"),
        },
        "load" => match tokens.next() {
            Some(path) => Turn::Load(path.to_string()),
            None => Turn::Usage("Usage: load <filename.json>"),
        },
        _ => Command::from_tokens(line.split_whitespace())
            .map(Turn::Command)
            .unwrap_or(Turn::Skip),
    }
}

/// The manual player's terminal.
pub trait Console {
    /// Show `prompt` and block until the player enters a turn.
    fn read_turn(&mut self, prompt: &str) -> Turn;

    /// Show informational text.
    fn show(&mut self, text: &str);
}

/// Console over any buffered reader and writer (stdin/stdout in the binary).
///
/// End of input reads as [`Turn::Quit`].
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_turn(&mut self, prompt: &str) -> Turn {
        let _ = write!(self.output, "\n{prompt}\n> ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Turn::Quit,
            Ok(_) => parse_line(&line),
            Err(e) => {
                tracing::warn!("console read failed: {}", e);
                Turn::Quit
            }
        }
    }

    fn show(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }
}
