//! Tokenized commands handed to the state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A command name plus its already-tokenized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Command {
    /// A command without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a command from whitespace-separated tokens.  `None` for no tokens.
    pub fn from_tokens<'a, I>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();
        let name = tokens.next()?;
        Some(Self::with_args(name, tokens))
    }

    /// Argument at `idx`, if present.
    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens() {
        let cmd = Command::from_tokens("evolve max_energy increase".split_whitespace()).unwrap();
        assert_eq!(cmd.name, "evolve");
        assert_eq!(cmd.arg(0), Some("max_energy"));
        assert_eq!(cmd.arg(1), Some("increase"));
        assert_eq!(cmd.arg(2), None);
        assert_eq!(cmd.to_string(), "evolve max_energy increase");

        assert!(Command::from_tokens("".split_whitespace()).is_none());
    }
}
