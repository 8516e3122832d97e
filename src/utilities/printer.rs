//! Console printer utility with color support.
//!
//! Used by the dashboard, the status view and the manual console; never by
//! the cognitive core.

use serde::{Deserialize, Serialize};

/// Available colors for printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterColor {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    BoldGreen,
    BoldYellow,
    BoldCyan,
}

impl PrinterColor {
    /// ANSI escape code for this color.
    fn ansi_code(&self) -> &'static str {
        match self {
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Blue => "\x1b[34m",
            Self::Cyan => "\x1b[36m",
            Self::BoldGreen => "\x1b[1;32m",
            Self::BoldYellow => "\x1b[1;33m",
            Self::BoldCyan => "\x1b[1;36m",
        }
    }

    /// Traffic-light color for a fill ratio: red below 1/3, yellow below 2/3.
    pub fn for_level(ratio: f64, high: PrinterColor) -> Self {
        if ratio < 1.0 / 3.0 {
            Self::Red
        } else if ratio < 2.0 / 3.0 {
            Self::Yellow
        } else {
            high
        }
    }
}

/// ANSI reset code.
const RESET: &str = "\x1b[0m";

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Wrap `text` in the escape codes for `color`.
pub fn paint(text: &str, color: PrinterColor) -> String {
    format!("{}{}{}", color.ansi_code(), text, RESET)
}

/// Fixed-width bar of `length` cells, `current/max` of them filled.
pub fn bar(current: i64, max: i64, length: usize, color: PrinterColor) -> String {
    if max <= 0 {
        return "-".repeat(length);
    }
    let filled = ((current as f64 / max as f64) * length as f64) as i64;
    let filled = filled.clamp(0, length as i64) as usize;
    let mut out = String::with_capacity(length * 8);
    if filled > 0 {
        out.push_str(&paint(&"■".repeat(filled), color));
    }
    out.push_str(&"-".repeat(length - filled));
    out
}

/// Printer for console output with color support.
#[derive(Debug, Clone, Default)]
pub struct Printer;

impl Printer {
    /// Create a new `Printer`.
    pub fn new() -> Self {
        Self
    }

    /// Print a message with the specified color.
    pub fn print(&self, content: &str, color: PrinterColor) {
        println!("{}", paint(content, color));
    }

    /// Print a message as-is.
    pub fn plain(&self, content: &str) {
        println!("{content}");
    }
}
