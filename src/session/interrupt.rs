//! Ctrl-C handling for the simulation loop.
//!
//! At the console prompt an interrupt exits right away.  In observer mode
//! the first interrupt only asks the loop to stop autopilot at the next tick
//! boundary; a second one before that exits.

use std::sync::atomic::{AtomicBool, Ordering};

/// What the signal handler should do with an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    Exit,
    StopAutopilot,
}

/// Interrupt state shared between the signal handler and the loop.
#[derive(Debug, Default)]
pub struct Interrupts {
    pending: AtomicBool,
    observing: AtomicBool,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether the player is currently on autopilot.
    pub fn set_observing(&self, observing: bool) {
        self.observing.store(observing, Ordering::SeqCst);
        if !observing {
            self.pending.store(false, Ordering::SeqCst);
        }
    }

    /// Called from the signal handler.
    pub fn on_signal(&self) -> InterruptAction {
        if !self.observing.load(Ordering::SeqCst) || self.pending.swap(true, Ordering::SeqCst) {
            InterruptAction::Exit
        } else {
            InterruptAction::StopAutopilot
        }
    }

    /// Consume a pending stop request.
    pub fn take_stop(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}
