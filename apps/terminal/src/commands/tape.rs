//! # Tape Commands
//!
//! Reading and clearing the tape of completed calculations.

use tracing::debug;

use crate::state::{TapeEntry, TapeState};

/// Gets every tape line, oldest first.
pub fn get_tape(tape: &TapeState) -> Vec<TapeEntry> {
    debug!("get_tape command");
    tape.with_tape(|t| t.entries().cloned().collect())
}

/// Clears the tape. The calculator is not touched.
pub fn clear_tape(tape: &TapeState) {
    debug!("clear_tape command");
    tape.with_tape_mut(|t| t.clear());
}
