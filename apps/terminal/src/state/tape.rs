//! # Tape State
//!
//! A bounded paper tape of completed calculations, like the roll on a
//! desk calculator.
//!
//! ## Tape Feed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                Engine                    Tape                  │
//! │  ───────                ──────                    ────                  │
//! │                                                                         │
//! │  press "3+4×" ────────► chained evaluate ───────► "3 + 4 = 7"          │
//! │  press "2=" ──────────► evaluate ───────────────► "7 × 2 = 14"         │
//! │  press "5÷0=" ────────► fault (no record) ──────► (unchanged)          │
//! │                                                                         │
//! │  NOTE: once `limit` entries are stored, the oldest is dropped.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::number::format_number;
use tally_core::Evaluation;

/// One line on the tape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapeEntry {
    /// Left side of the line, e.g. `"3 + 4"`
    pub expression: String,

    /// Result as displayed, e.g. `"7"`
    pub result: String,

    /// When the evaluation happened
    pub recorded_at: DateTime<Utc>,
}

impl TapeEntry {
    /// Creates a tape line from an engine evaluation.
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        TapeEntry {
            expression: format!(
                "{} {} {}",
                format_number(evaluation.lhs),
                evaluation.operator,
                format_number(evaluation.rhs)
            ),
            result: format_number(evaluation.result),
            recorded_at: Utc::now(),
        }
    }
}

/// The tape itself.
///
/// ## Invariants
/// - Never holds more than `limit` entries
/// - A limit of 0 disables recording
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    limit: usize,
}

impl Tape {
    /// Creates an empty tape holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Tape {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    /// Appends an entry, dropping the oldest when full.
    pub fn push(&mut self, entry: TapeEntry) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Managed tape state.
#[derive(Debug, Clone)]
pub struct TapeState {
    tape: Arc<Mutex<Tape>>,
}

impl TapeState {
    /// Creates an empty tape state.
    pub fn new(limit: usize) -> Self {
        TapeState {
            tape: Arc::new(Mutex::new(Tape::new(limit))),
        }
    }

    /// Executes a function with read access to the tape.
    pub fn with_tape<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Tape) -> R,
    {
        let tape = self.tape.lock().expect("Tape mutex poisoned");
        f(&tape)
    }

    /// Executes a function with write access to the tape.
    pub fn with_tape_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Tape) -> R,
    {
        let mut tape = self.tape.lock().expect("Tape mutex poisoned");
        f(&mut tape)
    }

    /// Records a batch of evaluations in order.
    pub fn record(&self, evaluations: &[Evaluation]) {
        if evaluations.is_empty() {
            return;
        }
        self.with_tape_mut(|tape| {
            for evaluation in evaluations {
                tape.push(TapeEntry::from_evaluation(evaluation));
            }
        });
    }
}
