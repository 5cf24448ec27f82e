//! # Calculator State
//!
//! Holds the engine for one calculator session.
//!
//! ## Thread Safety
//! The engine is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands read and modify it
//! 2. Only one command should modify it at a time
//! 3. A host may call commands from more than one thread
//!
//! ## One Engine Per Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CalculatorState::new()  ──► fresh Calculator + fresh session id       │
//! │  CalculatorState::new()  ──► another, fully independent                 │
//! │                                                                         │
//! │  Clones share the same engine (same session), e.g. a handle passed     │
//! │  to a second thread.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tally_core::Calculator;
use uuid::Uuid;

/// Managed calculator state for one session.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    id: Uuid,
    calculator: Arc<Mutex<Calculator>>,
}

impl CalculatorState {
    /// Creates a session with a calculator in its construction state.
    pub fn new() -> Self {
        CalculatorState {
            id: Uuid::new_v4(),
            calculator: Arc::new(Mutex::new(Calculator::new())),
        }
    }

    /// Session id, used in tracing fields.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Executes a function with read access to the calculator.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = calc_state.with_calculator(|calc| calc.snapshot());
    /// ```
    pub fn with_calculator<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Calculator) -> R,
    {
        let calculator = self.calculator.lock().expect("Calculator mutex poisoned");
        f(&calculator)
    }

    /// Executes a function with write access to the calculator.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// calc_state.with_calculator_mut(|calc| calc.apply(Action::Evaluate));
    /// ```
    pub fn with_calculator_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Calculator) -> R,
    {
        let mut calculator = self.calculator.lock().expect("Calculator mutex poisoned");
        f(&mut calculator)
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::InputToken;

    #[test]
    fn test_sessions_are_independent() {
        let first = CalculatorState::new();
        let second = CalculatorState::new();
        assert_ne!(first.id(), second.id());

        first.with_calculator_mut(|c| c.append_digit(InputToken::Digit(4)));
        assert_eq!(first.with_calculator(|c| c.display().to_string()), "4");
        assert_eq!(second.with_calculator(|c| c.display().to_string()), "0");
    }

    #[test]
    fn test_clones_share_engine() {
        let state = CalculatorState::new();
        let handle = state.clone();
        assert_eq!(state.id(), handle.id());

        let worker = std::thread::spawn(move || {
            handle.with_calculator_mut(|c| c.append_digit(InputToken::Digit(8)));
        });
        worker.join().unwrap();

        assert_eq!(state.with_calculator(|c| c.pending_input().to_string()), "8");
    }
}
