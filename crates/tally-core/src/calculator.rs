//! # Calculator Engine
//!
//! The four-function state machine. One `Calculator` value per calculator
//! on screen; there is no shared or global state.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Calculator Operations                                │
//! │                                                                         │
//! │  User Action             Operation               State Change           │
//! │  ───────────             ─────────               ────────────           │
//! │                                                                         │
//! │  Press 0-9 / . ────────► append_digit() ───────► pending_input += key  │
//! │                                                                         │
//! │  Press + − × ÷ ────────► set_operator() ───────► (evaluate if chained) │
//! │                                                  accumulator = input   │
//! │                                                  operator = op         │
//! │                                                                         │
//! │  Press = ──────────────► evaluate() ───────────► accumulator = result  │
//! │                                                  operator = none       │
//! │                                                                         │
//! │  Press ⌫ ──────────────► backspace() ──────────► pending_input.pop()   │
//! │                                                                         │
//! │  Press C ──────────────► reset() ──────────────► construction state    │
//! │                                                                         │
//! │  Refresh view ─────────► display() ────────────► (read only)           │
//! │                                                                         │
//! │  NOTE: after a division by zero every operation except reset() is     │
//! │        a no-op and display() shows the fault.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Chaining
//! Evaluation is strictly left to right. Picking an operator while another
//! is pending and a new operand has been typed evaluates the pending
//! operation first: `3 + 4 × 2 =` is `(3 + 4) × 2 = 14`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};
use ts_rs::TS;

use crate::entry::Entry;
use crate::error::Fault;
use crate::number::{format_number, round_for_display};
use crate::types::{Action, DisplayValue, InputToken, Operator, Phase};

// =============================================================================
// Evaluation Record
// =============================================================================

/// One completed arithmetic step, e.g. `3 + 4 = 7`.
///
/// Produced by every successful evaluation, explicit or chained. Hosts drain
/// it with [`Calculator::take_evaluation`] to keep a tape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub lhs: f64,
    pub operator: Operator,
    pub rhs: f64,
    /// Result after display rounding.
    pub result: f64,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            format_number(self.lhs),
            self.operator,
            format_number(self.rhs),
            format_number(self.result)
        )
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// The calculator engine.
///
/// ## Invariants
/// - `pending_input` holds at most one decimal point and never `"00"`
/// - In the error state, `pending_input` is empty and both `accumulator`
///   and `operator` are `None`
/// - `operator` is only `Some` after an operator was chosen since the last
///   evaluation or reset
///
/// `Calculator::default()` is the construction state.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    /// Operand being typed; empty means nothing typed since the last commit.
    pending_input: Entry,

    /// Committed left-hand operand (or the last result).
    accumulator: Option<f64>,

    /// Operator waiting for its right-hand operand.
    operator: Option<Operator>,

    /// Set by division by zero, cleared only by `reset()`.
    in_error: bool,

    /// Last successful evaluation not yet taken by the host.
    last_evaluation: Option<Evaluation>,
}

impl Calculator {
    /// Creates a calculator in its construction state (display `"0"`).
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Mutating operations
    // -------------------------------------------------------------------------

    /// Appends a digit or the decimal point to the operand being typed.
    ///
    /// Ignored in the error state. See [`Entry::push`] for the input rules.
    pub fn append_digit(&mut self, token: InputToken) {
        if self.in_error {
            trace!(?token, "input ignored in error state");
            return;
        }
        if self.pending_input.push(token) {
            trace!(entry = %self.pending_input, "entry extended");
        }
    }

    /// Selects the operator to apply to the next operand.
    ///
    /// ## Behavior
    /// - Operator already pending and a new operand typed: evaluate first
    /// - Then the typed operand (if any) becomes the accumulator; with
    ///   nothing typed and no accumulator, the accumulator becomes `0`
    /// - Pressing operators repeatedly just replaces the pending operator
    ///
    /// If the chained evaluation divides by zero the engine stays in the
    /// error state and `operator` is not recorded.
    pub fn set_operator(&mut self, operator: Operator) {
        if self.in_error {
            trace!(%operator, "operator ignored in error state");
            return;
        }

        if self.operator.is_some() && !self.pending_input.is_empty() {
            self.evaluate();
            if self.in_error {
                return;
            }
        }

        if !self.pending_input.is_empty() {
            self.accumulator = Some(self.pending_input.value());
        } else if self.accumulator.is_none() {
            self.accumulator = Some(0.0);
        }

        self.operator = Some(operator);
        self.pending_input.clear();
        debug!(%operator, accumulator = ?self.accumulator, "operator selected");
    }

    /// Applies the pending operator and returns the new display value.
    ///
    /// ## Behavior
    /// - Error state or no operator pending: returns the current display,
    ///   nothing changes (so pressing `=` twice is harmless)
    /// - Right-hand operand is the typed entry, or the accumulator itself when
    ///   nothing was typed (`5 + =` gives `10`)
    /// - `÷ 0` enters the error state and returns the fault
    /// - Otherwise the result is rounded to 12 significant digits, stored as the
    ///   accumulator, and the operator and entry are cleared
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Calculator, InputToken, Operator};
    ///
    /// let mut calc = Calculator::new();
    /// calc.append_digit(InputToken::DecimalPoint);
    /// calc.append_digit(InputToken::Digit(1));
    /// calc.set_operator(Operator::Add);
    /// calc.append_digit(InputToken::DecimalPoint);
    /// calc.append_digit(InputToken::Digit(2));
    ///
    /// assert_eq!(calc.evaluate().to_string(), "0.3");
    /// ```
    pub fn evaluate(&mut self) -> DisplayValue {
        if self.in_error {
            return self.display();
        }
        let Some(operator) = self.operator else {
            return self.display();
        };

        let lhs = self.accumulator.unwrap_or(0.0);
        let rhs = if self.pending_input.is_empty() {
            lhs
        } else {
            self.pending_input.value()
        };

        match operator.apply(lhs, rhs) {
            Ok(raw) => {
                let result = round_for_display(raw);
                self.accumulator = Some(result);
                self.operator = None;
                self.pending_input.clear();

                let evaluation = Evaluation {
                    lhs,
                    operator,
                    rhs,
                    result,
                };
                debug!(%evaluation, "evaluated");
                self.last_evaluation = Some(evaluation);

                DisplayValue::Number(format_number(result))
            }
            Err(fault) => {
                warn!(lhs, %operator, rhs, %fault, "evaluation faulted");
                self.pending_input.clear();
                self.accumulator = None;
                self.operator = None;
                self.in_error = true;
                DisplayValue::Fault(fault)
            }
        }
    }

    /// Restores the construction state. Works from any state, including error.
    pub fn reset(&mut self) {
        *self = Self::default();
        debug!("calculator reset");
    }

    /// Removes the last typed character.
    ///
    /// Ignored in the error state or when nothing is typed. Never touches a
    /// committed operand or the pending operator.
    pub fn backspace(&mut self) {
        if self.in_error {
            return;
        }
        if let Some(removed) = self.pending_input.pop() {
            trace!(%removed, entry = %self.pending_input, "backspace");
        }
    }

    /// Dispatches one user action and returns the display afterwards.
    pub fn apply(&mut self, action: Action) -> DisplayValue {
        match action {
            Action::Input(token) => self.append_digit(token),
            Action::Operator(operator) => self.set_operator(operator),
            Action::Evaluate => return self.evaluate(),
            Action::Reset => self.reset(),
            Action::Backspace => self.backspace(),
        }
        self.display()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// What the display shows right now.
    ///
    /// Fault in the error state, else the typed entry, else the accumulator,
    /// else `"0"`.
    pub fn display(&self) -> DisplayValue {
        if self.in_error {
            return DisplayValue::Fault(Fault::DivisionByZero);
        }
        if !self.pending_input.is_empty() {
            return DisplayValue::Number(self.pending_input.to_string());
        }
        match self.accumulator {
            Some(value) => DisplayValue::Number(format_number(value)),
            None => DisplayValue::Number("0".to_string()),
        }
    }

    /// Current state machine phase.
    pub fn phase(&self) -> Phase {
        if self.in_error {
            Phase::Error
        } else if self.operator.is_some() {
            Phase::OperatorPending
        } else {
            Phase::Entering
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.in_error
    }

    #[inline]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.operator
    }

    #[inline]
    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    #[inline]
    pub fn pending_input(&self) -> &str {
        self.pending_input.as_str()
    }

    /// Takes the last successful evaluation, leaving `None` behind.
    pub fn take_evaluation(&mut self) -> Option<Evaluation> {
        self.last_evaluation.take()
    }

    /// Serializable view of the whole state.
    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot::from(self)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of a calculator for a frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSnapshot {
    pub display: DisplayValue,
    pub phase: Phase,
    pub pending_operator: Option<Operator>,
    pub accumulator: Option<f64>,
    pub pending_input: String,
}

impl From<&Calculator> for CalculatorSnapshot {
    fn from(calc: &Calculator) -> Self {
        CalculatorSnapshot {
            display: calc.display(),
            phase: calc.phase(),
            pending_operator: calc.pending_operator(),
            accumulator: calc.accumulator(),
            pending_input: calc.pending_input().to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_actions, ERROR_INDICATOR};

    /// Feeds keypad text into a fresh calculator.
    fn run(keys: &str) -> Calculator {
        let mut calc = Calculator::new();
        for action in parse_actions(keys).unwrap() {
            calc.apply(action);
        }
        calc
    }

    fn shown(calc: &Calculator) -> String {
        calc.display().to_string()
    }

    #[test]
    fn test_initial_display_is_zero() {
        let calc = Calculator::new();
        assert_eq!(shown(&calc), "0");
        assert_eq!(calc.phase(), Phase::Entering);
        assert_eq!(calc.accumulator(), None);
        assert_eq!(calc.pending_operator(), None);
    }

    #[test]
    fn test_digit_entry_rules() {
        assert_eq!(run("000").pending_input(), "0");
        assert_eq!(run("0.00").pending_input(), "0.00");
        assert_eq!(run("1.2.3").pending_input(), "1.23");
        assert_eq!(shown(&run(".")), "0.");
    }

    #[test]
    fn test_digit_entry_rules_hold_for_all_short_sequences() {
        let mut sequences = vec![String::new()];
        let mut checked = 0;

        for _ in 0..7 {
            let mut longer = Vec::with_capacity(sequences.len() * 3);
            for prefix in &sequences {
                for key in ['0', '1', '.'] {
                    let mut keys = prefix.clone();
                    keys.push(key);

                    let mut calc = Calculator::new();
                    for c in keys.chars() {
                        calc.append_digit(InputToken::try_from(c).unwrap());
                    }
                    let entry = calc.pending_input();
                    assert!(entry.matches('.').count() <= 1, "{keys} -> {entry}");
                    assert!(!entry.starts_with("00"), "{keys} -> {entry}");
                    assert!(entry.parse::<f64>().is_ok(), "{keys} -> {entry}");
                    checked += 1;

                    longer.push(keys);
                }
            }
            sequences = longer;
        }

        assert_eq!(checked, 3279);
    }

    #[test]
    fn test_simple_addition() {
        let mut calc = run("3+4");
        assert_eq!(calc.evaluate(), DisplayValue::Number("7".to_string()));
        assert_eq!(calc.accumulator(), Some(7.0));
        assert_eq!(calc.phase(), Phase::Entering);
    }

    #[test]
    fn test_left_operand_is_accumulator() {
        assert_eq!(shown(&run("9-4=")), "5");
        assert_eq!(shown(&run("8÷2=")), "4");
    }

    #[test]
    fn test_rounding_hides_float_noise() {
        let calc = run("0.1+0.2=");
        assert_eq!(shown(&calc), "0.3");
        assert_eq!(calc.accumulator(), Some(0.3));
    }

    #[test]
    fn test_rounding_hides_float_noise_on_large_values() {
        assert_eq!(shown(&run("10000.1+20000.2=")), "30000.3");
        assert_eq!(shown(&run("1234567.1×3=")), "3703701.3");
        assert_eq!(shown(&run("100000.7-0.1=")), "100000.6");

        let calc = run("10000.1+20000.2=");
        assert_eq!(calc.accumulator(), Some(30000.3));
    }

    #[test]
    fn test_operator_chaining_is_left_to_right() {
        let mut calc = run("3+4×");
        assert_eq!(shown(&calc), "7");
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));

        calc.append_digit(InputToken::Digit(2));
        assert_eq!(calc.evaluate().to_string(), "14");
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let calc = run("5+-×");
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
        assert_eq!(calc.accumulator(), Some(5.0));
        assert_eq!(shown(&run("5+-×3=")), "15");
    }

    #[test]
    fn test_operator_before_digits_defaults_to_zero() {
        let calc = run("-");
        assert_eq!(calc.accumulator(), Some(0.0));
        assert_eq!(shown(&run("-5=")), "-5");
    }

    #[test]
    fn test_evaluate_without_second_operand_reuses_accumulator() {
        assert_eq!(shown(&run("5+=")), "10");
        assert_eq!(shown(&run("6×=")), "36");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut calc = run("2×3");
        let first = calc.evaluate();
        let accumulator = calc.accumulator();

        let second = calc.evaluate();
        assert_eq!(first, second);
        assert_eq!(calc.accumulator(), accumulator);
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.pending_input(), "");
    }

    #[test]
    fn test_evaluate_without_operator_returns_display() {
        let mut calc = run("12.");
        assert_eq!(calc.evaluate().to_string(), "12.");
        assert_eq!(calc.pending_input(), "12.");
    }

    #[test]
    fn test_result_then_new_number_replaces_accumulator() {
        assert_eq!(shown(&run("2+2=7+1=")), "8");
    }

    #[test]
    fn test_result_then_operator_continues_from_result() {
        assert_eq!(shown(&run("2+2=×5=")), "20");
    }

    #[test]
    fn test_division_by_zero_enters_error() {
        let mut calc = run("5÷0");
        assert_eq!(calc.evaluate(), DisplayValue::Fault(Fault::DivisionByZero));
        assert!(calc.is_error());
        assert_eq!(calc.phase(), Phase::Error);
        assert_eq!(calc.accumulator(), None);
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.pending_input(), "");
        assert_eq!(shown(&calc), ERROR_INDICATOR);
    }

    #[test]
    fn test_division_by_zero_point_zero() {
        assert!(run("5÷0.00=").is_error());
        assert!(run("0÷=").is_error());
    }

    #[test]
    fn test_error_state_is_absorbing() {
        let mut calc = run("5÷0=");

        calc.append_digit(InputToken::Digit(7));
        calc.set_operator(Operator::Add);
        calc.backspace();
        assert!(calc.evaluate().is_fault());

        assert!(calc.is_error());
        assert_eq!(calc.pending_input(), "");
        assert_eq!(calc.accumulator(), None);
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(shown(&calc), ERROR_INDICATOR);
    }

    #[test]
    fn test_chained_division_by_zero_leaves_no_operator() {
        let mut calc = run("8÷0+");
        assert!(calc.is_error());
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.take_evaluation(), None);
    }

    #[test]
    fn test_reset_recovers_from_error() {
        let mut calc = run("5÷0=7");
        assert_eq!(shown(&calc), ERROR_INDICATOR);

        calc.reset();
        assert_eq!(shown(&calc), "0");
        assert!(!calc.is_error());

        calc.append_digit(InputToken::Digit(7));
        assert_eq!(shown(&calc), "7");
    }

    #[test]
    fn test_reset_restores_construction_state() {
        let mut calc = run("1+2=3×");
        calc.reset();
        assert_eq!(calc.pending_input(), "");
        assert_eq!(calc.accumulator(), None);
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.phase(), Phase::Entering);
        assert_eq!(calc.take_evaluation(), None);
    }

    #[test]
    fn test_backspace() {
        let mut calc = run("123");
        calc.backspace();
        calc.backspace();
        assert_eq!(calc.pending_input(), "1");

        calc.backspace();
        calc.backspace();
        assert_eq!(calc.pending_input(), "");
        assert_eq!(shown(&calc), "0");
    }

    #[test]
    fn test_backspace_cannot_undo_committed_operand() {
        let mut calc = run("12+");
        calc.backspace();
        assert_eq!(calc.accumulator(), Some(12.0));
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(shown(&calc), "12");
    }

    #[test]
    fn test_display_priority() {
        let calc = run("4+5");
        assert_eq!(shown(&calc), "5");
        let calc = run("4+");
        assert_eq!(shown(&calc), "4");
    }

    #[test]
    fn test_take_evaluation() {
        let mut calc = run("3+4×");
        let evaluation = calc.take_evaluation().unwrap();
        assert_eq!(evaluation.to_string(), "3 + 4 = 7");
        assert_eq!(calc.take_evaluation(), None);

        calc.append_digit(InputToken::Digit(2));
        calc.evaluate();
        assert_eq!(calc.take_evaluation().unwrap().to_string(), "7 × 2 = 14");
    }

    #[test]
    fn test_apply_returns_display() {
        let mut calc = Calculator::new();
        assert_eq!(calc.apply(Action::Input(InputToken::Digit(9))).to_string(), "9");
        assert_eq!(calc.apply(Action::Operator(Operator::Divide)).to_string(), "9");
        assert_eq!(calc.apply(Action::Input(InputToken::Digit(0))).to_string(), "0");
        assert!(calc.apply(Action::Evaluate).is_fault());
        assert_eq!(calc.apply(Action::Reset).to_string(), "0");
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = Calculator::new();
        let b = Calculator::new();
        a.append_digit(InputToken::Digit(5));
        assert_eq!(shown(&a), "5");
        assert_eq!(shown(&b), "0");
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = run("12+").snapshot();
        assert_eq!(snapshot.phase, Phase::OperatorPending);
        assert_eq!(snapshot.pending_operator, Some(Operator::Add));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["display"]["kind"], "number");
        assert_eq!(json["display"]["value"], "12");
        assert_eq!(json["phase"], "operator_pending");
        assert_eq!(json["pendingOperator"], "add");
        assert_eq!(json["accumulator"], 12.0);
        assert_eq!(json["pendingInput"], "");
    }
}
