//! # Keypad Commands
//!
//! Commands a presentation layer calls, one per key press.
//!
//! ## Keypad Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Keypad Lifecycle                                     │
//! │                                                                         │
//! │  ┌──────────┐  operator  ┌──────────────┐   =    ┌──────────┐          │
//! │  │ Entering │───────────►│ OperatorPend │───────►│  Result  │          │
//! │  └──────────┘            └──────────────┘        └──────────┘          │
//! │       ▲                         │ ÷ 0                                   │
//! │       │                         ▼                                       │
//! │       │      press_clear   ┌─────────┐                                  │
//! │       └────────────────────│  Error  │                                  │
//! │                            └─────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the display after the key, so the view can refresh
//! from the response alone. Completed evaluations are copied to the tape
//! while the calculator lock is still held, so tape order matches the order
//! in which commands reached the engine.
//!
//! ## Lock Order
//! Calculator first, then tape. Tape-only commands never touch the
//! calculator lock.

use serde::Serialize;
use tally_core::{Action, Calculator, Evaluation, InputToken, Operator, Phase};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CalculatorState, ConfigState, TapeState};

/// Display refresh returned by every keypad command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypadResponse {
    /// Text to show, with the configured error indicator for faults
    pub display: String,

    /// True while the calculator is stuck in the error state
    pub is_error: bool,

    pub phase: Phase,

    /// Operator waiting for its second operand, if any
    pub pending_operator: Option<Operator>,
}

impl KeypadResponse {
    /// Builds the response from the current engine state.
    pub fn from_calculator(calc: &Calculator, config: &ConfigState) -> Self {
        KeypadResponse {
            display: calc.display().render(&config.error_indicator),
            is_error: calc.is_error(),
            phase: calc.phase(),
            pending_operator: calc.pending_operator(),
        }
    }
}

/// Applies actions in order and copies any evaluations to the tape.
fn dispatch(
    calc: &CalculatorState,
    tape: &TapeState,
    config: &ConfigState,
    actions: &[Action],
) -> KeypadResponse {
    calc.with_calculator_mut(|c| {
        let mut evaluations: Vec<Evaluation> = Vec::new();
        for action in actions {
            c.apply(*action);
            evaluations.extend(c.take_evaluation());
        }
        tape.record(&evaluations);
        KeypadResponse::from_calculator(c, config)
    })
}

/// Gets the current display without changing anything.
pub fn get_display(calc: &CalculatorState, config: &ConfigState) -> KeypadResponse {
    debug!(session_id = %calc.id(), "get_display command");
    calc.with_calculator(|c| KeypadResponse::from_calculator(c, config))
}

/// Reads the display as a number.
///
/// ## Returns
/// - The display text while showing a number
/// - `ARITHMETIC` error while the calculator is in the error state
pub fn read_result(calc: &CalculatorState) -> Result<String, ApiError> {
    debug!(session_id = %calc.id(), "read_result command");
    let text = calc.with_calculator(|c| c.display().into_result())?;
    Ok(text)
}

/// Handles one key token (`"7"`, `"."`, `"×"`, `"="`, `"AC"`, `"⌫"`, ...).
///
/// ## Arguments
/// * `token` - A single key, see `tally_core::Action` for the accepted set
///
/// ## Returns
/// Updated display, or `INVALID_INPUT` for an unknown key
pub fn press_key(
    calc: &CalculatorState,
    tape: &TapeState,
    config: &ConfigState,
    token: &str,
) -> Result<KeypadResponse, ApiError> {
    debug!(session_id = %calc.id(), token = %token, "press_key command");
    let action: Action = token.parse()?;
    Ok(dispatch(calc, tape, config, &[action]))
}

/// Handles a line of keys such as `"12+3="` or `"5 ÷ 0 Enter"`.
///
/// The whole line is validated before any key is applied, so a bad token
/// leaves the calculator untouched.
pub fn press_keys(
    calc: &CalculatorState,
    tape: &TapeState,
    config: &ConfigState,
    line: &str,
) -> Result<KeypadResponse, ApiError> {
    debug!(session_id = %calc.id(), line = %line, "press_keys command");
    let actions = tally_core::parse_actions(line)?;
    Ok(dispatch(calc, tape, config, &actions))
}

/// Appends a digit or the decimal point.
pub fn press_digit(
    calc: &CalculatorState,
    config: &ConfigState,
    key: char,
) -> Result<KeypadResponse, ApiError> {
    debug!(session_id = %calc.id(), key = %key, "press_digit command");
    let token = InputToken::try_from(key)?;
    Ok(calc.with_calculator_mut(|c| {
        c.append_digit(token);
        KeypadResponse::from_calculator(c, config)
    }))
}

/// Selects an operator (`+ - − * x × / ÷`).
pub fn press_operator(
    calc: &CalculatorState,
    tape: &TapeState,
    config: &ConfigState,
    token: &str,
) -> Result<KeypadResponse, ApiError> {
    debug!(session_id = %calc.id(), token = %token, "press_operator command");
    let operator: Operator = token.parse()?;
    Ok(dispatch(calc, tape, config, &[Action::Operator(operator)]))
}

/// Evaluates the pending operation.
pub fn press_equals(
    calc: &CalculatorState,
    tape: &TapeState,
    config: &ConfigState,
) -> KeypadResponse {
    debug!(session_id = %calc.id(), "press_equals command");
    dispatch(calc, tape, config, &[Action::Evaluate])
}

/// Clears everything, including the error state. The tape is kept.
pub fn press_clear(calc: &CalculatorState, config: &ConfigState) -> KeypadResponse {
    debug!(session_id = %calc.id(), "press_clear command");
    calc.with_calculator_mut(|c| {
        c.reset();
        KeypadResponse::from_calculator(c, config)
    })
}

/// Removes the last typed character.
pub fn press_backspace(calc: &CalculatorState, config: &ConfigState) -> KeypadResponse {
    debug!(session_id = %calc.id(), "press_backspace command");
    calc.with_calculator_mut(|c| {
        c.backspace();
        KeypadResponse::from_calculator(c, config)
    })
}
