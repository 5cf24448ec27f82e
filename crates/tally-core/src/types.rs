//! # Domain Types
//!
//! Value types exchanged between the engine and its host.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   InputToken    │   │    Operator     │   │     Action      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Digit(0..=9)   │   │  Add       +    │   │  Input(..)      │       │
//! │  │  DecimalPoint   │   │  Subtract  −    │   │  Operator(..)   │       │
//! │  └─────────────────┘   │  Multiply  ×    │   │  Evaluate       │       │
//! │                        │  Divide    ÷    │   │  Reset          │       │
//! │  ┌─────────────────┐   └─────────────────┘   │  Backspace      │       │
//! │  │  DisplayValue   │                         └─────────────────┘       │
//! │  │  ─────────────  │   ┌─────────────────┐                             │
//! │  │  Number("14")   │   │      Phase      │                             │
//! │  │  Fault(..)      │   │  Entering       │                             │
//! │  └─────────────────┘   │  OperatorPending│                             │
//! │                        │  Error          │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Token Parsing
//! Hosts usually receive characters (key presses, button labels). Every type
//! here parses from those characters and rejects anything it does not know:
//! an unknown operator is an error, never a silent pass-through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CalcError, CalcResult, Fault};
use crate::ERROR_INDICATOR;

// =============================================================================
// Operator
// =============================================================================

/// One of the four arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Display symbol (`+ − × ÷`).
    pub const fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Applies the operator with `lhs` on the left.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Fault, Operator};
    ///
    /// assert_eq!(Operator::Subtract.apply(10.0, 4.0), Ok(6.0));
    /// assert_eq!(Operator::Divide.apply(1.0, 0.0), Err(Fault::DivisionByZero));
    /// ```
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64, Fault> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide if rhs == 0.0 => Err(Fault::DivisionByZero),
            Operator::Divide => Ok(lhs / rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Accepts the display symbols plus their ASCII keyboard equivalents.
impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(c: char) -> CalcResult<Self> {
        match c {
            '+' => Ok(Operator::Add),
            '-' | '−' => Ok(Operator::Subtract),
            '*' | 'x' | 'X' | '×' => Ok(Operator::Multiply),
            '/' | '÷' => Ok(Operator::Divide),
            other => Err(CalcError::UnknownOperator {
                token: other.to_string(),
            }),
        }
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Operator::try_from(c),
            _ => Err(CalcError::UnknownOperator {
                token: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Input Token
// =============================================================================

/// A key that extends the operand being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputToken {
    /// A decimal digit. Values above 9 are ignored by the engine.
    Digit(u8),
    DecimalPoint,
}

impl InputToken {
    /// Character this token appends to the entry, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            InputToken::Digit(d) => char::from_digit(u32::from(*d), 10),
            InputToken::DecimalPoint => Some('.'),
        }
    }
}

impl TryFrom<char> for InputToken {
    type Error = CalcError;

    fn try_from(c: char) -> CalcResult<Self> {
        match c {
            '.' => Ok(InputToken::DecimalPoint),
            c => c
                .to_digit(10)
                .map(|d| InputToken::Digit(d as u8))
                .ok_or_else(|| CalcError::InvalidToken {
                    token: c.to_string(),
                }),
        }
    }
}

impl FromStr for InputToken {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => InputToken::try_from(c),
            _ => Err(CalcError::InvalidToken {
                token: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Action
// =============================================================================

/// One discrete user action, as a keypad would produce it.
///
/// ## Accepted Tokens
/// ```text
/// 0-9 .                    → Input
/// + - − * x × / ÷          → Operator
/// = Enter                  → Evaluate
/// C AC Escape              → Reset
/// ⌫ BS Backspace           → Backspace
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Input(InputToken),
    Operator(Operator),
    Evaluate,
    Reset,
    Backspace,
}

impl Action {
    /// Named actions that are longer than one character.
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "=" | "Enter" => Some(Action::Evaluate),
            "C" | "c" | "AC" | "ac" | "Escape" => Some(Action::Reset),
            "⌫" | "BS" | "bs" | "Backspace" => Some(Action::Backspace),
            _ => None,
        }
    }
}

impl TryFrom<char> for Action {
    type Error = CalcError;

    fn try_from(c: char) -> CalcResult<Self> {
        if let Some(action) = Action::from_name(c.encode_utf8(&mut [0; 4])) {
            return Ok(action);
        }
        if let Ok(token) = InputToken::try_from(c) {
            return Ok(Action::Input(token));
        }
        Operator::try_from(c)
            .map(Action::Operator)
            .map_err(|_| CalcError::InvalidToken {
                token: c.to_string(),
            })
    }
}

impl FromStr for Action {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let s = s.trim();
        if let Some(action) = Action::from_name(s) {
            return Ok(action);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Action::try_from(c),
            _ => Err(CalcError::InvalidToken {
                token: s.to_string(),
            }),
        }
    }
}

/// Parses a line of keypad input into actions.
///
/// Words are separated by whitespace. A word that names an action (`AC`,
/// `Enter`, `BS`, ...) is one action; any other word is read one character
/// at a time, so `12+3=` is five actions. Parsing stops at the first bad
/// token and nothing is returned for the line.
///
/// ## Example
/// ```rust
/// use tally_core::{parse_actions, Action, InputToken, Operator};
///
/// let actions = parse_actions("1+2 =").unwrap();
/// assert_eq!(
///     actions,
///     vec![
///         Action::Input(InputToken::Digit(1)),
///         Action::Operator(Operator::Add),
///         Action::Input(InputToken::Digit(2)),
///         Action::Evaluate,
///     ]
/// );
/// assert!(parse_actions("2^3").is_err());
/// ```
pub fn parse_actions(line: &str) -> CalcResult<Vec<Action>> {
    let mut actions = Vec::new();
    for word in line.split_whitespace() {
        if let Some(action) = Action::from_name(word) {
            actions.push(action);
            continue;
        }
        for c in word.chars() {
            actions.push(Action::try_from(c)?);
        }
    }
    Ok(actions)
}

// =============================================================================
// Phase
// =============================================================================

/// Where the engine is in its state machine.
///
/// ```text
///  ┌──────────┐   operator    ┌─────────────────┐
///  │ Entering │──────────────►│ OperatorPending │
///  │          │◄──────────────│                 │
///  └──────────┘  evaluate ok  └────────┬────────┘
///       ▲                              │ evaluate ÷ 0
///       │           reset         ┌────▼────┐
///       └─────────────────────────│  Error  │ (absorbing)
///                                 └─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Entering,
    OperatorPending,
    Error,
}

// =============================================================================
// Display Value
// =============================================================================

/// What the display shows: a number, or a fault in place of one.
///
/// Tagged so a host can never mistake the error indicator for a numeric
/// string.
///
/// ## Serialization
/// ```json
/// { "kind": "number", "value": "0.3" }
/// { "kind": "fault", "value": "division_by_zero" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    /// Text of the number, exactly as it should be shown.
    Number(String),
    Fault(Fault),
}

impl DisplayValue {
    /// Returns true if the display holds a fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, DisplayValue::Fault(_))
    }

    /// Returns the numeric text, or `None` for a fault.
    pub fn as_number(&self) -> Option<&str> {
        match self {
            DisplayValue::Number(text) => Some(text),
            DisplayValue::Fault(_) => None,
        }
    }

    /// Renders the value, substituting `error_indicator` for faults.
    pub fn render(&self, error_indicator: &str) -> String {
        match self {
            DisplayValue::Number(text) => text.clone(),
            DisplayValue::Fault(_) => error_indicator.to_string(),
        }
    }

    /// Converts into a `Result` for hosts that propagate faults with `?`.
    pub fn into_result(self) -> CalcResult<String> {
        match self {
            DisplayValue::Number(text) => Ok(text),
            DisplayValue::Fault(fault) => Err(fault.into()),
        }
    }
}

/// Shows [`ERROR_INDICATOR`] for faults.
impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(text) => f.write_str(text),
            DisplayValue::Fault(_) => f.write_str(ERROR_INDICATOR),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_symbols() {
        assert_eq!("+".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!("−".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("-".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("×".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("*".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("÷".parse::<Operator>().unwrap(), Operator::Divide);
        assert_eq!("/".parse::<Operator>().unwrap(), Operator::Divide);
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = "%".parse::<Operator>().unwrap_err();
        assert_eq!(
            err,
            CalcError::UnknownOperator {
                token: "%".to_string()
            }
        );
        assert!("++".parse::<Operator>().is_err());
        assert!("".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(3.0, 4.0), Ok(7.0));
        assert_eq!(Operator::Multiply.apply(7.0, 2.0), Ok(14.0));
        assert_eq!(Operator::Divide.apply(9.0, 3.0), Ok(3.0));
        assert_eq!(Operator::Divide.apply(9.0, -0.0), Err(Fault::DivisionByZero));
    }

    #[test]
    fn test_operator_display_symbol() {
        assert_eq!(Operator::Subtract.to_string(), "−");
        assert_eq!(Operator::Divide.to_string(), "÷");
    }

    #[test]
    fn test_input_token_parsing() {
        assert_eq!("7".parse::<InputToken>().unwrap(), InputToken::Digit(7));
        assert_eq!(".".parse::<InputToken>().unwrap(), InputToken::DecimalPoint);
        assert!("a".parse::<InputToken>().is_err());
        assert!("12".parse::<InputToken>().is_err());
        assert_eq!(InputToken::Digit(12).as_char(), None);
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("=".parse::<Action>().unwrap(), Action::Evaluate);
        assert_eq!("AC".parse::<Action>().unwrap(), Action::Reset);
        assert_eq!("⌫".parse::<Action>().unwrap(), Action::Backspace);
        assert_eq!(
            "÷".parse::<Action>().unwrap(),
            Action::Operator(Operator::Divide)
        );
        assert_eq!(
            "q".parse::<Action>().unwrap_err(),
            CalcError::InvalidToken {
                token: "q".to_string()
            }
        );
    }

    #[test]
    fn test_parse_actions_mixes_words_and_characters() {
        let actions = parse_actions("5÷0 Enter C").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Input(InputToken::Digit(5)),
                Action::Operator(Operator::Divide),
                Action::Input(InputToken::Digit(0)),
                Action::Evaluate,
                Action::Reset,
            ]
        );
        assert!(parse_actions("   ").unwrap().is_empty());
    }

    #[test]
    fn test_display_value_rendering() {
        let number = DisplayValue::Number("0.3".to_string());
        assert_eq!(number.to_string(), "0.3");
        assert_eq!(number.as_number(), Some("0.3"));
        assert!(!number.is_fault());

        let fault = DisplayValue::Fault(Fault::DivisionByZero);
        assert_eq!(fault.to_string(), ERROR_INDICATOR);
        assert_eq!(fault.render("E"), "E");
        assert_eq!(fault.as_number(), None);
        assert!(fault.into_result().is_err());
    }

    #[test]
    fn test_display_value_serialization() {
        let json = serde_json::to_string(&DisplayValue::Number("14".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"number","value":"14"}"#);

        let json = serde_json::to_string(&DisplayValue::Fault(Fault::DivisionByZero)).unwrap();
        assert_eq!(json, r#"{"kind":"fault","value":"division_by_zero"}"#);
    }
}
