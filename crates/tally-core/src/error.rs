//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── Fault       - Arithmetic faults raised by evaluate()              │
//! │  └── CalcError   - Token validation failures (+ wrapped Fault)         │
//! │                                                                         │
//! │  Terminal app errors (in app)                                          │
//! │  └── ApiError    - What the presentation layer sees (serialized)       │
//! │                                                                         │
//! │  Flow: Fault → CalcError → ApiError → Presentation                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Faults vs Errors
//! A [`Fault`] is not returned through `Result` by the engine. It moves the
//! calculator into its absorbing error state and shows up as
//! `DisplayValue::Fault` until reset. [`CalcError`] is the ordinary `Result`
//! error for hosts that parse raw tokens.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Fault
// =============================================================================

/// Arithmetic faults.
///
/// Division by zero is the only one: addition, subtraction and
/// multiplication cannot fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    /// The right-hand operand of `÷` was zero.
    ///
    /// ## User Workflow
    /// ```text
    /// 5 ÷ 0 =
    ///      │
    ///      ▼
    /// Fault::DivisionByZero ──► display shows "Error"
    ///      │
    ///      ▼
    /// every key except C is ignored until reset()
    /// ```
    #[error("Cannot divide by zero")]
    DivisionByZero,
}

// =============================================================================
// Calc Error
// =============================================================================

/// Errors returned to hosts that feed raw tokens into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Token does not name one of the four operators.
    ///
    /// ## When This Occurs
    /// - A keypad sends `%` or `^`
    /// - A host passes a multi-character string to `Operator::from_str`
    #[error("Unknown operator: {token}")]
    UnknownOperator { token: String },

    /// Token is neither a digit, a decimal point, an operator nor a
    /// recognised command.
    #[error("Invalid input token: {token}")]
    InvalidToken { token: String },

    /// Arithmetic fault surfaced through `DisplayValue::into_result`.
    #[error("Arithmetic fault: {0}")]
    Fault(#[from] Fault),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CalcError.
pub type CalcResult<T> = Result<T, CalcError>;

// =============================================================================
// Unit Tests
// =============================================================================
