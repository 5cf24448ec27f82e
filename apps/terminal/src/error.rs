//! # API Error Type
//!
//! Unified error type for keypad commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  press_key("%")                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad token? ─── CalcError::UnknownOperator ──► ApiError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success (even ÷ 0: the display shows the fault) ──────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Division by zero is not an `ApiError`: the command succeeds and the
//! response reports `isError: true`. Only rejected input fails a command.

use serde::Serialize;
use tally_core::CalcError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_INPUT",
///   "message": "Unknown operator: %"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Token rejected by the parser
    InvalidInput,

    /// Arithmetic fault surfaced as an error
    Arithmetic,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }
}

/// Converts core errors to API errors.
impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::UnknownOperator { .. } | CalcError::InvalidToken { .. } => {
                ApiError::invalid_input(err.to_string())
            }
            CalcError::Fault(fault) => ApiError::new(ErrorCode::Arithmetic, fault.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Fault;

    #[test]
    fn test_from_calc_error() {
        let err: ApiError = CalcError::UnknownOperator {
            token: "%".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "Unknown operator: %");

        let err: ApiError = CalcError::Fault(Fault::DivisionByZero).into();
        assert_eq!(err.code, ErrorCode::Arithmetic);
        assert_eq!(err.message, "Cannot divide by zero");
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::invalid_input("Invalid input token: q");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"INVALID_INPUT","message":"Invalid input token: q"}"#
        );
    }

    #[test]
    fn test_display() {
        let err = ApiError::invalid_input("Unknown operator: %");
        assert_eq!(err.to_string(), "[InvalidInput] Unknown operator: %");
    }
}
