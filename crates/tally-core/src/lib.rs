//! # tally-core: Calculator Engine for Tally
//!
//! This crate is the **heart** of Tally. It holds the four-function
//! calculator state machine with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (keypad, terminal)                 │   │
//! │  │     key press ──► action ──► engine ──► display string          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ one call per user action               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   entry   │  │calculator │  │  number   │  │   │
//! │  │   │ Operator  │  │  Entry    │  │Calculator │  │ rounding  │  │   │
//! │  │   │ Action    │  │ (digits)  │  │ Snapshot  │  │ formatting│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • ONE VALUE PER CALCULATOR                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - The engine (`Calculator`) and its snapshot
//! - [`entry`] - The operand being typed, with its input rules
//! - [`types`] - Operators, input tokens, actions, display values
//! - [`number`] - Display rounding and number formatting
//! - [`error`] - Faults and token validation errors
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Calculator, InputToken, Operator};
//!
//! let mut calc = Calculator::new();
//! calc.append_digit(InputToken::Digit(3));
//! calc.set_operator(Operator::Add);
//! calc.append_digit(InputToken::Digit(4));
//! calc.set_operator(Operator::Multiply); // 3 + 4 evaluated here
//! calc.append_digit(InputToken::Digit(2));
//!
//! assert_eq!(calc.evaluate().to_string(), "14");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod entry;
pub mod error;
pub mod number;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{Calculator, CalculatorSnapshot, Evaluation};
pub use entry::Entry;
pub use error::{CalcError, CalcResult, Fault};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Text shown in place of a number while the engine is in the error state.
///
/// Hosts may render faults differently; this is only the default used by
/// `Display for DisplayValue`.
pub const ERROR_INDICATOR: &str = "Error";

/// Significant digits kept when rounding an evaluation result.
///
/// Twelve digits absorb binary floating-point noise such as
/// `0.1 + 0.2 = 0.30000000000000004` or `10000.1 + 20000.2 = 30000.300000000003`
/// at any magnitude.
pub const DISPLAY_SIGNIFICANT_DIGITS: usize = 12;
