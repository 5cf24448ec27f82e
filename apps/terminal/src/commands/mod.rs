//! # Commands Module
//!
//! All commands exposed to a presentation layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── keypad.rs   ◄─── Digit, operator, equals, clear, backspace
//! ├── tape.rs     ◄─── Tape of completed calculations
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the calculator
//! fn press_backspace(calc: &CalculatorState, config: &ConfigState)
//!
//! // Needs the tape too, since it may complete an evaluation
//! fn press_equals(calc: &CalculatorState, tape: &TapeState, config: &ConfigState)
//! ```

pub mod config;
pub mod keypad;
pub mod tape;
