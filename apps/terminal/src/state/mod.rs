//! # State Module
//!
//! Manages session state for the terminal app.
//!
//! ## Why Multiple State Types?
//! Each command declares exactly the state it needs, and independent states
//! don't block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────┐  ┌──────────────────┐          │
//! │  │ CalculatorState  │  │  TapeState   │  │   ConfigState    │          │
//! │  │                  │  │              │  │                  │          │
//! │  │  Arc<Mutex<      │  │  Arc<Mutex<  │  │  error_indicator │          │
//! │  │    Calculator    │  │    Tape      │  │  tape_limit      │          │
//! │  │  >>              │  │  >>          │  │  output          │          │
//! │  └──────────────────┘  └──────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CalculatorState: Protected by Arc<Mutex<T>> for exclusive access    │
//! │  • TapeState: Protected by Arc<Mutex<T>>                               │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod calculator;
mod config;
mod tape;

pub use calculator::CalculatorState;
pub use config::{ConfigState, OutputMode, DEFAULT_TAPE_LIMIT};
pub use tape::{Tape, TapeEntry, TapeState};
