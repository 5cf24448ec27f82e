//! # Number Module
//!
//! Rounding and formatting for values shown on the calculator display.
//!
//! ## The Floating Point Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ not what a calculator shows      │
//! │                                                                         │
//! │  OUR SOLUTION: round every result to 12 significant digits             │
//! │    0.30000000000000004 ──► "3.00000000000e-1" ──► 0.3  ✅               │
//! │    30000.300000000003  ──► "3.00003000000e4"  ──► 30000.3  ✅           │
//! │                                                                         │
//! │  The rounded value is what gets stored as the accumulator, so the      │
//! │  noise never compounds across chained operations.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::DISPLAY_SIGNIFICANT_DIGITS;

/// Rounds a result to [`DISPLAY_SIGNIFICANT_DIGITS`] significant digits.
///
/// Negative zero is normalized to zero. Non-finite values pass through.
///
/// ## Example
/// ```rust
/// use tally_core::number::round_for_display;
///
/// assert_eq!(round_for_display(0.1 + 0.2), 0.3);
/// assert_eq!(round_for_display(1.0 / 3.0), 0.333333333333);
/// assert_eq!(round_for_display(10000.1 + 20000.2), 30000.3);
/// ```
pub fn round_for_display(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Exponent formatting keeps one digit before the point, so the precision
    // is one less than the digit count. The text always parses back.
    let rounded = format!("{:.*e}", DISPLAY_SIGNIFICANT_DIGITS - 1, value)
        .parse::<f64>()
        .unwrap_or(value);

    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a value the way the display shows it.
///
/// Whole numbers have no decimal point, fractions use the shortest form that
/// reads back as the same value. No exponent notation is used.
///
/// ## Example
/// ```rust
/// use tally_core::number::format_number;
///
/// assert_eq!(format_number(14.0), "14");
/// assert_eq!(format_number(0.3), "0.3");
/// assert_eq!(format_number(-2.5), "-2.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
