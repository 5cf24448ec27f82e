//! # Entry Module
//!
//! The operand currently being typed.
//!
//! ## Input Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Keys          Entry        Rule                                        │
//! │  ────          ─────        ────                                        │
//! │  0 0 0         "0"          a lone "0" is never extended by "0"         │
//! │  .             "0."         a leading point gets a zero                 │
//! │  0 . 0 0       "0.00"       zeros after the point are kept              │
//! │  1 . 5 .       "1.5"        at most one decimal point                   │
//! │  1 2 3 ⌫ ⌫     "1"          backspace drops the last character          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because only digits and a single point can ever be pushed, the text is
//! always a valid non-negative decimal literal (or empty).

use std::fmt;

use crate::types::InputToken;

/// Digits and decimal point typed since the last commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry(String);

impl Entry {
    /// Creates an empty entry.
    pub fn new() -> Self {
        Entry(String::new())
    }

    /// Applies one input token. Returns whether the entry changed.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Entry, InputToken};
    ///
    /// let mut entry = Entry::new();
    /// assert!(entry.push(InputToken::Digit(0)));
    /// assert!(!entry.push(InputToken::Digit(0))); // no "00"
    /// assert!(entry.push(InputToken::DecimalPoint));
    /// assert_eq!(entry.as_str(), "0.");
    /// ```
    pub fn push(&mut self, token: InputToken) -> bool {
        match token {
            InputToken::DecimalPoint => {
                if self.has_decimal_point() {
                    return false;
                }
                if self.0.is_empty() {
                    self.0.push_str("0.");
                } else {
                    self.0.push('.');
                }
                true
            }
            InputToken::Digit(_) => {
                let Some(c) = token.as_char() else {
                    return false;
                };
                if self.0 == "0" && c == '0' {
                    return false;
                }
                self.0.push(c);
                true
            }
        }
    }

    /// Removes and returns the last character.
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// Empties the entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn has_decimal_point(&self) -> bool {
        self.0.contains('.')
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the entry. Empty reads as zero.
    ///
    /// `"0."` and `"12."` parse as `0` and `12`.
    pub fn value(&self) -> f64 {
        // Only digits and one point are ever pushed, so this always parses.
        self.0.parse().unwrap_or(0.0)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> Entry {
        let mut entry = Entry::new();
        for c in keys.chars() {
            entry.push(InputToken::try_from(c).unwrap());
        }
        entry
    }

    #[test]
    fn test_leading_zero_suppressed() {
        assert_eq!(typed("000").as_str(), "0");
        assert_eq!(typed("0").as_str(), "0");
    }

    #[test]
    fn test_zeros_after_point_kept() {
        assert_eq!(typed("0.00").as_str(), "0.00");
        assert_eq!(typed("10").as_str(), "10");
        assert_eq!(typed("100").as_str(), "100");
    }

    #[test]
    fn test_zero_then_digit_appends() {
        // Only "00" is suppressed; "07" is typed as-is.
        assert_eq!(typed("07").as_str(), "07");
        assert_eq!(typed("07").value(), 7.0);
    }

    #[test]
    fn test_leading_point_gets_zero() {
        assert_eq!(typed(".").as_str(), "0.");
        assert_eq!(typed(".5").as_str(), "0.5");
    }

    #[test]
    fn test_single_decimal_point() {
        assert_eq!(typed("1.5.").as_str(), "1.5");
        assert_eq!(typed("..").as_str(), "0.");
        assert_eq!(typed("1.2.3.4").as_str(), "1.234");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut entry = Entry::new();
        assert!(!entry.push(InputToken::Digit(10)));
        assert!(entry.is_empty());
    }

    #[test]
    fn test_pop() {
        let mut entry = typed("123");
        assert_eq!(entry.pop(), Some('3'));
        assert_eq!(entry.pop(), Some('2'));
        assert_eq!(entry.as_str(), "1");

        let mut empty = Entry::new();
        assert_eq!(empty.pop(), None);
    }

    #[test]
    fn test_value() {
        assert_eq!(Entry::new().value(), 0.0);
        assert_eq!(typed("0.").value(), 0.0);
        assert_eq!(typed("12.").value(), 12.0);
        assert_eq!(typed("3.25").value(), 3.25);
    }
}
