//! Count input validation
//!
//! Free-form text passes three checks in order: present, integral, in range.
//! The first failing check decides the error.

use std::fmt;
use std::str::FromStr;

use crate::io::configuration::{MAX_COUNT, MIN_COUNT};
use crate::io::error::{Result, ShapeError};

/// A cell count that passed validation, `MIN_COUNT..=MAX_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(usize);

impl Count {
    /// Validate an integer against the accepted range
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::OutOfRange`] outside `MIN_COUNT..=MAX_COUNT`.
    pub fn new(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .filter(|n| (MIN_COUNT..=MAX_COUNT).contains(n))
            .map(Self)
            .ok_or(ShapeError::OutOfRange {
                value,
                min: MIN_COUNT,
                max: MAX_COUNT,
            })
    }

    /// The validated count
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Count {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_count(s)
    }
}

/// Run the full validation pipeline on submitted text
///
/// Surrounding whitespace is ignored. Integral decimal text such as `"7.0"` is
/// accepted as the integer it denotes; `"7.5"`, `"7abc"` and exponent forms such
/// as `"1e1"` are not integers.
///
/// # Errors
///
/// Returns [`ShapeError::EmptyInput`], [`ShapeError::NotAnInteger`] or
/// [`ShapeError::OutOfRange`], whichever check fails first.
pub fn parse_count(text: &str) -> Result<Count> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ShapeError::EmptyInput);
    }
    let value = parse_integer(trimmed).ok_or_else(|| ShapeError::NotAnInteger {
        input: trimmed.to_string(),
    })?;
    Count::new(value)
}

/// Plain decimal text only: optional sign, digits, optional `.` and zeros
///
/// Exponents, hex and other float syntax are not integers here.
fn parse_integer(text: &str) -> Option<i64> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    let digits = whole.strip_prefix(['+', '-']).unwrap_or(whole);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Values too large for i64 saturate and fail the range check
    let saturated = if whole.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    };
    Some(whole.parse::<i64>().unwrap_or(saturated))
}
