//! Pincode validation
//!
//! A raw input string becomes a [`PostalCode`] only by passing the full
//! rule chain. Rules run in a fixed order and the first failure wins, so
//! every rejection maps to exactly one reason.

use std::fmt;

use thiserror::Error;

/// Assigned Indian pincodes all fall in this range.
const PINCODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// Required pincode length in digits.
pub const PINCODE_LENGTH: usize = 6;

/// Rejection reasons, listed in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or whitespace-only input.
    #[error("Please enter a pincode")]
    EmptyInput,
    /// Input contains a character outside 0-9.
    #[error("Pincode must contain only numbers (0-9)")]
    NonNumeric,
    /// Fewer than six digits; carries the actual length entered.
    #[error("Pincode must be 6 digits (you entered {0})")]
    TooShort(usize),
    /// More than six digits.
    #[error("Pincode cannot be more than 6 digits")]
    TooLong,
    /// All six digits identical, e.g. 111111.
    #[error("Invalid pincode format: repeated digits")]
    DegeneratePattern,
    /// Strictly ascending or descending digit run, e.g. 123456.
    #[error("Invalid pincode format: sequential digits")]
    SequentialPattern,
    /// Numeric value outside the assigned range. Unreachable while the
    /// length rules hold, kept as a safety net should they ever relax.
    #[error("Please enter a valid Indian pincode (100000-999999)")]
    OutOfRange,
}

impl ValidationError {
    /// Short hint the presentation layer renders next to the message.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "Try a valid pincode like 110001 (New Delhi, Delhi)",
            ValidationError::NonNumeric => "Remove any letters, spaces, or special characters",
            ValidationError::TooShort(_) => "Add more digits to complete your pincode",
            ValidationError::TooLong => "Indian pincodes are exactly 6 digits long",
            ValidationError::DegeneratePattern => "Avoid repeated patterns like 111111",
            ValidationError::SequentialPattern => "Avoid sequential patterns like 123456",
            ValidationError::OutOfRange => "Indian pincodes start from 100000",
        }
    }
}

/// A well-known pincode offered as an example in error hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePincode {
    pub code: &'static str,
    pub city: &'static str,
}

/// Example pincodes for major cities, shown when the input is empty.
pub const SAMPLE_PINCODES: &[SamplePincode] = &[
    SamplePincode { code: "110001", city: "New Delhi, Delhi" },
    SamplePincode { code: "400001", city: "Mumbai, Maharashtra" },
    SamplePincode { code: "560001", city: "Bangalore, Karnataka" },
    SamplePincode { code: "600001", city: "Chennai, Tamil Nadu" },
    SamplePincode { code: "700001", city: "Kolkata, West Bengal" },
    SamplePincode { code: "500001", city: "Hyderabad, Telangana" },
];

/// A validated six-digit Indian pincode.
///
/// Immutable once constructed; [`PostalCode::parse`] is the only way to
/// obtain one. Parsing is pure and deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate a raw input string into a pincode.
    ///
    /// Leading and trailing whitespace is trimmed before the rules run.
    ///
    /// # Errors
    ///
    /// Returns the first matching [`ValidationError`] in rule order.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let input = raw.trim();

        if input.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NonNumeric);
        }

        if input.len() < PINCODE_LENGTH {
            return Err(ValidationError::TooShort(input.len()));
        }

        if input.len() > PINCODE_LENGTH {
            return Err(ValidationError::TooLong);
        }

        let digits: Vec<u8> = input.bytes().map(|b| b - b'0').collect();

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(ValidationError::DegeneratePattern);
        }

        if is_sequential(&digits) {
            return Err(ValidationError::SequentialPattern);
        }

        let value: u32 = input
            .parse()
            .map_err(|_| ValidationError::OutOfRange)?;
        if !PINCODE_RANGE.contains(&value) {
            return Err(ValidationError::OutOfRange);
        }

        Ok(Self(input.to_string()))
    }

    /// The pincode as its canonical six-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pincode as its numeric value.
    #[must_use]
    pub fn value(&self) -> u32 {
        // Always parses: construction guarantees six ASCII digits.
        self.0.parse().unwrap_or(0)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when each digit is exactly one more (or one less) than the
/// previous across all positions.
fn is_sequential(digits: &[u8]) -> bool {
    let mut ascending = true;
    let mut descending = true;

    for pair in digits.windows(2) {
        if i16::from(pair[1]) != i16::from(pair[0]) + 1 {
            ascending = false;
        }
        if i16::from(pair[1]) != i16::from(pair[0]) - 1 {
            descending = false;
        }
    }

    ascending || descending
}
