//! Error types for finger pattern validation.

use thiserror::Error;

/// Errors reported by pattern validation.
///
/// Every failure is detected before any pitch computation runs, and none of
/// them is retryable: the caller has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// PATTERN_001: the pattern does not have exactly six symbols.
    #[error("invalid request: pattern must consist of {expected} symbols, got {actual}")]
    Length { expected: usize, actual: usize },

    /// PATTERN_002: a symbol is neither a digit nor the mute marker.
    #[error("invalid request: pattern must contain only digits and '{mute}', found '{symbol}'")]
    WrongSymbols { symbol: char, mute: char },

    /// PATTERN_003: a digit lies beyond the last cell of the diagram.
    #[error("invalid request: fret digit '{digit}' must not exceed {max}")]
    FretPattern { digit: u8, max: u8 },

    /// PATTERN_004: the base fret offset is out of range.
    #[error("invalid request: offset fret number must be between 0 and {max}, got {fret}")]
    FretNumber { fret: i32, max: i32 },

    /// PATTERN_005: every string is muted.
    #[error("invalid request: pattern must contain at least one digit")]
    Empty,
}

impl ValidationError {
    /// Returns the stable error code (e.g. "PATTERN_001").
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Length { .. } => "PATTERN_001",
            ValidationError::WrongSymbols { .. } => "PATTERN_002",
            ValidationError::FretPattern { .. } => "PATTERN_003",
            ValidationError::FretNumber { .. } => "PATTERN_004",
            ValidationError::Empty => "PATTERN_005",
        }
    }
}
