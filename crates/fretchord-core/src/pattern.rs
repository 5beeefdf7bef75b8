//! Finger pattern parsing and validation.
//!
//! A pattern holds one symbol per string, from the highest-pitched string to
//! the lowest: a digit for the fingered cell (0 = open) or the mute marker.
//! `"01220X"` is an open A minor shape.

use std::fmt;

use crate::config::{AnalyzerConfig, DEFAULT_MUTE, MAX_CELL_FRET, STRING_COUNT};
use crate::error::ValidationError;

/// One string of a finger pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// The string is not played.
    Muted,
    /// The string sounds at this cell; 0 is the open string.
    Fret(u8),
}

impl Cell {
    /// Returns true if the string sounds.
    pub fn is_sounded(self) -> bool {
        matches!(self, Cell::Fret(_))
    }

    /// The pattern symbol for this cell.
    pub fn symbol(self, mute: char) -> char {
        match self {
            Cell::Muted => mute,
            Cell::Fret(d) => char::from(b'0' + d),
        }
    }
}

/// A validated six-string finger pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FingerPattern {
    cells: [Cell; STRING_COUNT],
}

impl FingerPattern {
    /// Parses a pattern with the default mute marker, without a fret check.
    pub fn parse(pattern: &str) -> Result<Self, ValidationError> {
        Self::parse_with(pattern, &AnalyzerConfig::default())
    }

    /// Parses a pattern using the configured mute marker.
    pub fn parse_with(pattern: &str, config: &AnalyzerConfig) -> Result<Self, ValidationError> {
        let actual = pattern.chars().count();
        if actual != STRING_COUNT {
            return Err(ValidationError::Length {
                expected: STRING_COUNT,
                actual,
            });
        }

        let mut cells = [Cell::Muted; STRING_COUNT];
        for (cell, symbol) in cells.iter_mut().zip(pattern.chars()) {
            *cell = parse_symbol(symbol, config.mute)?;
        }

        if !cells.iter().any(|c| c.is_sounded()) {
            return Err(ValidationError::Empty);
        }

        Ok(Self { cells })
    }

    /// Cells from the highest string (index 0) to the lowest (index 5).
    pub fn cells(&self) -> &[Cell; STRING_COUNT] {
        &self.cells
    }

    /// Iterates sounded strings as `(string_index, digit)`.
    pub fn sounded(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| match c {
            Cell::Fret(d) => Some((i, *d)),
            Cell::Muted => None,
        })
    }

    /// Writes the pattern with the configured mute marker, so that
    /// `parse_with` under the same config reads it back unchanged.
    pub fn to_string_with(&self, config: &AnalyzerConfig) -> String {
        self.cells.iter().map(|cell| cell.symbol(config.mute)).collect()
    }
}

/// Muted strings are written as [`DEFAULT_MUTE`]; see
/// [`FingerPattern::to_string_with`] for a configured marker.
impl fmt::Display for FingerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol(DEFAULT_MUTE))?;
        }
        Ok(())
    }
}

fn parse_symbol(symbol: char, mute: char) -> Result<Cell, ValidationError> {
    if symbol == mute {
        return Ok(Cell::Muted);
    }
    let Some(digit) = symbol.to_digit(10) else {
        return Err(ValidationError::WrongSymbols { symbol, mute });
    };
    let digit = digit as u8;
    if digit > MAX_CELL_FRET {
        return Err(ValidationError::FretPattern {
            digit,
            max: MAX_CELL_FRET,
        });
    }
    Ok(Cell::Fret(digit))
}

/// Checks that the base fret lies within `[0, config.max_fret]`.
pub fn check_fret(fret: i32, config: &AnalyzerConfig) -> Result<(), ValidationError> {
    if fret < 0 || fret > config.max_fret {
        return Err(ValidationError::FretNumber {
            fret,
            max: config.max_fret,
        });
    }
    Ok(())
}

/// Validates a pattern and base fret with the default configuration.
///
/// # Example
/// ```
/// use fretchord_core::{validate, ValidationError};
///
/// assert!(validate("01220X", 0).is_ok());
/// assert_eq!(validate("XXXXXX", 0), Err(ValidationError::Empty));
/// ```
pub fn validate(pattern: &str, fret: i32) -> Result<(), ValidationError> {
    validate_with(pattern, fret, &AnalyzerConfig::default())
}

/// Validates a pattern and base fret against a configuration.
pub fn validate_with(
    pattern: &str,
    fret: i32,
    config: &AnalyzerConfig,
) -> Result<(), ValidationError> {
    FingerPattern::parse_with(pattern, config)?;
    check_fret(fret, config)
}
