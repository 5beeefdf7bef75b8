//! fretchord Chord Analysis Library
//!
//! This crate names the chords sounded by a six-string guitar finger pattern in
//! standard tuning.
//!
//! # Overview
//!
//! A pattern such as `"01220X"` lists one symbol per string, highest string
//! first: a digit for the fingered cell (0 is the open string) or `X` for a
//! muted string. Together with a base fret offset and a capo flag it maps to a
//! set of pitch classes. Every distinct pitch class is then tried as a root:
//!
//! - the **base** name is built over the lowest sounded string
//! - one **variation** is built over each other pitch class, in the order the
//!   pitch classes first appear from the highest string down
//!
//! # Example
//!
//! ```
//! use fretchord_core::{analyze, ValidationError};
//!
//! let names = analyze("01220X", 2, true).unwrap();
//! assert_eq!(names.base.to_string(), "Bm");
//!
//! let err = analyze("01220", 0, false).unwrap_err();
//! assert_eq!(err.code(), "PATTERN_001");
//! assert!(matches!(err, ValidationError::Length { .. }));
//! ```
//!
//! # Modules
//!
//! - [`pattern`]: Finger pattern parsing and validation
//! - [`pitch`]: Pitch classes, tuning, and enharmonic spellings
//! - [`intervals`]: Interval profiles and note sets
//! - [`classify`]: The classification pipeline
//! - [`name`]: Chord name assembly
//! - [`analyze`](mod@analyze): The end-to-end entry points
//! - [`config`]: Analyzer limits loadable from JSON
//! - [`error`]: Validation errors

pub mod analyze;
pub mod classify;
pub mod config;
pub mod error;
pub mod intervals;
pub mod name;
pub mod pattern;
pub mod pitch;

// Re-export commonly used types at the crate root
pub use analyze::{analyze, Analyzer};
pub use classify::{classify, Alteration, ChordFlags, Extension, Omission, Quality};
pub use config::{
    AnalyzerConfig, ConfigError, DEFAULT_MAX_FRET, DEFAULT_MUTE, MAX_CELL_FRET, MAX_CONFIG_FRET,
    STRING_COUNT,
};
pub use error::ValidationError;
pub use intervals::{IntervalProfile, NoteSet};
pub use name::{ChordName, ChordNames, NamingTables, Symbols};
pub use pattern::{check_fret, validate, validate_with, Cell, FingerPattern};
pub use pitch::{map_pattern, map_string, PitchClass, SpellingContext, Spellings, STANDARD_TUNING};
