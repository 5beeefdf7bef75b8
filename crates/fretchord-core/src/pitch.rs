//! Pitch classes, standard tuning, and enharmonic spelling tables.

use std::fmt;

use crate::config::STRING_COUNT;
use crate::pattern::FingerPattern;

/// One of the twelve octave-equivalence classes, with C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Wraps any semitone count into a pitch class.
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Semitones from `root` up to `self`, in `0..12`.
    pub fn above(self, root: PitchClass) -> usize {
        (self.0 as usize + 12 - root.0 as usize) % 12
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spellings = Spellings::default();
        f.pad(spellings.spell(*self, SpellingContext::Minor))
    }
}

/// Open-string pitches of standard EADGBE tuning, highest string first.
pub const STANDARD_TUNING: [PitchClass; STRING_COUNT] = [
    PitchClass::E,
    PitchClass::B,
    PitchClass::G,
    PitchClass::D,
    PitchClass::A,
    PitchClass::E,
];

/// Maps one string to the pitch class it sounds.
///
/// An open string keeps its absolute pitch unless the capo is on, in which
/// case it sounds at the base fret like any fingered cell. Any `fret` is
/// accepted and wraps by octaves. Returns `None` past the last string.
pub fn map_string(string: usize, digit: u8, fret: i32, capo: bool) -> Option<PitchClass> {
    let open = STANDARD_TUNING.get(string)?;
    let effective = if digit == 0 && !capo {
        0
    } else {
        i64::from(fret) + i64::from(digit)
    };
    let semitones = (i64::from(open.0) + effective).rem_euclid(12);
    Some(PitchClass(semitones as u8))
}

/// Maps every sounded string of a pattern, highest string first.
pub fn map_pattern(
    pattern: &FingerPattern,
    fret: i32,
    capo: bool,
) -> impl Iterator<Item = PitchClass> + '_ {
    pattern
        .sounded()
        .filter_map(move |(string, digit)| map_string(string, digit, fret, capo))
}

/// Which enharmonic table spells the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellingContext {
    /// Flats everywhere (Db, Eb, Gb, Ab, Bb).
    Major,
    /// Mixed: C#, Eb, F#, G#, Bb.
    Minor,
    /// Sharps everywhere (C#, D#, F#, G#, A#).
    Sharp,
}

/// Enharmonic spelling tables indexed by pitch class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spellings {
    pub major: [&'static str; 12],
    pub minor: [&'static str; 12],
    pub sharp: [&'static str; 12],
}

impl Default for Spellings {
    fn default() -> Self {
        Self {
            major: [
                "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
            ],
            minor: [
                "C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B",
            ],
            sharp: [
                "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
            ],
        }
    }
}

impl Spellings {
    pub fn spell(&self, pitch: PitchClass, context: SpellingContext) -> &'static str {
        let table = match context {
            SpellingContext::Major => &self.major,
            SpellingContext::Minor => &self.minor,
            SpellingContext::Sharp => &self.sharp,
        };
        table[pitch.index()]
    }
}
