//! Chord name assembly and rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{Alteration, ChordFlags, Extension, Omission, Quality};
use crate::pitch::{PitchClass, Spellings};

/// Printed tokens for every classifier flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
    pub sus2: &'static str,
    pub sus4: &'static str,
    pub minor: &'static str,
    pub diminished: &'static str,
    pub major: &'static str,
    pub augmented: &'static str,
    pub no_third: &'static str,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            sus2: "sus2",
            sus4: "sus4",
            minor: "m",
            diminished: "dim",
            major: "",
            augmented: "aug",
            no_third: "no3",
        }
    }
}

impl Symbols {
    pub fn quality(&self, quality: Quality) -> &'static str {
        match quality {
            Quality::Sus2 => self.sus2,
            Quality::Sus4 => self.sus4,
            Quality::Minor => self.minor,
            Quality::Diminished => self.diminished,
            Quality::Major => self.major,
            Quality::Augmented => self.augmented,
        }
    }

    pub fn omission(&self, omission: Omission) -> &'static str {
        match omission {
            Omission::NoThird => self.no_third,
        }
    }

    pub fn extension(&self, extension: Extension) -> &'static str {
        match extension {
            Extension::Five => "5",
            Extension::FlatSix => "b6",
            Extension::FlatThirteen => "b13",
            Extension::Six => "6",
            Extension::Seven => "7",
            Extension::Nine => "9",
            Extension::Eleven => "11",
            Extension::Thirteen => "13",
            Extension::MajorSeven => "maj7",
            Extension::MajorNine => "maj9",
            Extension::MajorEleven => "maj11",
            Extension::MajorThirteen => "maj13",
        }
    }

    pub fn alteration(&self, alteration: Alteration) -> &'static str {
        match alteration {
            Alteration::FlatFive => "b5",
            Alteration::SharpFive => "#5",
            Alteration::FlatSix => "b6",
            Alteration::FlatNine => "b9",
            Alteration::SharpNine => "#9",
            Alteration::SharpEleven => "#11",
            Alteration::FlatThirteen => "b13",
            Alteration::AddFlatNine => "addb9",
            Alteration::AddNine => "add9",
            Alteration::AddSharpNine => "add#9",
            Alteration::AddEleven => "add11",
            Alteration::AddSharpEleven => "add#11",
        }
    }
}

/// Everything needed to turn flags into text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingTables {
    pub symbols: Symbols,
    pub spellings: Spellings,
}

/// A chord name split into its printed parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordName {
    pub root: String,
    pub quality: String,
    pub extended: String,
    pub altered: String,
    pub omitted: String,
}

impl ChordName {
    /// Assembles the printed parts of `flags` over `root`.
    pub fn assemble(root: PitchClass, flags: &ChordFlags, tables: &NamingTables) -> Self {
        let symbols = &tables.symbols;
        let root = tables.spellings.spell(root, flags.spelling_context());
        let quality = flags.quality.map(|q| symbols.quality(q)).unwrap_or("");

        let separator = if flags.extensions.contains(&Extension::Six)
            || flags.extensions.contains(&Extension::FlatSix)
        {
            "/"
        } else {
            ","
        };
        let mut extended = join(
            flags.extensions.iter().map(|e| symbols.extension(*e)),
            separator,
        );
        let mut altered = join(
            flags.alterations.iter().map(|a| symbols.alteration(*a)),
            ",",
        );

        // "Bbb6" reads badly; move the flat six into the parentheses.
        if root.contains('b')
            && quality.is_empty()
            && flags.extensions.contains(&Extension::FlatSix)
        {
            altered = if altered.is_empty() {
                extended
            } else {
                format!("{},{}", extended, altered)
            };
            extended = String::new();
        }

        Self {
            root: root.to_string(),
            quality: quality.to_string(),
            extended,
            altered,
            omitted: flags
                .omission
                .map(|o| symbols.omission(o))
                .unwrap_or("")
                .to_string(),
        }
    }

    /// Concatenates the parts into display form, e.g. `"A7sus4"` or `"C7(b9)"`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn is_suspended(&self) -> bool {
        self.quality.starts_with("sus")
    }
}

impl fmt::Display for ChordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        if self.is_suspended() {
            write!(f, "{}{}", self.extended, self.quality)?;
        } else {
            write!(f, "{}{}", self.quality, self.extended)?;
        }
        if !self.altered.is_empty() {
            write!(f, "({})", self.altered)?;
        }
        f.write_str(&self.omitted)
    }
}

/// Base name plus alternative readings over the other chord tones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordNames {
    /// Name over the lowest sounded string.
    pub base: ChordName,
    /// Names over the remaining distinct pitch classes, in discovery order.
    pub variations: Vec<ChordName>,
}

impl ChordNames {
    /// Rendered variation names.
    pub fn variation_names(&self) -> Vec<String> {
        self.variations.iter().map(ChordName::render).collect()
    }
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>, separator: &str) -> String {
    tokens.collect::<Vec<_>>().join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::intervals::IntervalProfile;
    use pretty_assertions::assert_eq;

    fn name(root: i32, semitones: &[usize]) -> String {
        let profile = IntervalProfile::from_semitones(semitones);
        let flags = classify(&profile, profile.len());
        ChordName::assemble(PitchClass::new(root), &flags, &NamingTables::default()).render()
    }

    #[test]
    fn test_triads() {
        assert_eq!(name(0, &[0, 4, 7]), "C");
        assert_eq!(name(9, &[0, 3, 7]), "Am");
        assert_eq!(name(0, &[0, 3, 6]), "Cdim");
        assert_eq!(name(0, &[0, 4, 8]), "Caug");
        assert_eq!(name(2, &[0, 2, 7]), "Dsus2");
        assert_eq!(name(2, &[0, 5, 7]), "Dsus4");
    }

    #[test]
    fn test_root_spelling_follows_quality() {
        assert_eq!(name(10, &[0, 4, 7]), "Bb");
        assert_eq!(name(10, &[0, 4, 8]), "A#aug");
        assert_eq!(name(6, &[0, 4, 7]), "Gb");
        assert_eq!(name(6, &[0, 3, 7]), "F#m");
        assert_eq!(name(3, &[0, 3, 6]), "D#dim");
        assert_eq!(name(3, &[0, 3, 7]), "Ebm");
    }

    #[test]
    fn test_sevenths_and_stacking() {
        assert_eq!(name(0, &[0, 3, 6, 9]), "Cdim7");
        assert_eq!(name(0, &[0, 3, 6, 10]), "Cm7(b5)");
        assert_eq!(name(0, &[0, 4, 8, 10]), "C7(#5)");
        assert_eq!(name(0, &[0, 2, 4, 7, 10]), "C9");
        assert_eq!(name(0, &[0, 2, 4, 5, 7, 11]), "Cmaj11");
        assert_eq!(name(0, &[0, 4, 7, 9, 10]), "C13");
        assert_eq!(name(0, &[0, 4, 7, 10, 11]), "C7,maj7");
    }

    #[test]
    fn test_sharp_five_with_second_or_minor_third() {
        assert_eq!(name(0, &[0, 2, 4, 8, 10]), "C9(#5)");
        assert_eq!(name(0, &[0, 3, 4, 8, 10]), "C7(#5,#9)");
        assert_eq!(name(0, &[0, 2, 4, 8]), "Caug(add9)");
    }

    #[test]
    fn test_alterations() {
        assert_eq!(name(0, &[0, 1, 4, 7, 10]), "C7(b9)");
        assert_eq!(name(0, &[0, 2, 4, 7]), "C(add9)");
        assert_eq!(name(0, &[0, 3, 4, 7]), "C(add#9)");
        assert_eq!(name(0, &[0, 4, 6, 7]), "C(add#11)");
        assert_eq!(name(0, &[0, 4, 7, 8]), "C(b6)");
        assert_eq!(name(0, &[0, 4, 6, 8]), "Caug(add#11)");
        assert_eq!(name(0, &[0, 1, 3, 4, 7, 10]), "C7(b9,#9)");
    }

    #[test]
    fn test_sixths_join_with_slash() {
        assert_eq!(name(0, &[0, 2, 4, 7, 9]), "C6/9");
        assert_eq!(name(0, &[0, 3, 7, 8]), "Cmb6");
        assert_eq!(name(0, &[0, 3, 6, 8]), "Cdimb6");
        assert_eq!(name(0, &[0, 2, 3, 7, 8]), "Cmb6/9");
    }

    #[test]
    fn test_suspended_puts_extension_first() {
        assert_eq!(name(9, &[0, 5, 7, 10]), "A7sus4");
        assert_eq!(name(2, &[0, 2, 5, 7, 9]), "D6/9sus4");
        assert_eq!(name(4, &[0, 5, 8]), "Eb6sus4");
    }

    #[test]
    fn test_no_third() {
        assert_eq!(name(0, &[0, 7, 10]), "C7no3");
        assert_eq!(name(0, &[0, 6]), "C(b5)no3");
    }

    #[test]
    fn test_flat_root_moves_flat_six_into_parentheses() {
        assert_eq!(name(10, &[0, 7, 8]), "Bb(b6)no3");
        assert_eq!(name(10, &[0, 1, 7, 8]), "Bb(b6,b9)no3");
        // Without a flat in the root the extension stays put.
        assert_eq!(name(4, &[0, 7, 8]), "Eb6no3");
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(name(4, &[0]), "E");
        assert_eq!(name(1, &[0]), "C#");
        assert_eq!(name(1, &[0, 7]), "C#5");
        assert_eq!(name(10, &[0, 7]), "Bb5");
    }

    #[test]
    fn test_parts_are_exposed() {
        let profile = IntervalProfile::from_semitones(&[0, 1, 4, 7, 10]);
        let flags = classify(&profile, profile.len());
        let chord = ChordName::assemble(PitchClass::C, &flags, &NamingTables::default());
        assert_eq!(
            chord,
            ChordName {
                root: "C".to_string(),
                quality: "".to_string(),
                extended: "7".to_string(),
                altered: "b9".to_string(),
                omitted: "".to_string(),
            }
        );
        assert_eq!(format!("{}", chord), "C7(b9)");
    }

    #[test]
    fn test_serde_shape() {
        let chord = ChordName {
            root: "A".to_string(),
            quality: "m".to_string(),
            ..ChordName::default()
        };
        let json = serde_json::to_value(&chord).unwrap();
        assert_eq!(json["root"], "A");
        assert_eq!(json["quality"], "m");
        assert_eq!(json["altered"], "");
    }
}
