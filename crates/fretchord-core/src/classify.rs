//! Harmonic classification of an interval profile.
//!
//! Classification is a fixed sequence of pure steps. Each step receives the
//! flags accumulated so far and returns the updated flags; later steps may
//! retract what earlier ones set, so the order of [`PIPELINE`] is part of the
//! naming contract.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intervals::{slot, IntervalProfile};
use crate::pitch::SpellingContext;

/// Triad or suspension category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Sus2,
    Sus4,
    Minor,
    Diminished,
    Major,
    Augmented,
}

/// Stacked tensions, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    Five,
    FlatSix,
    FlatThirteen,
    Six,
    Seven,
    Nine,
    Eleven,
    Thirteen,
    MajorSeven,
    MajorNine,
    MajorEleven,
    MajorThirteen,
}

impl Extension {
    fn is_sixth(self) -> bool {
        matches!(self, Extension::Six | Extension::FlatSix)
    }
}

/// Non-diatonic or added tensions, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alteration {
    FlatFive,
    SharpFive,
    FlatSix,
    FlatNine,
    SharpNine,
    SharpEleven,
    FlatThirteen,
    AddFlatNine,
    AddNine,
    AddSharpNine,
    AddEleven,
    AddSharpEleven,
}

/// Chord tones reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Omission {
    NoThird,
}

/// Result of classifying one candidate root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordFlags {
    pub quality: Option<Quality>,
    pub extensions: BTreeSet<Extension>,
    pub alterations: BTreeSet<Alteration>,
    pub omission: Option<Omission>,
}

impl ChordFlags {
    /// Enharmonic table matching the final quality.
    pub fn spelling_context(&self) -> SpellingContext {
        match self.quality {
            Some(Quality::Major) => SpellingContext::Major,
            Some(Quality::Diminished) | Some(Quality::Augmented) => SpellingContext::Sharp,
            _ => SpellingContext::Minor,
        }
    }

    fn has_sixth(&self) -> bool {
        self.extensions.iter().any(|e| e.is_sixth())
    }

    /// Removes every extension in `from`; if any was present, inserts `to`.
    fn absorb(&mut self, from: &[Extension], to: Extension) -> bool {
        let mut absorbed = false;
        for e in from {
            absorbed |= self.extensions.remove(e);
        }
        if absorbed {
            self.extensions.insert(to);
        }
        absorbed
    }

    /// Plain alteration when a tension is stacked, the `add` form otherwise.
    fn alter_or_add(&mut self, alter: Alteration, add: Alteration) {
        if self.extensions.is_empty() {
            self.alterations.insert(add);
        } else {
            self.alterations.insert(alter);
        }
    }
}

/// One classification step.
pub type Step = fn(ChordFlags, &IntervalProfile) -> ChordFlags;

/// The classification steps, in application order.
pub const PIPELINE: [(&str, Step); 6] = [
    ("quality", quality),
    ("fifth", fifth),
    ("sixth_seventh", sixth_seventh),
    ("stacking", stacking),
    ("residual", residual),
    ("omission", omission),
];

/// Classifies an interval profile.
///
/// `note_count` is the number of distinct pitch classes in the whole voicing.
pub fn classify(profile: &IntervalProfile, note_count: usize) -> ChordFlags {
    if note_count == 1 {
        return ChordFlags::default();
    }
    if note_count == 2 && profile.has(slot::PERFECT_FIFTH) {
        let mut flags = ChordFlags::default();
        flags.extensions.insert(Extension::Five);
        return flags;
    }

    PIPELINE
        .iter()
        .fold(ChordFlags::default(), |flags, (name, step)| {
            let flags = step(flags, profile);
            log::trace!("{:?} after {}: {:?}", profile, name, flags);
            flags
        })
}

/// Picks the third (or its substitute) by precedence.
pub fn quality(mut flags: ChordFlags, c: &IntervalProfile) -> ChordFlags {
    flags.quality = if c.has(slot::MAJOR_THIRD) {
        Some(Quality::Major)
    } else if c.has(slot::MINOR_THIRD) {
        Some(Quality::Minor)
    } else if c.has(slot::PERFECT_FOURTH) {
        Some(Quality::Sus4)
    } else if c.has(slot::MAJOR_SECOND) {
        Some(Quality::Sus2)
    } else {
        None
    };
    flags
}

/// Records altered fifths and promotes minor/major triads to dim/aug.
pub fn fifth(mut flags: ChordFlags, c: &IntervalProfile) -> ChordFlags {
    if c.has(slot::PERFECT_FIFTH) {
        return flags;
    }
    let no_seventh = !c.has_seventh();

    if c.has(slot::FLAT_FIFTH) {
        flags.alterations.insert(Alteration::FlatFive);
        if flags.quality == Some(Quality::Minor) && no_seventh {
            flags.quality = Some(Quality::Diminished);
            flags.alterations.remove(&Alteration::FlatFive);
        }
    }

    let minor_context = matches!(
        flags.quality,
        Some(Quality::Minor) | Some(Quality::Diminished)
    );
    if c.has(slot::SHARP_FIFTH) && !minor_context {
        flags.alterations.insert(Alteration::SharpFive);
        if flags.quality == Some(Quality::Major) && no_seventh {
            flags.quality = Some(Quality::Augmented);
            flags.alterations.remove(&Alteration::FlatFive);
            flags.alterations.remove(&Alteration::SharpFive);
        }
    }
    flags
}

/// Claims the sixth and seventh slots.
pub fn sixth_seventh(mut flags: ChordFlags, c: &IntervalProfile) -> ChordFlags {
    let diminished = flags.quality == Some(Quality::Diminished);

    if c.has(slot::FLAT_SIXTH)
        && !c.has(slot::MAJOR_THIRD)
        && !c.has(slot::SIXTH)
        && !c.has_seventh()
        && flags.quality != Some(Quality::Augmented)
    {
        flags.extensions.insert(Extension::FlatSix);
        flags.alterations.remove(&Alteration::SharpFive);
    }

    if c.has(slot::SIXTH) && !c.has_seventh() {
        // Over a diminished triad the sixth is the diminished seventh.
        if diminished {
            flags.extensions.insert(Extension::Seven);
        } else {
            flags.extensions.insert(Extension::Six);
        }
    }

    if !diminished {
        if c.has(slot::MINOR_SEVENTH) {
            flags.extensions.insert(Extension::Seven);
        }
        if c.has(slot::MAJOR_SEVENTH) {
            flags.extensions.insert(Extension::MajorSeven);
        }
    }
    flags
}

/// Stacks ninth, eleventh and thirteenth over a claimed seventh.
pub fn stacking(mut flags: ChordFlags, c: &IntervalProfile) -> ChordFlags {
    use Extension::*;

    // Over a sixth, ninth and eleventh sit side by side ("6/9/11").
    let sixth = flags.has_sixth();

    if c.has(slot::NINTH) && flags.quality != Some(Quality::Sus2) {
        if sixth {
            flags.extensions.insert(Nine);
        } else {
            let minor = flags.absorb(&[Seven], Nine);
            let major = flags.absorb(&[MajorSeven], MajorNine);
            if !minor && !major {
                flags.alterations.insert(Alteration::AddNine);
            }
        }
    }

    if c.has(slot::ELEVENTH) && flags.quality != Some(Quality::Sus4) {
        if sixth {
            flags.extensions.insert(Eleven);
        } else {
            let minor = flags.absorb(&[Seven, Nine], Eleven);
            let major = flags.absorb(&[MajorSeven, MajorNine], MajorEleven);
            if !minor && !major {
                flags.alterations.insert(Alteration::AddEleven);
            }
        }
    }

    if flags.quality == Some(Quality::Diminished) {
        if c.has(slot::FLAT_THIRTEENTH) {
            flags.absorb(&[Seven, Nine, Eleven], FlatThirteen);
        }
    } else if c.has(slot::THIRTEENTH) && c.has_seventh() {
        flags.absorb(&[Seven, Nine, Eleven], Thirteen);
        flags.absorb(&[MajorSeven, MajorNine, MajorEleven], MajorThirteen);
    }
    flags
}

/// Emits the tensions no earlier step absorbed.
pub fn residual(mut flags: ChordFlags, c: &IntervalProfile) -> ChordFlags {
    use Alteration::*;

    if c.has(slot::FLAT_NINTH) {
        flags.alter_or_add(FlatNine, AddFlatNine);
    }

    let major_third = matches!(
        flags.quality,
        Some(Quality::Major) | Some(Quality::Augmented)
    );
    if c.has(slot::SHARP_NINTH) && major_third {
        flags.alter_or_add(SharpNine, AddSharpNine);
    }

    if c.has(slot::SHARP_ELEVENTH)
        && (c.has(slot::PERFECT_FIFTH) || flags.quality == Some(Quality::Augmented))
    {
        flags.alter_or_add(SharpEleven, AddSharpEleven);
    }

    let flat_sixth_claimed = flags.extensions.contains(&Extension::FlatSix)
        || flags.extensions.contains(&Extension::FlatThirteen)
        || flags.alterations.contains(&SharpFive)
        || flags.quality == Some(Quality::Augmented);
    if c.has(slot::FLAT_THIRTEENTH) && !flat_sixth_claimed {
        let thirteenth = flags.extensions.contains(&Extension::Thirteen)
            || flags.extensions.contains(&Extension::MajorThirteen);
        if flags.extensions.is_empty() || thirteenth {
            flags.alterations.insert(FlatSix);
        } else {
            flags.alterations.insert(FlatThirteen);
        }
    }
    flags
}

/// Marks a chord without any third substitute.
pub fn omission(mut flags: ChordFlags, _c: &IntervalProfile) -> ChordFlags {
    if flags.quality.is_none() {
        flags.omission = Some(Omission::NoThird);
    }
    flags
}
