//! Interval profiles relative to a candidate root.

use std::fmt;

use crate::pitch::PitchClass;

/// Semitone slots of the interval profile.
pub mod slot {
    pub const ROOT: usize = 0;
    pub const MINOR_SECOND: usize = 1;
    pub const MAJOR_SECOND: usize = 2;
    pub const MINOR_THIRD: usize = 3;
    pub const MAJOR_THIRD: usize = 4;
    pub const PERFECT_FOURTH: usize = 5;
    pub const FLAT_FIFTH: usize = 6;
    pub const PERFECT_FIFTH: usize = 7;
    pub const FLAT_SIXTH: usize = 8;
    pub const SIXTH: usize = 9;
    pub const MINOR_SEVENTH: usize = 10;
    pub const MAJOR_SEVENTH: usize = 11;

    // Compound names for the same slots.
    pub const FLAT_NINTH: usize = MINOR_SECOND;
    pub const NINTH: usize = MAJOR_SECOND;
    pub const SHARP_NINTH: usize = MINOR_THIRD;
    pub const ELEVENTH: usize = PERFECT_FOURTH;
    pub const SHARP_ELEVENTH: usize = FLAT_FIFTH;
    pub const SHARP_FIFTH: usize = FLAT_SIXTH;
    pub const FLAT_THIRTEENTH: usize = FLAT_SIXTH;
    pub const THIRTEENTH: usize = SIXTH;
}

/// Which semitone distances above a root are sounded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntervalProfile {
    slots: [bool; 12],
}

impl IntervalProfile {
    /// Builds the profile of `notes` above `root`. Repeated notes collapse.
    pub fn new(root: PitchClass, notes: &[PitchClass]) -> Self {
        let mut slots = [false; 12];
        for note in notes {
            slots[note.above(root)] = true;
        }
        Self { slots }
    }

    /// Builds a profile directly from semitone distances (taken mod 12).
    pub fn from_semitones(semitones: &[usize]) -> Self {
        let mut slots = [false; 12];
        for &s in semitones {
            slots[s % 12] = true;
        }
        Self { slots }
    }

    #[inline]
    pub fn has(&self, slot: usize) -> bool {
        self.slots[slot]
    }

    /// Number of set slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| **s).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_seventh(&self) -> bool {
        self.has(slot::MINOR_SEVENTH) || self.has(slot::MAJOR_SEVENTH)
    }

    pub fn slots(&self) -> &[bool; 12] {
        &self.slots
    }
}

impl fmt::Debug for IntervalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<usize> = (0..12).filter(|&i| self.slots[i]).collect();
        f.debug_tuple("IntervalProfile").field(&set).finish()
    }
}

/// Distinct pitch classes of a voicing plus its bass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSet {
    /// Distinct pitch classes in order of first appearance, highest string first.
    notes: Vec<PitchClass>,
    /// Pitch class of the lowest sounded string.
    bass: PitchClass,
}

impl NoteSet {
    /// Collects sounded pitch classes, highest string first.
    ///
    /// Returns `None` when nothing sounds.
    pub fn collect(sounded: impl IntoIterator<Item = PitchClass>) -> Option<Self> {
        let mut notes = Vec::new();
        let mut bass = None;
        for pitch in sounded {
            if !notes.contains(&pitch) {
                notes.push(pitch);
            }
            bass = Some(pitch);
        }
        bass.map(|bass| Self { notes, bass })
    }

    pub fn bass(&self) -> PitchClass {
        self.bass
    }

    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// Number of distinct pitch classes, shared by every candidate root.
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Candidate roots other than the bass, in discovery order.
    pub fn variations(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.notes.iter().copied().filter(move |p| *p != self.bass)
    }

    pub fn profile(&self, root: PitchClass) -> IntervalProfile {
        IntervalProfile::new(root, &self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(values: &[i32]) -> Vec<PitchClass> {
        values.iter().map(|v| PitchClass::new(*v)).collect()
    }

    #[test]
    fn test_profile_of_major_triad() {
        let profile = IntervalProfile::new(PitchClass::C, &pcs(&[0, 4, 7]));
        assert!(profile.has(slot::ROOT));
        assert!(profile.has(slot::MAJOR_THIRD));
        assert!(profile.has(slot::PERFECT_FIFTH));
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_profile_inverts_around_root() {
        // C E G seen from E: unison, minor third (G), minor sixth (C).
        let profile = IntervalProfile::new(PitchClass::E, &pcs(&[0, 4, 7]));
        assert_eq!(profile, IntervalProfile::from_semitones(&[0, 3, 8]));
    }

    #[test]
    fn test_repeats_collapse() {
        let profile = IntervalProfile::new(PitchClass::A, &pcs(&[9, 21, 33, 4]));
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn test_note_set_order_and_bass() {
        // E C A E A, highest string first: A is the bass.
        let set = NoteSet::collect(pcs(&[4, 0, 9, 4, 9])).unwrap();
        assert_eq!(set.notes(), pcs(&[4, 0, 9]).as_slice());
        assert_eq!(set.bass(), PitchClass::A);
        assert_eq!(set.note_count(), 3);
        let variations: Vec<_> = set.variations().collect();
        assert_eq!(variations, pcs(&[4, 0]));
    }

    #[test]
    fn test_bass_seen_higher_up_is_not_a_variation() {
        let set = NoteSet::collect(pcs(&[4, 11, 7, 4])).unwrap();
        assert_eq!(set.bass(), PitchClass::E);
        let variations: Vec<_> = set.variations().collect();
        assert_eq!(variations, pcs(&[11, 7]));
    }

    #[test]
    fn test_empty_note_set() {
        assert!(NoteSet::collect(Vec::new()).is_none());
    }

    #[test]
    fn test_debug_lists_set_slots() {
        let profile = IntervalProfile::from_semitones(&[0, 3, 7]);
        assert_eq!(format!("{:?}", profile), "IntervalProfile([0, 3, 7])");
    }
}
