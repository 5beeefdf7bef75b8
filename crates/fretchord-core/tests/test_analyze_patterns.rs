//! End-to-end naming of real finger patterns.
//!
//! Patterns are written highest string first, so the open E minor shape is
//! "000220" and the open C major shape is "01023X".

use std::collections::BTreeSet;

use fretchord_core::intervals::slot;
use fretchord_core::{
    analyze, classify, map_pattern, Analyzer, AnalyzerConfig, FingerPattern, IntervalProfile,
    Quality, ValidationError,
};
use pretty_assertions::assert_eq;

fn names(pattern: &str, fret: i32, capo: bool) -> (String, Vec<String>) {
    let names = analyze(pattern, fret, capo).unwrap();
    (names.base.render(), names.variation_names())
}

fn expect(pattern: &str, fret: i32, capo: bool, base: &str, variations: &[&str]) {
    assert_eq!(
        names(pattern, fret, capo),
        (
            base.to_string(),
            variations.iter().map(|v| v.to_string()).collect::<Vec<_>>()
        ),
        "pattern {} at fret {} (capo {})",
        pattern,
        fret,
        capo
    );
}

// ============================================================================
// Open Shapes
// ============================================================================

#[test]
fn test_open_a_minor() {
    expect("01220X", 0, false, "Am", &["Eb6sus4", "C6"]);
}

#[test]
fn test_open_e_minor() {
    expect("000220", 0, false, "Em", &["Bb6sus4", "G6"]);
}

#[test]
fn test_open_major_shapes() {
    expect("01023X", 0, false, "C", &["Emb6", "G6sus4"]);
    expect("300023", 0, false, "G", &["Bmb6", "D6sus4"]);
    expect("2320XX", 0, false, "D", &["F#mb6", "A6sus4"]);
}

#[test]
fn test_open_e_seventh() {
    expect("031020", 0, false, "E7", &["D6sus2(b5)", "G#dimb6", "Bm6/11"]);
}

#[test]
fn test_all_open_strings() {
    // E B G D A E: five distinct pitch classes.
    expect(
        "000000",
        0,
        false,
        "Em11",
        &["Bm11(b13)", "G6/9", "D6/9sus4", "A9sus4"],
    );
}

// ============================================================================
// Base Fret and Capo
// ============================================================================

#[test]
fn test_barre_shape_moves_with_fret() {
    expect("112331", 0, false, "F", &["C6sus4", "Amb6"]);
    expect("112331", 2, false, "G", &["D6sus4", "Bmb6"]);
}

#[test]
fn test_open_strings_ignore_fret_without_capo() {
    expect("01220X", 2, false, "A6/9sus4", &[]);
}

#[test]
fn test_capo_raises_open_strings() {
    expect("01220X", 2, true, "Bm", &["F#b6sus4", "D6"]);
    expect("00023X", 2, true, "Dmaj7", &["F#mb6", "C#b6sus4(b9)", "A6/11"]);
}

#[test]
fn test_capo_power_chord() {
    expect("XXX20X", 4, true, "C#5", &["G#sus4"]);
}

// ============================================================================
// Shortcuts
// ============================================================================

#[test]
fn test_single_note() {
    expect("XXXXX0", 0, false, "E", &[]);
    expect("XXX1XX", 0, false, "Eb", &[]);
}

#[test]
fn test_two_notes_a_fifth_apart() {
    expect("XXXX00", 0, false, "Esus4", &["A5"]);
    expect("XXXX31", 0, false, "F5", &["Csus4"]);
    expect("XXXX31", 2, false, "G5", &["Dsus4"]);

    let names = analyze("XXXX31", 0, false).unwrap();
    assert_eq!(names.base.extended, "5");
    assert_eq!(names.base.quality, "");
    assert_eq!(names.base.altered, "");
    assert_eq!(names.base.omitted, "");
}

// ============================================================================
// Structural Properties
// ============================================================================

/// One variation per distinct pitch class other than the bass.
#[test]
fn test_variation_count_matches_pitch_classes() {
    let patterns = [
        ("01220X", 0, false),
        ("000000", 0, false),
        ("031020", 0, false),
        ("XXXX00", 0, false),
        ("543210", 7, true),
        ("X0X0X0", 18, true),
    ];
    for (pattern, fret, capo) in patterns {
        let parsed = FingerPattern::parse(pattern).unwrap();
        let distinct: BTreeSet<_> = map_pattern(&parsed, fret, capo).collect();
        let names = analyze(pattern, fret, capo).unwrap();
        assert_eq!(
            names.variations.len(),
            distinct.len() - 1,
            "pattern {}",
            pattern
        );
    }
}

#[test]
fn test_analysis_is_deterministic() {
    for _ in 0..10 {
        assert_eq!(
            analyze("000000", 0, false).unwrap(),
            analyze("000000", 0, false).unwrap()
        );
    }
    let analyzer = Analyzer::default();
    assert_eq!(
        analyzer.analyze("543210", 3, true).unwrap(),
        analyze("543210", 3, true).unwrap()
    );
}

#[test]
fn test_every_pattern_names_without_panicking() {
    let symbols = ['X', '0', '3', '5'];
    let mut count = 0;
    for a in symbols {
        for b in symbols {
            for c in symbols {
                for d in symbols {
                    for e in symbols {
                        for f in symbols {
                            let pattern: String = [a, b, c, d, e, f].iter().collect();
                            match analyze(&pattern, 5, true) {
                                Ok(names) => {
                                    assert!(!names.base.render().is_empty());
                                    count += 1;
                                }
                                Err(err) => assert_eq!(err, ValidationError::Empty),
                            }
                        }
                    }
                }
            }
        }
    }
    assert_eq!(count, 4usize.pow(6) - 1);
}

// ============================================================================
// Promotion Rules
// ============================================================================

fn all_profiles() -> impl Iterator<Item = IntervalProfile> {
    (0u16..2048).map(|mask| {
        let mut semitones = vec![0];
        semitones.extend((1..12).filter(|i| mask & (1 << (i - 1)) != 0));
        IntervalProfile::from_semitones(&semitones)
    })
}

#[test]
fn test_minor_third_flat_fifth_without_seventh_is_diminished() {
    for profile in all_profiles() {
        let candidate = profile.has(slot::MINOR_THIRD)
            && !profile.has(slot::MAJOR_THIRD)
            && profile.has(slot::FLAT_FIFTH)
            && !profile.has(slot::PERFECT_FIFTH)
            && !profile.has_seventh();
        if candidate {
            let flags = classify(&profile, profile.len());
            assert_eq!(flags.quality, Some(Quality::Diminished), "{:?}", profile);
        }
    }
}

#[test]
fn test_major_third_sharp_fifth_without_seventh_is_augmented() {
    for profile in all_profiles() {
        let candidate = profile.has(slot::MAJOR_THIRD)
            && profile.has(slot::SHARP_FIFTH)
            && !profile.has(slot::PERFECT_FIFTH)
            && !profile.has_seventh();
        if candidate {
            let flags = classify(&profile, profile.len());
            assert_eq!(flags.quality, Some(Quality::Augmented), "{:?}", profile);
        }
    }
}

#[test]
fn test_missing_third_is_reported() {
    for profile in all_profiles() {
        let power = profile.len() == 2 && profile.has(slot::PERFECT_FIFTH);
        let flags = classify(&profile, profile.len());
        if flags.quality.is_none() && profile.len() > 1 && !power {
            assert!(flags.omission.is_some(), "{:?}", profile);
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_bounds() {
    assert!(matches!(
        analyze("01220X", -1, false),
        Err(ValidationError::FretNumber { fret: -1, .. })
    ));
    assert!(matches!(
        analyze("01220X", 19, false),
        Err(ValidationError::FretNumber { fret: 19, .. })
    ));
    assert!(matches!(
        analyze("0122X", 0, false),
        Err(ValidationError::Length { actual: 5, .. })
    ));
    assert!(matches!(
        analyze("01220XX", 0, false),
        Err(ValidationError::Length { actual: 7, .. })
    ));
    assert_eq!(analyze("XXXXXX", 0, false), Err(ValidationError::Empty));
    assert!(matches!(
        analyze("0122aX", 0, false),
        Err(ValidationError::WrongSymbols { symbol: 'a', .. })
    ));
    assert!(matches!(
        analyze("01260X", 0, false),
        Err(ValidationError::FretPattern { digit: 6, .. })
    ));
}

#[test]
fn test_configured_max_fret() {
    let analyzer = Analyzer::new(AnalyzerConfig {
        max_fret: 12,
        ..AnalyzerConfig::default()
    });
    assert!(analyzer.analyze("01220X", 12, false).is_ok());
    assert_eq!(
        analyzer.analyze("01220X", 13, false),
        Err(ValidationError::FretNumber { fret: 13, max: 12 })
    );
}
