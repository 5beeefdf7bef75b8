//! Pattern-to-names analysis.

use crate::classify::classify;
use crate::config::AnalyzerConfig;
use crate::error::ValidationError;
use crate::intervals::NoteSet;
use crate::name::{ChordName, ChordNames, NamingTables};
use crate::pattern::{check_fret, FingerPattern};
use crate::pitch::{map_pattern, PitchClass};

/// Names chords under a fixed configuration and naming tables.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
    tables: NamingTables,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            tables: NamingTables::default(),
        }
    }

    /// Replaces the naming tables.
    pub fn with_tables(mut self, tables: NamingTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Parses `pattern` and checks `fret` against this analyzer's limits.
    pub fn parse(&self, pattern: &str, fret: i32) -> Result<FingerPattern, ValidationError> {
        let parsed = FingerPattern::parse_with(pattern, &self.config)?;
        check_fret(fret, &self.config)?;
        Ok(parsed)
    }

    /// Validates and names a pattern.
    pub fn analyze(
        &self,
        pattern: &str,
        fret: i32,
        capo: bool,
    ) -> Result<ChordNames, ValidationError> {
        let parsed = self.parse(pattern, fret)?;
        self.analyze_pattern(&parsed, fret, capo)
    }

    /// Names an already parsed pattern.
    ///
    /// `fret` is not range-checked here; any value wraps by octaves.
    pub fn analyze_pattern(
        &self,
        pattern: &FingerPattern,
        fret: i32,
        capo: bool,
    ) -> Result<ChordNames, ValidationError> {
        let notes =
            NoteSet::collect(map_pattern(pattern, fret, capo)).ok_or(ValidationError::Empty)?;

        let base = self.name(&notes, notes.bass());
        let variations = notes.variations().map(|root| self.name(&notes, root)).collect();
        let names = ChordNames { base, variations };

        log::debug!(
            "{} at fret {} (capo {}): {} {:?}",
            pattern.to_string_with(&self.config),
            fret,
            capo,
            names.base,
            names.variation_names()
        );
        Ok(names)
    }

    fn name(&self, notes: &NoteSet, root: PitchClass) -> ChordName {
        let profile = notes.profile(root);
        let flags = classify(&profile, notes.note_count());
        ChordName::assemble(root, &flags, &self.tables)
    }
}

/// Validates and names a pattern with the default configuration.
///
/// # Example
/// ```
/// use fretchord_core::analyze;
///
/// let names = analyze("01220X", 0, false).unwrap();
/// assert_eq!(names.base.render(), "Am");
/// assert_eq!(names.variation_names(), vec!["Eb6sus4", "C6"]);
/// ```
pub fn analyze(pattern: &str, fret: i32, capo: bool) -> Result<ChordNames, ValidationError> {
    Analyzer::default().analyze(pattern, fret, capo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_keys_to_lowest_string() {
        let names = analyze("000220", 0, false).unwrap();
        assert_eq!(names.base.render(), "Em");
        assert_eq!(names.variation_names(), vec!["Bb6sus4", "G6"]);

        // Read highest string first this sounds E C# A D A E.
        let names = analyze("022000", 0, false).unwrap();
        assert_eq!(names.base.render(), "E13sus4");
        assert_eq!(
            names.variation_names(),
            vec!["C#mb6(b9)", "A(add11)", "Dmaj7sus2"]
        );
    }

    #[test]
    fn test_validation_runs_first() {
        assert_eq!(analyze("XXXXXX", 0, false), Err(ValidationError::Empty));
        assert_eq!(
            analyze("01220X", 19, false),
            Err(ValidationError::FretNumber { fret: 19, max: 18 })
        );
    }

    #[test]
    fn test_parsed_pattern_accepts_any_fret() {
        let analyzer = Analyzer::default();
        let parsed = FingerPattern::parse("X32010").unwrap();
        for (extreme, same) in [(i32::MAX, 7), (i32::MIN, 4)] {
            for capo in [false, true] {
                assert_eq!(
                    analyzer.analyze_pattern(&parsed, extreme, capo),
                    analyzer.analyze_pattern(&parsed, same, capo)
                );
            }
        }
    }

    #[test]
    fn test_configured_limits() {
        let analyzer = Analyzer::new(AnalyzerConfig {
            max_fret: 24,
            mute: '-',
        });
        let names = analyzer.analyze("-----0", 24, false).unwrap();
        assert_eq!(names.base.render(), "E");
        assert!(names.variations.is_empty());
        assert!(analyzer.analyze("XXXXX0", 0, false).is_err());
    }
}
