//! Plain-text tablature.
//!
//! ```text
//! Am
//! 0|---|---|---|---|---|
//! -|-#-|---|---|---|---|
//! -|---|-#-|---|---|---|
//! -|---|-#-|---|---|---|
//! 0|---|---|---|---|---|
//! X|---|---|---|---|---|
//!    1   2   3   4   5
//! ```
//!
//! The footer pads with non-breaking spaces by default so the numbers stay
//! aligned when the tab is pasted into proportional-font chat clients.

use fretchord_core::{check_fret, AnalyzerConfig, Cell, FingerPattern};

use crate::{check_chord_name, RenderError};

/// Non-breaking space used for footer padding.
pub const NBSP: char = '\u{00A0}';

const CELL: &str = "---|";
const FINGERED: &str = "-#-|";
const MUTED: &str = "X|";
const OPEN: &str = "0|";
const PRESSED: &str = "-|";
const CAPO: char = 'c';
const COLUMNS: u8 = 5;

/// Renders finger patterns as text tabs.
#[derive(Debug, Clone)]
pub struct TabRenderer {
    config: AnalyzerConfig,
    pad: char,
}

impl Default for TabRenderer {
    fn default() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            pad: NBSP,
        }
    }
}

impl TabRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Pads the footer with `pad` instead of a non-breaking space.
    pub fn with_pad(mut self, pad: char) -> Self {
        self.pad = pad;
        self
    }

    /// Renders a validated pattern under `name`.
    pub fn render(
        &self,
        pattern: &str,
        fret: i32,
        capo: bool,
        name: &str,
    ) -> Result<String, RenderError> {
        check_chord_name(name)?;
        let parsed = FingerPattern::parse_with(pattern, &self.config)?;
        check_fret(fret, &self.config)?;
        Ok(self.render_pattern(&parsed, fret, capo, name))
    }

    /// Renders an already parsed pattern; the name is not checked.
    pub fn render_pattern(
        &self,
        pattern: &FingerPattern,
        fret: i32,
        capo: bool,
        name: &str,
    ) -> String {
        let mut tab = String::with_capacity(256);
        tab.push_str(name);
        tab.push('\n');

        for cell in pattern.cells() {
            string_line(&mut tab, *cell);
            tab.push('\n');
        }

        tab.push(if capo && fret != 0 { CAPO } else { self.pad });
        for i in 1..=COLUMNS as i32 {
            tab.push(self.pad);
            tab.push(self.pad);
            tab.push_str(&(fret + i).to_string());
            tab.push(self.pad);
        }
        tab
    }
}

fn string_line(out: &mut String, cell: Cell) {
    match cell {
        Cell::Muted => {
            out.push_str(MUTED);
            out.push_str(&CELL.repeat(COLUMNS as usize));
        }
        Cell::Fret(0) => {
            out.push_str(OPEN);
            out.push_str(&CELL.repeat(COLUMNS as usize));
        }
        Cell::Fret(d) => {
            out.push_str(PRESSED);
            for column in 1..=COLUMNS {
                out.push_str(if column == d { FINGERED } else { CELL });
            }
        }
    }
}
