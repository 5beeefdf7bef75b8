//! PNG chord diagrams composited from fretboard, symbol and font assets.

use fretchord_core::{check_fret, AnalyzerConfig, Cell, FingerPattern, STRING_COUNT};

use crate::assets::{AssetStore, FONT, FRETBOARD, SYMBOLS};
use crate::canvas::{Blend, Canvas, Rect, Rgba};
use crate::font::{BitmapFont, GLYPH_HEIGHT};
use crate::png::{decode_rgba, hash_png, write_rgba_to_vec, PngConfig};
use crate::{check_chord_name, RenderError};

/// Width of one fret column.
pub const CELL_WIDTH: u32 = 100;
/// Height of one string row.
pub const CELL_HEIGHT: u32 = 60;
pub const CANVAS_WIDTH: u32 = CELL_WIDTH * STRING_COUNT as u32 + CELL_WIDTH / 2;
pub const CANVAS_HEIGHT: u32 = CELL_HEIGHT * (STRING_COUNT as u32 + 1) + CELL_HEIGHT / 2;

/// Chord names are drawn with each font pixel this many pixels wide.
pub const NAME_SCALE: u32 = 4;

/// Right edge cap, copied from the fretboard's left margin.
const CAP_X: u32 = CELL_WIDTH * STRING_COUNT as u32 + 2;
const CAPO_Y: u32 = CELL_HEIGHT * STRING_COUNT as u32 + CELL_HEIGHT / 2;

/// Cells of the symbols sprite sheet, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Finger,
    Open,
    Muted,
    Capo,
}

impl Symbol {
    /// X offset of the cell in the sprite sheet.
    pub fn offset(self) -> u32 {
        let index = match self {
            Symbol::Finger => 0,
            Symbol::Open => 1,
            Symbol::Muted => 2,
            Symbol::Capo => 3,
        };
        index * CELL_WIDTH
    }
}

/// Draws chord diagrams from assets held in `S`.
#[derive(Debug, Clone)]
pub struct DiagramRenderer<S> {
    store: S,
    config: AnalyzerConfig,
    png: PngConfig,
}

/// Decoded assets for one render.
struct Sheets {
    fretboard: Canvas,
    symbols: Canvas,
    font: BitmapFont,
}

impl<S: AssetStore> DiagramRenderer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: AnalyzerConfig::default(),
            png: PngConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_png_config(mut self, png: PngConfig) -> Self {
        self.png = png;
        self
    }

    /// Renders a diagram and encodes it as PNG.
    pub fn render(
        &self,
        pattern: &str,
        fret: i32,
        capo: bool,
        name: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let canvas = self.render_canvas(pattern, fret, capo, name)?;
        let data = write_rgba_to_vec(&canvas, &self.png)?;
        log::debug!(
            "diagram {} {} at fret {}: {} bytes, blake3 {}",
            name,
            pattern,
            fret,
            data.len(),
            hash_png(&data)
        );
        Ok(data)
    }

    /// Renders a diagram without encoding it.
    pub fn render_canvas(
        &self,
        pattern: &str,
        fret: i32,
        capo: bool,
        name: &str,
    ) -> Result<Canvas, RenderError> {
        check_chord_name(name)?;
        let parsed = FingerPattern::parse_with(pattern, &self.config)?;
        check_fret(fret, &self.config)?;
        // check_fret guarantees 0 <= fret.
        let fret = fret as u32;
        let offset = board_offset(fret)?;

        let sheets = self.load(offset)?;
        let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba::BLACK);
        let full = Rect::new(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT);
        canvas.draw(full, &sheets.fretboard, offset, 0, Blend::Src);

        if fret != 0 {
            let nut = Rect::new(0, 0, CELL_WIDTH, CANVAS_HEIGHT);
            canvas.draw(nut, &sheets.fretboard, 0, 0, Blend::Src);
        }
        if fret as i32 != self.config.max_fret {
            let cap = Rect::new(CAP_X, 0, CANVAS_WIDTH - CAP_X, CANVAS_HEIGHT);
            canvas.draw(cap, &sheets.fretboard, 0, 0, Blend::Src);
        }

        for (i, cell) in parsed.cells().iter().enumerate() {
            let y = i as u32 * CELL_HEIGHT + CELL_HEIGHT;
            let (symbol, x) = match cell {
                Cell::Muted => (Symbol::Muted, 0),
                Cell::Fret(0) => (Symbol::Open, 0),
                Cell::Fret(d) => (Symbol::Finger, *d as u32 * CELL_WIDTH),
            };
            stamp(&mut canvas, &sheets.symbols, symbol, x, y);
        }

        if capo && fret != 0 {
            stamp(&mut canvas, &sheets.symbols, Symbol::Capo, 0, CAPO_Y);
        }

        draw_name(&mut canvas, &sheets.font, name);
        Ok(canvas)
    }

    fn load(&self, offset: u32) -> Result<Sheets, RenderError> {
        let fretboard = self.decode(FRETBOARD, offset + CANVAS_WIDTH, CANVAS_HEIGHT)?;
        let symbols = self.decode(SYMBOLS, 4 * CELL_WIDTH, CELL_HEIGHT)?;
        let font = BitmapFont::from_atlas(FONT, decode_rgba(&self.store.get(FONT)?)?)?;
        Ok(Sheets {
            fretboard,
            symbols,
            font,
        })
    }

    fn decode(&self, name: &str, min_width: u32, min_height: u32) -> Result<Canvas, RenderError> {
        let canvas = decode_rgba(&self.store.get(name)?)?;
        if canvas.width() < min_width || canvas.height() < min_height {
            return Err(RenderError::AssetTooSmall {
                name: name.to_string(),
                actual_width: canvas.width(),
                actual_height: canvas.height(),
                min_width,
                min_height,
            });
        }
        Ok(canvas)
    }
}

/// X offset of the base fret's column in the fretboard, leaving room for a
/// full canvas to its right.
fn board_offset(fret: u32) -> Result<u32, RenderError> {
    fret.checked_mul(CELL_WIDTH)
        .filter(|offset| offset.checked_add(CANVAS_WIDTH).is_some())
        .ok_or(RenderError::FretOffset { fret })
}

fn stamp(canvas: &mut Canvas, sheet: &Canvas, symbol: Symbol, x: u32, y: u32) {
    let cell = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT);
    canvas.draw(cell, sheet, symbol.offset(), 0, Blend::Over);
}

/// Centres the name in the header row, between the nut column and the cap.
fn draw_name(canvas: &mut Canvas, font: &BitmapFont, name: &str) {
    let area = CANVAS_WIDTH - CELL_WIDTH - CELL_WIDTH / 2;
    let width = BitmapFont::text_width(name, NAME_SCALE);
    let x = CELL_WIDTH + area.saturating_sub(width) / 2;
    let y = (CELL_HEIGHT - GLYPH_HEIGHT * NAME_SCALE) / 2;
    font.draw_text(canvas, name, x, y, NAME_SCALE, Rgba::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{builtin_assets, generate_symbols, MemoryAssetStore};

    fn renderer() -> DiagramRenderer<MemoryAssetStore> {
        DiagramRenderer::new(builtin_assets().unwrap())
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(CANVAS_WIDTH, 650);
        assert_eq!(CANVAS_HEIGHT, 455);
        let canvas = renderer().render_canvas("01220X", 0, false, "Am").unwrap();
        assert_eq!((canvas.width(), canvas.height()), (650, 455));
    }

    #[test]
    fn test_finger_lands_in_its_cell() {
        let symbols = generate_symbols();
        let center = symbols.get(CELL_WIDTH / 2, CELL_HEIGHT / 2).unwrap();

        // Second string, first cell.
        let canvas = renderer().render_canvas("X1XXXX", 3, false, "C").unwrap();
        let y = 2 * CELL_HEIGHT + CELL_HEIGHT / 2;
        assert_eq!(canvas.get(CELL_WIDTH + CELL_WIDTH / 2, y), Some(center));
        assert_ne!(canvas.get(2 * CELL_WIDTH + CELL_WIDTH / 2, y), Some(center));
    }

    #[test]
    fn test_capo_only_above_nut() {
        let store = builtin_assets().unwrap();
        let r = DiagramRenderer::new(&store);
        // Inside the capo block, clear of its letter.
        let capo_pixel = (25, CAPO_Y + 10);

        let with_capo = r.render_canvas("00023X", 2, true, "Dmaj7").unwrap();
        let without = r.render_canvas("00023X", 2, false, "Dmaj7").unwrap();
        assert_ne!(
            with_capo.get(capo_pixel.0, capo_pixel.1),
            without.get(capo_pixel.0, capo_pixel.1)
        );

        let at_nut = r.render_canvas("00023X", 0, true, "Dmaj7").unwrap();
        let at_nut_plain = r.render_canvas("00023X", 0, false, "Dmaj7").unwrap();
        assert_eq!(at_nut, at_nut_plain);
    }

    #[test]
    fn test_name_is_drawn_in_header() {
        let r = renderer();
        let a = r.render_canvas("01220X", 0, false, "Am").unwrap();
        let b = r.render_canvas("01220X", 0, false, "Bm").unwrap();
        let differs = (0..CELL_HEIGHT)
            .flat_map(|y| (0..CANVAS_WIDTH).map(move |x| (x, y)))
            .any(|(x, y)| a.get(x, y) != b.get(x, y));
        assert!(differs);
        // Below the header nothing depends on the name.
        for y in CELL_HEIGHT..CANVAS_HEIGHT {
            for x in 0..CANVAS_WIDTH {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn test_missing_asset() {
        let full = builtin_assets().unwrap();
        let mut partial = MemoryAssetStore::new();
        for name in [FRETBOARD, SYMBOLS] {
            partial.insert(name, full.get(name).unwrap());
        }
        let err = DiagramRenderer::new(partial)
            .render("01220X", 0, false, "Am")
            .unwrap_err();
        assert_eq!(err.code(), "ASSET_001");
    }

    #[test]
    fn test_board_offset_bounds() {
        assert_eq!(board_offset(0).unwrap(), 0);
        assert_eq!(board_offset(7).unwrap(), 700);
        assert!(matches!(
            board_offset(u32::MAX / CELL_WIDTH),
            Err(RenderError::FretOffset { .. })
        ));
        assert!(matches!(
            board_offset(u32::MAX),
            Err(RenderError::FretOffset { .. })
        ));
    }

    #[test]
    fn test_unchecked_max_fret_errors_instead_of_overflowing() {
        // Fields are public, so a config can skip the JSON checks.
        let config = AnalyzerConfig {
            max_fret: i32::MAX,
            ..AnalyzerConfig::default()
        };
        let r = renderer().with_config(config);

        let err = r.render("01220X", i32::MAX, false, "Am").unwrap_err();
        assert_eq!(err.code(), "RENDER_004");

        // In range for the arithmetic, but far past the built-in board.
        let err = r.render("01220X", 1_000_000, false, "Am").unwrap_err();
        assert!(matches!(err, RenderError::AssetTooSmall { .. }));
    }

    #[test]
    fn test_short_fretboard_rejected() {
        let mut store = builtin_assets().unwrap();
        let narrow = crate::assets::generate_fretboard(2);
        store.insert(
            FRETBOARD,
            write_rgba_to_vec(&narrow, &PngConfig::default()).unwrap(),
        );
        let r = DiagramRenderer::new(&store);
        assert!(r.render("01220X", 2, false, "Am").is_ok());
        assert!(matches!(
            r.render("01220X", 3, false, "Am"),
            Err(RenderError::AssetTooSmall { .. })
        ));
    }
}
