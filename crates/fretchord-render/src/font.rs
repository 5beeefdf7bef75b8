//! 5x7 bitmap font: glyph table, atlas generation, and text drawing.
//!
//! The atlas is a 16-column grid of 6x8 cells covering ASCII 32 to 127, each
//! cell holding a 5x7 glyph in its top-left corner. Text is drawn by reading
//! glyph coverage back out of an atlas, so a replacement `font.png` changes
//! the rendered lettering.

use crate::canvas::{Blend, Canvas, Rect, Rgba};
use crate::error::RenderError;

/// First character in the atlas.
pub const FIRST_CHAR: u32 = 32;
/// Number of glyphs in the atlas (ASCII 32..=127).
pub const GLYPH_COUNT: u32 = 96;
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Atlas cell size, including one pixel of spacing.
pub const CELL_WIDTH: u32 = 6;
pub const CELL_HEIGHT: u32 = 8;
pub const ATLAS_COLUMNS: u32 = 16;
pub const ATLAS_WIDTH: u32 = ATLAS_COLUMNS * CELL_WIDTH;
pub const ATLAS_HEIGHT: u32 = GLYPH_COUNT.div_ceil(ATLAS_COLUMNS) * CELL_HEIGHT;

/// Atlas pixels with at least this alpha count as ink.
const COVERAGE_THRESHOLD: u8 = 128;

/// One row bitmask per glyph line; bit 4 is the leftmost pixel.
const GLYPHS: [[u8; GLYPH_HEIGHT as usize]; GLYPH_COUNT as usize] = [
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // space
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100, 0b00000], // !
    [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // "
    [0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b00000, 0b00000], // #
    [0b00100, 0b01110, 0b10100, 0b01110, 0b00101, 0b01110, 0b00100], // $
    [0b11001, 0b11010, 0b00100, 0b01011, 0b10011, 0b00000, 0b00000], // %
    [0b01100, 0b10010, 0b01100, 0b10010, 0b10011, 0b01101, 0b00000], // &
    [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // '
    [0b00100, 0b01000, 0b01000, 0b01000, 0b01000, 0b00100, 0b00000], // (
    [0b00100, 0b00010, 0b00010, 0b00010, 0b00010, 0b00100, 0b00000], // )
    [0b00000, 0b10101, 0b01110, 0b10101, 0b00000, 0b00000, 0b00000], // *
    [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000], // +
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // ,
    [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000], // -
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000], // .
    [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000, 0b00000], // /
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
    [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000], // :
    [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // ;
    [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010], // <
    [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000], // =
    [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000], // >
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100], // ?
    [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110], // @
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
    [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110], // [
    [0b10000, 0b01000, 0b00100, 0b00010, 0b00001, 0b00000, 0b00000], // \
    [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110], // ]
    [0b00100, 0b01010, 0b10001, 0b00000, 0b00000, 0b00000, 0b00000], // ^
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111], // _
    [0b01000, 0b00100, 0b00010, 0b00000, 0b00000, 0b00000, 0b00000], // `
    [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111], // a
    [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110], // b
    [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110], // c
    [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111], // d
    [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110], // e
    [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000], // f
    [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110], // g
    [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001], // h
    [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110], // i
    [0b00010, 0b00000, 0b00110, 0b00010, 0b00010, 0b10010, 0b01100], // j
    [0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010], // k
    [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // l
    [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001], // m
    [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001], // n
    [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110], // o
    [0b00000, 0b00000, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000], // p
    [0b00000, 0b00000, 0b01101, 0b10011, 0b01111, 0b00001, 0b00001], // q
    [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000], // r
    [0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110], // s
    [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110], // t
    [0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101], // u
    [0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // v
    [0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010], // w
    [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001], // x
    [0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110], // y
    [0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111], // z
    [0b00010, 0b00100, 0b00100, 0b01000, 0b00100, 0b00100, 0b00010], // {
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // |
    [0b01000, 0b00100, 0b00100, 0b00010, 0b00100, 0b00100, 0b01000], // }
    [0b00000, 0b00000, 0b01000, 0b10101, 0b00010, 0b00000, 0b00000], // ~
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // DEL
];

/// Atlas index for `ch`; characters outside the atlas map to '?'.
pub fn glyph_index(ch: char) -> u32 {
    let code = ch as u32;
    if (FIRST_CHAR..FIRST_CHAR + GLYPH_COUNT).contains(&code) {
        code - FIRST_CHAR
    } else {
        '?' as u32 - FIRST_CHAR
    }
}

/// Row bitmasks for `ch`.
pub fn glyph(ch: char) -> &'static [u8; GLYPH_HEIGHT as usize] {
    &GLYPHS[glyph_index(ch) as usize]
}

/// Top-left corner of a glyph's cell in the atlas.
fn cell_origin(index: u32) -> (u32, u32) {
    (
        (index % ATLAS_COLUMNS) * CELL_WIDTH,
        (index / ATLAS_COLUMNS) * CELL_HEIGHT,
    )
}

/// Renders the glyph table into an atlas on a transparent background.
pub fn generate_atlas(color: Rgba) -> Canvas {
    let mut atlas = Canvas::new(ATLAS_WIDTH, ATLAS_HEIGHT, Rgba::TRANSPARENT);
    for (index, rows) in GLYPHS.iter().enumerate() {
        let (ox, oy) = cell_origin(index as u32);
        for (y, bits) in rows.iter().enumerate() {
            for x in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - x)) != 0 {
                    atlas.set(ox + x, oy + y as u32, color);
                }
            }
        }
    }
    atlas
}

/// A font backed by a decoded atlas image.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    atlas: Canvas,
}

impl BitmapFont {
    /// Wraps an atlas, checking that it covers every glyph cell.
    pub fn from_atlas(name: &str, atlas: Canvas) -> Result<Self, RenderError> {
        if atlas.width() < ATLAS_WIDTH || atlas.height() < ATLAS_HEIGHT {
            return Err(RenderError::AssetTooSmall {
                name: name.to_string(),
                actual_width: atlas.width(),
                actual_height: atlas.height(),
                min_width: ATLAS_WIDTH,
                min_height: ATLAS_HEIGHT,
            });
        }
        Ok(Self { atlas })
    }

    /// The built-in white font.
    pub fn builtin() -> Self {
        Self {
            atlas: generate_atlas(Rgba::WHITE),
        }
    }

    fn covered(&self, index: u32, x: u32, y: u32) -> bool {
        let (ox, oy) = cell_origin(index);
        self.atlas
            .get(ox + x, oy + y)
            .is_some_and(|p| p.a >= COVERAGE_THRESHOLD)
    }

    /// Width in pixels of `text` drawn at `scale`, without trailing spacing.
    pub fn text_width(text: &str, scale: u32) -> u32 {
        let count = text.chars().count() as u32;
        if count == 0 {
            0
        } else {
            (count * CELL_WIDTH - (CELL_WIDTH - GLYPH_WIDTH)) * scale
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`, each font pixel
    /// becoming a `scale` x `scale` block of `color`.
    pub fn draw_text(&self, canvas: &mut Canvas, text: &str, x: u32, y: u32, scale: u32, color: Rgba) {
        for (i, ch) in text.chars().enumerate() {
            let index = glyph_index(ch);
            let left = x + i as u32 * CELL_WIDTH * scale;
            for gy in 0..GLYPH_HEIGHT {
                for gx in 0..GLYPH_WIDTH {
                    if self.covered(index, gx, gy) {
                        canvas.fill_rect(
                            Rect::new(left + gx * scale, y + gy * scale, scale, scale),
                            color,
                            Blend::Over,
                        );
                    }
                }
            }
        }
    }
}
