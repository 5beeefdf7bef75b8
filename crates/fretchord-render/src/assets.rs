//! Diagram assets: the store abstraction, its in-memory and directory
//! implementations, and procedurally generated defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fretchord_core::{DEFAULT_MAX_FRET, MAX_CONFIG_FRET, STRING_COUNT};

use crate::canvas::{Blend, Canvas, Rect, Rgba};
use crate::diagram::{Symbol, CANVAS_HEIGHT, CANVAS_WIDTH, CELL_HEIGHT, CELL_WIDTH};
use crate::font::{self, BitmapFont};
use crate::png::{write_rgba_to_vec, PngConfig, PngError};
use crate::AssetError;

/// Scrolling fretboard background.
pub const FRETBOARD: &str = "fretboard.png";
/// Sprite sheet: finger, open, muted and capo cells.
pub const SYMBOLS: &str = "symbols.png";
/// Glyph atlas for the chord name.
pub const FONT: &str = "font.png";

/// Every asset a diagram needs.
pub const ASSET_NAMES: [&str; 3] = [FRETBOARD, SYMBOLS, FONT];

/// Read-only access to named binary assets.
pub trait AssetStore {
    /// Returns the bytes stored under `name`.
    fn get(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

impl<S: AssetStore + ?Sized> AssetStore for &S {
    fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        (**self).get(name)
    }
}

/// Checks that an asset name is a plain file name.
///
/// Rejects empty names, path separators, parent references, hidden files,
/// drive prefixes and control characters.
pub fn is_safe_asset_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', ':'])
        && !name.chars().any(char::is_control)
}

fn check_name(name: &str) -> Result<(), AssetError> {
    if is_safe_asset_name(name) {
        Ok(())
    } else {
        Err(AssetError::UnsafeName(name.to_string()))
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Assets held in memory, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryAssetStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }

    /// Stored names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for MemoryAssetStore {
    fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

// ============================================================================
// Directory store
// ============================================================================

/// Assets stored as files directly under a root directory.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes an asset, creating the root directory if needed.
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<(), AssetError> {
        check_name(name)?;
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(name), bytes)?;
        log::debug!("saved asset {} ({} bytes)", name, bytes.len());
        Ok(())
    }
}

impl AssetStore for DirAssetStore {
    fn get(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        check_name(name)?;
        match fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Built-in assets
// ============================================================================

const WOOD: Rgba = Rgba::opaque(96, 60, 38);
const HEADER: Rgba = Rgba::opaque(36, 24, 18);
const STRING: Rgba = Rgba::opaque(214, 210, 200);
const FRET_WIRE: Rgba = Rgba::opaque(170, 170, 176);
const NUT: Rgba = Rgba::opaque(238, 232, 214);
const INK: Rgba = Rgba::opaque(24, 24, 24);
const CAPO: Rgba = Rgba::opaque(150, 30, 36);

/// Width of the left margin that also serves as the board's right edge.
const MARGIN: u32 = CANVAS_WIDTH - CELL_WIDTH * STRING_COUNT as u32 - 2;

/// Fret numbers are drawn at this scale below the strings.
const NUMBER_SCALE: u32 = 2;

/// Generates the scrolling fretboard for base frets up to `max_fret`.
///
/// Column 0 is the open-string area ending in the nut; column `k` is fret
/// `k`, with its number printed below the lowest string. `max_fret` is
/// clamped to [`MAX_CONFIG_FRET`].
pub fn generate_fretboard(max_fret: u32) -> Canvas {
    let max_fret = max_fret.min(MAX_CONFIG_FRET as u32);
    let width = max_fret * CELL_WIDTH + CANVAS_WIDTH;
    let mut board = Canvas::new(width, CANVAS_HEIGHT, WOOD);
    board.fill_rect(Rect::new(0, 0, width, CELL_HEIGHT), HEADER, Blend::Src);

    let strings_top = CELL_HEIGHT + CELL_HEIGHT / 2;
    let strings_bottom = CELL_HEIGHT * STRING_COUNT as u32 + CELL_HEIGHT / 2;

    // Fret wires close each cell on the right.
    for k in 1..width / CELL_WIDTH {
        let x = k * CELL_WIDTH + CELL_WIDTH - 2;
        board.fill_rect(
            Rect::new(x, strings_top, 4, strings_bottom - strings_top + 1),
            FRET_WIRE,
            Blend::Src,
        );
    }
    board.fill_rect(
        Rect::new(CELL_WIDTH - 6, strings_top, 6, strings_bottom - strings_top + 1),
        NUT,
        Blend::Src,
    );

    // Strings get thicker towards the bass.
    for s in 0..STRING_COUNT as u32 {
        let y = CELL_HEIGHT * (s + 1) + CELL_HEIGHT / 2;
        let thickness = 1 + s / 2;
        board.fill_rect(
            Rect::new(MARGIN, y - thickness / 2, width - MARGIN, thickness),
            STRING,
            Blend::Src,
        );
    }

    let font = BitmapFont::builtin();
    let numbers_y = CELL_HEIGHT * (STRING_COUNT as u32 + 1) + 4;
    for k in 1..width / CELL_WIDTH {
        let label = k.to_string();
        let text_width = BitmapFont::text_width(&label, NUMBER_SCALE);
        let x = k * CELL_WIDTH + (CELL_WIDTH - text_width) / 2;
        font.draw_text(&mut board, &label, x, numbers_y, NUMBER_SCALE, NUT);
    }
    board
}

fn fill_disc(canvas: &mut Canvas, cx: i64, cy: i64, radius: i64, color: Rgba) {
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius && x >= 0 && y >= 0 {
                canvas.set(x as u32, y as u32, color);
            }
        }
    }
}

fn ring(canvas: &mut Canvas, cx: i64, cy: i64, outer: i64, inner: i64, color: Rgba) {
    for y in cy - outer..=cy + outer {
        for x in cx - outer..=cx + outer {
            let d = (x - cx) * (x - cx) + (y - cy) * (y - cy);
            if d <= outer * outer && d > inner * inner && x >= 0 && y >= 0 {
                canvas.set(x as u32, y as u32, color);
            }
        }
    }
}

/// Generates the sprite sheet, one transparent cell per [`Symbol`].
pub fn generate_symbols() -> Canvas {
    let mut sheet = Canvas::new(CELL_WIDTH * 4, CELL_HEIGHT, Rgba::TRANSPARENT);
    let cy = (CELL_HEIGHT / 2) as i64;
    let center = |symbol: Symbol| (symbol.offset() + CELL_WIDTH / 2) as i64;

    fill_disc(&mut sheet, center(Symbol::Finger), cy, 20, INK);
    fill_disc(&mut sheet, center(Symbol::Finger), cy, 17, Rgba::opaque(60, 60, 64));

    ring(&mut sheet, center(Symbol::Open), cy, 16, 12, NUT);

    let mx = center(Symbol::Muted);
    for t in -14i64..=14 {
        for w in -2i64..=2 {
            sheet.set((mx + t + w) as u32, (cy + t) as u32, NUT);
            sheet.set((mx - t + w) as u32, (cy + t) as u32, NUT);
        }
    }

    let capo = Symbol::Capo.offset();
    sheet.fill_rect(Rect::new(capo + 20, 8, 60, 44), CAPO, Blend::Src);
    BitmapFont::builtin().draw_text(&mut sheet, "C", capo + 40, 16, 4, Rgba::WHITE);
    sheet
}

/// Encodes the three default assets into a memory store.
pub fn builtin_assets() -> Result<MemoryAssetStore, PngError> {
    builtin_assets_for(DEFAULT_MAX_FRET as u32)
}

/// Like [`builtin_assets`], with a fretboard long enough for `max_fret`.
pub fn builtin_assets_for(max_fret: u32) -> Result<MemoryAssetStore, PngError> {
    let config = PngConfig::default();
    let mut store = MemoryAssetStore::new();
    store.insert(
        FRETBOARD,
        write_rgba_to_vec(&generate_fretboard(max_fret), &config)?,
    );
    store.insert(SYMBOLS, write_rgba_to_vec(&generate_symbols(), &config)?);
    store.insert(
        FONT,
        write_rgba_to_vec(&font::generate_atlas(Rgba::WHITE), &config)?,
    );
    log::debug!("generated {} built-in assets", store.len());
    Ok(store)
}
