//! fretchord Renderers
//!
//! This crate draws finger patterns as plain-text tabs and as PNG chord
//! diagrams. Diagrams are composited from three image assets fetched through
//! an [`AssetStore`]; every output is byte-identical for the same input and
//! the same assets.
//!
//! # Features
//!
//! - **Text tabs**: Five-cell tablature with a fret-number footer
//! - **PNG diagrams**: 650x455 diagrams from a scrolling fretboard, a symbol
//!   sprite sheet and a glyph atlas
//! - **Asset stores**: In-memory, directory and (with the `sqlite` feature)
//!   SQLite-backed stores
//! - **Built-in assets**: Procedurally generated defaults, so no files are
//!   needed to get started
//!
//! # Example
//!
//! ```
//! use fretchord_render::{builtin_assets, DiagramRenderer, TabRenderer};
//!
//! let tab = TabRenderer::new().with_pad(' ');
//! let text = tab.render("01220X", 0, false, "Am").unwrap();
//! assert!(text.starts_with("Am\n0|"));
//!
//! let store = builtin_assets().unwrap();
//! let png = DiagramRenderer::new(&store)
//!     .render("01220X", 0, false, "Am")
//!     .unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

pub mod assets;
pub mod canvas;
pub mod diagram;
pub mod error;
pub mod font;
pub mod png;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod tab;

// Re-export main types for convenience
pub use assets::{
    builtin_assets, builtin_assets_for, AssetStore, DirAssetStore, MemoryAssetStore, ASSET_NAMES,
    FONT, FRETBOARD, SYMBOLS,
};
pub use canvas::{Blend, Canvas, Rect, Rgba};
pub use diagram::{DiagramRenderer, Symbol, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use error::{AssetError, RenderError};
pub use font::BitmapFont;
pub use png::{PngConfig, PngError};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAssetStore;
pub use tab::TabRenderer;

/// Longest chord name a tab or diagram accepts, in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Checks that a chord name is non-empty and at most [`MAX_NAME_CHARS`] long.
pub fn check_chord_name(name: &str) -> Result<(), RenderError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(RenderError::InvalidName {
            name: name.to_string(),
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_name_bounds() {
        assert!(check_chord_name("C").is_ok());
        assert!(check_chord_name("C#m11(b13)").is_ok());
        assert!(check_chord_name(&"x".repeat(MAX_NAME_CHARS)).is_ok());
        assert!(check_chord_name("").is_err());
        assert!(check_chord_name(&"x".repeat(MAX_NAME_CHARS + 1)).is_err());
    }
}
