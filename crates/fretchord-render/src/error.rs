//! Error types for rendering and asset access.

use fretchord_core::ValidationError;
use thiserror::Error;

use crate::png::PngError;

/// Errors from fetching or storing assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset is stored under the name.
    #[error("asset not found: '{0}'")]
    NotFound(String),

    /// The name could escape the store root.
    #[error("unsafe asset name: '{0}'")]
    UnsafeName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl AssetError {
    /// Returns the stable error code (e.g. "ASSET_001").
    pub fn code(&self) -> &'static str {
        match self {
            AssetError::NotFound(_) => "ASSET_001",
            AssetError::UnsafeName(_) => "ASSET_002",
            AssetError::Io(_) => "ASSET_003",
            #[cfg(feature = "sqlite")]
            AssetError::Sqlite(_) => "ASSET_004",
        }
    }
}

/// Errors from producing a tab or a diagram.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The chord name is empty or too long for the header.
    #[error("invalid chord name '{name}': must be 1 to {max} characters")]
    InvalidName { name: String, max: usize },

    #[error(transparent)]
    Pattern(#[from] ValidationError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    /// A decoded asset is smaller than the layout needs.
    #[error("asset '{name}' is {actual_width}x{actual_height}, need at least {min_width}x{min_height}")]
    AssetTooSmall {
        name: String,
        actual_width: u32,
        actual_height: u32,
        min_width: u32,
        min_height: u32,
    },

    /// The base fret scrolls further than any fretboard image can reach.
    #[error("base fret {fret} is beyond the end of the fretboard")]
    FretOffset { fret: u32 },
}

impl RenderError {
    /// Returns the stable error code, delegating to wrapped errors.
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::InvalidName { .. } => "RENDER_001",
            RenderError::Pattern(e) => e.code(),
            RenderError::Asset(e) => e.code(),
            RenderError::Png(_) => "RENDER_002",
            RenderError::AssetTooSmall { .. } => "RENDER_003",
            RenderError::FretOffset { .. } => "RENDER_004",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_delegate() {
        let err = RenderError::from(ValidationError::Empty);
        assert_eq!(err.code(), "PATTERN_005");

        let err = RenderError::from(AssetError::NotFound("font.png".to_string()));
        assert_eq!(err.code(), "ASSET_001");
        assert!(err.to_string().contains("font.png"));
    }

    #[test]
    fn test_invalid_name_message() {
        let err = RenderError::InvalidName {
            name: String::new(),
            max: 20,
        };
        assert_eq!(err.code(), "RENDER_001");
        assert!(err.to_string().contains("1 to 20"));
    }
}
