//! JSON output types for the `--json` flag.
//!
//! Every command prints exactly one object with a `success` flag and an
//! `errors` list. Validation failures carry the library's stable codes
//! (`PATTERN_001`...), everything else a `CLI_XXX` code.

use fretchord_core::{ChordNames, ValidationError};
use fretchord_render::RenderError;
use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures.
pub mod error_codes {
    /// Config file could not be read or parsed
    pub const CONFIG: &str = "CLI_001";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "PATTERN_002", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(err: &ValidationError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<&RenderError> for JsonError {
    fn from(err: &RenderError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// The chord being analyzed or drawn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChordInput {
    pub pattern: String,
    pub fret: i32,
    pub capo: bool,
}

/// Output of `analyze --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeOutput {
    pub success: bool,
    pub input: ChordInput,
    /// Base name, rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Variation names, rendered, in analysis order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<String>,
    /// Structured names with each part broken out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ChordNames>,
    pub errors: Vec<JsonError>,
}

impl AnalyzeOutput {
    pub fn success(input: ChordInput, names: ChordNames) -> Self {
        Self {
            success: true,
            input,
            name: Some(names.base.render()),
            variations: names.variation_names(),
            result: Some(names),
            errors: Vec::new(),
        }
    }

    pub fn failure(input: ChordInput, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            input,
            name: None,
            variations: Vec::new(),
            result: None,
            errors,
        }
    }
}

/// Output of `tab --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabOutput {
    pub success: bool,
    pub input: ChordInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    pub errors: Vec<JsonError>,
}

/// Output of `diagram --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagramOutput {
    pub success: bool,
    pub input: ChordInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Where the PNG was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<usize>,
    /// BLAKE3 hash of the PNG file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
    pub errors: Vec<JsonError>,
}

/// One asset written by `assets --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub size_bytes: usize,
    pub blake3: String,
}

/// Output of `assets --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetsOutput {
    pub success: bool,
    /// Directory or database the assets were written to.
    pub destination: String,
    pub assets: Vec<AssetEntry>,
    pub errors: Vec<JsonError>,
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("{}: {}", error_codes::JSON_SERIALIZE, e))?;
    println!("{}", json);
    Ok(())
}
