//! Diagram command implementation
//!
//! Renders a PNG chord diagram and writes it to disk.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use fretchord_core::{Analyzer, AnalyzerConfig};
use fretchord_render::png::{hash_png, PngConfig};
use fretchord_render::{builtin_assets_for, AssetStore, DiagramRenderer, DirAssetStore};

use super::json_output::{error_codes, print_json, ChordInput, DiagramOutput, JsonError};
use crate::input::load_config;

/// Where diagram assets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Generated on the fly.
    Builtin,
    /// Files in a directory.
    Dir(String),
    /// Rows of a SQLite database.
    #[cfg(feature = "sqlite")]
    Sqlite(String),
}

impl AssetSource {
    fn open(&self, config: &AnalyzerConfig) -> Result<Box<dyn AssetStore>> {
        let store: Box<dyn AssetStore> = match self {
            AssetSource::Builtin => {
                let max_fret = u32::try_from(config.max_fret).unwrap_or(0);
                Box::new(
                    builtin_assets_for(max_fret).context("Failed to generate built-in assets")?,
                )
            }
            AssetSource::Dir(dir) => Box::new(DirAssetStore::new(dir)),
            #[cfg(feature = "sqlite")]
            AssetSource::Sqlite(path) => Box::new(
                fretchord_render::SqliteAssetStore::open(path)
                    .with_context(|| format!("Failed to open asset database: {}", path))?,
            ),
        };
        Ok(store)
    }
}

/// A written diagram.
#[derive(Debug)]
struct Written {
    name: String,
    size: usize,
    hash: String,
}

/// Run the diagram command
///
/// # Arguments
/// * `name` - Chord name for the header; the analyzed base name when `None`
/// * `output` - Path of the PNG to write
/// * `source` - Where to load the fretboard, symbol and font assets from
/// * `fast` - Trade file size for encoding speed
pub fn run(
    input: &ChordInput,
    name: Option<&str>,
    output: &str,
    source: &AssetSource,
    fast: bool,
    config_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if !json_output {
        let written = write(input, name, output, source, fast, load_config(config_path)?)?;
        println!(
            "{} {} -> {}",
            "Rendered:".cyan().bold(),
            written.name.green().bold(),
            output
        );
        println!(
            "  {} {} bytes, blake3 {}",
            "PNG:".dimmed(),
            written.size,
            &written.hash[..16]
        );
        return Ok(ExitCode::SUCCESS);
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            let error = JsonError::new(error_codes::CONFIG, format!("{:#}", e));
            print_json(&failure(input, error))?;
            return Ok(ExitCode::from(1));
        }
    };

    match write(input, name, output, source, fast, config) {
        Ok(written) => {
            print_json(&DiagramOutput {
                success: true,
                input: input.clone(),
                name: Some(written.name),
                path: Some(output.to_string()),
                size_bytes: Some(written.size),
                blake3: Some(written.hash),
                errors: Vec::new(),
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let error = match e.downcast_ref::<fretchord_render::RenderError>() {
                Some(render) => JsonError::from(render),
                None => match e.downcast_ref::<fretchord_core::ValidationError>() {
                    Some(validation) => JsonError::from(validation),
                    None => JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)),
                },
            };
            print_json(&failure(input, error))?;
            Ok(ExitCode::from(1))
        }
    }
}

fn failure(input: &ChordInput, error: JsonError) -> DiagramOutput {
    DiagramOutput {
        success: false,
        input: input.clone(),
        name: None,
        path: None,
        size_bytes: None,
        blake3: None,
        errors: vec![error],
    }
}

fn write(
    input: &ChordInput,
    name: Option<&str>,
    output: &str,
    source: &AssetSource,
    fast: bool,
    config: AnalyzerConfig,
) -> Result<Written> {
    let name = super::resolve_name(&Analyzer::new(config.clone()), input, name)?;
    let store = source.open(&config)?;
    let encoding = if fast {
        PngConfig::fast()
    } else {
        PngConfig::default()
    };
    let png = DiagramRenderer::new(store.as_ref())
        .with_config(config)
        .with_png_config(encoding)
        .render(&input.pattern, input.fret, input.capo, &name)?;

    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(output, &png).with_context(|| format!("Failed to write diagram: {}", output))?;
    log::debug!("wrote {} ({} bytes)", output, png.len());

    Ok(Written {
        name,
        size: png.len(),
        hash: hash_png(&png),
    })
}
