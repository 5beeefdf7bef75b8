//! Assets command implementation
//!
//! Writes the built-in diagram assets to a directory (or, with the `sqlite`
//! feature, a database) so they can be inspected or replaced.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use fretchord_render::png::hash_png;
use fretchord_render::{builtin_assets_for, AssetStore, DirAssetStore, ASSET_NAMES};

use super::json_output::{error_codes, print_json, AssetEntry, AssetsOutput, JsonError};
use crate::input::load_config;

/// Destination for exported assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetTarget {
    Dir(String),
    #[cfg(feature = "sqlite")]
    Sqlite(String),
}

impl AssetTarget {
    fn describe(&self) -> &str {
        match self {
            AssetTarget::Dir(dir) => dir.as_str(),
            #[cfg(feature = "sqlite")]
            AssetTarget::Sqlite(path) => path.as_str(),
        }
    }
}

/// Run the assets command
///
/// The fretboard is generated long enough for the configured `max_fret`.
pub fn run(target: &AssetTarget, config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    match export(target, config_path) {
        Ok(assets) => {
            if json_output {
                print_json(&AssetsOutput {
                    success: true,
                    destination: target.describe().to_string(),
                    assets,
                    errors: Vec::new(),
                })?;
            } else {
                println!("{} {}", "Exported to:".cyan().bold(), target.describe());
                for asset in &assets {
                    println!(
                        "  {} {} ({} bytes, {})",
                        "+".green(),
                        asset.name,
                        asset.size_bytes,
                        &asset.blake3[..16]
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if json_output => {
            print_json(&AssetsOutput {
                success: false,
                destination: target.describe().to_string(),
                assets: Vec::new(),
                errors: vec![JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e))],
            })?;
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e),
    }
}

fn export(target: &AssetTarget, config_path: Option<&str>) -> Result<Vec<AssetEntry>> {
    let config = load_config(config_path)?;
    let max_fret = u32::try_from(config.max_fret).unwrap_or(0);
    let store = builtin_assets_for(max_fret).context("Failed to generate built-in assets")?;

    let mut entries = Vec::with_capacity(ASSET_NAMES.len());
    for name in ASSET_NAMES {
        let bytes = store.get(name)?;
        save(target, name, &bytes)
            .with_context(|| format!("Failed to save {} to {}", name, target.describe()))?;
        entries.push(AssetEntry {
            name: name.to_string(),
            size_bytes: bytes.len(),
            blake3: hash_png(&bytes),
        });
    }
    Ok(entries)
}

fn save(target: &AssetTarget, name: &str, bytes: &[u8]) -> Result<()> {
    match target {
        AssetTarget::Dir(dir) => DirAssetStore::new(dir).save(name, bytes)?,
        #[cfg(feature = "sqlite")]
        AssetTarget::Sqlite(path) => {
            fretchord_render::SqliteAssetStore::open(path)?.save(name, bytes)?
        }
    }
    Ok(())
}
