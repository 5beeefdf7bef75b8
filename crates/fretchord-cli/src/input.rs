//! Loading analyzer configuration from JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fretchord_core::AnalyzerConfig;

/// Loads the config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let text = fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config = AnalyzerConfig::from_json(&text)
        .with_context(|| format!("Failed to load config file: {}", path))?;
    log::debug!(
        "loaded config from {}: max_fret {}, mute '{}'",
        path,
        config.max_fret,
        config.mute
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn test_loads_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_fret": 12}}"#).unwrap();
        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.max_fret, 12);
        assert_eq!(config.mute, 'X');
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let err = load_config(Some("/nonexistent/fretchord.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_fret": -1}}"#).unwrap();
        let err = load_config(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("Failed to load config file"));
        assert!(format!("{:#}", err).contains("max_fret"));
    }
}
