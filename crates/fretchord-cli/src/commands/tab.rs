//! Tab command implementation

use std::process::ExitCode;

use anyhow::Result;
use fretchord_core::{Analyzer, AnalyzerConfig};
use fretchord_render::{RenderError, TabRenderer};

use super::json_output::{error_codes, print_json, ChordInput, JsonError, TabOutput};
use crate::input::load_config;

/// Run the tab command
///
/// # Arguments
/// * `name` - Chord name for the header; the analyzed base name when `None`
/// * `plain` - Pad the footer with ASCII spaces instead of non-breaking spaces
pub fn run(
    input: &ChordInput,
    name: Option<&str>,
    plain: bool,
    config_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if !json_output {
        let config = load_config(config_path)?;
        let (_, tab) = render(input, name, plain, config)?;
        println!("{}", tab);
        return Ok(ExitCode::SUCCESS);
    }

    let result = load_config(config_path)
        .map_err(|e| JsonError::new(error_codes::CONFIG, format!("{:#}", e)))
        .and_then(|config| {
            render(input, name, plain, config).map_err(|e| JsonError::from(&e))
        });
    let (output, code) = match result {
        Ok((name, tab)) => (
            TabOutput {
                success: true,
                input: input.clone(),
                name: Some(name),
                tab: Some(tab),
                errors: Vec::new(),
            },
            ExitCode::SUCCESS,
        ),
        Err(error) => (
            TabOutput {
                success: false,
                input: input.clone(),
                name: None,
                tab: None,
                errors: vec![error],
            },
            ExitCode::from(1),
        ),
    };
    print_json(&output)?;
    Ok(code)
}

fn render(
    input: &ChordInput,
    name: Option<&str>,
    plain: bool,
    config: AnalyzerConfig,
) -> Result<(String, String), RenderError> {
    let analyzer = Analyzer::new(config.clone());
    let name = super::resolve_name(&analyzer, input, name)?;
    let mut renderer = TabRenderer::new().with_config(config);
    if plain {
        renderer = renderer.with_pad(' ');
    }
    let tab = renderer.render(&input.pattern, input.fret, input.capo, &name)?;
    Ok((name, tab))
}
