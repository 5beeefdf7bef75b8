//! CLI command implementations

pub mod analyze;
pub mod assets;
pub mod diagram;
pub mod json_output;
pub mod tab;

use fretchord_core::{Analyzer, ValidationError};

use json_output::ChordInput;

/// Uses `name` when given, otherwise the analyzed base name.
fn resolve_name(
    analyzer: &Analyzer,
    input: &ChordInput,
    name: Option<&str>,
) -> Result<String, ValidationError> {
    match name {
        Some(name) => Ok(name.to_string()),
        None => {
            let names = analyzer.analyze(&input.pattern, input.fret, input.capo)?;
            Ok(names.base.render())
        }
    }
}

fn capo_label(input: &ChordInput) -> &'static str {
    if input.capo {
        "capo on"
    } else {
        "capo off"
    }
}
