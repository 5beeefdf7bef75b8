//! Analyze command implementation
//!
//! Names the chord sounded by a finger pattern, with its variations.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use fretchord_core::Analyzer;

use super::json_output::{error_codes, print_json, AnalyzeOutput, ChordInput, JsonError};
use crate::input::load_config;

/// Run the analyze command
///
/// # Returns
/// Exit code: 0 if the pattern was named, 1 if it was rejected
pub fn run(input: &ChordInput, config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input, config_path)
    } else {
        run_human(input, config_path)
    }
}

fn run_human(input: &ChordInput, config_path: Option<&str>) -> Result<ExitCode> {
    let analyzer = Analyzer::new(load_config(config_path)?);
    let names = analyzer.analyze(&input.pattern, input.fret, input.capo)?;

    println!(
        "{} {} (fret {}, {})",
        "Pattern:".cyan().bold(),
        input.pattern,
        input.fret,
        super::capo_label(input)
    );
    println!("  {}", names.base.render().green().bold());
    let variations = names.variation_names();
    if !variations.is_empty() {
        println!("  {} {}", "also:".dimmed(), variations.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &ChordInput, config_path: Option<&str>) -> Result<ExitCode> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            let error = JsonError::new(error_codes::CONFIG, format!("{:#}", e));
            print_json(&AnalyzeOutput::failure(input.clone(), vec![error]))?;
            return Ok(ExitCode::from(1));
        }
    };

    match Analyzer::new(config).analyze(&input.pattern, input.fret, input.capo) {
        Ok(names) => {
            print_json(&AnalyzeOutput::success(input.clone(), names))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_json(&AnalyzeOutput::failure(input.clone(), vec![JsonError::from(&e)]))?;
            Ok(ExitCode::from(1))
        }
    }
}
