//! fretchord CLI - name and draw guitar chords from finger patterns

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use fretchord_cli::commands;
use fretchord_cli::commands::assets::AssetTarget;
use fretchord_cli::commands::diagram::AssetSource;
use fretchord_cli::commands::json_output::ChordInput;
use fretchord_cli::logging;

/// fretchord - Guitar chord analyzer
#[derive(Parser, Debug)]
#[command(name = "fretchord")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to an analyzer config file (JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// The chord to work on.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
struct ChordArgs {
    /// Finger pattern, highest string first (e.g. 01220X)
    #[arg(short, long)]
    pattern: String,

    /// Base fret offset of the diagram
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    fret: i32,

    /// A capo sits at the base fret
    #[arg(long)]
    capo: bool,
}

impl From<ChordArgs> for ChordInput {
    fn from(args: ChordArgs) -> Self {
        ChordInput {
            pattern: args.pattern,
            fret: args.fret,
            capo: args.capo,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Name the chord and its variations
    Analyze {
        #[command(flatten)]
        chord: ChordArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a text tab
    Tab {
        #[command(flatten)]
        chord: ChordArgs,

        /// Chord name for the header (default: the analyzed name)
        #[arg(short, long)]
        name: Option<String>,

        /// Pad the footer with plain spaces instead of non-breaking spaces
        #[arg(long)]
        plain: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a PNG chord diagram
    Diagram {
        #[command(flatten)]
        chord: ChordArgs,

        /// Chord name for the header (default: the analyzed name)
        #[arg(short, long)]
        name: Option<String>,

        /// Output PNG path
        #[arg(short, long)]
        output: String,

        /// Directory holding fretboard.png, symbols.png and font.png (default: built-in)
        #[arg(long)]
        assets: Option<String>,

        /// SQLite database holding the assets
        #[cfg(feature = "sqlite")]
        #[arg(long, conflicts_with = "assets")]
        db: Option<String>,

        /// Faster PNG encoding with larger files
        #[arg(long)]
        fast: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Export the built-in diagram assets
    Assets {
        /// Output directory
        #[arg(short, long, default_value = "assets")]
        out: String,

        /// Write into a SQLite database instead of a directory
        #[cfg(feature = "sqlite")]
        #[arg(long, conflicts_with = "out")]
        db: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Analyze { chord, json } => commands::analyze::run(&chord.into(), config, json),
        Commands::Tab {
            chord,
            name,
            plain,
            json,
        } => commands::tab::run(&chord.into(), name.as_deref(), plain, config, json),
        #[cfg(feature = "sqlite")]
        Commands::Diagram {
            chord,
            name,
            output,
            assets,
            db,
            fast,
            json,
        } => {
            let source = match (assets, db) {
                (_, Some(db)) => AssetSource::Sqlite(db),
                (Some(dir), None) => AssetSource::Dir(dir),
                (None, None) => AssetSource::Builtin,
            };
            commands::diagram::run(
                &chord.into(),
                name.as_deref(),
                &output,
                &source,
                fast,
                config,
                json,
            )
        }
        #[cfg(not(feature = "sqlite"))]
        Commands::Diagram {
            chord,
            name,
            output,
            assets,
            fast,
            json,
        } => {
            let source = assets.map_or(AssetSource::Builtin, AssetSource::Dir);
            commands::diagram::run(
                &chord.into(),
                name.as_deref(),
                &output,
                &source,
                fast,
                config,
                json,
            )
        }
        #[cfg(feature = "sqlite")]
        Commands::Assets { out, db, json } => {
            let target = db.map_or(AssetTarget::Dir(out), AssetTarget::Sqlite);
            commands::assets::run(&target, config, json)
        }
        #[cfg(not(feature = "sqlite"))]
        Commands::Assets { out, json } => {
            commands::assets::run(&AssetTarget::Dir(out), config, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "fretchord",
            "analyze",
            "--pattern",
            "01220X",
            "--fret",
            "2",
            "--capo",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { chord, json } => {
                assert_eq!(chord.pattern, "01220X");
                assert_eq!(chord.fret, 2);
                assert!(chord.capo);
                assert!(!json);
            }
            _ => panic!("expected analyze command"),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_fret_defaults_to_zero() {
        let cli = Cli::try_parse_from(["fretchord", "tab", "-p", "XXXXX0", "--plain"]).unwrap();
        match cli.command {
            Commands::Tab {
                chord, name, plain, ..
            } => {
                assert_eq!(chord.fret, 0);
                assert!(!chord.capo);
                assert!(name.is_none());
                assert!(plain);
            }
            _ => panic!("expected tab command"),
        }
    }

    #[test]
    fn test_cli_accepts_negative_fret() {
        // Rejected later by validation, not by the parser.
        let cli =
            Cli::try_parse_from(["fretchord", "analyze", "-p", "01220X", "--fret", "-1"]).unwrap();
        match cli.command {
            Commands::Analyze { chord, .. } => assert_eq!(chord.fret, -1),
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "fretchord",
            "diagram",
            "-p",
            "01220X",
            "-o",
            "am.png",
            "-vv",
            "--config",
            "fretchord.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("fretchord.json"));
        match cli.command {
            Commands::Diagram {
                output,
                assets,
                fast,
                ..
            } => {
                assert_eq!(output, "am.png");
                assert!(assets.is_none());
                assert!(!fast);
            }
            _ => panic!("expected diagram command"),
        }
    }

    #[test]
    fn test_cli_diagram_fast_flag() {
        let cli = Cli::try_parse_from([
            "fretchord", "diagram", "-p", "01220X", "-o", "am.png", "--fast",
        ])
        .unwrap();
        match cli.command {
            Commands::Diagram { fast, .. } => assert!(fast),
            _ => panic!("expected diagram command"),
        }
    }

    #[test]
    fn test_cli_requires_pattern() {
        assert!(Cli::try_parse_from(["fretchord", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["fretchord", "diagram", "-p", "01220X"]).is_err());
    }

    #[test]
    fn test_cli_assets_default_dir() {
        let cli = Cli::try_parse_from(["fretchord", "assets"]).unwrap();
        match cli.command {
            Commands::Assets { out, json, .. } => {
                assert_eq!(out, "assets");
                assert!(!json);
            }
            _ => panic!("expected assets command"),
        }
    }
}
