//! Logger setup for the binary.

use log::LevelFilter;

/// Maps the `-v` count to a level filter.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialises `env_logger` on stderr. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbose))
        .format_timestamp(None)
        .parse_env("RUST_LOG");
    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
}
