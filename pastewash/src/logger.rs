// pastewash/src/logger.rs
//! Logger initialization for the CLI.
//!
//! Respects `RUST_LOG` unless an explicit level is supplied by the
//! `--quiet` / `--debug` flags.

use log::LevelFilter;

/// Initializes the global logger. Safe to call more than once; later calls
/// are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
