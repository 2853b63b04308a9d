//! Sanitize command implementation for cleaning pasted HTML.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use pastewash_core::SanitizeEngine;

/// Options for the sanitize command runner.
pub struct SanitizeOptions {
    pub input: String,
    pub output_path: Option<PathBuf>,
    pub clipboard: bool,
}

/// The main operation runner for the `sanitize` command.
pub fn run_sanitize(engine: &dyn SanitizeEngine, opts: SanitizeOptions) -> Result<()> {
    info!("Starting sanitize operation.");

    let cleaned = engine.sanitize(&opts.input).context("Sanitization failed")?;

    debug!(
        "Markup cleaned. Original length: {}, cleaned length: {}",
        opts.input.len(),
        cleaned.len()
    );

    handle_primary_output(&opts, &cleaned)?;

    if opts.clipboard {
        let as_markup = !engine.config().force_plain_text;
        crate::utils::clipboard::copy_to_clipboard(&cleaned, as_markup)
            .context("Failed to copy output to clipboard")?;
        info!("Cleaned output copied to the system clipboard.");
    }

    info!("Sanitize operation completed.");
    Ok(())
}

fn handle_primary_output(opts: &SanitizeOptions, cleaned: &str) -> Result<()> {
    if let Some(path) = &opts.output_path {
        info!("Writing cleaned markup to file: {}", path.display());
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{}", cleaned)?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        if stdout.is_terminal() {
            writeln!(writer, "{}", cleaned)?;
        } else {
            // Piped consumers get the markup byte-exact.
            write!(writer, "{}", cleaned)?;
        }
    }
    Ok(())
}
