// pastewash/src/main.rs
//! PasteWash entry point.
//!
//! Parses the CLI, builds the cleaning engine from defaults plus any config
//! file and flag overrides, and dispatches to the selected command.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use pastewash::cli::{Cli, Commands};
use pastewash::commands::{paste, sanitize};
use pastewash::logger;
use pastewash_core::{HtmlEngine, SanitizeConfig};

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match args.command {
        Commands::Sanitize(cmd) => {
            let mut config = load_config(&cmd.config)?;
            if cmd.plain_text {
                config.force_plain_text = true;
            }
            if !cmd.allow_only.is_empty() {
                config.allow_only = cmd.allow_only.clone();
            }
            if cmd.clean_empty_tags {
                config.clean_empty_tags = true;
            }
            if cmd.keep_edge_brs {
                config.clean_edge_brs = false;
            }
            if cmd.allow_all_attrs {
                config.clean_attrs.clear();
            }
            if cmd.allow_all_tags {
                config.clean_tags.clear();
            }

            let engine = HtmlEngine::new(config)?;
            let input = read_input(&cmd.input_file)?;
            sanitize::run_sanitize(
                &engine,
                sanitize::SanitizeOptions {
                    input,
                    output_path: cmd.output,
                    clipboard: cmd.clipboard,
                },
            )
        }
        Commands::Paste(cmd) => {
            let mut config = load_config(&cmd.config)?;
            if cmd.plain_text {
                config.force_plain_text = true;
            }

            let engine = HtmlEngine::new(config)?;
            paste::run_paste(
                engine,
                paste::PasteOptions {
                    output_path: cmd.output,
                },
            )
        }
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<SanitizeConfig> {
    match path {
        Some(path) => SanitizeConfig::load_from_file(path),
        None => Ok(SanitizeConfig::default()),
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
