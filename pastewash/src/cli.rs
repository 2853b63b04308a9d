// pastewash/src/cli.rs
//! This file defines the command-line interface (CLI) for the pastewash
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "pastewash",
    author = "PasteWash Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clean pasted HTML into an editor-friendly subset",
    long_about = "Pastewash is a command-line utility for cleaning untrusted, richly-formatted HTML fragments, typically produced by pasting from word processors or web pages, into a normalized, safe, editor-friendly markup subset. It strips comments, rewrites legacy presentational tags, removes unwanted elements and attributes, and prunes empty wrappers and edge line breaks according to a configurable rule set.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for 'pastewash' crate to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `pastewash` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cleans an input file or stdin, normalizing pasted HTML.
    #[command(about = "Cleans an input file or stdin, normalizing pasted HTML.")]
    Sanitize(SanitizeCommand),

    /// Reads the system clipboard, cleans it, and prints the result.
    #[command(about = "Reads the system clipboard, cleans it, and prints the result.")]
    Paste(PasteCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write cleaned output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Copy cleaned output to the system clipboard.
    #[arg(long, short = 'c', help = "Copy cleaned output to the system clipboard.")]
    pub clipboard: bool,

    /// Path to a custom sanitize configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom sanitize configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Escape angle brackets instead of structural cleaning.
    #[arg(long = "plain-text", help = "Escape angle brackets instead of structural cleaning.")]
    pub plain_text: bool,

    /// Unwrap or remove every element not in this tag list (comma-separated).
    #[arg(long = "allow-only", value_delimiter = ',', value_name = "TAGS", help = "Unwrap or remove every element not in this comma-separated tag list.")]
    pub allow_only: Vec<String>,

    /// Remove elements whose text content is empty.
    #[arg(long = "clean-empty-tags", help = "Remove elements whose text content is empty.")]
    pub clean_empty_tags: bool,

    /// Keep leading and trailing line-break elements.
    #[arg(long = "keep-edge-brs", help = "Keep leading and trailing line-break elements.")]
    pub keep_edge_brs: bool,

    /// Keep element attributes instead of stripping the configured set.
    #[arg(long = "allow-all-attrs", help = "Keep element attributes instead of stripping the configured set.")]
    pub allow_all_attrs: bool,

    /// Keep elements on the configured removal list instead of deleting them.
    #[arg(long = "allow-all-tags", help = "Keep elements on the configured removal list instead of deleting them.")]
    pub allow_all_tags: bool,
}

/// Arguments for the `paste` command.
#[derive(Parser, Debug)]
pub struct PasteCommand {
    /// Write cleaned output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to a custom sanitize configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom sanitize configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Escape angle brackets instead of structural cleaning.
    #[arg(long = "plain-text", help = "Escape angle brackets instead of structural cleaning.")]
    pub plain_text: bool,
}
