// pastewash-core/src/lib.rs
//! # PasteWash Core Library
//!
//! `pastewash-core` provides the fundamental, platform-independent logic for
//! cleaning untrusted, richly-formatted markup fragments (typically pasted
//! from word processors or web pages) into a normalized, safe,
//! editor-friendly subset. It defines the configuration record for the
//! pipeline, compiles that configuration into efficient matchers, and
//! implements a pluggable `SanitizeEngine` trait for applying the cleaning
//! logic.
//!
//! The library is designed to be pure and stateless, focusing solely on the
//! transformation of input markup based on the configured rules, without
//! concerns for I/O or host-document state management.
//!
//! ## Modules
//!
//! * `config`: Defines `ReplacementRule`s and `SanitizeConfig` for specifying the pipeline's options.
//! * `sanitizers`: Contains the logic for compiling configs into regexes and selectors.
//! * `dom`: The injected parse/serialize seam over the external HTML parser.
//! * `engine`: Defines the `SanitizeEngine` trait, enabling a modular design.
//! * `engines`: Contains concrete implementations of the `SanitizeEngine` trait.
//! * `paste`: Adapter traits and orchestration for host paste events.
//! * `headless`: Convenience wrapper for one-shot, non-interactive use.
//!
//! ## Usage Example
//!
//! ```rust
//! use pastewash_core::{headless_sanitize_string, SanitizeConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Start from the stock configuration.
//!     let config = SanitizeConfig::default();
//!
//!     // 2. Some markup as a word processor would paste it.
//!     let input = "<div><b>Hello</b><span>\u{a0}</span>world</div><!--junk-->";
//!
//!     // 3. Clean it in a single, headless function call.
//!     let cleaned = headless_sanitize_string(config, input)?;
//!     assert_eq!(cleaned, "<p><strong>Hello</strong> world</p>");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses `anyhow::Error` for fallible operations and defines the
//! structured `PastewashError` type for clearer error reporting. Errors can
//! only arise while loading or compiling a configuration; the pipeline
//! itself is total and produces some output for any input string.
//!
//! ## Design Principles
//!
//! * **Pluggable Architecture:** The `SanitizeEngine` trait allows different
//!   cleaning strategies to be swapped out seamlessly.
//! * **Stateless:** Each call builds and discards its own tree; the engine
//!   holds only its configuration and is safe to share across threads.
//! * **Total:** Malformed markup is recovered by the external parser, never
//!   rejected.
//! * **Isolated:** Host concerns (clipboard, cursor, staging surfaces) sit
//!   behind the narrow adapter traits in `paste`.

pub mod config;
pub mod dom;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod paste;
pub mod sanitizers;

/// Re-exports the public configuration types and helpers.
pub use config::{
    default_replacements, ReplacementRule, SanitizeConfig, MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::PastewashError;

/// Re-exports the core sanitization engine trait.
pub use engine::SanitizeEngine;

/// Re-exports the concrete `HtmlEngine` implementation.
pub use engines::html_engine::HtmlEngine;

/// Re-exports the paste-orchestration boundary types.
pub use paste::{ClipboardSource, EditorSurface, PasteHooks, Paster, QuirkClass, StagingSurface};

/// Re-exports the one-shot convenience entry point.
pub use headless::headless_sanitize_string;

/// Re-exports the compiled-config types for advanced usage.
pub use sanitizers::compiler::{
    compile_config, get_or_compile_config, CompiledConfig, CompiledReplacement,
};
