// pastewash-core/src/engine.rs
//! Defines the core SanitizeEngine trait.
//!
//! The `SanitizeEngine` trait provides a pluggable interface for markup
//! sanitization so the host application (editor glue, CLI) never depends on
//! a concrete pipeline implementation.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;

use crate::config::SanitizeConfig;
use crate::sanitizers::compiler::CompiledConfig;

/// A trait that defines the core functionality of a sanitization engine.
///
/// This trait decouples the high-level application logic from the specific
/// implementation of the cleaning pipeline, allowing different engines to
/// be used interchangeably.
pub trait SanitizeEngine: Send + Sync {
    /// Cleans a raw markup string into the normalized, editor-friendly
    /// subset described by the engine's configuration.
    ///
    /// The operation is total: any input string, including malformed or
    /// empty markup, produces some output string. It is a pure function of
    /// (input, configuration) and holds no state across calls.
    fn sanitize(&self, html: &str) -> Result<String>;

    /// Returns a reference to the `CompiledConfig` used by the engine.
    ///
    /// This is used by external components to inspect the active rules
    /// without needing to recompile them.
    fn compiled(&self) -> &CompiledConfig;

    /// Returns a reference to the engine's configuration.
    fn config(&self) -> &SanitizeConfig;
}
