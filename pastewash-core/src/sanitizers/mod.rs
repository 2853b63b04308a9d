//! Compilation logic for sanitization configurations.
//!
//! The `compiler` module turns a `SanitizeConfig` into its compiled form
//! (regexes and selectors) and caches the result.

pub mod compiler;
