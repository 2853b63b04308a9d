// pastewash-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for using the pipeline in headless mode (non-UI).
//! Provides a helper for a full, one-shot sanitization of a markup string.

use anyhow::Result;

use crate::config::SanitizeConfig;
use crate::engine::SanitizeEngine;
use crate::engines::html_engine::HtmlEngine;

/// Fully sanitizes a raw markup string in a single call.
/// This function is the primary entry point for non-interactive use.
///
/// # Arguments
///
/// * `config` - The sanitization configuration (defaults + overrides).
/// * `html` - The raw markup to clean.
pub fn headless_sanitize_string(config: SanitizeConfig, html: &str) -> Result<String> {
    let engine: Box<dyn SanitizeEngine> = Box::new(HtmlEngine::new(config)?);
    engine.sanitize(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_headless_sanitize_string_defaults() -> Result<()> {
        let cleaned = headless_sanitize_string(
            SanitizeConfig::default(),
            "<div><b>bold</b> and <i>italic</i></div><!-- paste junk -->",
        )?;
        assert_eq!(cleaned, "<p><strong>bold</strong> and <em>italic</em></p>");
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_string_plain_text() -> Result<()> {
        let mut config = SanitizeConfig::default();
        config.force_plain_text = true;
        let cleaned = headless_sanitize_string(config, "a < b > c")?;
        assert_eq!(cleaned, "a &#60; b &#62; c");
        Ok(())
    }
}
