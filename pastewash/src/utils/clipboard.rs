//! System clipboard access behind the `clipboard` feature.
//!
//! arboard exposes writing both markup and text representations, but only
//! reading the text one; the `ClipboardSource` impl reports no markup
//! representation and hands callers the plain-text fallback.

#[cfg(feature = "clipboard")]
mod imp {
    use anyhow::{Context, Result};
    use log::debug;
    use pastewash_core::ClipboardSource;

    /// Writes cleaned content to the system clipboard. Markup output is
    /// stored with a plain-text alternate so non-rich consumers still get
    /// something readable.
    pub fn copy_to_clipboard(content: &str, as_markup: bool) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().context("Failed to access system clipboard")?;
        if as_markup {
            clipboard
                .set_html(content.to_string(), Some(content.to_string()))
                .context("Failed to write markup to clipboard")?;
        } else {
            clipboard
                .set_text(content.to_string())
                .context("Failed to write text to clipboard")?;
        }
        debug!("Copied {} bytes to the system clipboard.", content.len());
        Ok(())
    }

    /// An adapter from the system clipboard to the core's paste boundary.
    pub struct ArboardClipboard {
        inner: arboard::Clipboard,
    }

    impl ArboardClipboard {
        pub fn new() -> Result<Self> {
            Ok(Self {
                inner: arboard::Clipboard::new()
                    .context("Failed to access system clipboard")?,
            })
        }
    }

    impl ClipboardSource for ArboardClipboard {
        fn html(&mut self) -> Result<Option<String>> {
            // No markup read access on this platform layer.
            Ok(None)
        }

        fn text(&mut self) -> Result<Option<String>> {
            match self.inner.get_text() {
                Ok(text) => Ok(Some(text)),
                Err(arboard::Error::ContentNotAvailable) => Ok(None),
                Err(e) => Err(anyhow::anyhow!("Failed to read clipboard text: {}", e)),
            }
        }
    }
}

#[cfg(feature = "clipboard")]
pub use imp::{copy_to_clipboard, ArboardClipboard};

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_content: &str, _as_markup: bool) -> anyhow::Result<()> {
    anyhow::bail!("pastewash was built without clipboard support")
}
