//! paste.rs - The paste-orchestration boundary.
//!
//! The pipeline itself never touches clipboard or document state; hosts
//! implement these narrow adapter traits and the `Paster` wires them
//! together: capture, sanitize, notify, insert. Legacy hosts without
//! direct clipboard markup access go through a hidden staging surface
//! instead (`QuirkClass::Staging`).

use anyhow::Result;

use crate::engine::SanitizeEngine;

/// Read access to the platform clipboard.
///
/// `html` returns the markup representation when the platform exposes one;
/// `text` is the plain-text fallback representation.
pub trait ClipboardSource {
    fn html(&mut self) -> Result<Option<String>>;
    fn text(&mut self) -> Result<Option<String>>;
}

/// Insertion point into the host document.
pub trait EditorSurface {
    fn insert_at_cursor(&mut self, markup: &str) -> Result<()>;
}

/// A hidden scratch editable region used by legacy hosts: the native paste
/// populates it, and `capture` reads the markup back out (tearing the
/// region down is the host's business).
pub trait StagingSurface {
    fn capture(&mut self) -> Result<String>;
}

/// How the host platform gets at pasted markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuirkClass {
    /// The clipboard exposes markup directly; use [`Paster::paste`].
    Direct,
    /// Markup is only reachable through a staging surface; use
    /// [`Paster::paste_staged`].
    Staging,
}

/// Lifecycle notifications around a paste attempt. Each hook fires exactly
/// once per attempt; `post_paste` carries the cleaned markup.
#[derive(Default)]
pub struct PasteHooks {
    pub pre_paste: Option<Box<dyn Fn() + Send + Sync>>,
    pub post_paste: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

/// Wires a sanitization engine to host adapters.
pub struct Paster<E: SanitizeEngine> {
    engine: E,
    hooks: PasteHooks,
}

impl<E: SanitizeEngine> Paster<E> {
    pub fn new(engine: E) -> Self {
        Self::with_hooks(engine, PasteHooks::default())
    }

    pub fn with_hooks(engine: E, hooks: PasteHooks) -> Self {
        Self { engine, hooks }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The direct flow: prefer the clipboard's markup representation, fall
    /// back to plain text. Plain-text mode always takes the text
    /// representation, since the structural stages never run on it anyway.
    pub fn paste(
        &self,
        clipboard: &mut dyn ClipboardSource,
        editor: &mut dyn EditorSurface,
    ) -> Result<String> {
        let raw = if self.engine.config().force_plain_text {
            clipboard.text()?
        } else {
            match clipboard.html()? {
                Some(html) => Some(html),
                None => clipboard.text()?,
            }
        };
        self.finish(raw.unwrap_or_default(), editor)
    }

    /// Dispatches on the host's quirk class: `Direct` reads the clipboard,
    /// `Staging` reads the staging surface the native paste populated.
    pub fn paste_for(
        &self,
        quirk: QuirkClass,
        clipboard: &mut dyn ClipboardSource,
        staging: &mut dyn StagingSurface,
        editor: &mut dyn EditorSurface,
    ) -> Result<String> {
        match quirk {
            QuirkClass::Direct => self.paste(clipboard, editor),
            QuirkClass::Staging => self.paste_staged(staging, editor),
        }
    }

    /// The staging flow for legacy hosts: the native paste has already
    /// populated the staging surface; read it back and clean it.
    pub fn paste_staged(
        &self,
        staging: &mut dyn StagingSurface,
        editor: &mut dyn EditorSurface,
    ) -> Result<String> {
        let raw = staging.capture()?;
        self.finish(raw, editor)
    }

    fn finish(&self, raw: String, editor: &mut dyn EditorSurface) -> Result<String> {
        if let Some(pre) = &self.hooks.pre_paste {
            pre();
        }
        let cleaned = self.engine.sanitize(&raw)?;
        if let Some(post) = &self.hooks.post_paste {
            post(&cleaned);
        }
        editor.insert_at_cursor(&cleaned)?;
        Ok(cleaned)
    }
}
