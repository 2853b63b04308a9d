// pastewash-core/src/engines/html_engine.rs
//! A `SanitizeEngine` implementation that cleans pasted HTML fragments
//! through a fixed-order pipeline of text- and tree-level stages.
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use scraper::{Html, Node};
use std::sync::Arc;

use crate::config::SanitizeConfig;
use crate::dom;
use crate::engine::SanitizeEngine;
use crate::sanitizers::compiler::{get_or_compile_config, CompiledConfig};

const NBSP: char = '\u{a0}';

lazy_static! {
    // Copies from word processors routinely carry conditional comments.
    static ref COMMENT_RE: Regex = Regex::new(r"(?is)<!--.*?-->").unwrap();
}

/// The standard paste-cleaning engine.
///
/// Holds a configuration and its compiled form; `sanitize` builds a fresh
/// tree per call and discards it, so an instance is safe to share across
/// threads.
#[derive(Debug)]
pub struct HtmlEngine {
    compiled: Arc<CompiledConfig>,
    config: SanitizeConfig,
}

impl HtmlEngine {
    /// Builds an engine from a configuration, compiling (and thereby
    /// validating) its rules and selectors.
    pub fn new(config: SanitizeConfig) -> Result<Self> {
        let compiled = get_or_compile_config(&config)
            .context("Failed to compile sanitize config for HtmlEngine")?;

        Ok(Self { compiled, config })
    }

    /// Pasting can produce `<span>&nbsp;</span>` wrappers. A span holding
    /// exactly one non-breaking space becomes a single ordinary space text
    /// node; a span whose content trims to nothing is removed entirely.
    /// Runs regardless of `clean_pasted_html`.
    fn collapse_whitespace_spans(&self, doc: &mut Html) {
        for id in dom::elements_named(doc, "span") {
            let Some(node) = doc.tree.get(id) else { continue };
            if node.parent().is_none() {
                continue;
            }
            let text = dom::text_content(doc, id);
            if text.len() == NBSP.len_utf8() && text.starts_with(NBSP) {
                dom::replace_with_space(&mut doc.tree, id);
            } else if text.trim().is_empty() {
                dom::detach(&mut doc.tree, id);
            }
        }
    }

    /// Removes every element matching a denylist selector, subtree included.
    fn remove_denied(&self, doc: &mut Html) {
        for id in dom::element_ids(doc) {
            if dom::matches_any(doc, id, &self.compiled.clean_tags) {
                dom::detach(&mut doc.tree, id);
            }
        }
    }

    /// Unwraps (or removes, when blank) every element outside the allowlist.
    /// The snapshot guarantees each element is visited exactly once even as
    /// ancestors are unwrapped out from under it.
    fn filter_allowed(&self, doc: &mut Html) {
        for id in dom::element_ids(doc) {
            let Some(node) = doc.tree.get(id) else { continue };
            if node.parent().is_none() {
                continue;
            }
            if dom::matches_any(doc, id, &self.compiled.allow_only) {
                continue;
            }
            // NBSP is Unicode whitespace, so the trim covers the
            // nbsp-only case as well.
            if dom::text_content(doc, id).trim().is_empty() {
                dom::detach(&mut doc.tree, id);
            } else {
                dom::unwrap_element(&mut doc.tree, id);
            }
        }
    }

    /// Strips every configured attribute name from every element.
    fn strip_attributes(&self, doc: &mut Html) {
        let clean_attrs = &self.compiled.clean_attrs;
        for id in dom::element_ids(doc) {
            let Some(mut node) = doc.tree.get_mut(id) else { continue };
            if let Node::Element(element) = node.value() {
                element
                    .attrs
                    .retain(|name, _| !clean_attrs.iter().any(|a| a.as_str() == &*name.local));
            }
        }
    }

    /// Unconditionally unwraps every element matching each unwrap selector.
    fn unwrap_configured(&self, doc: &mut Html) {
        for selector in &self.compiled.unwrap_tags {
            for id in dom::element_ids(doc) {
                if dom::matches_any(doc, id, std::slice::from_ref(selector)) {
                    dom::unwrap_element(&mut doc.tree, id);
                }
            }
        }
    }

    /// Removes every element whose text content trims to nothing, unless
    /// its tag name is explicitly allowed to be empty.
    fn prune_empty(&self, doc: &mut Html) {
        for id in dom::element_ids(doc) {
            let allowed = doc
                .tree
                .get(id)
                .and_then(|node| node.value().as_element())
                .map_or(true, |el| {
                    self.compiled
                        .allowed_empty_tags
                        .contains(&el.name().to_lowercase())
                });
            if allowed {
                continue;
            }
            if dom::text_content(doc, id).trim().is_empty() {
                dom::detach(&mut doc.tree, id);
            }
        }
    }

    /// Removes edge line breaks: a `<br>` with no preceding sibling, and
    /// every `<br>` in a trailing run that ends its sibling list. Checks
    /// run against the live tree while iterating a document-order
    /// snapshot, so removing the first break of a leading run exposes the
    /// next one.
    fn prune_edge_brs(&self, doc: &mut Html) {
        for id in dom::elements_named(doc, "br") {
            let Some(node) = doc.tree.get(id) else { continue };
            if node.parent().is_none() {
                continue;
            }

            // Leading break.
            if node.prev_sibling().is_none() {
                dom::detach(&mut doc.tree, id);
                continue;
            }

            // Trailing run: walk forward through consecutive breaks; any
            // other node kind ends the walk and keeps this break.
            let mut current = node;
            let trailing = loop {
                match current.next_sibling() {
                    None => break true,
                    Some(sibling) => {
                        let is_br = sibling
                            .value()
                            .as_element()
                            .map_or(false, |el| el.name() == "br");
                        if is_br {
                            current = sibling;
                        } else {
                            break false;
                        }
                    }
                }
            };
            if trailing {
                dom::detach(&mut doc.tree, id);
            }
        }
    }
}

fn escape_angle_brackets(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&#60;"),
            '>' => escaped.push_str("&#62;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl SanitizeEngine for HtmlEngine {
    fn sanitize(&self, html: &str) -> Result<String> {
        // Stage 1: comments go first, unconditionally.
        let mut text = COMMENT_RE.replace_all(html, "").into_owned();

        // Stage 2: plain-text mode escapes and returns; no tree is built.
        if self.config.force_plain_text {
            return Ok(escape_angle_brackets(&text));
        }

        // Stage 3: ordered text replacements. The is_match pre-check is an
        // optimization only; applying unconditionally yields the same text.
        if self.config.clean_pasted_html {
            for rule in &self.compiled.replacements {
                if rule.regex.is_match(&text) {
                    text = rule
                        .regex
                        .replace_all(&text, rule.replace_with.as_str())
                        .into_owned();
                }
            }
        }

        // Stage 4: hand off to the external parser.
        let mut doc = dom::parse_fragment(&text);

        // Stage 5.
        self.collapse_whitespace_spans(&mut doc);

        // Stage 6.
        if self.config.clean_pasted_html && !self.compiled.clean_tags.is_empty() {
            self.remove_denied(&mut doc);
        }

        // Stage 7: independent of clean_pasted_html.
        if !self.compiled.allow_only.is_empty() {
            self.filter_allowed(&mut doc);
        }

        if self.config.clean_pasted_html {
            // Stage 8.
            self.strip_attributes(&mut doc);

            // Stage 9.
            self.unwrap_configured(&mut doc);

            // Stage 10.
            if self.config.clean_empty_tags {
                self.prune_empty(&mut doc);
            }

            // Stage 11.
            if self.config.clean_edge_brs {
                self.prune_edge_brs(&mut doc);
            }
        }

        // Stage 12.
        let cleaned = dom::serialize_fragment(&doc);
        debug!(
            "Sanitized markup. Original length: {}, cleaned length: {}",
            html.len(),
            cleaned.len()
        );
        Ok(cleaned)
    }

    fn compiled(&self) -> &CompiledConfig {
        &self.compiled
    }

    fn config(&self) -> &SanitizeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: SanitizeConfig) -> HtmlEngine {
        HtmlEngine::new(config).unwrap()
    }

    fn default_engine() -> HtmlEngine {
        engine(SanitizeConfig::default())
    }

    #[test]
    fn strips_comments_including_multiline() {
        let out = default_engine()
            .sanitize("<p>a</p><!-- from\nword -->b<!--x-->")
            .unwrap();
        assert!(!out.contains("<!--"));
        assert_eq!(out, "<p>a</p>b");
    }

    #[test]
    fn plain_text_mode_escapes_and_skips_everything_else() {
        let mut config = SanitizeConfig::default();
        config.force_plain_text = true;
        let out = engine(config).sanitize("<div><b>x</b></div>").unwrap();
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert_eq!(out, "&#60;div&#62;&#60;b&#62;x&#60;/b&#62;&#60;/div&#62;");
    }

    #[test]
    fn default_replacements_normalize_bold_and_div() {
        let out = default_engine().sanitize("<div><b>x</b></div>").unwrap();
        assert_eq!(out, "<p><strong>x</strong></p>");
    }

    #[test]
    fn replacements_handle_attributed_and_uppercase_tags() {
        let out = default_engine()
            .sanitize("<B>x</B><i style=\"mso-bidi\">y</i>")
            .unwrap();
        assert_eq!(out, "<strong>x</strong><em>y</em>");
    }

    #[test]
    fn allowlist_unwraps_nonempty_elements() {
        let mut config = SanitizeConfig::default();
        config.allow_only = vec!["b".to_string()];
        let out = engine(config)
            .sanitize("<div>hello <span>world</span></div>")
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn allowlist_removes_blank_elements_outright() {
        let mut config = SanitizeConfig::default();
        config.allow_only = vec!["strong".to_string()];
        let out = engine(config)
            .sanitize("<strong>x</strong><p>\u{a0}</p>")
            .unwrap();
        assert_eq!(out, "<strong>x</strong>");
    }

    #[test]
    fn denylist_removes_element_and_content() {
        let out = default_engine()
            .sanitize("<p>a</p><script>evil()</script>")
            .unwrap();
        assert_eq!(out, "<p>a</p>");
        assert!(!out.contains("evil"));
    }

    #[test]
    fn edge_brs_are_pruned() {
        let out = default_engine()
            .sanitize("<p><br>text<br><br></p>")
            .unwrap();
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn leading_br_run_cascades_away() {
        let out = default_engine()
            .sanitize("<p><br><br>text</p>")
            .unwrap();
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn interior_brs_survive() {
        let out = default_engine().sanitize("<p>a<br>b</p>").unwrap();
        assert_eq!(out, "<p>a<br>b</p>");
    }

    #[test]
    fn nbsp_only_span_becomes_a_space() {
        let out = default_engine().sanitize("a<span>\u{a0}</span>b").unwrap();
        assert_eq!(out, "a b");
    }

    #[test]
    fn whitespace_only_span_is_removed() {
        let out = default_engine().sanitize("a<span>   </span>b").unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn disabling_clean_pasted_html_passes_markup_through() {
        let mut config = SanitizeConfig::default();
        config.clean_pasted_html = false;
        let input = r#"<div class="x"><b>a</b><script>s()</script></div>"#;
        let out = engine(config).sanitize(input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn span_collapsing_runs_even_without_clean_pasted_html() {
        let mut config = SanitizeConfig::default();
        config.clean_pasted_html = false;
        let out = engine(config).sanitize("a<span> </span>b").unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn attributes_are_stripped_selectively() {
        let out = default_engine()
            .sanitize("<span class=\"x\" style=\"y\" data-keep=\"z\">a</span>")
            .unwrap();
        assert_eq!(out, "<span data-keep=\"z\">a</span>");
    }

    #[test]
    fn configured_tags_are_unwrapped_unconditionally() {
        let mut config = SanitizeConfig::default();
        config.unwrap_tags = vec!["span".to_string()];
        let out = engine(config).sanitize("<p>a<span>b</span></p>").unwrap();
        assert_eq!(out, "<p>ab</p>");
    }

    #[test]
    fn empty_tags_are_pruned_with_exemptions() {
        let mut config = SanitizeConfig::default();
        config.clean_empty_tags = true;
        config.clean_edge_brs = false;
        let out = engine(config)
            .sanitize("<p></p><div>x</div><hr>")
            .unwrap();
        assert_eq!(out, "<p>x</p><hr>");
    }

    #[test]
    fn malformed_input_is_recovered_not_rejected() {
        let out = default_engine().sanitize("<div><b>unclosed").unwrap();
        assert_eq!(out, "<p><strong>unclosed</strong></p>");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(default_engine().sanitize("").unwrap(), "");
    }

    #[test]
    fn sanitize_is_idempotent_on_its_own_output() {
        let engine = default_engine();
        let once = engine
            .sanitize("<div class=\"x\"><b>a</b><!--c--><br></div>")
            .unwrap();
        let twice = engine.sanitize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn invalid_selector_fails_at_construction() {
        let mut config = SanitizeConfig::default();
        config.clean_tags.push(":::".to_string());
        assert!(HtmlEngine::new(config).is_err());
    }
}
