//! Configuration management for `PasteWash-core`.
//!
//! This module defines the core data structures for the sanitization
//! configuration and its text-replacement rules. It handles
//! serialization/deserialization of YAML configurations and provides
//! utilities for loading and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use regex::RegexBuilder;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a replacement pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single text-level replacement rule applied before the markup is parsed.
///
/// Replacements run in declared order; the stock rules normalize legacy
/// presentational tags (`<b>`, `<i>`) to their semantic equivalents and
/// `<div>` containers to paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplacementRule {
    /// Unique identifier for the rule (e.g., "bold_to_strong").
    pub name: String,
    /// The regex pattern string.
    pub pattern: String,
    /// The string to replace matches with.
    pub replace_with: String,
    /// If true, the pattern matches case-insensitively (the default for
    /// markup tag rewriting).
    pub case_insensitive: bool,
}

impl Default for ReplacementRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            pattern: String::new(),
            replace_with: String::new(),
            case_insensitive: true,
        }
    }
}

impl ReplacementRule {
    /// Shorthand constructor used for the built-in rule set.
    pub fn new(name: &str, pattern: &str, replace_with: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            replace_with: replace_with.to_string(),
            case_insensitive: true,
        }
    }
}

/// The top-level configuration record consumed by the sanitization pipeline.
///
/// The struct is an immutable value: construct it (or load it from YAML),
/// validate it once, then share it freely. Fields omitted from a YAML file
/// fall back to the stock defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Skip all structural cleaning; escape angle brackets instead.
    pub force_plain_text: bool,
    /// If non-empty, any element not matching this set is unwrapped
    /// (children promoted) or removed when its text content is blank.
    pub allow_only: Vec<String>,
    /// Master switch for the pattern-rewriting, denylist, attribute,
    /// unwrap, empty-tag, and edge-break stages.
    pub clean_pasted_html: bool,
    /// Enable removal of elements with blank text content.
    pub clean_empty_tags: bool,
    /// Tag names exempted from empty-tag removal even when empty.
    pub allowed_empty_tags: Vec<String>,
    /// Remove line-break elements at the edges of their parent.
    pub clean_edge_brs: bool,
    /// Ordered text substitutions applied before parsing.
    pub replacements: Vec<ReplacementRule>,
    /// Attribute names removed from every element bearing them.
    pub clean_attrs: Vec<String>,
    /// Elements removed entirely, descendants included.
    pub clean_tags: Vec<String>,
    /// Elements removed with their children promoted to the parent.
    pub unwrap_tags: Vec<String>,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            force_plain_text: false,
            allow_only: Vec::new(),
            clean_pasted_html: true,
            clean_empty_tags: false,
            allowed_empty_tags: vec!["br".to_string(), "hr".to_string()],
            clean_edge_brs: true,
            replacements: default_replacements(),
            clean_attrs: vec![
                "class".to_string(),
                "style".to_string(),
                "id".to_string(),
                "dir".to_string(),
                "draggable".to_string(),
            ],
            clean_tags: vec![
                "meta".to_string(),
                "script".to_string(),
                "style".to_string(),
                "iframe".to_string(),
            ],
            unwrap_tags: Vec::new(),
        }
    }
}

/// The stock replacement rules: word processors and older editors emit
/// `<b>`/`<i>` and generic `<div>` containers.
pub fn default_replacements() -> Vec<ReplacementRule> {
    vec![
        ReplacementRule::new("bold_open", r"<b>", "<strong>"),
        ReplacementRule::new("bold_open_attrs", r"<b\s[^>]*>", "<strong>"),
        ReplacementRule::new("bold_close", r"</b>", "</strong>"),
        ReplacementRule::new("italic_open", r"<i>", "<em>"),
        ReplacementRule::new("italic_open_attrs", r"<i\s[^>]*>", "<em>"),
        ReplacementRule::new("italic_close", r"</i>", "</em>"),
        ReplacementRule::new("div_open", r"<div", "<p"),
        ReplacementRule::new("div_close", r"</div>", "</p>"),
    ]
}

impl SanitizeConfig {
    /// Loads a configuration from a YAML file.
    ///
    /// Fields omitted from the file keep their stock default values, so a
    /// file can override just the options it cares about.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitize config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizeConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!(
            "Loaded config with {} replacement rules from {}.",
            config.replacements.len(),
            path.display()
        );

        Ok(config)
    }

    /// Validates rule integrity (regex compilation, selector syntax).
    ///
    /// All problems are collected before failing so a broken config file is
    /// reported in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut rule_names = HashSet::new();
        let mut errors = Vec::new();

        for rule in &self.replacements {
            if rule.name.is_empty() {
                errors.push("A replacement rule has an empty `name` field.".to_string());
            } else if !rule_names.insert(rule.name.clone()) {
                errors.push(format!("Duplicate replacement rule name found: '{}'.", rule.name));
            }

            if rule.pattern.is_empty() {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }

            if rule.pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                    rule.name,
                    rule.pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
                continue;
            }

            if let Err(e) = RegexBuilder::new(&rule.pattern)
                .case_insensitive(rule.case_insensitive)
                .build()
            {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
            }
        }

        for (field, selectors) in [
            ("clean_tags", &self.clean_tags),
            ("allow_only", &self.allow_only),
            ("unwrap_tags", &self.unwrap_tags),
        ] {
            for sel in selectors {
                if sel.trim().is_empty() {
                    errors.push(format!("`{}` contains an empty selector.", field));
                } else if let Err(e) = Selector::parse(sel) {
                    errors.push(format!("`{}` selector '{}' is invalid: {}", field, sel, e));
                }
            }
        }

        if !errors.is_empty() {
            let full_error_message = format!("Config validation failed:\n{}", errors.join("\n"));
            Err(anyhow!(full_error_message))
        } else {
            debug!(
                "Config validated: {} replacements, {} clean_tags, {} allow_only, {} unwrap_tags.",
                self.replacements.len(),
                self.clean_tags.len(),
                self.allow_only.len(),
                self.unwrap_tags.len()
            );
            Ok(())
        }
    }
}
