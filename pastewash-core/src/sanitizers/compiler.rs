//! compiler.rs - Manages the compilation and caching of sanitization configs.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `SanitizeConfig` into a `CompiledConfig`, which is optimized for
//! efficient sanitization. It uses a global, shared cache to avoid
//! redundant compilation.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use scraper::Selector;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{SanitizeConfig, MAX_PATTERN_LENGTH};
use crate::errors::PastewashError;

/// A single compiled replacement rule.
///
/// Holds a compiled regular expression along with its replacement text,
/// ready for efficient application to raw markup.
#[derive(Debug)]
pub struct CompiledReplacement {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The string to replace matches of this rule's pattern with.
    pub replace_with: String,
    /// The unique name of the replacement rule.
    pub name: String,
}

/// The compiled form of a `SanitizeConfig`, ready for the pipeline.
///
/// Selectors are pre-parsed and the allowed-empty tag set is lowercased so
/// the per-call stages do no parsing of their own.
#[derive(Debug)]
pub struct CompiledConfig {
    /// Text replacements, in declared order.
    pub replacements: Vec<CompiledReplacement>,
    /// Selectors for elements removed entirely.
    pub clean_tags: Vec<Selector>,
    /// Selectors for the allowlist filter.
    pub allow_only: Vec<Selector>,
    /// Selectors for unconditional unwrapping.
    pub unwrap_tags: Vec<Selector>,
    /// Lowercased tag names exempt from empty-tag pruning.
    pub allowed_empty_tags: HashSet<String>,
    /// Attribute names stripped from every element.
    pub clean_attrs: Vec<String>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled configs.
    /// The key is a hash of the `SanitizeConfig`.
    static ref COMPILED_CONFIG_CACHE: RwLock<HashMap<u64, Arc<CompiledConfig>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `SanitizeConfig` to create a stable, unique key for the cache.
fn hash_config(config: &SanitizeConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

fn parse_selectors(field: &str, raw: &[String]) -> Result<Vec<Selector>, Vec<PastewashError>> {
    let mut selectors = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    for sel in raw {
        match Selector::parse(sel) {
            Ok(parsed) => selectors.push(parsed),
            Err(e) => errors.push(PastewashError::SelectorParseError(
                format!("{}: {}", field, sel),
                e.to_string(),
            )),
        }
    }
    if errors.is_empty() {
        Ok(selectors)
    } else {
        Err(errors)
    }
}

/// Compiles a `SanitizeConfig` into a `CompiledConfig` for efficient matching.
/// This is the low-level function that performs the actual compilation.
pub fn compile_config(config: &SanitizeConfig) -> Result<CompiledConfig, PastewashError> {
    debug!(
        "Starting compilation of {} replacement rules and {} selectors.",
        config.replacements.len(),
        config.clean_tags.len() + config.allow_only.len() + config.unwrap_tags.len()
    );

    let mut replacements = Vec::new();
    let mut compilation_errors: Vec<PastewashError> = Vec::new();

    for rule in &config.replacements {
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(PastewashError::PatternLengthExceeded(
                rule.name.clone(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .case_insensitive(rule.case_insensitive)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                debug!("Rule '{}' compiled successfully.", &rule.name);
                replacements.push(CompiledReplacement {
                    regex,
                    replace_with: rule.replace_with.clone(),
                    name: rule.name.clone(),
                });
            }
            Err(e) => {
                compilation_errors.push(PastewashError::ReplacementCompilationError(
                    rule.name.clone(),
                    e,
                ));
            }
        }
    }

    let mut selector_field = |field: &str, raw: &[String]| -> Vec<Selector> {
        match parse_selectors(field, raw) {
            Ok(selectors) => selectors,
            Err(errors) => {
                compilation_errors.extend(errors);
                Vec::new()
            }
        }
    };

    let clean_tags = selector_field("clean_tags", &config.clean_tags);
    let allow_only = selector_field("allow_only", &config.allow_only);
    let unwrap_tags = selector_field("unwrap_tags", &config.unwrap_tags);

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(PastewashError::Fatal(format!(
            "Failed to compile {} config entr(ies):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling config. Replacements: {}.", replacements.len());
    Ok(CompiledConfig {
        replacements,
        clean_tags,
        allow_only,
        unwrap_tags,
        allowed_empty_tags: config
            .allowed_empty_tags
            .iter()
            .map(|t| t.to_lowercase())
            .collect(),
        clean_attrs: config.clean_attrs.clone(),
    })
}

/// Gets a `CompiledConfig` instance from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving a compiled config. It returns
/// an `Arc` to a `CompiledConfig` instance, allowing for cheap sharing.
pub fn get_or_compile_config(config: &SanitizeConfig) -> Result<Arc<CompiledConfig>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_CONFIG_CACHE.read().unwrap();
        if let Some(compiled) = cache.get(&cache_key) {
            debug!("Serving compiled config from cache for key: {}", &cache_key);
            return Ok(Arc::clone(compiled));
        }
    } // Read lock is released here.

    // Not in cache, so we compile.
    debug!("Compiled config not found in cache. Compiling now.");
    let compiled = compile_config(config)?;
    let compiled_arc = Arc::new(compiled);

    // Acquire a write lock to insert the new config.
    COMPILED_CONFIG_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached config for key: {}", &cache_key);
    Ok(compiled_arc)
}
