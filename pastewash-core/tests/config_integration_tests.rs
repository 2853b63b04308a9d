// pastewash-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use pastewash_core::config::SanitizeConfig;

#[test]
fn test_default_config_matches_stock_cleaning_rules() {
    let config = SanitizeConfig::default();
    assert!(!config.force_plain_text);
    assert!(config.clean_pasted_html);
    assert!(config.clean_edge_brs);
    assert!(!config.clean_empty_tags);
    assert!(config.allow_only.is_empty());
    assert!(config.unwrap_tags.is_empty());
    assert_eq!(config.clean_tags, vec!["meta", "script", "style", "iframe"]);
    assert_eq!(
        config.clean_attrs,
        vec!["class", "style", "id", "dir", "draggable"]
    );
    assert!(config.replacements.iter().any(|r| r.name == "div_open"));
}

#[test]
fn test_load_from_file_overlays_defaults() -> Result<()> {
    let yaml_content = r#"
clean_empty_tags: true
allow_only:
  - p
  - strong
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = SanitizeConfig::load_from_file(file.path())?;

    // Overridden fields.
    assert!(config.clean_empty_tags);
    assert_eq!(config.allow_only, vec!["p", "strong"]);

    // Omitted fields keep the stock defaults.
    assert!(config.clean_edge_brs);
    assert_eq!(config.replacements.len(), 8);
    assert_eq!(config.allowed_empty_tags, vec!["br", "hr"]);
    Ok(())
}

#[test]
fn test_load_from_file_with_custom_replacements() -> Result<()> {
    let yaml_content = r#"
replacements:
  - name: mark_to_strong
    pattern: "<mark>"
    replace_with: "<strong>"
  - name: mark_close
    pattern: "</mark>"
    replace_with: "</strong>"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = SanitizeConfig::load_from_file(file.path())?;
    assert_eq!(config.replacements.len(), 2);
    assert_eq!(config.replacements[0].name, "mark_to_strong");
    // case_insensitive is omitted, so it should default to true.
    assert!(config.replacements[0].case_insensitive);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_rules() -> Result<()> {
    let yaml_content = r#"
replacements:
  - name: broken
    pattern: "<b["
    replace_with: "<strong>"
clean_tags:
  - ":::"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = SanitizeConfig::load_from_file(file.path())
        .unwrap_err()
        .to_string();
    assert!(err.contains("Config validation failed"));
    Ok(())
}

#[test]
fn test_load_from_file_missing_file_errors() {
    let err = SanitizeConfig::load_from_file("/definitely/not/a/real/path.yaml")
        .unwrap_err()
        .to_string();
    assert!(err.contains("Failed to read config file"));
}
