//! Comprehensive unit tests for config.rs module

use review_dashboard::config::AppConfig;
use std::path::{Path, PathBuf};

#[test]
fn test_default_data_config() {
    let config = AppConfig::default();

    assert_eq!(config.data.source_path, "assets/Amazon_Reviews.csv");
    assert_eq!(config.data.delimiter, ",");
    assert_eq!(config.delimiter_byte().expect("delimiter"), b',');
}

#[test]
fn test_default_logging_config() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_path, None);
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_default_nlp_and_dashboard_config() {
    let config = AppConfig::default();

    assert!(config.nlp.enable_sentiment);
    assert_eq!(config.nlp.processing_timeout_secs, 300);
    assert_eq!(config.dashboard.top_words, 10);
    assert_eq!(config.dashboard.default_theme, "light");
    assert_eq!(config.dashboard.country_order, "first_seen");
}

#[test]
fn test_config_validation_success() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_config_validation_invalid_log_level() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_invalid_log_format() {
    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_timeout() {
    let mut config = AppConfig::default();
    config.nlp.processing_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_top_words() {
    let mut config = AppConfig::default();
    config.dashboard.top_words = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_unknown_theme() {
    let mut config = AppConfig::default();
    config.dashboard.default_theme = "sepia".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_unknown_country_order() {
    let mut config = AppConfig::default();
    config.dashboard.country_order = "random".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_multi_char_delimiter() {
    let mut config = AppConfig::default();
    config.data.delimiter = ";;".to_string();
    assert!(config.validate().is_err());

    config.data.delimiter = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_tab_delimiter() {
    let mut config = AppConfig::default();
    config.data.delimiter = "\t".to_string();
    assert_eq!(config.delimiter_byte().expect("delimiter"), b'\t');
}

#[test]
fn test_config_validation_empty_source() {
    let mut config = AppConfig::default();
    config.data.source_path = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_without_files_uses_defaults() {
    let config = AppConfig::load().expect("load");
    assert_eq!(config.dashboard.top_words, 10);
    assert_eq!(config.nlp.processing_timeout_secs, 300);
}

#[test]
fn test_source_path_prefers_cli_override() {
    let mut config = AppConfig::default();
    config.data.source_path = "data/configured.csv".to_string();

    assert_eq!(config.source_path(None), PathBuf::from("data/configured.csv"));
    assert_eq!(
        config.source_path(Some(Path::new("/tmp/flag.csv"))),
        PathBuf::from("/tmp/flag.csv")
    );
}
