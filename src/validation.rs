use anyhow::{anyhow, Result};
use std::path::Path;

/// Validation utilities for CLI input
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a country selection typed on the command line
    ///
    /// Unknown countries are fine (they give empty charts); only values that
    /// can never match a table cell are rejected.
    pub fn validate_country(country: &str) -> Result<()> {
        if country.trim().is_empty() {
            return Err(anyhow!("Country cannot be empty"));
        }

        if country.len() > 100 {
            return Err(anyhow!("Country too long (max 100 characters)"));
        }

        if country.chars().any(char::is_control) {
            return Err(anyhow!("Country contains invalid characters"));
        }

        Ok(())
    }

    /// Validate the review source path
    pub fn validate_source_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Source path cannot be empty"));
        }

        if path.is_dir() {
            return Err(anyhow!("Source path is a directory: {}", path.display()));
        }

        if path.to_string_lossy().len() > 4096 {
            return Err(anyhow!("Source path too long (max 4096 characters)"));
        }

        Ok(())
    }

    /// Validate an export directory
    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Output directory cannot be empty"));
        }

        if path.is_file() {
            return Err(anyhow!("Output path is a file: {}", path.display()));
        }

        Ok(())
    }

    /// Validate the length of the word-frequency lists
    pub fn validate_top_words(top_words: usize) -> Result<()> {
        if !(1..=100).contains(&top_words) {
            return Err(anyhow!("top_words must be between 1 and 100"));
        }
        Ok(())
    }

    /// Sanitize free text passed to `analyze`
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect()
    }
}
