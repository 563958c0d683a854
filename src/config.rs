use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub nlp: NlpConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub source_path: String,
    pub delimiter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    pub enable_sentiment: bool,
    pub processing_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub top_words: usize,
    pub default_theme: String,  // "light" or "dark"
    pub country_order: String,  // "first_seen" or "sorted"
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                source_path: "assets/Amazon_Reviews.csv".to_string(),
                delimiter: ",".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            nlp: NlpConfig {
                enable_sentiment: true,
                processing_timeout_secs: 300,
            },
            dashboard: DashboardConfig {
                top_words: 10,
                default_theme: "light".to_string(),
                country_order: "first_seen".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        // Start with default values
        for (key, value) in Self::default() {
            builder = builder
                .set_default(key.as_str(), value)
                .with_context(|| format!("Failed to set default for {key}"))?;
        }

        let config = builder
            // Add config files if they exist
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("review-dashboard").required(false))
            // Add environment variables, e.g. REVIEW_DASHBOARD__DATA__SOURCE_PATH
            .add_source(
                Environment::with_prefix("REVIEW_DASHBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to load configuration")?;

        let app_config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate data config
        if self.data.source_path.trim().is_empty() {
            return Err(anyhow::anyhow!("data.source_path must not be empty"));
        }
        self.delimiter_byte()?;

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        // Validate NLP config
        if self.nlp.processing_timeout_secs == 0 {
            return Err(anyhow::anyhow!("processing_timeout_secs must be greater than 0"));
        }

        // Validate dashboard config
        if self.dashboard.top_words == 0 {
            return Err(anyhow::anyhow!("top_words must be greater than 0"));
        }

        let valid_themes = ["light", "dark"];
        if !valid_themes.contains(&self.dashboard.default_theme.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid theme: {}. Must be one of: {:?}",
                self.dashboard.default_theme,
                valid_themes
            ));
        }

        let valid_orders = ["first_seen", "sorted"];
        if !valid_orders.contains(&self.dashboard.country_order.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid country order: {}. Must be one of: {:?}",
                self.dashboard.country_order,
                valid_orders
            ));
        }

        Ok(())
    }

    /// The CSV delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.data.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(anyhow::anyhow!(
                "delimiter must be a single ASCII character, got {:?}",
                self.data.delimiter
            )),
        }
    }

    /// The review file to load: the `--source` flag if given, else `data.source_path`
    #[must_use]
    pub fn source_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override.map_or_else(|| PathBuf::from(&self.data.source_path), Path::to_path_buf)
    }
}

impl IntoIterator for AppConfig {
    type Item = (String, config::Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, config::Value>;

    fn into_iter(self) -> Self::IntoIter {
        let mut map = std::collections::HashMap::new();

        // Flatten the configuration into key-value pairs
        map.insert("data.source_path".to_string(), config::Value::from(self.data.source_path));
        map.insert("data.delimiter".to_string(), config::Value::from(self.data.delimiter));

        map.insert("logging.level".to_string(), config::Value::from(self.logging.level));
        if let Some(file_path) = self.logging.file_path {
            map.insert("logging.file_path".to_string(), config::Value::from(file_path));
        }
        map.insert("logging.format".to_string(), config::Value::from(self.logging.format));

        map.insert("nlp.enable_sentiment".to_string(), config::Value::from(self.nlp.enable_sentiment));
        map.insert(
            "nlp.processing_timeout_secs".to_string(),
            config::Value::from(self.nlp.processing_timeout_secs),
        );

        map.insert(
            "dashboard.top_words".to_string(),
            config::Value::from(self.dashboard.top_words as u64),
        );
        map.insert("dashboard.default_theme".to_string(), config::Value::from(self.dashboard.default_theme));
        map.insert("dashboard.country_order".to_string(), config::Value::from(self.dashboard.country_order));

        map.into_iter()
    }
}
