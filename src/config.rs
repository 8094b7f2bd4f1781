use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infrastructure::codec::{
    DecodeLimits, DEFAULT_MAX_CONTAINER_ITEMS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_BYTES,
};

/// Largest meta blob accepted before decoding is attempted
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_document_bytes: usize,
    pub decode_limits: DecodeLimits,
    /// `EnvFilter` directive, e.g. `info` or `flow_meta_index=debug`
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            decode_limits: DecodeLimits::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            max_document_bytes: std::env::var("META_MAX_DOCUMENT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_DOCUMENT_BYTES),
            decode_limits: DecodeLimits {
                max_depth: std::env::var("META_MAX_DEPTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_DEPTH),
                max_container_items: std::env::var("META_MAX_CONTAINER_ITEMS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_CONTAINER_ITEMS),
                max_string_bytes: std::env::var("META_MAX_STRING_BYTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_STRING_BYTES),
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("LOG_FORMAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Load from a TOML file; missing keys take their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("invalid config {}: {}", path.display(), e))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_bytes == 0 {
            return Err("META_MAX_DOCUMENT_BYTES must be greater than 0".to_string());
        }

        let limits = &self.decode_limits;
        if limits.max_depth < 2 || limits.max_depth > 256 {
            return Err("META_MAX_DEPTH must be between 2 and 256".to_string());
        }

        if limits.max_container_items == 0 {
            return Err("META_MAX_CONTAINER_ITEMS must be greater than 0".to_string());
        }

        if limits.max_string_bytes == 0 || limits.max_string_bytes > self.max_document_bytes {
            return Err(
                "META_MAX_STRING_BYTES must be between 1 and META_MAX_DOCUMENT_BYTES".to_string(),
            );
        }

        if self.log_level.trim().is_empty() {
            return Err("LOG_LEVEL cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut config = Config::default();
        config.decode_limits.max_depth = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.decode_limits.max_string_bytes = config.max_document_bytes + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_from_toml_file_with_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
max_document_bytes = 65536
log_format = "json"

[decode_limits]
max_depth = 8
"#
        )
        .unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.max_document_bytes, 65536);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.decode_limits.max_depth, 8);
        assert_eq!(
            config.decode_limits.max_container_items,
            DEFAULT_MAX_CONTAINER_ITEMS
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_toml_file_errors() {
        assert!(Config::from_toml_file("/nonexistent/meta.toml").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_document_bytes = \"lots\"").unwrap();
        assert!(Config::from_toml_file(file.path()).is_err());
    }
}
