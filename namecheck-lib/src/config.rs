//! Configuration file parsing and management.
//!
//! This module loads configuration from TOML files and `NC_*` environment
//! variables and merges configuration layers with proper precedence rules.

use crate::error::NameCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Backend location and transport settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,

    /// Search behaviour of the interactive session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// `[backend]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackendConfig {
    /// Base address, e.g. "http://localhost:8000"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout (as string, e.g., "10s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// `[search]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_search: Option<bool>,

    /// Debounce quiet period in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

/// `[output]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to report which files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, NameCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(NameCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            NameCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            NameCheckError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is the lowest layer, then the home directory file, then a
    /// file in the current directory.
    pub fn discover_and_load(&self) -> Result<FileConfig, NameCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring config file"),
            }
        }

        if self.verbose {
            for path in &loaded_files {
                info!(path = %path.display(), "loaded config file");
            }
        }

        Ok(merged_config)
    }

    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./namecheck.toml", "./.namecheck.toml"]
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .map(Path::to_path_buf)
    }

    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let path = Path::new(&home).join(".namecheck.toml");
        path.exists().then_some(path)
    }

    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("namecheck").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            backend: match (lower.backend, higher.backend) {
                (Some(lower), Some(higher)) => Some(BackendConfig {
                    base_url: higher.base_url.or(lower.base_url),
                    timeout: higher.timeout.or(lower.timeout),
                }),
                (lower, higher) => higher.or(lower),
            },
            search: match (lower.search, higher.search) {
                (Some(lower), Some(higher)) => Some(SearchConfig {
                    auto_search: higher.auto_search.or(lower.auto_search),
                    debounce_ms: higher.debounce_ms.or(lower.debounce_ms),
                }),
                (lower, higher) => higher.or(lower),
            },
            output: match (lower.output, higher.output) {
                (Some(lower), Some(higher)) => Some(OutputConfig {
                    pretty: higher.pretty.or(lower.pretty),
                    json: higher.json.or(lower.json),
                }),
                (lower, higher) => higher.or(lower),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), NameCheckError> {
        if let Some(backend) = &config.backend {
            if let Some(base_url) = &backend.base_url {
                validate_base_url(base_url)?;
            }

            if let Some(timeout_str) = &backend.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(NameCheckError::config(format!(
                        "Invalid timeout format '{}'. Use a positive duration like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }
        }

        if let Some(debounce_ms) = config.search.as_ref().and_then(|s| s.debounce_ms) {
            validate_debounce_ms(debounce_ms)?;
        }

        Ok(())
    }
}

/// Check that a base address is an absolute http(s) URL.
pub fn validate_base_url(base_url: &str) -> Result<(), NameCheckError> {
    let trimmed = base_url.trim();
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));

    match host {
        Some(rest) if !rest.trim_matches('/').is_empty() => Ok(()),
        _ => Err(NameCheckError::config(format!(
            "Invalid backend URL '{}'. Use an http:// or https:// address",
            base_url
        ))),
    }
}

fn validate_debounce_ms(debounce_ms: u64) -> Result<(), NameCheckError> {
    if debounce_ms == 0 || debounce_ms > 10_000 {
        return Err(NameCheckError::config(
            "debounce_ms must be between 1 and 10000",
        ));
    }
    Ok(())
}

/// Settings read from `NC_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub api_url: Option<String>,
    pub timeout: Option<String>,
    pub auto_search: Option<bool>,
    pub debounce_ms: Option<u64>,
    pub pretty: Option<bool>,
    pub json: Option<bool>,
    pub config: Option<String>,
}

/// Load configuration from environment variables.
///
/// Invalid values are reported with a warning and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

/// Same as [`load_env_config`] with an injectable lookup.
pub fn load_env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    if let Some(url) = lookup("NC_API_URL") {
        match validate_base_url(&url) {
            Ok(()) => {
                info!(value = %url, "using NC_API_URL");
                env_config.api_url = Some(url);
            }
            Err(e) => warn!("ignoring NC_API_URL: {}", e),
        }
    }

    if let Some(timeout) = lookup("NC_TIMEOUT") {
        if parse_timeout_string(&timeout).is_some() {
            info!(value = %timeout, "using NC_TIMEOUT");
            env_config.timeout = Some(timeout);
        } else {
            warn!(
                "ignoring NC_TIMEOUT='{}', use format like '5s', '30s', '2m'",
                timeout
            );
        }
    }

    env_config.auto_search = lookup_bool(&lookup, "NC_AUTO_SEARCH");
    env_config.pretty = lookup_bool(&lookup, "NC_PRETTY");
    env_config.json = lookup_bool(&lookup, "NC_JSON");

    if let Some(raw) = lookup("NC_DEBOUNCE_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) if validate_debounce_ms(ms).is_ok() => {
                info!(value = ms, "using NC_DEBOUNCE_MS");
                env_config.debounce_ms = Some(ms);
            }
            _ => warn!("ignoring NC_DEBOUNCE_MS='{}', must be 1-10000", raw),
        }
    }

    if let Some(path) = lookup("NC_CONFIG") {
        if !path.trim().is_empty() {
            env_config.config = Some(path);
        }
    }

    env_config
}

fn lookup_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            warn!("ignoring {}='{}', use true/false", key, raw);
            None
        }
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// Zero and values that overflow when converted to seconds yield `None`.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    };

    secs.filter(|&s| s > 0)
}
