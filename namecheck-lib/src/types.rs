//! Core data types for username and domain lookups.
//!
//! This module defines the wire payloads exchanged with the backend, the tab
//! identifiers used by the session, and the client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Quiet period before a debounced input is considered settled.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(600);

/// Body of `POST /check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsernameRequest {
    pub username: String,
}

/// Availability of a username on one platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformStatus {
    /// Platform key (e.g. "github")
    pub platform: String,

    /// Whether the handle appears to be free
    pub available: bool,

    /// Profile URL that was probed
    pub url: String,

    /// Set when the backend could not determine availability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `POST /check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsernameResponse {
    pub username: String,
    pub all_available: bool,
    #[serde(default)]
    pub results: Vec<PlatformStatus>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Body of `POST /check-domain`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainRequest {
    pub domain_name: String,
}

/// Response of `POST /check-domain`.
///
/// The backend may also send a `raw_data` object with the untouched WHOIS
/// record; it is not part of what the client renders and is dropped here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DomainResponse {
    pub domain_name: String,

    pub domain_exists: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    #[serde(default)]
    pub name_servers: Vec<String>,

    /// Backend-side lookup failure, scoped to the result panel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `GET /platforms`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformList {
    pub platforms: Vec<String>,
}

/// The two mutually exclusive view modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Username,
    Domain,
}

impl Tab {
    /// The other tab.
    pub fn other(self) -> Self {
        match self {
            Tab::Username => Tab::Domain,
            Tab::Domain => Tab::Username,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Username => write!(f, "username"),
            Tab::Domain => write!(f, "domain"),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "username" | "user" | "u" => Ok(Tab::Username),
            "domain" | "d" => Ok(Tab::Domain),
            other => Err(format!(
                "Unknown mode '{}'. Use 'username' or 'domain'",
                other
            )),
        }
    }
}

/// Client-side configuration.
///
/// The backend address is process-wide configuration resolved once at
/// startup and handed to the client; nothing reads it from a global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base address of the backend, without trailing slash
    pub base_url: String,

    /// Optional per-request timeout. `None` leaves failure detection to
    /// the transport.
    #[serde(skip)]
    pub timeout: Option<Duration>,

    /// Search automatically once input settles (interactive session)
    pub auto_search: bool,

    /// Quiet period for auto-search
    #[serde(skip)]
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            auto_search: false,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl ClientConfig {
    /// Set the backend base address. A trailing slash is dropped.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable auto-search.
    pub fn with_auto_search(mut self, enabled: bool) -> Self {
        self.auto_search = enabled;
        self
    }

    /// Set the debounce quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Full URL for an endpoint path such as `/check`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
