//! # NameCheck Library
//!
//! Client-side core of NameCheck: username availability across platforms
//! and domain registration (WHOIS) lookups against a NameCheck backend.
//!
//! The library holds everything that is not terminal I/O: the HTTP client,
//! per-form search state with stale-response protection, the two-tab session,
//! a debouncer for search-as-you-type, and view models for rendering results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use namecheck_lib::{ApiClient, ClientConfig, Session, Tab};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::with_config(ClientConfig::default())?;
//!     let mut session = Session::new(Tab::Username);
//!
//!     session.set_input("testuser123");
//!     session.search(&client).await;
//!
//!     if let Some(result) = session.username_form().result() {
//!         println!("{}: all available = {}", result.username, result.all_available);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Username lookups**: `POST /check`, one status per platform plus suggestions
//! - **Domain lookups**: `POST /check-domain`, registrar, dates and name servers
//! - **Latest request wins**: responses for superseded requests are dropped
//! - **Configurable**: TOML files, `NC_*` environment variables, builder options

// Re-export main public API types and functions
pub use client::{ApiClient, LookupBackend};
pub use config::{
    load_env_config, load_env_config_from, parse_timeout_string, validate_base_url,
    BackendConfig, ConfigManager, EnvConfig, FileConfig, OutputConfig, SearchConfig,
};
pub use debounce::{DebouncedReceiver, Debouncer};
pub use error::NameCheckError;
pub use form::{fallback_error, DomainForm, FormPhase, SearchForm, Ticket, UsernameForm};
pub use present::{
    format_long_date, platform_icon, DomainView, PlatformCard, PlatformStatusLabel,
    RegisteredDomain, SuggestionChip, Tone, UsernameView, DOMAIN_AVAILABLE_HINT,
    DOMAIN_AVAILABLE_MESSAGE, NOT_AVAILABLE,
};
pub use session::{run_lookup, Completion, Session};
pub use types::{
    ClientConfig, DomainRequest, DomainResponse, PlatformList, PlatformStatus, Tab,
    UsernameRequest, UsernameResponse, DEFAULT_BASE_URL, DEFAULT_DEBOUNCE,
};
pub use utils::{
    min_query_len, submittable_query, validate_query, MIN_DOMAIN_LEN, MIN_USERNAME_LEN,
};

// Internal modules - their public items are re-exported above
mod client;
mod config;
mod debounce;
mod error;
mod form;
mod present;
mod session;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, NameCheckError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Get library information for debugging or display purposes.
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        author: AUTHOR,
        endpoints: vec!["/check", "/check-domain", "/platforms"],
    }
}

/// Information about the library build
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub version: &'static str,
    pub author: &'static str,
    /// Backend paths this build talks to
    pub endpoints: Vec<&'static str>,
}
