//! HTTP client for the lookup backend.
//!
//! The backend is an opaque collaborator exposing `POST /check`,
//! `POST /check-domain` and `GET /platforms`. `LookupBackend` is the seam
//! the forms and the CLI talk to; `ApiClient` is the reqwest implementation.

use crate::error::NameCheckError;
use crate::types::{
    ClientConfig, DomainRequest, DomainResponse, PlatformList, UsernameRequest, UsernameResponse,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

const CHECK_PATH: &str = "/check";
const CHECK_DOMAIN_PATH: &str = "/check-domain";
const PLATFORMS_PATH: &str = "/platforms";

/// Operations offered by the lookup backend.
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// by the tasks the interactive session spawns.
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Check a username across all platforms the backend knows.
    async fn check_username(&self, username: &str) -> Result<UsernameResponse, NameCheckError>;

    /// Look up WHOIS registration data for a domain.
    async fn check_domain(&self, domain_name: &str) -> Result<DomainResponse, NameCheckError>;

    /// List the platform keys the backend probes.
    async fn list_platforms(&self) -> Result<Vec<String>, NameCheckError>;
}

/// reqwest-backed client for the lookup backend.
///
/// # Example
///
/// ```rust,no_run
/// use namecheck_lib::{ApiClient, ClientConfig, LookupBackend};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ApiClient::with_config(ClientConfig::default())?;
///     let response = client.check_username("testuser123").await?;
///     println!("all available: {}", response.all_available);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, NameCheckError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| {
            NameCheckError::network_with_source("Failed to create HTTP client", e.to_string())
        })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Get the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, NameCheckError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let started = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error("POST", path, e))?;

        self.decode(path, response, started).await
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, NameCheckError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");
        let started = Instant::now();

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error("GET", path, e))?;

        self.decode(path, response, started).await
    }

    async fn decode<R: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
        started: Instant,
    ) -> Result<R, NameCheckError> {
        let status = response.status();
        debug!(
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend responded"
        );

        if !status.is_success() {
            return Err(NameCheckError::http_status(status.as_u16(), path));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error("READ", path, e))?;

        serde_json::from_slice(&body).map_err(|e| NameCheckError::ParseError {
            message: format!("Invalid JSON from {}: {}", path, e),
            content: Some(String::from_utf8_lossy(&body).into_owned()),
        })
    }

    fn transport_error(&self, method: &str, path: &str, err: reqwest::Error) -> NameCheckError {
        warn!(method, path, error = %err, "backend request failed");
        match (err.is_timeout(), self.config.timeout) {
            (true, Some(timeout)) => NameCheckError::timeout(format!("{} {}", method, path), timeout),
            _ => NameCheckError::from(err),
        }
    }
}

#[async_trait]
impl LookupBackend for ApiClient {
    async fn check_username(&self, username: &str) -> Result<UsernameResponse, NameCheckError> {
        let body = UsernameRequest {
            username: username.to_string(),
        };
        self.post_json(CHECK_PATH, &body).await
    }

    async fn check_domain(&self, domain_name: &str) -> Result<DomainResponse, NameCheckError> {
        let body = DomainRequest {
            domain_name: domain_name.to_string(),
        };
        self.post_json(CHECK_DOMAIN_PATH, &body).await
    }

    async fn list_platforms(&self) -> Result<Vec<String>, NameCheckError> {
        let list: PlatformList = self.get_json(PLATFORMS_PATH).await?;
        Ok(list.platforms)
    }
}
