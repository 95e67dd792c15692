//! Error handling for lookup operations.
//!
//! This module defines the error type shared by the backend client, the
//! configuration layer and the search forms. Backend-reported domain errors
//! are not errors here: they travel inside the response payload.

use std::fmt;

/// Main error type for NameCheck operations.
#[derive(Debug, Clone, PartialEq)]
pub enum NameCheckError {
    /// Input rejected before any request was made
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Network-related errors (connection refused, DNS, reset)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// The backend answered with a non-2xx status
    HttpStatus {
        status: u16,
        endpoint: String,
    },

    /// Response body could not be decoded
    ParseError {
        message: String,
        content: Option<String>,
    },

    /// Configuration errors (invalid settings, etc.)
    ConfigError {
        message: String,
    },

    /// File I/O errors when reading configuration
    FileError {
        path: String,
        message: String,
    },

    /// The configured request timeout elapsed
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl NameCheckError {
    /// Create a new invalid input error.
    pub fn invalid_input<F: Into<String>, V: Into<String>, R: Into<String>>(
        field: F,
        value: V,
        reason: R,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new HTTP status error.
    pub fn http_status<E: Into<String>>(status: u16, endpoint: E) -> Self {
        Self::HttpStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error carries no descriptive text of its own.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::NetworkError { message, source } => {
                message.trim().is_empty() && source.as_deref().map_or(true, |s| s.trim().is_empty())
            }
            Self::ParseError { message, .. }
            | Self::ConfigError { message }
            | Self::Internal { message } => message.trim().is_empty(),
            _ => false,
        }
    }

    /// Whether the failure happened before reaching the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl fmt::Display for NameCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid {} '{}': {}", field, value, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            // The status-coded wording is what users see in the form.
            Self::HttpStatus { status, .. } => {
                write!(f, "HTTP error! status: {}", status)
            }
            Self::ParseError { message, content: _ } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for NameCheckError {}

impl From<reqwest::Error> for NameCheckError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            let endpoint = err.url().map(|u| u.path().to_string()).unwrap_or_default();
            Self::http_status(status.as_u16(), endpoint)
        } else if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::ZERO)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else if err.is_decode() {
            Self::ParseError {
                message: format!("Failed to decode response body: {}", err),
                content: None,
            }
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for NameCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
            content: None,
        }
    }
}

impl From<std::io::Error> for NameCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
