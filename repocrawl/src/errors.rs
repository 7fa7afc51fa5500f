//! Error types for the crawler.
//!
//! Every failure the pipeline can surface is a variant of [`CrawlerError`].
//! Nothing in this crate retries or masks an error: validation failures are
//! raised before any request is made, and transport or parse failures
//! propagate to the caller unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for crawler operations.
#[derive(Debug, Error)]
pub enum CrawlerError {
    /// An argument or configuration value was rejected.
    #[error("{0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The transport failed to deliver a page.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A page fragment did not have the expected shape.
    #[error("{0}")]
    ParseAnomaly(#[from] ParseAnomalyError),

    /// A result URL does not carry an owner component.
    #[error("Malformed result URL '{url}': {reason}")]
    MalformedResultUrl {
        /// The offending URL.
        url: String,
        /// Why the owner could not be derived.
        reason: String,
    },

    /// A process-interface request could not be read.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlerError {
    /// Creates a malformed result URL error.
    #[must_use]
    pub fn malformed_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResultUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Stable name of the error category.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::Transport(_) => "TransportFailure",
            Self::ParseAnomaly(_) => "ParseAnomaly",
            Self::MalformedResultUrl { .. } => "MalformedResultUrl",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::Serialization(_) => "Serialization",
            Self::Io(_) => "Io",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));

        match self {
            Self::InvalidArgument(err) => {
                map.insert("argument".to_string(), serde_json::json!(err.argument));
                map.insert("value".to_string(), serde_json::json!(err.value));
            }
            Self::Transport(err) => {
                map.insert("url".to_string(), serde_json::json!(err.url));
                if let Some(status) = err.status {
                    map.insert("status".to_string(), serde_json::json!(status));
                }
            }
            Self::ParseAnomaly(err) => {
                map.insert("fragment".to_string(), serde_json::json!(err.fragment));
            }
            Self::MalformedResultUrl { url, .. } => {
                map.insert("url".to_string(), serde_json::json!(url));
            }
            Self::InvalidRequest(_) | Self::Serialization(_) | Self::Io(_) => {}
        }

        map
    }
}

impl From<serde_json::Error> for CrawlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when an argument is outside its accepted values.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("Invalid {argument} '{value}': {message}")]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub argument: String,
    /// The rejected value.
    pub value: String,
    /// What was expected instead.
    pub message: String,
}

impl InvalidArgumentError {
    /// Creates a new invalid argument error.
    #[must_use]
    pub fn new(
        argument: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            argument: argument.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Error raised when a page could not be fetched.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("Transport failure for {url}: {message}")]
pub struct TransportError {
    /// The requested URL.
    pub url: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Description of the failure.
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Sets the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Error raised when a language fragment cannot be interpreted.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("Unparseable language fragment '{fragment}': {message}")]
pub struct ParseAnomalyError {
    /// The raw captured fragment.
    pub fragment: String,
    /// What went wrong.
    pub message: String,
}

impl ParseAnomalyError {
    /// Creates a new parse anomaly error.
    #[must_use]
    pub fn new(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type CrawlerResult<T> = Result<T, CrawlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err: CrawlerError =
            InvalidArgumentError::new("result_type", "Users", "unrecognized search type").into();

        assert_eq!(err.kind(), "InvalidArgument");
        assert_eq!(
            err.to_string(),
            "Invalid result_type 'Users': unrecognized search type"
        );
    }

    #[test]
    fn test_transport_error_to_dict() {
        let err: CrawlerError = TransportError::new("https://github.com/a/b", "HTTP 503")
            .with_status(503)
            .into();

        let dict = err.to_dict();
        assert_eq!(dict.get("type").unwrap(), "TransportFailure");
        assert_eq!(dict.get("url").unwrap(), "https://github.com/a/b");
        assert_eq!(dict.get("status").unwrap(), 503);
    }

    #[test]
    fn test_transport_error_without_status() {
        let err: CrawlerError = TransportError::new("https://github.com", "connection refused").into();
        assert!(!err.to_dict().contains_key("status"));
    }

    #[test]
    fn test_parse_anomaly_keeps_fragment() {
        let err: CrawlerError = ParseAnomalyError::new("PHP abc", "not a number").into();

        assert_eq!(err.kind(), "ParseAnomaly");
        assert!(err.to_string().contains("PHP abc"));
        assert_eq!(err.to_dict().get("fragment").unwrap(), "PHP abc");
    }

    #[test]
    fn test_malformed_url() {
        let err = CrawlerError::malformed_url("repo", "expected .../<owner>/<repo>");
        assert_eq!(err.kind(), "MalformedResultUrl");
        assert!(err.to_string().starts_with("Malformed result URL 'repo'"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CrawlerError = parse_err.into();
        assert_eq!(err.kind(), "Serialization");
    }
}
