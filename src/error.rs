//! Error types for URL validation and per-URL extraction failures

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// A failure while acquiring or extracting a single product page.
///
/// Created at the point of failure and handed back to the caller unchanged.
/// Nothing in this crate retries on these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Timed out fetching {url}: {message}")]
    Timeout { url: String, message: String },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to parse or extract {url}: {message}")]
    Parse { url: String, message: String },
}

impl ExtractionError {
    pub fn timeout(url: &str, message: impl Into<String>) -> Self {
        Self::Timeout {
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub fn fetch(url: &str, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(url: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Wire tag used in error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Fetch { .. } => "fetch",
            Self::Parse { .. } => "parse",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. } | Self::Fetch { url, .. } | Self::Parse { url, .. } => url,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Timeout { message, .. }
            | Self::Fetch { message, .. }
            | Self::Parse { message, .. } => message,
        }
    }
}

impl Serialize for ExtractionError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExtractionError", 3)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("url", self.url())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

/// A request-level problem caught before any page is fetched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide at least one valid URL.")]
    NoUrls,

    #[error("Missing URL for '{field}'")]
    MissingUrl { field: &'static str },

    #[error("Invalid URL for '{field}': {url} (must start with http:// or https://)")]
    InvalidScheme { field: &'static str, url: String },
}
