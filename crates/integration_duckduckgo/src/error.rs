//! DuckDuckGo error types

use thiserror::Error;

/// Errors that can occur while querying the Instant Answer API
#[derive(Debug, Error)]
pub enum DuckDuckGoError {
    /// Connection to the API failed, or the HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed in transit
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code returned by the API
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The query was cancelled before the request completed
    #[error("Request cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A request URL could not be built from the API root and query
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl DuckDuckGoError {
    /// Returns true if this error only costs the data of one request variant
    ///
    /// Degradable errors are logged and turned into an absent tree; everything
    /// else is a contract violation that reaches the caller.
    #[must_use]
    pub const fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::HttpStatus { .. }
                | Self::ParseError(_)
                | Self::Timeout { .. }
                | Self::Cancelled
        )
    }

    /// Returns true if the error was caused by cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
