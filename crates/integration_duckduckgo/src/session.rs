//! Per-query session
//!
//! A [`QuerySession`] is the inbound contract the presentation layer talks
//! to. It owns the cancellation token for exactly one query lifecycle; a new
//! query needs a new session.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    CancellationToken, DuckDuckGoConfig, DuckDuckGoError, NormalizedAnswer,
    provider::AnswerProvider,
};

/// One query lifecycle against an [`AnswerProvider`]
pub struct QuerySession {
    provider: Arc<dyn AnswerProvider>,
    cancel: CancellationToken,
}

impl fmt::Debug for QuerySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySession")
            .field("provider", &self.provider.provider_name())
            .field("cancel", &self.cancel)
            .finish()
    }
}

impl QuerySession {
    /// Start a new session with a fresh cancellation token
    #[must_use]
    pub fn new(provider: Arc<dyn AnswerProvider>) -> Self {
        Self {
            provider,
            cancel: CancellationToken::new(),
        }
    }

    /// Run the query
    ///
    /// Surrounding whitespace is trimmed; an empty query asks the provider
    /// for its default term.
    ///
    /// # Errors
    ///
    /// Returns an error only on contract violations reported by the provider.
    pub async fn run(&self, query: &str) -> Result<NormalizedAnswer, DuckDuckGoError> {
        let query = query.trim();
        debug!(query = %query, provider = self.provider.provider_name(), "Running query");
        self.provider.query_results(query, &self.cancel).await
    }

    /// Cancel the query
    ///
    /// Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        if self.cancel.cancel() {
            debug!("Query cancelled");
        }
    }

    /// Check whether the query has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A handle that can cancel this session from elsewhere
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            cancel: self.cancel.clone(),
        }
    }

    /// Configuration of the underlying provider
    #[must_use]
    pub fn current_config(&self) -> &DuckDuckGoConfig {
        self.provider.config()
    }
}

/// Detached cancel handle for a [`QuerySession`]
#[derive(Debug, Clone)]
pub struct SessionHandle {
    cancel: CancellationToken,
}

impl SessionHandle {
    /// Cancel the session this handle belongs to
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check whether the session has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
