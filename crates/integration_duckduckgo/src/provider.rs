//! Answer provider trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{CancellationToken, DuckDuckGoConfig, DuckDuckGoError, NormalizedAnswer};

/// Source of reconciled instant answers
///
/// Implemented by [`crate::DuckDuckGoClient`]; the presentation layer only
/// sees this trait, through a [`crate::QuerySession`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Query the upstream API and reconcile the responses
    ///
    /// An empty `query` is replaced by a fixed default term. Transport
    /// failures and cancellation yield a partially or fully empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error only on contract violations, such as a query that
    /// cannot be turned into a request URL.
    async fn query_results(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<NormalizedAnswer, DuckDuckGoError>;

    /// Configuration the provider was built with
    fn config(&self) -> &DuckDuckGoConfig;

    /// Get the provider name (e.g., "duckduckgo")
    fn provider_name(&self) -> &'static str;
}
