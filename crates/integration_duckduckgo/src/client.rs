//! DuckDuckGo Instant Answer client
//!
//! Sends every query in both request shapes and reconciles the two answers.
//! See the `reconciler` module for the precedence rules.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::{
    cancellation::CancellationToken,
    config::DuckDuckGoConfig,
    error::DuckDuckGoError,
    fetcher::Fetcher,
    model::NormalizedAnswer,
    provider::AnswerProvider,
    reconciler::reconcile_trees,
};

/// Query used when the caller passes an empty string
pub const DEFAULT_QUERY: &str = "DuckDuckGo";

/// DuckDuckGo Instant Answer client
#[derive(Debug)]
pub struct DuckDuckGoClient {
    fetcher: Fetcher,
    config: DuckDuckGoConfig,
}

impl DuckDuckGoClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: DuckDuckGoConfig) -> Result<Self, DuckDuckGoError> {
        config.validate()?;
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }

    /// Create a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, DuckDuckGoError> {
        Self::new(DuckDuckGoConfig::default())
    }
}

#[async_trait]
impl AnswerProvider for DuckDuckGoClient {
    #[instrument(skip(self, cancel), fields(provider = "duckduckgo"))]
    async fn query_results(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<NormalizedAnswer, DuckDuckGoError> {
        let query = if query.is_empty() {
            debug!(default = DEFAULT_QUERY, "Empty query, using default term");
            DEFAULT_QUERY
        } else {
            query
        };

        let start = Instant::now();
        let trees = self.fetcher.fetch_both(query, cancel).await?;
        let answer = reconcile_trees(trees.as_parameter.as_ref(), trees.as_path.as_ref());

        info!(
            as_parameter = trees.as_parameter.is_some(),
            as_path = trees.as_path.is_some(),
            empty = answer.is_empty(),
            response_type = %answer.response_type,
            cancelled = cancel.is_cancelled(),
            time_ms = start.elapsed().as_millis(),
            "DuckDuckGo query completed"
        );

        Ok(answer)
    }

    fn config(&self) -> &DuckDuckGoConfig {
        &self.config
    }

    fn provider_name(&self) -> &'static str {
        "duckduckgo"
    }
}
