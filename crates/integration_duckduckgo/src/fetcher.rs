//! DuckDuckGo Instant Answer fetcher
//!
//! Issues the GET requests against the Instant Answer API
//! (<https://api.duckduckgo.com/>) and returns each body as an untyped JSON
//! tree. A request that fails in transit, answers with a non-success status,
//! or returns something that is not JSON yields no tree instead of an error,
//! so one bad variant never takes its sibling down with it.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{cancellation::CancellationToken, config::DuckDuckGoConfig, error::DuckDuckGoError};

/// Client identifier sent as the `t` parameter
pub const CLIENT_ID: &str = "discerningduck";

/// Shape of a request for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestVariant {
    /// Empty path, query in the `q` parameter
    AsParameter,
    /// Query as the URL path segment, no `q` parameter
    AsPath,
}

impl RequestVariant {
    /// Short name used in logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AsParameter => "as-parameter",
            Self::AsPath => "as-path",
        }
    }
}

/// Raw trees for both variants of one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedTrees {
    /// Tree of the as-parameter request, `None` when it produced nothing
    pub as_parameter: Option<Value>,
    /// Tree of the as-path request, `None` when it produced nothing
    pub as_path: Option<Value>,
}

/// HTTP fetcher for the Instant Answer API
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    api_root: Url,
    timeout_secs: u64,
}

impl Fetcher {
    /// Create a new fetcher
    ///
    /// # Errors
    ///
    /// Returns an error if the API root is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: &DuckDuckGoConfig) -> Result<Self, DuckDuckGoError> {
        let api_root = config.api_root_url()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DuckDuckGoError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_root,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Build the request URL for one variant
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be placed in the URL path. URL
    /// parsing collapses `.` and `..` segments, so those queries have no
    /// as-path form.
    pub fn build_url(&self, variant: RequestVariant, query: &str) -> Result<Url, DuckDuckGoError> {
        let mut url = self.api_root.clone();

        if variant == RequestVariant::AsPath {
            if is_dot_segment(query) {
                return Err(DuckDuckGoError::InvalidUrl(format!(
                    "{query:?} cannot be sent as a path segment"
                )));
            }
            url.path_segments_mut()
                .map_err(|()| {
                    DuckDuckGoError::InvalidUrl(format!("{} cannot carry a path", self.api_root))
                })?
                .pop_if_empty()
                .push(query);
        }

        {
            let mut params = url.query_pairs_mut();
            if variant == RequestVariant::AsParameter {
                params.append_pair("q", query);
            }
            params
                .append_pair("format", "json")
                .append_pair("no_html", "1")
                .append_pair("t", CLIENT_ID);
        }

        Ok(url)
    }

    /// Fetch one variant
    ///
    /// Returns `Ok(None)` when the request failed, was cancelled, or was
    /// skipped because the token was already cancelled. Only a URL that
    /// cannot be built is reported as an error.
    #[instrument(skip_all, fields(variant = variant.name(), query = %query))]
    pub async fn fetch(
        &self,
        variant: RequestVariant,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Value>, DuckDuckGoError> {
        if variant == RequestVariant::AsPath && is_dot_segment(query) {
            debug!("Query is a dot segment, skipping as-path request");
            return Ok(None);
        }

        let url = self.build_url(variant, query)?;

        if cancel.is_cancelled() {
            debug!("Query already cancelled, skipping DuckDuckGo request");
            return Ok(None);
        }

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(DuckDuckGoError::Cancelled),
            result = self.get_json(url, cancel) => result,
        };

        match outcome {
            Ok(tree) => Ok(Some(tree)),
            Err(DuckDuckGoError::Cancelled) => {
                debug!("DuckDuckGo request aborted by cancellation");
                Ok(None)
            },
            Err(e) if e.is_degradable() => {
                warn!(error = %e, "DuckDuckGo request failed, continuing without it");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// Fetch both variants of a query concurrently
    ///
    /// Returns once both requests have completed, failed, or been cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if a request URL cannot be built.
    pub async fn fetch_both(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchedTrees, DuckDuckGoError> {
        let (as_parameter, as_path) = tokio::join!(
            self.fetch(RequestVariant::AsParameter, query, cancel),
            self.fetch(RequestVariant::AsPath, query, cancel),
        );

        Ok(FetchedTrees {
            as_parameter: as_parameter?,
            as_path: as_path?,
        })
    }

    async fn get_json(&self, url: Url, cancel: &CancellationToken) -> Result<Value, DuckDuckGoError> {
        debug!(url = %url, "Sending DuckDuckGo request");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        debug!(status = %status, "Received DuckDuckGo response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DuckDuckGoError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.transport_error(&e))?
        {
            if cancel.is_cancelled() {
                return Err(DuckDuckGoError::Cancelled);
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|e| DuckDuckGoError::ParseError(e.to_string()))
    }

    fn transport_error(&self, e: &reqwest::Error) -> DuckDuckGoError {
        if e.is_timeout() {
            DuckDuckGoError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if e.is_connect() {
            DuckDuckGoError::ConnectionFailed(e.to_string())
        } else {
            DuckDuckGoError::RequestFailed(e.to_string())
        }
    }
}

/// Whether URL parsing would treat `segment` as a relative path step
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
