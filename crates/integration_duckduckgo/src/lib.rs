#![forbid(unsafe_code)]
//! DuckDuckGo Instant Answer integration for discerning-duck
//!
//! Queries the DuckDuckGo Instant Answer API and reduces the responses to a
//! single [`NormalizedAnswer`] for the presentation layer.
//!
//! # Architecture
//!
//! Every query is sent twice, with the query as the `q` parameter and with
//! the query as the URL path, because the API answers the two shapes
//! differently. The [`Fetcher`] runs both requests concurrently and degrades
//! any failed request to "no data"; the [`reconciler`] merges the two trees
//! with fixed per-field precedence. A [`QuerySession`] ties one query to one
//! [`CancellationToken`] so it can be aborted from another thread.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use integration_duckduckgo::{DuckDuckGoClient, DuckDuckGoConfig, QuerySession};
//!
//! let client = DuckDuckGoClient::new(DuckDuckGoConfig::default())?;
//! let session = QuerySession::new(Arc::new(client));
//!
//! let answer = session.run("ferrara").await?;
//! if !answer.is_empty() {
//!     println!("{}: {}", answer.abstract_.heading, answer.abstract_.text_summary);
//! }
//! ```

mod api;
mod cancellation;
mod client;
mod config;
mod error;
mod fetcher;
mod model;
mod provider;
pub mod reconciler;
mod session;

pub use api::{PartialAnswer, RawIcon, RawInfoboxEntry, RawTopic};
pub use cancellation::CancellationToken;
pub use client::{DEFAULT_QUERY, DuckDuckGoClient};
pub use config::DuckDuckGoConfig;
pub use error::DuckDuckGoError;
pub use fetcher::{CLIENT_ID, FetchedTrees, Fetcher, RequestVariant};
pub use model::{
    Abstract, Answer, Definition, Icon, InfoboxEntry, NormalizedAnswer, ResponseKind, Topic,
};
pub use provider::AnswerProvider;
pub use reconciler::{reconcile, reconcile_trees};
pub use session::{QuerySession, SessionHandle};
