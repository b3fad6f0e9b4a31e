//! NASA near-Earth-object feed
//!
//! `NeoFeed` is the seam the HTTP layer talks to; `NeoClient` is the real
//! NeoWs implementation.

pub mod client;
pub mod parse;

pub use client::{NeoClient, NeoClientError};
pub use parse::summarize_browse_page;

use async_trait::async_trait;

use crate::types::{BrowseQuery, NeoSummary};

/// Source of near-Earth-object summaries.
#[async_trait]
pub trait NeoFeed: Send + Sync {
    /// One page of the browse listing, summarised.
    async fn browse(&self, query: &BrowseQuery) -> Result<Vec<NeoSummary>, NeoClientError>;
}
