//! Crawler module
//!
//! Contains the crawl engine: bounded-concurrency fetch dispatch, attribute
//! extraction, link/asset classification, frontier tracking, and the
//! completion detection that triggers sitemap serialization.

mod classify;
mod coordinator;
mod extract;
mod fetcher;
mod state;

pub use classify::{classify, NodeKind};
pub use extract::{extract_attribute_values, AttrNode};
pub use fetcher::{build_http_client, FetchOutcome, Fetcher};
pub use state::CrawlState;

use std::collections::{BTreeMap, BTreeSet};

/// Tunables for one crawl invocation
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Maximum number of simultaneous connections
    pub pool_size: usize,

    /// Include script and style assets in the sitemap
    pub extras: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            pool_size: 8,
            extras: false,
        }
    }
}

/// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlReport {
    /// The serialized sitemap document
    pub xml: String,

    /// Number of page records in the sitemap
    pub page_count: usize,

    /// Number of fetches that reached a terminal state
    pub processed: u64,

    /// Off-domain URLs that were seen but never fetched
    pub ignored: BTreeSet<String>,

    /// Per-URL fetch and extraction failures
    pub errors: BTreeMap<String, String>,
}

/// Crawls a website starting from `root_url` and builds its sitemap
///
/// Discovers same-domain pages recursively, attaches embedded assets to the
/// page that references them, and returns the serialized `urlset` document
/// together with the ignored/failed URL maps.
///
/// The crawl terminates when its in-flight fetch count reaches zero. There
/// is no timeout in the engine itself, so a hung fetch (beyond the HTTP
/// client's own timeouts) stalls termination.
///
/// # Example
///
/// ```no_run
/// use inkmap::crawler::{crawl, CrawlOptions};
///
/// # async fn example() -> inkmap::Result<()> {
/// let report = crawl("http://example.com/", CrawlOptions::default()).await?;
/// println!("{}", report.xml);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(root_url: &str, options: CrawlOptions) -> crate::Result<CrawlReport> {
    coordinator::run_crawl(root_url, options).await
}
