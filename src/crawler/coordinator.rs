//! Crawl coordinator - fetch dispatch and completion detection
//!
//! A single coordinator task owns the crawl state. Admitted URLs are handed
//! to spawned fetch tasks; every fetch reports back over one mpsc channel,
//! and all state mutation happens here on receipt, so the state needs no
//! locking. The crawl is finished when a completion drains the in-flight
//! set, which the coordinator observes exactly once.

use crate::crawler::classify::{classify, NodeKind};
use crate::crawler::extract::extract_attribute_values;
use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::state::CrawlState;
use crate::crawler::{CrawlOptions, CrawlReport};
use crate::sitemap::finalize;
use crate::url::{resolve, UrlInfo};
use crate::InkmapError;
use std::io::Write;
use tokio::sync::mpsc;

/// Attribute names harvested from every fetched document
const ATTRIBUTES: &[&str] = &["href", "src"];

/// A terminal fetch result reported back to the coordinator
struct Completion {
    url: String,
    outcome: FetchOutcome,
}

struct Coordinator {
    root: UrlInfo,
    fetcher: Fetcher,
    state: CrawlState,
    tx: mpsc::UnboundedSender<Completion>,
}

/// Crawls outward from `root_url` and serializes the discovered sitemap
///
/// Returns once the last in-flight fetch has resolved. Per-URL failures are
/// collected into the report and never abort the crawl; only a failure to
/// build the HTTP client or to serialize the result is an error here.
pub(crate) async fn run_crawl(root_url: &str, options: CrawlOptions) -> crate::Result<CrawlReport> {
    let root = resolve(root_url, None);
    tracing::info!("starting crawl at {}", root.full_url);

    let fetcher = Fetcher::new(options.pool_size)?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut coordinator = Coordinator {
        root: root.clone(),
        fetcher,
        state: CrawlState::new(options.extras),
        tx,
    };

    // The root is always fetched; its descriptor carries no follow flag
    coordinator.admit(root.full_url);

    loop {
        let Some(completion) = rx.recv().await else {
            // Unreachable while the coordinator holds a sender; kept so a
            // lost fetch task surfaces as an error instead of a hang
            return Err(InkmapError::ChannelClosed {
                pending: coordinator.state.pending(),
            });
        };

        if coordinator.process(completion) {
            break;
        }
    }

    // Only the completion that drained the in-flight set reaches this
    // point, so the finalizer runs exactly once per crawl
    let xml = finalize(coordinator.state.pages())?;
    let processed = coordinator.state.processed();
    let (pages, ignored, errors) = coordinator.state.into_parts();

    tracing::info!(
        "crawl finished: {} pages, {} ignored, {} failed",
        pages.len(),
        ignored.len(),
        errors.len()
    );

    Ok(CrawlReport {
        xml,
        page_count: pages.len(),
        processed,
        ignored,
        errors,
    })
}

impl Coordinator {
    /// Admits a URL and dispatches its fetch, once per canonical URL
    ///
    /// The page placeholder is appended synchronously by `try_admit` before
    /// the fetch task spawns, so sitemap order is discovery order no matter
    /// how fetches interleave.
    fn admit(&mut self, full_url: String) {
        if !self.state.try_admit(&full_url) {
            return;
        }

        tracing::debug!("admitted {}", full_url);

        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fetcher.fetch(&full_url).await;
            let _ = tx.send(Completion {
                url: full_url,
                outcome,
            });
        });
    }

    /// Handles one terminal fetch; returns true when the crawl is complete
    fn process(&mut self, completion: Completion) -> bool {
        let Completion { url, outcome } = completion;

        match outcome {
            FetchOutcome::Success {
                last_modified,
                body,
            } => self.process_document(&url, last_modified, &body),
            FetchOutcome::Failed { error } => {
                tracing::debug!("fetch failed for {}: {}", url, error);
                self.state.record_error(&url, error);
            }
        }

        let done = self.state.complete(&url);
        self.print_progress();
        done
    }

    /// Populates the page record and routes every discovered reference
    fn process_document(&mut self, url: &str, last_modified: Option<String>, body: &str) {
        if let Some(page) = self.state.page_mut(url) {
            page.lastmod = last_modified;
            page.content_hash = Some(content_hash(body));
        }

        // One extraction attempt per attribute name; a failure is recorded
        // against this URL (last one wins) without aborting the other
        // attribute or the rest of this page
        let mut nodes = Vec::new();
        for attribute in ATTRIBUTES {
            match extract_attribute_values(body, attribute) {
                Ok(found) => nodes.extend(found),
                Err(e) => self.state.record_error(url, e.to_string()),
            }
        }

        for node in nodes {
            if node.value.is_empty() {
                continue;
            }

            let info = resolve(&node.value, Some(&self.root));

            if info.follow != Some(true) {
                self.state.mark_ignored(&info.full_url);
                continue;
            }

            match classify(&node) {
                NodeKind::Image { caption } => {
                    if let Some(page) = self.state.page_mut(url) {
                        page.push_image(info.full_url, caption);
                    }
                }
                NodeKind::Stylesheet => {
                    if let Some(page) = self.state.page_mut(url) {
                        page.push_style(info.full_url);
                    }
                }
                NodeKind::Script => {
                    if let Some(page) = self.state.page_mut(url) {
                        page.push_script(info.full_url);
                    }
                }
                NodeKind::PageLink => self.admit(info.full_url),
            }
        }
    }

    /// Rewrites the one-line progress indicator in place
    fn print_progress(&self) {
        print!(
            "\rProcessed: {}     Pending: {}     ",
            self.state.processed(),
            self.state.pending()
        );
        let _ = std::io::stdout().flush();
    }
}

/// Stable hex fingerprint of a response body
fn content_hash(body: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}
