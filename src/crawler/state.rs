//! Frontier and per-crawl state tracking
//!
//! `CrawlState` owns everything one `crawl()` invocation mutates: the dedup
//! set, the in-flight set whose emptiness signals termination, the error and
//! ignored maps, and the ordered page records. It is created per invocation
//! and handed explicitly to the coordinator, never shared between crawls.

use crate::sitemap::PageRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Mutable state for a single crawl invocation
#[derive(Debug)]
pub struct CrawlState {
    /// Every canonical URL ever admitted or ignored
    seen: HashSet<String>,

    /// URLs currently awaiting a fetch response
    in_flight: HashSet<String>,

    /// Per-URL fetch and extraction failures
    errors: BTreeMap<String, String>,

    /// URLs that resolved off-domain and were never fetched
    ignored: BTreeSet<String>,

    /// Page records in discovery order, append-only
    pages: Vec<PageRecord>,

    /// Canonical URL to index into `pages`
    page_index: HashMap<String, usize>,

    /// Count of fetches that reached a terminal state
    processed: u64,

    /// Whether page records carry script/style asset lists
    extras: bool,
}

impl CrawlState {
    pub fn new(extras: bool) -> Self {
        Self {
            seen: HashSet::new(),
            in_flight: HashSet::new(),
            errors: BTreeMap::new(),
            ignored: BTreeSet::new(),
            pages: Vec::new(),
            page_index: HashMap::new(),
            processed: 0,
            extras,
        }
    }

    /// Admits a URL into the frontier exactly once
    ///
    /// On first sight the URL is marked seen and in-flight and a placeholder
    /// page record is appended, pinning the record's position to discovery
    /// order before the fetch is issued. Every later call with the same
    /// canonical URL is a no-op returning false, which is what breaks cycles
    /// in the link graph.
    pub fn try_admit(&mut self, full_url: &str) -> bool {
        if !self.seen.insert(full_url.to_string()) {
            return false;
        }

        self.in_flight.insert(full_url.to_string());
        self.page_index
            .insert(full_url.to_string(), self.pages.len());
        self.pages
            .push(PageRecord::new(full_url.to_string(), self.extras));

        true
    }

    /// Records an off-domain URL, once
    ///
    /// Also marks it seen so it can neither be logged as ignored twice nor
    /// admitted later through some other resolution path.
    pub fn mark_ignored(&mut self, full_url: &str) {
        if self.seen.insert(full_url.to_string()) {
            self.ignored.insert(full_url.to_string());
        }
    }

    /// Marks a fetch as terminal and reports whether the crawl is done
    ///
    /// Removes the URL from the in-flight set, bumps the processed counter,
    /// and returns true iff no fetch remains in flight — the termination
    /// signal, checked after every single fetch resolution.
    pub fn complete(&mut self, full_url: &str) -> bool {
        self.in_flight.remove(full_url);
        self.processed += 1;
        self.in_flight.is_empty()
    }

    /// Records a per-URL failure; a later failure for the same URL wins
    pub fn record_error(&mut self, full_url: &str, error: impl Into<String>) {
        self.errors.insert(full_url.to_string(), error.into());
    }

    pub fn page_mut(&mut self, full_url: &str) -> Option<&mut PageRecord> {
        let index = *self.page_index.get(full_url)?;
        self.pages.get_mut(index)
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Consumes the state, yielding the pieces the crawl report needs
    pub fn into_parts(self) -> (Vec<PageRecord>, BTreeSet<String>, BTreeMap<String, String>) {
        (self.pages, self.ignored, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_is_idempotent() {
        let mut state = CrawlState::new(false);

        assert!(state.try_admit("http://example.com/"));
        assert!(!state.try_admit("http://example.com/"));
        assert!(!state.try_admit("http://example.com/"));

        assert_eq!(state.pages().len(), 1);
        assert_eq!(state.pending(), 1);
    }

    #[test]
    fn test_admission_appends_placeholder_in_order() {
        let mut state = CrawlState::new(false);

        state.try_admit("http://example.com/");
        state.try_admit("http://example.com/a");
        state.try_admit("http://example.com/b");

        let locs: Vec<&str> = state.pages().iter().map(|p| p.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "http://example.com/",
                "http://example.com/a",
                "http://example.com/b"
            ]
        );
    }

    #[test]
    fn test_complete_signals_empty_in_flight() {
        let mut state = CrawlState::new(false);

        state.try_admit("http://example.com/");
        state.try_admit("http://example.com/a");

        assert!(!state.complete("http://example.com/"));
        assert!(state.complete("http://example.com/a"));
        assert_eq!(state.processed(), 2);
    }

    #[test]
    fn test_mark_ignored_once() {
        let mut state = CrawlState::new(false);

        state.mark_ignored("http://other.com/x");
        state.mark_ignored("http://other.com/x");

        let (pages, ignored, _) = state.into_parts();
        assert!(pages.is_empty());
        assert_eq!(ignored.len(), 1);
    }

    #[test]
    fn test_ignored_url_cannot_be_admitted_later() {
        let mut state = CrawlState::new(false);

        state.mark_ignored("http://example.com/odd");
        assert!(!state.try_admit("http://example.com/odd"));
        assert!(state.pages().is_empty());
    }

    #[test]
    fn test_admitted_url_is_not_logged_as_ignored() {
        let mut state = CrawlState::new(false);

        state.try_admit("http://example.com/");
        state.mark_ignored("http://example.com/");

        let (_, ignored, _) = state.into_parts();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_last_error_wins() {
        let mut state = CrawlState::new(false);

        state.record_error("http://example.com/", "first");
        state.record_error("http://example.com/", "second");

        let (_, _, errors) = state.into_parts();
        assert_eq!(errors.get("http://example.com/").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_page_mut_finds_record_by_url() {
        let mut state = CrawlState::new(false);
        state.try_admit("http://example.com/");

        let page = state.page_mut("http://example.com/").unwrap();
        page.lastmod = Some("2016-03-08".to_string());

        assert_eq!(
            state.pages()[0].lastmod.as_deref(),
            Some("2016-03-08")
        );
    }
}
