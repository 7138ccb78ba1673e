//! Inkmap: a same-domain sitemap generator
//!
//! This crate implements a web crawler that starts from a root URL, follows
//! every same-domain hyperlink, classifies embedded assets (images, styles,
//! scripts), and serializes the discovered pages into a sitemap XML document.

pub mod crawler;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Inkmap operations
///
/// Per-URL fetch and extraction failures are not represented here: they are
/// recorded in the crawl state's error map and never abort the crawl. Only
/// conditions that make the crawl itself unusable surface as `InkmapError`.
#[derive(Debug, Error)]
pub enum InkmapError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Sitemap serialization error: {0}")]
    Serialize(#[from] quick_xml::errors::serialize::SeError),

    #[error("Crawl channel closed with {pending} fetches still pending")]
    ChannelClosed { pending: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while extracting attribute values from a document
///
/// An extraction failure is scoped to one attribute name on one page; the
/// coordinator records it and keeps processing the rest of the page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector for attribute '{attribute}': {message}")]
    Selector { attribute: String, message: String },
}

/// Result type alias for Inkmap operations
pub type Result<T> = std::result::Result<T, InkmapError>;

// Re-export commonly used types
pub use crawler::{crawl, CrawlOptions, CrawlReport};
pub use url::{resolve, UrlInfo};
