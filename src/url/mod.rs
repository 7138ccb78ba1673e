//! URL handling module for Inkmap
//!
//! This module provides the reference resolver that turns raw `href`/`src`
//! attribute values into canonical URL descriptors scoped to a crawl root.

mod resolve;

pub use resolve::{resolve, UrlInfo};
