//! Sitemap model and finalizer
//!
//! The growing ordered collection of page records and the pure
//! transformation that turns it into the final `urlset` XML document.

use serde::Serialize;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

/// An image asset attached to a page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImageEntry {
    /// Caption, taken from the owning element's `alt` attribute
    #[serde(rename = "image:caption", skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(rename = "image:loc")]
    pub loc: String,
}

/// A video asset attached to a page
///
/// The crawl engine has no video classification rule, so this list is never
/// populated; the element exists in the output schema for forward
/// compatibility.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VideoEntry {
    #[serde(rename = "video:loc")]
    pub loc: String,
}

/// A script asset attached to a page (extras mode only)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptEntry {
    #[serde(rename = "script:loc")]
    pub loc: String,
}

/// A stylesheet asset attached to a page (extras mode only)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StyleEntry {
    #[serde(rename = "style:loc")]
    pub loc: String,
}

/// One sitemap entry for a unique, followed, non-asset URL
///
/// The record is created as a placeholder the instant its URL is admitted
/// into the frontier, so that the sitemap's order reflects discovery order
/// rather than network completion order. Fields are filled in as the fetch
/// resolves; a failed fetch leaves everything beyond `loc` untouched.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageRecord {
    pub loc: String,

    /// Last-modified date from the response header, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,

    /// Hex digest of the response body
    #[serde(rename = "content:hash", skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    #[serde(rename = "image:image")]
    pub images: Vec<ImageEntry>,

    #[serde(rename = "video:video")]
    pub videos: Vec<VideoEntry>,

    /// Present only in extras mode
    #[serde(rename = "script:script", skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<ScriptEntry>>,

    /// Present only in extras mode
    #[serde(rename = "style:style", skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<StyleEntry>>,
}

impl PageRecord {
    /// Creates an empty placeholder record for `loc`
    pub fn new(loc: String, extras: bool) -> Self {
        Self {
            loc,
            lastmod: None,
            content_hash: None,
            images: Vec::new(),
            videos: Vec::new(),
            scripts: extras.then(Vec::new),
            styles: extras.then(Vec::new),
        }
    }

    pub fn push_image(&mut self, loc: String, caption: Option<String>) {
        self.images.push(ImageEntry { caption, loc });
    }

    /// Attaches a script asset; a no-op outside extras mode
    pub fn push_script(&mut self, loc: String) {
        if let Some(scripts) = &mut self.scripts {
            scripts.push(ScriptEntry { loc });
        }
    }

    /// Attaches a stylesheet asset; a no-op outside extras mode
    pub fn push_style(&mut self, loc: String) {
        if let Some(styles) = &mut self.styles {
            styles.push(StyleEntry { loc });
        }
    }
}

/// The serialized document root
#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct Urlset<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@xmlns:image")]
    xmlns_image: &'static str,
    #[serde(rename = "@xmlns:video")]
    xmlns_video: &'static str,
    #[serde(rename = "url")]
    urls: &'a [PageRecord],
}

/// Serializes the final page sequence into a sitemap XML document
///
/// Pure transformation: the page sequence is complete by the time this runs
/// (the completion detector only fires once no fetch is in flight) and is
/// not mutated afterward.
pub fn finalize(pages: &[PageRecord]) -> Result<String, quick_xml::errors::serialize::SeError> {
    let urlset = Urlset {
        xmlns: SITEMAP_NS,
        xmlns_image: IMAGE_NS,
        xmlns_video: VIDEO_NS,
        urls: pages,
    };

    let body = quick_xml::se::to_string(&urlset)?;
    Ok(format!("{}\n{}", XML_DECLARATION, body))
}
