//! Attribute-value extraction from fetched documents
//!
//! Given raw document bytes and one attribute name, returns the attribute
//! values in document order together with the metadata of the owning element
//! that the classifier needs. Extraction is attempted once per attribute
//! name; a failure for one name never aborts the other.

use crate::ExtractError;
use scraper::{Html, Selector};

/// One extracted attribute value and its owning-element metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrNode {
    /// The raw attribute value
    pub value: String,

    /// Tag name of the owning element, lowercase
    pub tag: String,

    /// `rel` attribute of the owning element, if any
    pub rel: Option<String>,

    /// `type` attribute of the owning element, if any
    pub type_attr: Option<String>,

    /// `alt` attribute of the owning element, if any
    pub alt: Option<String>,
}

/// Extracts every value of `attribute` from `body`, in document order
///
/// The document is parsed leniently; malformed markup yields whatever the
/// parser can recover, matching browser behavior. Empty attribute values
/// are kept here and filtered by the caller.
pub fn extract_attribute_values(body: &str, attribute: &str) -> Result<Vec<AttrNode>, ExtractError> {
    let selector =
        Selector::parse(&format!("[{}]", attribute)).map_err(|e| ExtractError::Selector {
            attribute: attribute.to_string(),
            message: e.to_string(),
        })?;

    let document = Html::parse_document(body);

    let nodes = document
        .select(&selector)
        .filter_map(|element| {
            let value = element.value().attr(attribute)?;
            Some(AttrNode {
                value: value.to_string(),
                tag: element.value().name().to_string(),
                rel: element.value().attr("rel").map(str::to_string),
                type_attr: element.value().attr("type").map(str::to_string),
                alt: element.value().attr("alt").map(str::to_string),
            })
        })
        .collect();

    Ok(nodes)
}
