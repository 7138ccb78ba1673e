//! Attribute node classification
//!
//! Decides what a discovered `href`/`src` value is: an embedded asset
//! (image, stylesheet, script) that attaches to the referring page, or a
//! page link that is a candidate for recursive traversal.

use crate::crawler::extract::AttrNode;

/// File extensions that mark a reference as an image
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg"];

/// Owning tags whose `src`/`href` values are always images
const IMAGE_TAGS: &[&str] = &["img", "svg"];

/// Category of a discovered attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Image asset with an optional caption taken from the `alt` attribute
    Image { caption: Option<String> },

    /// Stylesheet asset
    Stylesheet,

    /// Script asset
    Script,

    /// Candidate for recursive traversal
    PageLink,
}

/// Classifies an attribute node
///
/// Rules are checked in precedence order; the first match wins:
/// 1. Image — owning tag is `img`/`svg`, or the value's extension (the text
///    after the last `.`, or the whole value when it has no dot) is a known
///    image extension. An `<img src="a.js">` is therefore still an image.
/// 2. Stylesheet — value ends in `.css`, or `rel="stylesheet"`, or
///    `type="text/css"` on the owning element.
/// 3. Script — value ends in `.js`, or the owning tag is `script`.
/// 4. Anything else is a page link.
pub fn classify(node: &AttrNode) -> NodeKind {
    if is_image_node(node) {
        let caption = node.alt.as_deref().filter(|alt| !alt.is_empty());
        return NodeKind::Image {
            caption: caption.map(str::to_string),
        };
    }

    if is_stylesheet_node(node) {
        return NodeKind::Stylesheet;
    }

    if is_script_node(node) {
        return NodeKind::Script;
    }

    NodeKind::PageLink
}

fn is_image_node(node: &AttrNode) -> bool {
    // A dot-free value is its own "extension"
    let extension = node.value.rsplit('.').next().unwrap_or(&node.value);

    IMAGE_TAGS.contains(&node.tag.as_str()) || IMAGE_EXTENSIONS.contains(&extension)
}

fn is_stylesheet_node(node: &AttrNode) -> bool {
    node.value.ends_with(".css")
        || node.rel.as_deref() == Some("stylesheet")
        || node.type_attr.as_deref() == Some("text/css")
}

fn is_script_node(node: &AttrNode) -> bool {
    node.value.ends_with(".js") || node.tag == "script"
}
