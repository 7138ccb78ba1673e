/// A resolved URL descriptor
///
/// Produced once per discovered reference. `full_url` is the canonical
/// `protocol://domain/path` form and serves as the dedup key everywhere:
/// anchors are stripped before key formation, so `/page` and `/page#top`
/// collapse to the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInfo {
    /// URL scheme, `http` when the reference does not carry one
    pub protocol: String,

    /// Host component, inherited from the crawl root for root-relative paths
    pub domain: String,

    /// Path component, always starting with `/`
    pub path: String,

    /// Fragment after the first `#`, possibly empty
    pub anchor: String,

    /// Canonical `protocol://domain/path` string (anchor excluded)
    pub full_url: String,

    /// Whether the URL is eligible for recursive fetching
    ///
    /// `Some(domain == root.domain)` when a root context was supplied,
    /// `None` for the crawl root itself, which is always fetched.
    pub follow: Option<bool>,
}

/// Resolves a raw reference string against the crawl root
///
/// Implements relative-reference resolution by hand rather than through a
/// URL library: protocol-relative (`//host/..`), root-relative (`/path`),
/// bare (`host/path`) and anchor-only (`#frag`) references each follow the
/// rules below, which library resolution does not reproduce.
///
/// Resolution steps:
/// 1. A reference starting with `#` is an in-page anchor: `follow` is false
///    and `full_url` is the root's full URL with the fragment appended. No
///    further parsing happens.
/// 2. Split on the first `//`. The prefix, minus a trailing `:`, is the
///    protocol; an absent or empty prefix means `http`.
/// 3. A remainder starting with `/` is a root-relative path: protocol and
///    domain are inherited from the crawl root.
/// 4. Otherwise the remainder splits at its first `/` into domain and path;
///    a missing path becomes `/`.
/// 5. The path splits at its first `#` into path and anchor.
/// 6. `follow` is set iff a root context was supplied, and is true exactly
///    when the domains match. The scheme is deliberately not compared, so
///    `http://` and `https://` variants of the root domain are both
///    followed even though they dedup under different keys.
///
/// # Arguments
///
/// * `reference` - The raw attribute value (may be empty)
/// * `root` - The crawl root descriptor, or `None` when resolving the root
///   URL itself
pub fn resolve(reference: &str, root: Option<&UrlInfo>) -> UrlInfo {
    // Step 1: in-page anchor, never followed, never fetched
    if reference.starts_with('#') {
        let root_full = root.map(|r| r.full_url.as_str()).unwrap_or_default();
        let anchor = reference.split_at(1).1.to_string();

        return UrlInfo {
            protocol: String::new(),
            domain: String::new(),
            path: String::new(),
            anchor,
            full_url: format!("{}{}", root_full, reference),
            follow: Some(false),
        };
    }

    // Step 2: protocol from the text before the first "//"
    let (mut protocol, remainder) = match reference.split_once("//") {
        Some((prefix, rest)) => {
            let scheme = prefix.strip_suffix(':').unwrap_or(prefix);
            let scheme = if scheme.is_empty() { "http" } else { scheme };
            (scheme.to_string(), rest)
        }
        None => ("http".to_string(), reference),
    };

    // Steps 3-4: domain and path
    let (domain, mut path) = if remainder.starts_with('/') {
        // Root-relative reference: the crawl root supplies protocol + domain
        if let Some(root) = root {
            protocol = root.protocol.clone();
            (root.domain.clone(), remainder.to_string())
        } else {
            (String::new(), remainder.to_string())
        }
    } else {
        match remainder.split_once('/') {
            Some((domain, rest)) => (domain.to_string(), format!("/{}", rest)),
            None => (remainder.to_string(), "/".to_string()),
        }
    };

    // Step 5: anchor from the first '#' in the path
    let anchor = match path.split_once('#') {
        Some((before, after)) => {
            let anchor = after.to_string();
            path = before.to_string();
            anchor
        }
        None => String::new(),
    };

    // Step 6: follow is a pure domain comparison against the crawl root
    let follow = root.map(|root| domain == root.domain);

    let full_url = format!("{}://{}{}", protocol, domain, path);

    UrlInfo {
        protocol,
        domain,
        path,
        anchor,
        full_url,
        follow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> UrlInfo {
        resolve("http://example.com/", None)
    }

    #[test]
    fn test_root_with_protocol() {
        let info = resolve("https://example.com/start", None);
        assert_eq!(info.protocol, "https");
        assert_eq!(info.domain, "example.com");
        assert_eq!(info.path, "/start");
        assert_eq!(info.full_url, "https://example.com/start");
        assert_eq!(info.follow, None);
    }

    #[test]
    fn test_root_without_protocol_assumes_http() {
        let info = resolve("example.com", None);
        assert_eq!(info.protocol, "http");
        assert_eq!(info.domain, "example.com");
        assert_eq!(info.path, "/");
        assert_eq!(info.full_url, "http://example.com/");
    }

    #[test]
    fn test_bare_domain_with_path() {
        let info = resolve("example.com/a/b", None);
        assert_eq!(info.domain, "example.com");
        assert_eq!(info.path, "/a/b");
        assert_eq!(info.full_url, "http://example.com/a/b");
    }

    #[test]
    fn test_root_relative_inherits_protocol_and_domain() {
        let root = resolve("https://example.com/", None);
        let info = resolve("/about", Some(&root));
        assert_eq!(info.protocol, "https");
        assert_eq!(info.domain, "example.com");
        assert_eq!(info.path, "/about");
        assert_eq!(info.full_url, "https://example.com/about");
        assert_eq!(info.follow, Some(true));
    }

    #[test]
    fn test_bare_slash_resolves_to_root() {
        let info = resolve("/", Some(&root()));
        assert_eq!(info.full_url, "http://example.com/");
        assert_eq!(info.follow, Some(true));
    }

    #[test]
    fn test_protocol_relative_reference() {
        let info = resolve("//cdn.example.com/lib.js", Some(&root()));
        assert_eq!(info.protocol, "http");
        assert_eq!(info.domain, "cdn.example.com");
        assert_eq!(info.path, "/lib.js");
        assert_eq!(info.follow, Some(false));
    }

    #[test]
    fn test_anchor_only_reference() {
        let info = resolve("#section", Some(&root()));
        assert_eq!(info.follow, Some(false));
        assert_eq!(info.full_url, "http://example.com/#section");
        assert_eq!(info.anchor, "section");
    }

    #[test]
    fn test_anchor_is_stripped_from_full_url() {
        let info = resolve("http://example.com/page#top", Some(&root()));
        assert_eq!(info.full_url, "http://example.com/page");
        assert_eq!(info.path, "/page");
        assert_eq!(info.anchor, "top");
    }

    #[test]
    fn test_only_first_hash_separates_anchor() {
        let info = resolve("http://example.com/page#a#b", Some(&root()));
        assert_eq!(info.path, "/page");
        assert_eq!(info.full_url, "http://example.com/page");
        assert_eq!(info.anchor, "a#b");
    }

    #[test]
    fn test_off_domain_not_followed() {
        let info = resolve("https://other.com/x", Some(&root()));
        assert_eq!(info.domain, "other.com");
        assert_eq!(info.follow, Some(false));
    }

    #[test]
    fn test_follow_ignores_scheme() {
        // https variant of the root domain is still followed, even though
        // its full_url dedups under a different key
        let info = resolve("https://example.com/secure", Some(&root()));
        assert_eq!(info.follow, Some(true));
        assert_eq!(info.full_url, "https://example.com/secure");
    }

    #[test]
    fn test_root_descriptor_has_no_follow() {
        assert_eq!(root().follow, None);
    }

    #[test]
    fn test_empty_reference() {
        let info = resolve("", Some(&root()));
        assert_eq!(info.domain, "");
        assert_eq!(info.path, "/");
        assert_eq!(info.follow, Some(false));
    }

    #[test]
    fn test_missing_path_defaults_to_slash() {
        let info = resolve("http://example.com", Some(&root()));
        assert_eq!(info.path, "/");
        assert_eq!(info.full_url, "http://example.com/");
        assert_eq!(info.follow, Some(true));
    }

    #[test]
    fn test_empty_protocol_prefix_defaults_to_http() {
        let info = resolve("://example.com/x", Some(&root()));
        assert_eq!(info.protocol, "http");
        assert_eq!(info.domain, "example.com");
    }

    #[test]
    fn test_relative_references_keep_root_scheme() {
        let https_root = resolve("https://example.com/", None);
        for reference in ["/a", "/a/b#frag", "/"] {
            let info = resolve(reference, Some(&https_root));
            assert_eq!(info.protocol, "https");
            assert_eq!(info.domain, "example.com");
            assert_eq!(info.follow, Some(true));
        }
    }
}
