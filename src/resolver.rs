use std::fmt;

use tracing::trace;
use url::Url;

use crate::parser::RawLink;

/// Schemes the downloader knows how to fetch.
const FETCHABLE_SCHEMES: [&str; 2] = ["http", "https"];

/// The scheme + host (+ port) of a fetched page. Links found on the page are only kept
/// when they live under the same origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Origin {
    base: Url,
}

impl Origin {
    /// Compute the origin of `url`. Returns `None` for URLs without a host, like `mailto:`.
    pub(crate) fn of(url: &Url) -> Option<Self> {
        if !url.has_host() {
            return None;
        }

        let mut base = url.clone();
        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);
        // Cannot fail for URLs that have a host.
        let _ = base.set_username("");
        let _ = base.set_password(None);

        Some(Self { base })
    }

    /// Returns `true` if `url` has exactly this origin.
    pub(crate) fn contains(&self, url: &Url) -> bool {
        url.origin() == self.base.origin()
    }

    /// Join a root-relative (or scheme-relative) `href` onto this origin.
    fn join(&self, href: &str) -> Option<Url> {
        self.base.join(href).ok()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base.origin().ascii_serialization())
    }
}

/// Turn the raw hrefs found on a page into absolute addresses under `origin`.
/// Anything that is not root-relative or an absolute http(s) URL is dropped, as is every
/// address belonging to a different origin.
pub(crate) fn resolve<'a, I>(links: I, origin: &Origin) -> Vec<Url>
where
    I: IntoIterator<Item = &'a RawLink>,
{
    links
        .into_iter()
        .filter_map(|link| {
            let url = absolute_url(origin, link.href.trim());
            if url.is_none() {
                trace!("Discarding href {:?} ({:?})", link.href, link.text);
            }
            url
        })
        .filter(|url| {
            let same_origin = origin.contains(url);
            if !same_origin {
                trace!("Different origin: {}", url);
            }
            same_origin
        })
        .collect()
}

fn absolute_url(origin: &Origin, href: &str) -> Option<Url> {
    let mut url = if href.starts_with('/') {
        origin.join(href)?
    } else if href.starts_with("http") {
        Url::parse(href).ok()?
    } else {
        return None;
    };

    if !FETCHABLE_SCHEMES.contains(&url.scheme()) {
        return None;
    }

    // Fragments never reach the server, so they point at the same page.
    url.set_fragment(None);

    Some(url)
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{resolve, Origin};
    use crate::parser::RawLink;

    fn raw(hrefs: &[&str]) -> Vec<RawLink> {
        hrefs
            .iter()
            .map(|href| RawLink {
                href: href.to_string(),
                text: String::new(),
            })
            .collect()
    }

    fn origin(url: &str) -> Origin {
        Origin::of(&Url::parse(url).unwrap()).unwrap()
    }

    fn urls(urls: &[&str]) -> Vec<Url> {
        urls.iter().map(|url| Url::parse(url).unwrap()).collect()
    }

    #[test]
    fn test_keeps_same_origin_links() {
        let links = raw(&[
            "/about",
            "https://example.com/contact",
            "https://other.com/x",
            "mailto:a@b.com",
        ]);

        let resolved = resolve(&links, &origin("https://example.com"));

        assert_eq!(
            resolved,
            urls(&["https://example.com/about", "https://example.com/contact"])
        );
    }

    #[test]
    fn test_discards_non_navigable_hrefs() {
        let links = raw(&[
            "",
            "#top",
            "javascript:void(0)",
            "tel:+123",
            "relative/page.html",
            "httpfoo:bar",
            "ftp://example.com/file",
        ]);

        assert!(resolve(&links, &origin("https://example.com")).is_empty());
    }

    #[test]
    fn test_scheme_relative_links_are_origin_filtered() {
        let links = raw(&["//example.com/same", "//cdn.example.com/asset"]);

        let resolved = resolve(&links, &origin("https://example.com/some/page"));

        assert_eq!(resolved, urls(&["https://example.com/same"]));
    }

    #[test]
    fn test_origin_includes_scheme_and_port() {
        let links = raw(&[
            "http://example.com/plain",
            "https://example.com:8443/port",
            "https://example.com.evil.org/lookalike",
            "https://example.com/ok?a=1&b=2",
        ]);

        let resolved = resolve(&links, &origin("https://example.com"));

        assert_eq!(resolved, urls(&["https://example.com/ok?a=1&b=2"]));
    }

    #[test]
    fn test_strips_fragments_and_keeps_duplicates() {
        let links = raw(&["/a#one", "/a#two", " /b "]);

        let resolved = resolve(&links, &origin("https://example.com"));

        assert_eq!(
            resolved,
            urls(&[
                "https://example.com/a",
                "https://example.com/a",
                "https://example.com/b"
            ])
        );
    }

    #[test]
    fn test_collapses_dot_segments() {
        let links = raw(&[
            "/a/../b",
            "/b",
            "/x/./y",
            "https://example.com/p/q/../r",
        ]);

        let resolved = resolve(&links, &origin("https://example.com"));

        assert_eq!(
            resolved,
            urls(&[
                "https://example.com/b",
                "https://example.com/b",
                "https://example.com/x/y",
                "https://example.com/p/r"
            ])
        );
    }

    #[test]
    fn test_resolve_is_pure() {
        let links = raw(&["/x", "https://example.com/y", "https://nope.com/"]);
        let origin = origin("https://example.com");

        assert_eq!(resolve(&links, &origin), resolve(&links, &origin));
    }

    #[test]
    fn test_origin() {
        let url = Url::parse("https://user:pw@example.com:8080/path?q=1#frag").unwrap();
        let origin = Origin::of(&url).unwrap();

        assert_eq!(origin.to_string(), "https://example.com:8080");
        assert!(origin.contains(&Url::parse("https://example.com:8080/other").unwrap()));
        assert!(!origin.contains(&Url::parse("https://example.com/other").unwrap()));

        assert!(Origin::of(&Url::parse("mailto:a@b.com").unwrap()).is_none());
    }
}
