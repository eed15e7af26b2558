use scraper::{ElementRef, Html, Selector};

/// An anchor as it was found in the HTML: the raw `href` value and the visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawLink {
    pub(crate) href: String,
    pub(crate) text: String,
}

/// HTML parser
#[derive(Debug)]
pub(crate) struct Parser {
    selector: Selector,
    html: Html,
}

impl Parser {
    /// Create a new parser for `html`. Malformed markup is parsed on a best-effort basis.
    pub(crate) fn new(html: &str) -> Self {
        Self {
            selector: Selector::parse("a[href]").expect("`a[href]` is a valid selector"),
            html: Html::parse_document(html),
        }
    }

    /// Returns an iterator over the anchors in the parsed HTML.
    pub(crate) fn links(&self) -> impl Iterator<Item = RawLink> + '_ {
        self.html.select(&self.selector).filter_map(|el| {
            let href = el.value().attr("href")?;
            Some(RawLink {
                href: href.to_string(),
                text: text(el),
            })
        })
    }
}

/// Text of all descendants, whitespace collapsed.
fn text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
