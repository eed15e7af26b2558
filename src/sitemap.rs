use std::collections::HashSet;

use quick_xml::se::Serializer;
use serde::Serialize;
use url::Url;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<Location<'a>>,
}

#[derive(Debug, Serialize)]
struct Location<'a> {
    loc: &'a str,
}

/// Render `urls` as a sitemap document, one `<url>` record per address.
/// Records are sorted so the same crawl always produces the same document.
pub(crate) fn emit(urls: &HashSet<Url>) -> anyhow::Result<String> {
    let mut sorted: Vec<&Url> = urls.iter().collect();
    sorted.sort();

    let urlset = UrlSet {
        xmlns: XMLNS,
        urls: sorted
            .into_iter()
            .map(|url| Location { loc: url.as_str() })
            .collect(),
    };

    let mut document = String::from(XML_HEADER);
    document.push('\n');

    let mut serializer = Serializer::new(&mut document);
    serializer.indent(' ', 2);
    urlset.serialize(serializer)?;

    document.push('\n');
    Ok(document)
}
