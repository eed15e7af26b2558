use std::collections::HashSet;

use tracing::{debug, info, warn};
use url::Url;

use crate::{downloader::Downloader, parser::Parser, resolver};

/// A breadth-first crawler that stays on the origin of every page it fetches.
/// Each level is drained completely before the next one starts.
#[derive(Debug)]
pub(crate) struct Crawler {
    downloader: Downloader,
    max_depth: usize,
}

impl Crawler {
    /// Create a new crawler that follows links at most `max_depth` levels away from the seed.
    pub(crate) fn new(downloader: Downloader, max_depth: usize) -> Self {
        Self {
            downloader,
            max_depth,
        }
    }

    /// Crawl starting from `seed` and return every address that was fetched or attempted.
    /// An address is fetched at most once, no matter how often it is linked.
    pub(crate) async fn crawl(&self, seed: Url) -> HashSet<Url> {
        let mut visited = HashSet::new();
        let mut level = HashSet::from([seed]);

        for depth in 0..=self.max_depth {
            if level.is_empty() {
                break;
            }
            info!("Crawling level {} with {} urls", depth, level.len());

            let mut next = HashSet::new();
            for url in level {
                // Failed fetches count as visited too, they are never retried.
                if !visited.insert(url.clone()) {
                    continue;
                }

                for link in self.links(&url).await {
                    if !visited.contains(&link) {
                        next.insert(link);
                    }
                }
            }

            level = next;
        }

        info!("Crawl finished with {} urls", visited.len());
        visited
    }

    /// Download `url` and return the same-origin links found on it. A failed download
    /// yields no links.
    async fn links(&self, url: &Url) -> Vec<Url> {
        debug!("Fetching {}", url);

        let page = match self.downloader.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to download url {}: {}", url, e);
                return Vec::new();
            }
        };

        if !page.is_html {
            debug!("Skipping non-HTML page {}", page.url);
            return Vec::new();
        }

        let origin = match page.origin() {
            Some(origin) => origin,
            None => return Vec::new(),
        };
        if page.url != *url {
            debug!("{} redirected to {}", url, page.url);
        }

        let parser = Parser::new(&page.body);
        let links: Vec<_> = parser.links().collect();
        let urls = resolver::resolve(&links, &origin);
        debug!(
            "Found {} links on {}, {} under {}",
            links.len(),
            page.url,
            urls.len(),
            origin
        );

        urls
    }
}
