use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Cli, Config};
use crawler::Crawler;
use downloader::Downloader;

mod config;
mod crawler;
mod downloader;
mod parser;
mod resolver;
mod sitemap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for the sitemap.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    let config = Config::try_from(Cli::parse())?;
    info!(
        "Building sitemap for {} with depth {}",
        config.seed, config.max_depth
    );

    let downloader = Downloader::new(config.timeout)?;
    let crawler = Crawler::new(downloader, config.max_depth);
    let urls = crawler.crawl(config.seed).await;

    println!("{}", sitemap::emit(&urls)?);

    Ok(())
}
