use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("invalid seed url {0:?}: {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("unsupported scheme {0:?}, only http and https can be crawled")]
    UnsupportedScheme(String),
    #[error("depth must not be negative, got {0}")]
    NegativeDepth(i64),
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Command line flags.
#[derive(Debug, Parser)]
#[command(version, about = "Crawl a website and print a sitemap of its pages")]
pub(crate) struct Cli {
    /// URL to build the sitemap for
    #[arg(long, default_value = "https://gophercises.com/")]
    pub(crate) url: String,

    /// Number of link levels to follow from the seed
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub(crate) depth: i64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    pub(crate) timeout: u64,
}

/// Validated crawl configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) seed: Url,
    pub(crate) max_depth: usize,
    pub(crate) timeout: Duration,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let seed = Url::parse(&cli.url)
            .map_err(|e| ConfigError::InvalidUrl(cli.url.clone(), e))?;

        if !matches!(seed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(seed.scheme().to_string()));
        }

        let max_depth = usize::try_from(cli.depth)
            .map_err(|_| ConfigError::NegativeDepth(cli.depth))?;

        if cli.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            seed,
            max_depth,
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}
