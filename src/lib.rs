//! Robots-Gate: robots.txt permission checks for polite crawlers
//!
//! This crate answers one question for a crawler: given a URL and the
//! crawler's user agent, may the URL be fetched, and how long must the crawler
//! wait before hitting the same site again? Policies are fetched once per host,
//! parsed, cached for the lifetime of a [`Robots`] instance, and any
//! `Crawl-delay` they declare is enforced by blocking the caller.

pub mod config;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Robots-Gate operations
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Errors raised while retrieving a robots.txt document
///
/// These never cross the public permission-check boundary: the fetcher logs
/// them and falls back to the permissive default policy.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Unexpected content type {content_type:?} for {url}")]
    ContentType { url: String, content_type: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),
}

/// Result type alias for Robots-Gate operations
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use robots::{PathPattern, PolicySet, Robots, RobotsDocument, RuleGroup};
pub use state::AccessState;
