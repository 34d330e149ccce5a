//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching
//! robots.txt files, and for enforcing the crawl delays they declare.
//!
//! [`Robots`] is the entry point: it resolves one policy per host, answers
//! permission checks against it and throttles allowed accesses.

mod cache;
mod fetch;
mod matcher;
mod parser;
mod pattern;
mod throttle;

pub use cache::{CachedPolicy, HostCache};
pub use fetch::{HttpFetcher, RobotsDocument, RobotsFetcher};
pub use matcher::is_allowed;
pub use parser::{OtherDirectives, PolicySet, RuleGroup};
pub use pattern::PathPattern;
pub use throttle::{apply_delay, Clock, ManualClock, SystemClock};

use crate::config::Config;
use crate::url::{host_key, parse_target, request_path};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Fetches robots.txt for the host of `target`
///
/// Convenience wrapper around a one-off [`HttpFetcher`].
///
/// # Returns
///
/// * `Some(RobotsDocument)` - A 200 `text/plain` response
/// * `None` - On timeout, transport error, wrong status or content type
pub fn fetch_robots(target: &Url, user_agent: &str, timeout: Duration) -> Option<RobotsDocument> {
    match HttpFetcher::new(timeout) {
        Ok(fetcher) => fetcher.fetch(target, user_agent),
        Err(e) => {
            warn!("Failed to build HTTP client: {}", e);
            None
        }
    }
}

/// Per-crawler robots.txt gate
///
/// Owns the host cache, so every host's policy is resolved at most once per
/// instance and crawl-delay state is scoped to the instance. Methods take
/// `&mut self`; share an instance across threads behind a lock, or give each
/// worker its own (delays are then enforced per worker, not globally).
///
/// # Example
///
/// ```no_run
/// use robots_gate::Robots;
///
/// let mut robots = Robots::new("ExampleBot/1.0").unwrap();
/// if robots.is_allowed("https://example.com/page") {
///     // fetch the page
/// }
/// let sitemaps = robots.other_values("https://example.com/").remove("Sitemap");
/// ```
#[derive(Debug)]
pub struct Robots<F = HttpFetcher, C = SystemClock> {
    user_agent: String,
    fetcher: F,
    clock: C,
    prefetched: Option<RobotsDocument>,
    cache: HostCache,
}

impl Robots {
    /// Creates a gate fetching over HTTP with the default 3 second timeout
    ///
    /// # Errors
    ///
    /// Returns `RobotsError::Fetch` if the HTTP client cannot be built.
    pub fn new(user_agent: &str) -> crate::Result<Self> {
        let fetcher = HttpFetcher::new(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))?;
        Ok(Self::with_parts(user_agent, fetcher, SystemClock))
    }

    /// Creates a gate from a loaded configuration
    ///
    /// The user agent is [`crate::config::UserAgentConfig::header_value`] and
    /// the fetch timeout comes from the `[fetch]` section.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.fetch)?;
        Ok(Self::with_parts(
            &config.user_agent.header_value(),
            fetcher,
            SystemClock,
        ))
    }
}

impl<F: RobotsFetcher, C: Clock> Robots<F, C> {
    /// Creates a gate from an explicit fetcher and clock
    pub fn with_parts(user_agent: &str, fetcher: F, clock: C) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            fetcher,
            clock,
            prefetched: None,
            cache: HostCache::new(),
        }
    }

    /// Supplies a robots.txt document obtained out of band
    ///
    /// If the document is a 200 `text/plain` response it is used instead of
    /// a network fetch for every host this instance resolves; otherwise it
    /// is discarded and hosts are fetched normally.
    pub fn with_prefetched(mut self, document: RobotsDocument) -> Self {
        match document.validate("<prefetched>") {
            Ok(()) => self.prefetched = Some(document),
            Err(e) => warn!("Ignoring prefetched robots.txt: {}", e),
        }
        self
    }

    /// The agent string sent to servers and matched against `User-agent`
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Number of hosts whose policy has been resolved
    pub fn cached_hosts(&self) -> usize {
        self.cache.len()
    }

    /// Checks if a URL may be fetched, blocking for any crawl delay
    ///
    /// A string that does not parse as a URL with a host is logged and
    /// treated as allowed; crawling is never blocked by the gate itself.
    pub fn is_allowed(&mut self, url: &str) -> bool {
        match parse_target(url) {
            Ok(url) => self.is_allowed_url(&url),
            Err(e) => {
                warn!("Cannot check robots.txt for {:?}: {}", url, e);
                true
            }
        }
    }

    /// Checks if a parsed URL may be fetched, blocking for any crawl delay
    ///
    /// # Flow
    ///
    /// 1. Resolve the host's policy (cached after the first call)
    /// 2. Match the request path against every applicable group
    /// 3. If allowed, wait out the applicable `Crawl-delay`
    pub fn is_allowed_url(&mut self, url: &Url) -> bool {
        let host = match host_key(url) {
            Ok(host) => host,
            Err(e) => {
                warn!("Cannot check robots.txt for {}: {}", url, e);
                return true;
            }
        };

        let path = request_path(url);
        let user_agent = &self.user_agent;
        let fetcher = &self.fetcher;
        let prefetched = self.prefetched.as_ref();
        let entry = self.cache.get_or_resolve(&host, || {
            debug!("Resolving robots.txt for host {}", host);
            resolve_policy(fetcher, prefetched, url, user_agent)
        });

        let allowed = is_allowed(&entry.policy, &path, user_agent);
        if allowed {
            apply_delay(&entry.policy, &mut entry.access, user_agent, &self.clock);
        } else {
            debug!("{} disallowed by robots.txt for {}", path, host);
        }
        allowed
    }

    /// Returns the non-standard directives declared for the URL's host
    ///
    /// Unparseable URLs yield an empty map.
    pub fn other_values(&mut self, url: &str) -> OtherDirectives {
        match parse_target(url) {
            Ok(url) => self.other_values_url(&url),
            Err(e) => {
                warn!("Cannot read robots.txt for {:?}: {}", url, e);
                OtherDirectives::new()
            }
        }
    }

    /// Returns the non-standard directives declared for a parsed URL's host
    pub fn other_values_url(&mut self, url: &Url) -> OtherDirectives {
        let host = match host_key(url) {
            Ok(host) => host,
            Err(e) => {
                warn!("Cannot read robots.txt for {}: {}", url, e);
                return OtherDirectives::new();
            }
        };

        let user_agent = &self.user_agent;
        let fetcher = &self.fetcher;
        let prefetched = self.prefetched.as_ref();
        self.cache
            .get_or_resolve(&host, || {
                debug!("Resolving robots.txt for host {}", host);
                resolve_policy(fetcher, prefetched, url, user_agent)
            })
            .policy
            .other_values()
            .clone()
    }
}

/// Produces the policy for a host on a cache miss
fn resolve_policy<F: RobotsFetcher>(
    fetcher: &F,
    prefetched: Option<&RobotsDocument>,
    url: &Url,
    user_agent: &str,
) -> PolicySet {
    let document = match prefetched {
        Some(document) => {
            debug!("Using prefetched robots.txt for {}", url);
            Some(document.clone())
        }
        None => fetcher.fetch(url, user_agent),
    };

    match document.filter(RobotsDocument::is_usable) {
        Some(document) => PolicySet::parse(&document.body),
        None => {
            debug!("No robots.txt for {}, allowing all", url);
            PolicySet::default_allow_all()
        }
    }
}
