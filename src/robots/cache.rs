//! Per-host policy cache
//!
//! Each [`crate::Robots`] owns one cache. Entries are created on first use
//! and live as long as the cache: there is no expiry and no eviction, so a
//! host's robots.txt is fetched at most once per facade.
//!
//! Entries are keyed by the lowercase host plus `:port` when the port is not
//! the scheme default (see [`crate::url::host_key`]). `example.com:8080` and
//! `example.com` therefore resolve and throttle separately, even though a
//! robots.txt nominally covers the whole host.

use crate::robots::parser::PolicySet;
use crate::state::AccessState;
use std::collections::HashMap;

/// A resolved robots.txt policy together with its throttle state
#[derive(Debug, Clone)]
pub struct CachedPolicy {
    /// The parsed robots.txt content
    pub policy: PolicySet,

    /// Last access time, used for crawl-delay throttling
    pub access: AccessState,
}

impl CachedPolicy {
    /// Creates a new CachedPolicy that has never been accessed
    pub fn new(policy: PolicySet) -> Self {
        Self {
            policy,
            access: AccessState::new(),
        }
    }
}

/// Host key -> resolved policy, never evicted
#[derive(Debug, Default)]
pub struct HostCache {
    entries: HashMap<String, CachedPolicy>,
}

impl HostCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `host`, resolving it with `resolve` on a miss
    pub fn get_or_resolve<F>(&mut self, host: &str, resolve: F) -> &mut CachedPolicy
    where
        F: FnOnce() -> PolicySet,
    {
        self.entries
            .entry(host.to_string())
            .or_insert_with(|| CachedPolicy::new(resolve()))
    }

    /// Number of resolved hosts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no host has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
