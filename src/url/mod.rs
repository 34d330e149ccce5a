//! URL handling module for Robots-Gate
//!
//! This module turns caller-supplied targets into the pieces the policy layer
//! needs: the host key a policy is cached under, the request path matched
//! against `Allow`/`Disallow` patterns, and the location of the host's
//! robots.txt.

mod domain;
mod path;

// Re-export main functions
pub use domain::host_key;
pub use path::{request_path, robots_url};

use crate::UrlResult;
use url::Url;

/// Parses a target URL string
///
/// # Errors
///
/// Returns `UrlError::Parse` if the string is not an absolute URL.
///
/// # Examples
///
/// ```
/// use robots_gate::url::parse_target;
///
/// let url = parse_target("https://example.com/page").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
/// assert!(parse_target("not a url").is_err());
/// ```
pub fn parse_target(raw: &str) -> UrlResult<Url> {
    Ok(Url::parse(raw.trim())?)
}
