use crate::{UrlError, UrlResult};
use url::Url;

/// Derives the key a robots.txt policy is cached under
///
/// The key is the lowercase host, followed by `:port` when the URL names a
/// non-default port. Two URLs share a policy exactly when they share a key.
///
/// # Errors
///
/// Returns `UrlError::MissingHost` for URLs without a host (e.g. `mailto:`).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use robots_gate::url::host_key;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(host_key(&url).unwrap(), "example.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(host_key(&url).unwrap(), "127.0.0.1:8080");
/// ```
pub fn host_key(url: &Url) -> UrlResult<String> {
    let host = url
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))?
        .to_lowercase();

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
