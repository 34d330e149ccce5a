use crate::UrlResult;
use url::{Position, Url};

/// Returns the request path matched against robots.txt rules
///
/// This is the path plus the query string (if any); the fragment is never
/// sent to a server and is dropped. An empty path becomes `/`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use robots_gate::url::request_path;
///
/// let url = Url::parse("https://example.com/search?q=rust#top").unwrap();
/// assert_eq!(request_path(&url), "/search?q=rust");
/// ```
pub fn request_path(url: &Url) -> String {
    let path = &url[Position::BeforePath..Position::AfterQuery];
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves the robots.txt location for a URL's scheme and authority
///
/// # Errors
///
/// Returns `UrlError::Parse` if the URL cannot serve as a base (e.g. `data:`).
pub fn robots_url(url: &Url) -> UrlResult<Url> {
    Ok(url.join("/robots.txt")?)
}
