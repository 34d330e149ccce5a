//! Robots.txt retrieval
//!
//! Retrieval never fails from the caller's point of view: every problem is
//! logged and reported as "no document", which the facade turns into the
//! permissive default policy.

use crate::config::FetchConfig;
use crate::url::robots_url;
use crate::{FetchError, FetchResult};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The only media type accepted for robots.txt
const ROBOTS_MEDIA_TYPE: &str = "text/plain";

/// A robots.txt response: status, content type and body
///
/// Callers that keep robots.txt in their own cache can hand one of these to
/// [`crate::Robots::with_prefetched`] instead of letting the facade fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsDocument {
    /// HTTP status code of the response
    pub status: u16,
    /// Content-Type header value (parameters allowed)
    pub content_type: String,
    /// Response body
    pub body: String,
}

impl RobotsDocument {
    /// Creates a document that looks like a successful `text/plain` response
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            content_type: ROBOTS_MEDIA_TYPE.to_string(),
            body: body.into(),
        }
    }

    /// Checks that the document came from a 200 `text/plain` response
    ///
    /// Only the media type is compared (case-insensitively); parameters such
    /// as `charset=utf-8` are ignored.
    ///
    /// # Errors
    ///
    /// * `FetchError::Status` - The status is anything other than 200
    /// * `FetchError::ContentType` - The media type is not `text/plain`
    pub fn validate(&self, url: &str) -> FetchResult<()> {
        if self.status != StatusCode::OK.as_u16() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: self.status,
            });
        }

        let media_type = self
            .content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        if !media_type.eq_ignore_ascii_case(ROBOTS_MEDIA_TYPE) {
            return Err(FetchError::ContentType {
                url: url.to_string(),
                content_type: self.content_type.clone(),
            });
        }

        Ok(())
    }

    /// Returns true if [`RobotsDocument::validate`] accepts the document
    pub fn is_usable(&self) -> bool {
        self.validate("").is_ok()
    }
}

/// Source of robots.txt documents
pub trait RobotsFetcher {
    /// Retrieves robots.txt for the host of `target`
    ///
    /// Returns `None` when no usable document could be obtained.
    fn fetch(&self, target: &Url, user_agent: &str) -> Option<RobotsDocument>;
}

/// Fetches robots.txt over HTTP with a bounded timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests are abandoned after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Builds a fetcher from the `[fetch]` configuration section
    pub fn from_config(config: &FetchConfig) -> FetchResult<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }

    /// The per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches and validates robots.txt, reporting why it failed
    ///
    /// # Request Flow
    ///
    /// 1. Resolve `/robots.txt` against the target's scheme and authority
    /// 2. `GET` it with the given `User-Agent`
    /// 3. Require status 200 and a `text/plain` content type
    pub fn try_fetch(&self, target: &Url, user_agent: &str) -> FetchResult<RobotsDocument> {
        let url = robots_url(target)?;
        let url_str = url.to_string();
        debug!("Fetching robots.txt: {}", url_str);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .map_err(|e| classify_error(&url_str, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().map_err(|e| classify_error(&url_str, e))?;

        let document = RobotsDocument {
            status,
            content_type,
            body,
        };
        document.validate(&url_str)?;
        Ok(document)
    }
}

impl RobotsFetcher for HttpFetcher {
    fn fetch(&self, target: &Url, user_agent: &str) -> Option<RobotsDocument> {
        match self.try_fetch(target, user_agent) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("robots.txt unavailable, allowing all: {}", e);
                None
            }
        }
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
