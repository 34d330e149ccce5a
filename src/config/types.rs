use serde::Deserialize;

/// Default timeout for fetching robots.txt, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Main configuration structure for Robots-Gate
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Builds a configuration for a bare crawler name with default settings
    ///
    /// The version defaults to `1.0` and no contact details are attached, so
    /// the resulting user agent is `Name/1.0`.
    pub fn from_user_agent(crawler_name: &str) -> Self {
        Self {
            user_agent: UserAgentConfig {
                crawler_name: crawler_name.to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: None,
                contact_email: None,
            },
            fetch: FetchConfig::default(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: Option<String>,
}

impl UserAgentConfig {
    /// Formats the user agent string
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
    /// parenthesised part reduced to whatever contact details are present.
    /// The same string is sent as the `User-Agent` header and matched against
    /// `User-agent` lines in robots.txt.
    pub fn header_value(&self) -> String {
        let product = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", product, url, email),
            (Some(url), None) => format!("{} (+{})", product, url),
            (None, Some(email)) => format!("{} ({})", product, email),
            (None, None) => product,
        }
    }
}

/// Robots.txt retrieval configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Upper bound for the whole robots.txt request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
