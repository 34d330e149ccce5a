//! Robots.txt parser implementation
//!
//! Parsing is a sequential dispatch over directive lines with a single
//! "current agent" pointer. A `User-agent` line moves the pointer; every
//! `Allow`, `Disallow` and `Crawl-delay` line after it lands in that agent's
//! group until the next `User-agent` line. Blank lines do not close a group.

use crate::robots::pattern::PathPattern;
use std::collections::HashMap;
use tracing::trace;

/// Directives without special meaning, keyed by their exact keyword
pub type OtherDirectives = HashMap<String, Vec<String>>;

/// The rules declared for one agent pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup {
    agent: PathPattern,
    allows: Vec<PathPattern>,
    disallows: Vec<PathPattern>,
    crawl_delay: Option<u64>,
}

impl RuleGroup {
    fn new(agent: PathPattern) -> Self {
        Self {
            agent,
            allows: Vec::new(),
            disallows: Vec::new(),
            crawl_delay: None,
        }
    }

    /// The agent pattern this group is declared for
    pub fn agent(&self) -> &PathPattern {
        &self.agent
    }

    /// `Allow` patterns in declaration order
    pub fn allows(&self) -> &[PathPattern] {
        &self.allows
    }

    /// `Disallow` patterns in declaration order
    pub fn disallows(&self) -> &[PathPattern] {
        &self.disallows
    }

    /// The last `Crawl-delay` declared for this group, in seconds
    pub fn crawl_delay(&self) -> Option<u64> {
        self.crawl_delay
    }

    /// Returns true if this group governs the given agent string
    pub fn applies_to(&self, user_agent: &str) -> bool {
        self.agent.matches(user_agent)
    }
}

/// The parsed form of one robots.txt document
///
/// Built once per host and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySet {
    groups: Vec<RuleGroup>,
    other: OtherDirectives,
}

impl PolicySet {
    /// Parses robots.txt content
    ///
    /// Parsing never fails. Comment and blank lines are skipped, lines without
    /// a colon are treated as a keyword with an empty value, and unknown
    /// keywords are collected verbatim in [`PolicySet::other_values`].
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_gate::PolicySet;
    ///
    /// let policy = PolicySet::parse("User-agent: *\nDisallow: /private\nSitemap: https://x/s.xml");
    /// assert!(!policy.is_allowed("/private/x", "AnyBot"));
    /// assert!(policy.is_allowed("/public", "AnyBot"));
    /// assert_eq!(policy.other_values()["Sitemap"], vec!["https://x/s.xml"]);
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut builder = PolicyBuilder::new();
        for line in content.lines() {
            if let Some(directive) = Directive::parse_line(line) {
                builder.apply(directive);
            }
        }

        let policy = builder.finish();
        trace!(
            groups = policy.groups.len(),
            other = policy.other.len(),
            "Parsed robots.txt"
        );
        policy
    }

    /// Creates the permissive policy used when no document can be obtained
    ///
    /// Equivalent to parsing `User-agent: *` followed by `Allow: /`.
    pub fn default_allow_all() -> Self {
        Self::parse("User-agent: *\nAllow: /\n")
    }

    /// Rule groups in the order their first directive appeared
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Groups whose agent pattern matches the given agent string
    pub fn matching_groups<'a>(
        &'a self,
        user_agent: &'a str,
    ) -> impl Iterator<Item = &'a RuleGroup> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.applies_to(user_agent))
    }

    /// Directives without special meaning (e.g. `Sitemap`)
    pub fn other_values(&self) -> &OtherDirectives {
        &self.other
    }

    /// Gets the crawl delay for a specific user agent
    ///
    /// Every group whose pattern matches the agent string is consulted; when
    /// several declare a delay, the largest one wins.
    ///
    /// # Returns
    ///
    /// * `Some(u64)` - The crawl delay in seconds
    /// * `None` - If no applicable group declares one
    pub fn crawl_delay(&self, user_agent: &str) -> Option<u64> {
        self.matching_groups(user_agent)
            .filter_map(RuleGroup::crawl_delay)
            .max()
    }

    /// Checks whether `path` may be fetched by `user_agent`
    ///
    /// See [`crate::robots::is_allowed`] for the precedence rules.
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        crate::robots::matcher::is_allowed(self, path, user_agent)
    }
}

/// One meaningful line of a robots.txt document
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    UserAgent(&'a str),
    Allow(&'a str),
    Disallow(&'a str),
    CrawlDelay(u64),
    Other { key: &'a str, value: &'a str },
}

impl<'a> Directive<'a> {
    /// Classifies a line, or returns `None` for blank and comment lines
    fn parse_line(line: &'a str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let (key, value) = match trimmed.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (trimmed.trim_end(), ""),
        };

        Some(match key {
            "User-agent" => Directive::UserAgent(value),
            "Allow" => Directive::Allow(value),
            "Disallow" => Directive::Disallow(value),
            "Crawl-delay" => Directive::CrawlDelay(parse_delay(value)),
            _ => Directive::Other { key, value },
        })
    }
}

/// Parses a `Crawl-delay` value
///
/// Leading decimal digits are honoured (`"10.5"` is 10 seconds); anything
/// else, including negative numbers, is a zero delay.
fn parse_delay(value: &str) -> u64 {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

/// Accumulates groups while the document is read
struct PolicyBuilder {
    groups: Vec<RuleGroup>,
    other: OtherDirectives,
    current_agent: PathPattern,
    current_group: Option<usize>,
}

impl PolicyBuilder {
    fn new() -> Self {
        // Rules before the first User-agent line apply to every agent
        Self {
            groups: Vec::new(),
            other: OtherDirectives::new(),
            current_agent: PathPattern::any(),
            current_group: None,
        }
    }

    fn apply(&mut self, directive: Directive<'_>) {
        match directive {
            Directive::UserAgent(value) => {
                let agent = PathPattern::compile(value);
                self.current_group = self.groups.iter().position(|group| group.agent == agent);
                self.current_agent = agent;
            }
            Directive::Allow(value) => {
                self.current_group().allows.push(PathPattern::compile(value));
            }
            Directive::Disallow(value) => {
                self.current_group()
                    .disallows
                    .push(PathPattern::compile(value));
            }
            Directive::CrawlDelay(seconds) => {
                self.current_group().crawl_delay = Some(seconds);
            }
            Directive::Other { key, value } => {
                self.other
                    .entry(key.to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
    }

    /// Returns the group for the current agent, creating it on first use
    fn current_group(&mut self) -> &mut RuleGroup {
        let index = match self.current_group {
            Some(index) => index,
            None => {
                self.groups.push(RuleGroup::new(self.current_agent.clone()));
                let index = self.groups.len() - 1;
                self.current_group = Some(index);
                index
            }
        };
        &mut self.groups[index]
    }

    fn finish(self) -> PolicySet {
        PolicySet {
            groups: self.groups,
            other: self.other,
        }
    }
}
