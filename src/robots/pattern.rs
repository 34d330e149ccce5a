//! Wildcard path patterns
//!
//! Every `Allow`, `Disallow` and `User-agent` value is compiled into a
//! [`PathPattern`]. A pattern is anchored at the start of the subject and open
//! at the end; `*` matches any run of characters (including none). No other
//! character is special, so `$`, `.` or `?` in a rule match themselves.

const WILDCARD: char = '*';

/// A compiled, start-anchored wildcard matcher
///
/// Matching splits the literal on `*` into segments. The first segment must
/// be a prefix of the subject; each following segment is searched for, left
/// to right, after the end of the previous one. Because nothing anchors the
/// end, taking the leftmost occurrence of each segment is always sufficient,
/// so matching is linear in the subject length per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Compiled from a blank literal: matches no subject at all
    Nothing,
    /// Literal segments separated by wildcards
    Segments(Vec<String>),
}

impl PathPattern {
    /// Compiles a directive value into a pattern
    ///
    /// The literal is trimmed first. A blank literal yields a pattern that
    /// never matches, so an empty `Disallow:` can never become a blanket rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_gate::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/*.pdf");
    /// assert!(pattern.matches("/docs/report.pdf"));
    /// assert!(!pattern.matches("/docs/report.html"));
    ///
    /// assert!(PathPattern::compile("/foo").matches("/foobar"));
    /// assert!(!PathPattern::compile("").matches("/"));
    /// ```
    pub fn compile(literal: &str) -> Self {
        let source = literal.trim();
        let kind = if source.is_empty() {
            Kind::Nothing
        } else {
            Kind::Segments(source.split(WILDCARD).map(str::to_string).collect())
        };

        Self {
            source: source.to_string(),
            kind,
        }
    }

    /// A pattern that matches every subject, equivalent to `compile("*")`
    pub fn any() -> Self {
        Self::compile("*")
    }

    /// Returns the trimmed literal this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern can never match anything
    pub fn matches_nothing(&self) -> bool {
        matches!(self.kind, Kind::Nothing)
    }

    /// Tests the pattern against a subject (a request path or an agent string)
    pub fn matches(&self, subject: &str) -> bool {
        let segments = match &self.kind {
            Kind::Nothing => return false,
            Kind::Segments(segments) => segments,
        };

        let (first, rest) = match segments.split_first() {
            Some(split) => split,
            None => return false,
        };

        let Some(mut remainder) = subject.strip_prefix(first.as_str()) else {
            return false;
        };

        for segment in rest {
            match remainder.find(segment.as_str()) {
                Some(index) => remainder = &remainder[index + segment.len()..],
                None => return false,
            }
        }

        true
    }
}
