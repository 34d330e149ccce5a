//! Allow/Disallow evaluation
//!
//! Precedence is deliberately simple: any applicable `Allow` overrides any
//! applicable `Disallow`, regardless of declaration order or how specific the
//! patterns are. This is not the longest-match rule some crawlers use.

use crate::robots::parser::PolicySet;

/// Checks if a path is allowed for the given user agent
///
/// Every group whose agent pattern matches `user_agent` takes part, not just
/// the most specific one. The path is disallowed if any applicable
/// `Disallow` pattern matches it and no applicable `Allow` pattern does.
///
/// # Arguments
///
/// * `policy` - The parsed robots.txt data
/// * `path` - The request path to check (e.g., "/page.html?x=1")
/// * `user_agent` - The user agent string
///
/// # Returns
///
/// * `true` - If the path is allowed
/// * `false` - If the path is disallowed
pub fn is_allowed(policy: &PolicySet, path: &str, user_agent: &str) -> bool {
    let disallowed = policy
        .matching_groups(user_agent)
        .flat_map(|group| group.disallows())
        .any(|pattern| pattern.matches(path));

    if !disallowed {
        return true;
    }

    policy
        .matching_groups(user_agent)
        .flat_map(|group| group.allows())
        .any(|pattern| pattern.matches(path))
}
