//! Splitting of principal lists into user and group references.
//!
//! Both group definitions (`@devs = alice @interns`) and permission lines
//! (`RW = alice @devs`) end in the same whitespace-separated list. The
//! classifier only tags tokens; resolving them against the user and group
//! tables is left to the caller, so both call sites end up pointing at the
//! same entities by name.

use crate::types::Principal;

/// Classify every whitespace-separated token of `raw`.
///
/// `@name` becomes a group reference, anything else a user reference. An
/// empty or blank input yields no principals.
pub fn classify(raw: &str) -> Vec<Principal> {
    raw.split_whitespace().filter_map(classify_token).collect()
}

/// Classify a single token. A bare `@` names nothing and is skipped.
pub fn classify_token(token: &str) -> Option<Principal> {
    let token = token.trim();
    match token.strip_prefix('@') {
        Some(group) => {
            let group = group.trim();
            (!group.is_empty()).then(|| Principal::group(group))
        }
        None if token.is_empty() => None,
        None => Some(Principal::user(token)),
    }
}

/// Whether `name` can appear after `@` on a group definition line.
pub fn is_group_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}
