//! User name normalization

use crate::graph::NodeId;

/// Placeholder written by the scraper when a user could not be resolved
pub const NULL_SENTINEL: &str = "NAN";

/// Normalize a raw user token into a node id.
///
/// Trims whitespace and surrounding quotes, drops a leading `@` and lowercases.
/// Returns `None` for empty tokens and the null sentinel.
pub fn clean_user_name(raw: &str) -> Option<NodeId> {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();

    if handle.is_empty() || handle.eq_ignore_ascii_case(NULL_SENTINEL) {
        return None;
    }

    Some(handle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_user_name() {
        assert_eq!(clean_user_name("  @SomeUser\n").as_deref(), Some("someuser"));
        assert_eq!(clean_user_name("\"quoted\"").as_deref(), Some("quoted"));
        assert_eq!(clean_user_name("plain").as_deref(), Some("plain"));
    }

    #[test]
    fn test_rejects_sentinel_and_empty() {
        assert_eq!(clean_user_name("NAN"), None);
        assert_eq!(clean_user_name(" nan "), None);
        assert_eq!(clean_user_name("@"), None);
        assert_eq!(clean_user_name("   "), None);
    }
}
