//! Data parsing helpers.
//!
//! Enumerations parsed from user input (`"Call"`, `"american"`,
//! `" EUROPEAN "`) all go through [`normalize_tag`] first so that every
//! `FromStr` impl accepts the same spellings.

/// Normalise a textual tag: trim surrounding whitespace, lowercase ASCII,
/// and drop `-`, `_`, and inner spaces.
///
/// Returns `None` for an empty (or whitespace-only) input.
pub fn normalize_tag(s: &str) -> Option<String> {
    let tag: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("Call").as_deref(), Some("call"));
        assert_eq!(normalize_tag("  AMERICAN\t").as_deref(), Some("american"));
        assert_eq!(normalize_tag("plain-vanilla").as_deref(), Some("plainvanilla"));
        assert_eq!(normalize_tag("euro_pean").as_deref(), Some("european"));
        assert_eq!(normalize_tag(""), None);
        assert_eq!(normalize_tag("   "), None);
    }
}
