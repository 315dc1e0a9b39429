//! Tag name normalization for the `-t/--tags` argument.

/// Split a comma-separated tag argument into normalized names.
///
/// Each piece is trimmed and internal spaces become underscores; pieces that
/// normalize to nothing are dropped. `None` (flag not given) yields an empty
/// list.
pub fn parse_tag_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .map(|t| t.trim().replace(' ', "_"))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_and_normalizes() {
        assert_eq!(
            parse_tag_list(Some("pytest, mocks ,unit tests")),
            vec!["pytest", "mocks", "unit_tests"]
        );
    }

    #[test]
    fn test_absent_argument_is_empty() {
        assert!(parse_tag_list(None).is_empty());
    }

    #[test]
    fn test_drops_empty_pieces() {
        assert_eq!(parse_tag_list(Some("a,, b,  ,")), vec!["a", "b"]);
    }
}
