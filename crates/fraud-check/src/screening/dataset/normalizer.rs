/// Removes a single leading `"<column>_"` prefix, e.g. `CustomerId_1001` -> `1001`.
///
/// Values that do not carry the prefix are returned trimmed but otherwise untouched.
pub(crate) fn strip_prefix(column: &str, value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_prefix(column)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(trimmed)
        .to_string()
}

/// Parses an identifier to the integer form the classifier consumes.
pub(crate) fn parse_identifier(column: &str, value: &str) -> Option<i64> {
    strip_prefix(column, value).parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_prefix_once() {
        assert_eq!(strip_prefix("CustomerId", "CustomerId_1001"), "1001");
        assert_eq!(strip_prefix("CustomerId", "  CustomerId_7 "), "7");
        assert_eq!(
            strip_prefix("CustomerId", "CustomerId_CustomerId_1"),
            "CustomerId_1"
        );
    }

    #[test]
    fn leaves_unprefixed_values_alone() {
        assert_eq!(strip_prefix("AccountId", "42"), "42");
        assert_eq!(strip_prefix("AccountId", "ProductId_3"), "ProductId_3");
        assert_eq!(strip_prefix("AccountId", "AccountId42"), "AccountId42");
    }

    #[test]
    fn parse_identifier_rejects_non_numeric() {
        assert_eq!(parse_identifier("ChannelId", "ChannelId_3"), Some(3));
        assert_eq!(parse_identifier("ChannelId", "ChannelId_x"), None);
        assert_eq!(parse_identifier("ChannelId", ""), None);
    }
}
