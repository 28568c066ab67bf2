//! Parsing of text-stored target quantities.

/// Parses a stored quantity.
///
/// Surrounding blanks are ignored. Anything that is not a non-negative
/// integer counts as zero so a bad row never breaks a total.
#[must_use]
pub fn parse_quantity(raw: &str) -> i64 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|q| *q >= 0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3650", 3650)]
    #[case(" 120 ", 120)]
    #[case("0", 0)]
    #[case("-5", 0)]
    #[case("12.5", 0)]
    #[case("", 0)]
    #[case("n/a", 0)]
    fn test_parse_quantity(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_quantity(raw), expected);
    }
}
