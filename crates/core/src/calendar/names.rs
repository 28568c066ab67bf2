//! Month names and week-number text as stored on target records.

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English month name for `month` in 1..=12, empty otherwise.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Three-letter month abbreviation, e.g. `Jan`.
#[must_use]
pub fn month_abbrev(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

/// Parses a full English month name, ignoring case and surrounding blanks.
#[must_use]
pub fn parse_month_name(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(raw))
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Parses a stored ISO week number: `39`, `W39` or `Week 39`.
#[must_use]
pub fn parse_week_number(raw: &str) -> Option<u32> {
    let lower = raw.trim().to_ascii_lowercase();
    let digits = lower
        .strip_prefix("week")
        .or_else(|| lower.strip_prefix('w'))
        .unwrap_or(&lower);
    digits
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|week| (1..=53).contains(week))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("January", Some(1))]
    #[case("  september ", Some(9))]
    #[case("DECEMBER", Some(12))]
    #[case("Sept", None)]
    #[case("", None)]
    fn test_parse_month_name(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_month_name(raw), expected);
    }

    #[rstest]
    #[case("39", Some(39))]
    #[case("W39", Some(39))]
    #[case("w7", Some(7))]
    #[case("Week 39", Some(39))]
    #[case("week39", Some(39))]
    #[case("54", None)]
    #[case("0", None)]
    #[case("thirty", None)]
    fn test_parse_week_number(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_week_number(raw), expected);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(9), "September");
        assert_eq!(month_abbrev(9), "Sep");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }
}
