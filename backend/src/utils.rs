use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO8601_DURATION: Regex =
        Regex::new(r"(?i)PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid");
}

/// Parse ISO8601 duration string (PT1H2M3S) to total seconds.
/// Missing or non-matching input is 0.
pub fn parse_iso8601_duration_to_seconds(duration: Option<&str>) -> u64 {
    let Some(captures) = duration.and_then(|d| ISO8601_DURATION.captures(d)) else {
        return 0;
    };

    let component = |index: usize| -> u64 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

/// Statistics arrive as decimal strings; anything unparseable counts as 0.
pub fn parse_count(count: Option<&str>) -> u64 {
    count
        .and_then(|c| c.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_partial_durations() {
        assert_eq!(parse_iso8601_duration_to_seconds(Some("PT1H2M3S")), 3723);
        assert_eq!(parse_iso8601_duration_to_seconds(Some("PT45S")), 45);
        assert_eq!(parse_iso8601_duration_to_seconds(Some("PT5M")), 300);
        assert_eq!(parse_iso8601_duration_to_seconds(Some("PT2H")), 7200);
        assert_eq!(parse_iso8601_duration_to_seconds(Some("PT1H30S")), 3630);
    }

    #[test]
    fn empty_or_missing_duration_is_zero() {
        assert_eq!(parse_iso8601_duration_to_seconds(Some("")), 0);
        assert_eq!(parse_iso8601_duration_to_seconds(None), 0);
    }

    #[test]
    fn non_conforming_duration_is_zero() {
        assert_eq!(parse_iso8601_duration_to_seconds(Some("1:23")), 0);
        assert_eq!(parse_iso8601_duration_to_seconds(Some("P1D")), 0);
        assert_eq!(parse_iso8601_duration_to_seconds(Some("PT")), 0);
    }

    #[test]
    fn duration_is_case_insensitive() {
        assert_eq!(parse_iso8601_duration_to_seconds(Some("pt1m5s")), 65);
    }

    #[test]
    fn day_durations_do_not_match() {
        assert_eq!(parse_iso8601_duration_to_seconds(Some("P1DT1M")), 0);
    }

    #[test]
    fn counts_default_to_zero() {
        assert_eq!(parse_count(Some("12345")), 12345);
        assert_eq!(parse_count(Some(" 7 ")), 7);
        assert_eq!(parse_count(Some("n/a")), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(None), 0);
    }
}
