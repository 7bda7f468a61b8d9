//! Parsing of string-encoded numbers and dates used for sorting.
//!
//! Upstream payloads carry human-readable magnitudes ("1.2M views") and
//! dates that are either relative phrases ("2 days ago") or absolute
//! strings. All of that parsing lives behind these two pure functions;
//! unparsable input degrades to zero / `None`, never an error.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Parse a human-readable magnitude string into a number.
///
/// Accepts plain integers (`"500"`, `"12,340"`) and suffixed magnitudes
/// with `k` = 1e3, `m` = 1e6, `b` = 1e9 in either case (`"3k"`, `"1.2M"`).
/// Anything unparsable, including the empty string, yields 0.
pub fn parse_magnitude(raw: &str) -> u64 {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0;
    }

    let lower = cleaned.to_lowercase();
    let (digits, multiplier) = match lower.strip_suffix(&['k', 'm', 'b'][..]) {
        Some(prefix) => {
            let mult = match lower.as_bytes()[lower.len() - 1] {
                b'k' => 1_000_f64,
                b'm' => 1_000_000_f64,
                _ => 1_000_000_000_f64,
            };
            (prefix.trim(), mult)
        }
        None => (lower.as_str(), 1.0),
    };

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => (value * multiplier).round() as u64,
        _ => 0,
    }
}

/// Parse a relative or absolute date string into a UTC timestamp.
///
/// Relative phrases ("N hours/days/weeks/months/years ago", "yesterday")
/// are mapped to `now - N * unit` with months as 30 days and years as 365
/// days. Absolute strings are tried against RFC 3339 and the common SERP
/// date formats. Unparseable input is `None` ("no date").
pub fn parse_date(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(parsed) = parse_relative(text, now) {
        return Some(parsed);
    }
    parse_absolute(text)
}

fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = text.to_lowercase();

    if lower == "yesterday" {
        return Some(now - Duration::days(1));
    }
    if lower == "today" || lower == "just now" {
        return Some(now);
    }

    let rest = lower.strip_suffix("ago")?.trim();
    let mut parts = rest.split_whitespace();
    let count_token = parts.next()?;
    let unit_token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let count: i64 = match count_token {
        "a" | "an" => 1,
        other => other.parse().ok()?,
    };

    let delta = match unit_token.trim_end_matches('s') {
        "second" | "sec" => Duration::seconds(count),
        "minute" | "min" => Duration::minutes(count),
        "hour" => Duration::hours(count),
        "day" => Duration::days(count),
        "week" => Duration::weeks(count),
        "month" => Duration::days(count * 30),
        "year" => Duration::days(count * 365),
        _ => return None,
    };

    Some(now - delta)
}

fn parse_absolute(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y", "%d %b %Y", "%d %B %Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(DateTime::from_naive_utc_and_offset(
                date.and_hms_opt(0, 0, 0)?,
                Utc,
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn magnitude_millions() {
        assert_eq!(parse_magnitude("1.2M"), 1_200_000);
        assert_eq!(parse_magnitude("4M"), 4_000_000);
    }

    #[test]
    fn magnitude_thousands() {
        assert_eq!(parse_magnitude("3k"), 3_000);
        assert_eq!(parse_magnitude("2.3K"), 2_300);
    }

    #[test]
    fn magnitude_billions() {
        assert_eq!(parse_magnitude("1b"), 1_000_000_000);
    }

    #[test]
    fn magnitude_plain_number() {
        assert_eq!(parse_magnitude("500"), 500);
        assert_eq!(parse_magnitude("12,340"), 12_340);
    }

    #[test]
    fn magnitude_empty_and_garbage_is_zero() {
        assert_eq!(parse_magnitude(""), 0);
        assert_eq!(parse_magnitude("   "), 0);
        assert_eq!(parse_magnitude("lots"), 0);
        assert_eq!(parse_magnitude("-3k"), 0);
    }

    #[test]
    fn magnitude_whitespace_tolerated() {
        assert_eq!(parse_magnitude(" 1.5m "), 1_500_000);
    }

    #[test]
    fn relative_hours_and_days() {
        let now = fixed_now();
        assert_eq!(parse_date("1 hour ago", now), Some(now - Duration::hours(1)));
        assert_eq!(parse_date("2 days ago", now), Some(now - Duration::days(2)));
        assert_eq!(parse_date("3 weeks ago", now), Some(now - Duration::weeks(3)));
    }

    #[test]
    fn relative_months_and_years() {
        let now = fixed_now();
        assert_eq!(
            parse_date("2 months ago", now),
            Some(now - Duration::days(60))
        );
        assert_eq!(
            parse_date("1 year ago", now),
            Some(now - Duration::days(365))
        );
    }

    #[test]
    fn relative_article_counts() {
        let now = fixed_now();
        assert_eq!(parse_date("an hour ago", now), Some(now - Duration::hours(1)));
        assert_eq!(parse_date("a day ago", now), Some(now - Duration::days(1)));
    }

    #[test]
    fn relative_yesterday() {
        let now = fixed_now();
        assert_eq!(parse_date("yesterday", now), Some(now - Duration::days(1)));
    }

    #[test]
    fn absolute_iso_date() {
        let parsed = parse_date("2024-03-01", fixed_now()).expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn absolute_month_name_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("Mar 1, 2024", fixed_now()), Some(expected));
        assert_eq!(parse_date("March 1, 2024", fixed_now()), Some(expected));
        assert_eq!(parse_date("1 Mar 2024", fixed_now()), Some(expected));
    }

    #[test]
    fn absolute_rfc3339() {
        let parsed = parse_date("2024-03-01T10:30:00Z", fixed_now()).expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn unparseable_dates_are_none() {
        let now = fixed_now();
        assert_eq!(parse_date("", now), None);
        assert_eq!(parse_date("soon", now), None);
        assert_eq!(parse_date("ago", now), None);
        assert_eq!(parse_date("five score ago", now), None);
    }
}
