//! Time and formatting utilities shared by the reports.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::net::IpAddr;

/// Seconds in a day.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Output format for normalized timestamps.
const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats the host is known to emit, tried in order.
const HOST_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Keep the date part (first 10 characters) of a timestamp string.
pub fn extract_date(date_string: &str) -> &str {
    match date_string.char_indices().nth(10) {
        Some((idx, _)) => &date_string[..idx],
        None => date_string,
    }
}

/// Epoch seconds `days` days before `timestamp`, clamped to the `i64` range.
pub fn lookback_start(timestamp: i64, days: i64) -> i64 {
    timestamp.saturating_sub(days.saturating_mul(SECONDS_PER_DAY))
}

/// Epoch seconds two weeks before `timestamp`.
pub fn two_weeks_before(timestamp: i64) -> i64 {
    lookback_start(timestamp, 14)
}

/// Midnight UTC of the day containing `timestamp`, clamped to `i64::MIN`.
pub fn start_of_day(timestamp: i64) -> i64 {
    timestamp.saturating_sub(timestamp.rem_euclid(SECONDS_PER_DAY))
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Truncate (not round) a value to `digits` decimal places.
pub fn truncate_double(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).trunc() / factor
}

/// Two-decimal rendering used for percentages in tables.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}", value)
}

/// Whether `ip_address` is a literal IPv4 or IPv6 address.
pub fn is_valid_ip_address(ip_address: &str) -> bool {
    ip_address.parse::<IpAddr>().is_ok()
}

fn parse_naive(time_string: &str) -> Option<NaiveDateTime> {
    let trimmed = time_string.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in HOST_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a host timestamp string into epoch seconds (UTC).
pub fn parse_log_time(time_string: &str) -> Option<i64> {
    parse_naive(time_string).map(|dt| dt.and_utc().timestamp())
}

/// Rewrite a host timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Strings that cannot be parsed are returned unchanged.
pub fn normalize_log_time(time_string: &str) -> String {
    match parse_naive(time_string) {
        Some(dt) => dt.format(CANONICAL_FORMAT).to_string(),
        None => time_string.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date() {
        assert_eq!(extract_date("2024-03-01 10:11:12"), "2024-03-01");
        assert_eq!(extract_date("2024-03-01"), "2024-03-01");
        assert_eq!(extract_date("short"), "short");
        assert_eq!(extract_date(""), "");
        assert_eq!(extract_date("дата-2024-03-01"), "дата-2024-");
    }

    #[test]
    fn test_lookback() {
        assert_eq!(two_weeks_before(1_209_600), 0);
        assert_eq!(lookback_start(100_000, 1), 100_000 - 86_400);
        assert_eq!(start_of_day(86_400 + 3_600), 86_400);
        assert_eq!(start_of_day(-1), -86_400);
    }

    #[test]
    fn test_lookback_extreme_values_saturate() {
        assert_eq!(lookback_start(i64::MIN, 14), i64::MIN);
        assert_eq!(start_of_day(i64::MIN), i64::MIN);
        assert_eq!(lookback_start(0, i64::MAX), -i64::MAX);
        assert_eq!(lookback_start(i64::MAX, -14), i64::MAX);
        assert_eq!(two_weeks_before(i64::MIN + 1), i64::MIN);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1_709_287_200), "2024-03-01 10:00:00");
    }

    #[test]
    fn test_truncate_and_percent() {
        assert_eq!(truncate_double(12.3456, 2), 12.34);
        assert_eq!(truncate_double(-1.999, 1), -1.9);
        assert_eq!(format_percent(12.346), "12.35");
        assert_eq!(format_percent(100.0), "100.00");
    }

    #[test]
    fn test_is_valid_ip_address() {
        assert!(is_valid_ip_address("192.168.1.10"));
        assert!(is_valid_ip_address("::1"));
        assert!(!is_valid_ip_address(""));
        assert!(!is_valid_ip_address("256.1.1.1"));
        assert!(!is_valid_ip_address("example.com"));
    }

    #[test]
    fn test_parse_and_normalize_log_time() {
        assert_eq!(parse_log_time("2024-03-01 10:00:00"), Some(1_709_287_200));
        assert_eq!(parse_log_time("2024.03.01 10:00:00.250"), Some(1_709_287_200));
        assert_eq!(parse_log_time("2024-03-01T10:00:00Z"), Some(1_709_287_200));
        assert_eq!(parse_log_time("2024-03-01"), Some(1_709_251_200));
        assert_eq!(parse_log_time("garbage"), None);

        assert_eq!(
            normalize_log_time("2024.03.01 10:00:00.123"),
            "2024-03-01 10:00:00"
        );
        assert_eq!(normalize_log_time("garbage"), "garbage");
    }
}
