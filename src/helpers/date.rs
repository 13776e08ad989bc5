//! Date helper functions

use chrono::{DateTime, NaiveDate, TimeZone};

/// Formats accepted for authored publication dates, tried in order
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

/// Parse an authored date such as "February 20, 2026" or "2026-02-20"
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Format a calendar day in W3C form, as sitemaps expect
pub fn date_w3c(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a timestamp in ISO 8601 / XML form
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 5);
        assert_eq!(parse_date("February 5, 2026"), expected);
        assert_eq!(parse_date("February 05, 2026"), expected);
        assert_eq!(parse_date("Feb 5, 2026"), expected);
        assert_eq!(parse_date("2026-02-05"), expected);
        assert_eq!(parse_date("  2026-02-05 "), expected);
    }

    #[test]
    fn test_parse_date_rejects() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("February 30, 2026"), None);
        assert_eq!(parse_date("02/05/2026"), None);
    }

    #[test]
    fn test_date_w3c() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(date_w3c(date), "2026-03-01");
    }

    #[test]
    fn test_date_xml() {
        let date = Utc.with_ymd_and_hms(2026, 2, 21, 9, 5, 0).unwrap();
        assert_eq!(date_xml(&date), "2026-02-21T09:05:00+00:00");
    }
}
