//! Week window resolution for agenda requests.
//!
//! A caller asks for an agenda by naming the start of a week; the window
//! is always exactly seven days, half-open, in UTC. The window is derived
//! per request and never persisted.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::GatewayError;

/// Number of days covered by an agenda window.
const WINDOW_DAYS: i64 = 7;

/// A half-open UTC instant range `[start, start + 7 days)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// Inclusive window start.
    pub start: DateTime<Utc>,
    /// Exclusive window end, exactly seven days after `start`.
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    /// Resolves a caller-supplied week-start token into a window.
    ///
    /// Accepts an RFC 3339 date-time (`2024-01-01T00:00:00Z`) or a bare
    /// `YYYY-MM-DD` date, which is taken as UTC midnight.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRange`] if the token is not a valid
    /// instant in either form.
    pub fn resolve(token: &str) -> Result<Self, GatewayError> {
        let start = parse_instant(token).ok_or_else(|| {
            GatewayError::InvalidRange(format!("unparseable week start: {token}"))
        })?;
        Ok(Self {
            start,
            end: start + Duration::days(WINDOW_DAYS),
        })
    }

    /// Returns `true` if an event's inclusive `[start, end]` range
    /// intersects this half-open window.
    #[must_use]
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end >= self.start
    }
}

/// Parses an instant from an RFC 3339 date-time or a bare UTC date.
fn parse_instant(token: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        let Some(dt) = Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).single() else {
            panic!("valid instant");
        };
        dt
    }

    #[test]
    fn date_token_resolves_to_seven_day_window() {
        let Ok(window) = WeekWindow::resolve("2024-01-01") else {
            panic!("resolve failed");
        };
        assert_eq!(window.start, instant(2024, 1, 1, 0));
        assert_eq!(window.end - window.start, Duration::days(7));
    }

    #[test]
    fn rfc3339_token_resolves() {
        let Ok(window) = WeekWindow::resolve("2024-03-04T06:00:00Z") else {
            panic!("resolve failed");
        };
        assert_eq!(window.start, instant(2024, 3, 4, 6));
        assert_eq!(window.end, instant(2024, 3, 11, 6));
    }

    #[test]
    fn garbage_token_is_invalid_range() {
        let result = WeekWindow::resolve("not-a-date");
        assert!(matches!(result, Err(GatewayError::InvalidRange(_))));
    }

    #[test]
    fn empty_token_is_invalid_range() {
        assert!(WeekWindow::resolve("").is_err());
    }

    #[test]
    fn intersects_is_half_open() {
        let Ok(window) = WeekWindow::resolve("2024-01-01") else {
            panic!("resolve failed");
        };
        // Event starting exactly at the window end is excluded.
        assert!(!window.intersects(instant(2024, 1, 8, 0), instant(2024, 1, 8, 2)));
        // Event ending exactly at the window start is included.
        assert!(window.intersects(instant(2023, 12, 31, 22), instant(2024, 1, 1, 0)));
        // Event inside the window.
        assert!(window.intersects(instant(2024, 1, 3, 10), instant(2024, 1, 3, 12)));
    }
}
