//! Daily reset calendar
//!
//! Maps wall-clock instants onto the calendar day used for the task quota.
//! The zone is a fixed UTC offset so the boundary never depends on the host.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetClock {
    offset: FixedOffset,
}

impl ResetClock {
    /// Reset at midnight UTC
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Reset at midnight in a zone `hours` east of UTC
    pub fn with_offset_hours(hours: i32) -> Result<Self, String> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or_else(|| format!("Invalid reset offset: {} hours", hours))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of `now` in the reset zone
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }
}

impl Default for ResetClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn test_utc_day_boundary() {
        let clock = ResetClock::utc();
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 1).unwrap();

        assert_eq!(
            clock.today(late),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            clock.today(early),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_offset_shifts_boundary() {
        let clock = ResetClock::with_offset_hours(8).unwrap();
        // 17:00 UTC is already 01:00 the next day at +8
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 17, 0, 0).unwrap();
        assert_eq!(
            clock.today(now),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );

        let west = ResetClock::with_offset_hours(-5).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 3, 0, 0).unwrap();
        assert_eq!(
            west.today(now),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_invalid_offset() {
        assert!(ResetClock::with_offset_hours(30).is_err());
    }
}
