//! Calendar months and date input
//!
//! A `MonthPeriod` is the calendar month containing a reference instant, seen
//! from a fixed UTC offset. Every "is this in the month?" question in the crate
//! goes through [`MonthPeriod::contains`], so aggregation, reports and exports
//! agree on month boundaries.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use std::fmt;

/// A calendar month in a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
    offset: FixedOffset,
}

impl MonthPeriod {
    /// Build a month; returns `None` for an out-of-range month number
    pub fn new(year: i32, month: u32, offset: FixedOffset) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self {
            year,
            month,
            offset,
        })
    }

    /// The month containing `reference`, in the reference's own offset
    pub fn containing(reference: DateTime<FixedOffset>) -> Self {
        Self {
            year: reference.year(),
            month: reference.month(),
            offset: *reference.offset(),
        }
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str, offset: FixedOffset) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?, offset)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Offset the month boundaries are computed in
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// First instant of the month
    pub fn start(&self) -> DateTime<Utc> {
        local_midnight(self.first_day(), self.offset)
    }

    /// First instant of the following month (exclusive bound)
    pub fn end_exclusive(&self) -> DateTime<Utc> {
        self.next().start()
    }

    /// Whether an instant falls in this month, first and last instant included
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start() && instant < self.end_exclusive()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
                offset: self.offset,
            }
        } else {
            Self {
                month: self.month + 1,
                ..*self
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
                offset: self.offset,
            }
        } else {
            Self {
                month: self.month - 1,
                ..*self
            }
        }
    }

    /// Label used in filenames, e.g. "2024_03"
    pub fn file_label(&self) -> String {
        format!("{:04}_{:02}", self.year, self.month)
    }

    fn first_day(&self) -> NaiveDate {
        // Validated in every constructor
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = NaiveDateTime::new(date, NaiveTime::MIN);
    // A fixed offset never produces ambiguous or skipped local times
    match offset.from_local_datetime(&naive).single() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

/// Parse user date input into an absolute instant
///
/// Accepts an RFC 3339 timestamp, `YYYY-MM-DD` or `DD/MM/YYYY`. Plain dates
/// mean local midnight in `offset`.
pub fn parse_date_input(input: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Utc));
    }

    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .map(|date| local_midnight(date, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn lima() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    #[test]
    fn test_month_bounds_inclusive() {
        let march = MonthPeriod::new(2024, 3, utc()).unwrap();
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()
            + chrono::Duration::nanoseconds(999_999_999);
        let april = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        assert!(march.contains(first));
        assert!(march.contains(last));
        assert!(!march.contains(april));
        assert!(!march.contains(first - chrono::Duration::nanoseconds(1)));
    }

    #[test]
    fn test_month_in_offset() {
        // 2024-04-01T03:00Z is still March 31st in Lima
        let march = MonthPeriod::new(2024, 3, lima()).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 4, 1, 3, 0, 0).unwrap();
        assert!(march.contains(instant));
        assert!(!MonthPeriod::new(2024, 3, utc()).unwrap().contains(instant));
    }

    #[test]
    fn test_containing_and_navigation() {
        let reference = lima().with_ymd_and_hms(2024, 12, 15, 10, 0, 0).unwrap();
        let december = MonthPeriod::containing(reference);
        assert_eq!(december.to_string(), "2024-12");
        assert_eq!(december.next().to_string(), "2025-01");
        assert_eq!(december.next().prev(), december);
        assert_eq!(MonthPeriod::new(2024, 1, utc()).unwrap().prev().to_string(), "2023-12");
        assert_eq!(december.file_label(), "2024_12");
    }

    #[test]
    fn test_parse_month() {
        let period = MonthPeriod::parse("2024-03", utc()).unwrap();
        assert_eq!((period.year(), period.month()), (2024, 3));
        assert!(MonthPeriod::parse("2024-13", utc()).is_none());
        assert!(MonthPeriod::parse("March", utc()).is_none());
    }

    #[test]
    fn test_parse_date_input() {
        let rfc = parse_date_input("2024-03-10T15:30:00Z", utc()).unwrap();
        assert_eq!(rfc, Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap());

        let plain = parse_date_input("2024-03-10", lima()).unwrap();
        assert_eq!(plain, Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap());

        let slashed = parse_date_input("10/03/2024", utc()).unwrap();
        assert_eq!(slashed, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());

        assert!(parse_date_input("", utc()).is_none());
        assert!(parse_date_input("yesterday", utc()).is_none());
        assert!(parse_date_input("2024-02-30", utc()).is_none());
    }
}
