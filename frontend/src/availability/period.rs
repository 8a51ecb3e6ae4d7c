use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Both start and end dates are required")]
    MissingDate,
    #[error("Dates must use the YYYY-MM-DD format")]
    InvalidDate,
    #[error("Start date cannot be in the past")]
    StartInPast,
    #[error("Start date must be before or equal to end date")]
    InvertedRange,
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AvailabilityPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, PeriodError> {
        if start_date > end_date {
            return Err(PeriodError::InvertedRange);
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Overlapping, or adjacent with no free day in between.
    pub fn touches(&self, other: &Self) -> bool {
        self.overlaps(other)
            || next_day(self.end_date) == Some(other.start_date)
            || next_day(other.end_date) == Some(self.start_date)
    }
}

pub(crate) fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}

pub(crate) fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}

/// Parses a form field. Empty input is `Ok(None)`, not an error.
pub fn parse_date_input(raw: &str) -> Result<Option<NaiveDate>, PeriodError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| PeriodError::InvalidDate)
}

pub fn parse_period_input(start: &str, end: &str) -> Result<AvailabilityPeriod, PeriodError> {
    match (parse_date_input(start)?, parse_date_input(end)?) {
        (Some(start), Some(end)) => AvailabilityPeriod::new(start, end),
        _ => Err(PeriodError::MissingDate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn p(start: &str, end: &str) -> AvailabilityPeriod {
        AvailabilityPeriod::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn new_rejects_inverted_range() {
        assert_eq!(
            AvailabilityPeriod::new(d("2024-06-05"), d("2024-06-01")),
            Err(PeriodError::InvertedRange)
        );
        assert_eq!(p("2024-06-01", "2024-06-01").days(), 1);
        assert_eq!(p("2024-06-01", "2024-06-03").days(), 3);
    }

    #[test]
    fn touches_covers_overlap_and_adjacency() {
        let base = p("2024-06-10", "2024-06-15");
        assert!(base.touches(&p("2024-06-15", "2024-06-20")));
        assert!(base.touches(&p("2024-06-16", "2024-06-20")));
        assert!(base.touches(&p("2024-06-01", "2024-06-09")));
        assert!(!base.touches(&p("2024-06-17", "2024-06-20")));
        assert!(!base.touches(&p("2024-06-01", "2024-06-08")));
        assert!(!base.overlaps(&p("2024-06-16", "2024-06-20")));
    }

    #[test]
    fn period_serializes_with_camel_case_iso_dates() {
        let json = serde_json::to_value(p("2024-06-01", "2024-06-09")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"startDate": "2024-06-01", "endDate": "2024-06-09"})
        );
    }

    #[test]
    fn parse_inputs_distinguish_missing_from_malformed() {
        assert_eq!(parse_date_input("   "), Ok(None));
        assert_eq!(parse_date_input("2024-02-30"), Err(PeriodError::InvalidDate));
        assert_eq!(parse_date_input("06/01/2024"), Err(PeriodError::InvalidDate));
        assert_eq!(parse_period_input("", "2024-06-01"), Err(PeriodError::MissingDate));
        assert_eq!(
            parse_period_input("2024-06-02", "2024-06-01"),
            Err(PeriodError::InvertedRange)
        );
        assert_eq!(
            parse_period_input("2024-06-01", "2024-06-02"),
            Ok(p("2024-06-01", "2024-06-02"))
        );
    }
}
