//! Business day calendars and conventions.
//!
//! This module provides:
//! - Business day calendars for different markets
//! - Business day adjustment conventions
//! - Holiday detection and date rolling

mod conventions;
mod target;

pub use conventions::BusinessDayConvention;
pub use target::TargetCalendar;

use crate::error::CredoResult;
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CredoResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        // Monday
        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
        // Saturday
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 4).unwrap()));
        // Sunday
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 5).unwrap()));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(
            cal.add_business_days(friday, 1),
            Date::from_ymd(2025, 1, 6).unwrap()
        );

        // Monday - 1 business day = Friday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(
            cal.add_business_days(monday, -1),
            Date::from_ymd(2025, 1, 3).unwrap()
        );

        // Zero days is a no-op
        assert_eq!(cal.add_business_days(friday, 0), friday);
    }

    #[test]
    fn test_next_previous_business_day() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();

        assert_eq!(
            cal.next_business_day(saturday),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
        assert_eq!(
            cal.previous_business_day(saturday),
            Date::from_ymd(2025, 1, 3).unwrap()
        );
    }
}
