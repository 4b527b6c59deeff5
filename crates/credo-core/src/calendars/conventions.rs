//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::CredoResult;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CredoResult<Date> {
    if calendar.is_business_day(date) {
        return Ok(date);
    }

    match convention {
        BusinessDayConvention::Unadjusted => Ok(date),

        BusinessDayConvention::Following => Ok(calendar.next_business_day(date)),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = calendar.next_business_day(date);
            if adjusted.month() == date.month() {
                Ok(adjusted)
            } else {
                // Crossed a month boundary, go preceding instead
                Ok(calendar.previous_business_day(date))
            }
        }

        BusinessDayConvention::Preceding => Ok(calendar.previous_business_day(date)),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = calendar.previous_business_day(date);
            if adjusted.month() == date.month() {
                Ok(adjusted)
            } else {
                Ok(calendar.next_business_day(date))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_business_day_unchanged() {
        let cal = WeekendCalendar;
        let wednesday = Date::from_ymd(2025, 1, 8).unwrap();
        for convention in [
            BusinessDayConvention::Unadjusted,
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
        ] {
            assert_eq!(adjust(wednesday, convention, &cal).unwrap(), wednesday);
        }
    }

    #[test]
    fn test_following() {
        let cal = WeekendCalendar;

        // Saturday should roll to Monday
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Following, &cal).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_preceding() {
        let cal = WeekendCalendar;

        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Preceding, &cal).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 3).unwrap());
    }

    #[test]
    fn test_modified_following_crosses_month() {
        let cal = WeekendCalendar;

        // Saturday 2025-05-31: Following would land on Monday June 2,
        // crossing a month boundary, so roll back to Friday May 30.
        let month_end_saturday = Date::from_ymd(2025, 5, 31).unwrap();
        let adjusted =
            adjust(month_end_saturday, BusinessDayConvention::ModifiedFollowing, &cal).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 5, 30).unwrap());
    }

    #[test]
    fn test_unadjusted() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Unadjusted, &cal).unwrap();
        assert_eq!(adjusted, saturday);
    }
}
