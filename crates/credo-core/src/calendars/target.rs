//! TARGET calendar for Eurozone payments and securities settlement.
//!
//! TARGET (Trans-European Automated Real-time Gross Settlement Express
//! Transfer) is the settlement system operated by the Eurosystem and the
//! reference calendar for euro-denominated credit derivatives.

use super::Calendar;
use crate::types::Date;

/// TARGET holiday calendar for Eurozone markets.
///
/// ## Holidays
///
/// - New Year's Day (January 1)
/// - Good Friday
/// - Easter Monday
/// - Labour Day (May 1)
/// - Christmas Day (December 25)
/// - Boxing Day (December 26)
///
/// Note: TARGET does NOT observe national holidays of individual
/// countries, and holidays falling on weekends are simply lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetCalendar;

impl TargetCalendar {
    /// Create a new TARGET calendar.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Calendar for TargetCalendar {
    fn name(&self) -> &'static str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun) {
            return false;
        }

        let (month, day) = (date.month(), date.day());

        // Fixed-date holidays
        if (month == 1 && day == 1)
            || (month == 5 && day == 1)
            || (month == 12 && day == 25)
            || (month == 12 && day == 26)
        {
            return false;
        }

        // Easter-relative holidays: Good Friday and Easter Monday
        let easter = easter_sunday(date.year());
        let offset = easter.days_between(&date);
        if offset == -2 || offset == 1 {
            return false;
        }

        true
    }
}

/// Easter Sunday for the given year (Gregorian computus).
fn easter_sunday(year: i32) -> Date {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    Date::from_ymd(year, month as u32, day as u32).expect("computus always yields a valid date")
}
