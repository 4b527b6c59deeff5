//! Day count conventions.
//!
//! Day count conventions determine how accrued premium and discounting
//! times are calculated by specifying how to count days between two dates
//! and the year basis.

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use crate::types::Date;
use rust_decimal::Decimal;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Can be negative if end < start.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Provides a convenient way to select conventions at runtime
/// and convert to trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/360 - money market convention
    Act360,

    /// Actual/365 Fixed - standard for CDS premium accrual
    #[default]
    Act365Fixed,
}

impl DayCountConvention {
    /// Converts the enum to a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayCountConvention::Act360 => write!(f, "ACT/360"),
            DayCountConvention::Act365Fixed => write!(f, "ACT/365F"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_day_count() {
        assert_eq!(DayCountConvention::Act360.to_day_count().name(), "ACT/360");
        assert_eq!(
            DayCountConvention::Act365Fixed.to_day_count().name(),
            "ACT/365F"
        );
    }
}
