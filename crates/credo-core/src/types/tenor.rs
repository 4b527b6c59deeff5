//! Tenor (period) type for instrument maturities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CredoError, CredoResult};
use crate::types::Date;

/// Time unit of a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

/// A tenor such as 3M, 6M, 1Y, 5Y.
///
/// Tenors describe instrument maturities relative to an anchor date.
///
/// # Example
///
/// ```rust
/// use credo_core::types::{Date, Tenor};
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let anchor = Date::from_ymd(2007, 5, 15).unwrap();
/// assert_eq!(tenor.advance(anchor).unwrap(), Date::from_ymd(2007, 11, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    /// Number of time units.
    length: i32,
    /// The time unit.
    unit: TimeUnit,
}

impl Tenor {
    /// Creates a new tenor.
    #[must_use]
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Creates a tenor of calendar days.
    #[must_use]
    pub fn days(length: i32) -> Self {
        Self::new(length, TimeUnit::Days)
    }

    /// Creates a tenor of weeks.
    #[must_use]
    pub fn weeks(length: i32) -> Self {
        Self::new(length, TimeUnit::Weeks)
    }

    /// Creates a tenor of months.
    #[must_use]
    pub fn months(length: i32) -> Self {
        Self::new(length, TimeUnit::Months)
    }

    /// Creates a tenor of years.
    #[must_use]
    pub fn years(length: i32) -> Self {
        Self::new(length, TimeUnit::Years)
    }

    /// Returns the tenor length.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Returns the tenor unit.
    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns true if the tenor is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.length > 0
    }

    /// Advances a date by this tenor.
    ///
    /// Month and year tenors clamp the day to the end of the target month.
    ///
    /// # Errors
    ///
    /// Returns `CredoError::InvalidDate` if the result is out of range.
    pub fn advance(&self, date: Date) -> CredoResult<Date> {
        match self.unit {
            TimeUnit::Days => Ok(date.add_days(i64::from(self.length))),
            TimeUnit::Weeks => Ok(date.add_days(7 * i64::from(self.length))),
            TimeUnit::Months => date.add_months(self.length),
            TimeUnit::Years => date.add_years(self.length),
        }
    }

    /// Returns the approximate tenor length in months, for ordering.
    ///
    /// Days and weeks are converted at 30 / 7 days per month respectively.
    #[must_use]
    pub fn approximate_months(&self) -> f64 {
        match self.unit {
            TimeUnit::Days => f64::from(self.length) / 30.0,
            TimeUnit::Weeks => f64::from(self.length) * 7.0 / 30.0,
            TimeUnit::Months => f64::from(self.length),
            TimeUnit::Years => f64::from(self.length) * 12.0,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        };
        write!(f, "{}{}", self.length, suffix)
    }
}

impl FromStr for Tenor {
    type Err = CredoError;

    fn from_str(s: &str) -> CredoResult<Self> {
        let s = s.trim();
        if !s.is_ascii() || s.len() < 2 {
            return Err(CredoError::invalid_tenor(format!("'{s}' is not a tenor")));
        }

        let (num, suffix) = s.split_at(s.len() - 1);
        let length: i32 = num
            .parse()
            .map_err(|_| CredoError::invalid_tenor(format!("'{num}' is not a number")))?;

        let unit = match suffix.to_ascii_uppercase().as_str() {
            "D" => TimeUnit::Days,
            "W" => TimeUnit::Weeks,
            "M" => TimeUnit::Months,
            "Y" => TimeUnit::Years,
            other => {
                return Err(CredoError::invalid_tenor(format!(
                    "unknown unit '{other}' (expected D, W, M, or Y)"
                )))
            }
        };

        Ok(Tenor::new(length, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tenors() {
        assert_eq!("3M".parse::<Tenor>().unwrap(), Tenor::months(3));
        assert_eq!("1Y".parse::<Tenor>().unwrap(), Tenor::years(1));
        assert_eq!("2w".parse::<Tenor>().unwrap(), Tenor::weeks(2));
        assert_eq!("30D".parse::<Tenor>().unwrap(), Tenor::days(30));
        assert!("XY".parse::<Tenor>().is_err());
        assert!("M".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_advance() {
        let anchor = Date::from_ymd(2007, 5, 15).unwrap();
        assert_eq!(
            Tenor::months(3).advance(anchor).unwrap(),
            Date::from_ymd(2007, 8, 15).unwrap()
        );
        assert_eq!(
            Tenor::years(2).advance(anchor).unwrap(),
            Date::from_ymd(2009, 5, 15).unwrap()
        );
        assert_eq!(
            Tenor::days(10).advance(anchor).unwrap(),
            Date::from_ymd(2007, 5, 25).unwrap()
        );
    }

    #[test]
    fn test_ordering_by_months() {
        assert!(Tenor::months(3).approximate_months() < Tenor::months(6).approximate_months());
        assert!(Tenor::months(6).approximate_months() < Tenor::years(1).approximate_months());
    }

    #[test]
    fn test_display_round_trip() {
        let tenor = Tenor::months(6);
        assert_eq!(tenor.to_string(), "6M");
        assert_eq!(tenor.to_string().parse::<Tenor>().unwrap(), tenor);
    }
}
