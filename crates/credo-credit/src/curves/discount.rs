//! Discount curve contract and the flat-forward implementation.

use parking_lot::RwLock;
use rust_decimal::prelude::ToPrimitive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use credo_core::daycounts::{DayCount, DayCountConvention};
use credo_core::Date;

use crate::error::{CreditError, CreditResult};

/// Read-side contract of a risk-free discount curve.
///
/// Implementations report a version stamp so that dependents can detect
/// discount moves lazily; immutable curves keep the default of 0.
pub trait DiscountCurve: Send + Sync {
    /// Returns the curve's reference (valuation) date.
    fn reference_date(&self) -> Date;

    /// Returns the discount factor at the given date (1.0 at or before
    /// the reference date).
    fn discount_factor(&self, date: Date) -> f64;

    /// Returns the curve's change-detection version stamp.
    fn version(&self) -> u64 {
        0
    }
}

/// A flat continuously-compounded forward curve.
///
/// The workhorse discount curve for calibration examples and tests:
/// `P(T) = exp(-r * tau(reference, T))`.
pub struct FlatForwardCurve {
    reference_date: Date,
    rate: RwLock<f64>,
    version: AtomicU64,
    day_count: DayCountConvention,
}

impl FlatForwardCurve {
    /// Creates a flat forward curve with ACT/365F time measurement.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the rate is not finite.
    pub fn new(reference_date: Date, rate: f64) -> CreditResult<Self> {
        Self::with_day_count(reference_date, rate, DayCountConvention::Act365Fixed)
    }

    /// Creates a flat forward curve with an explicit day count.
    pub fn with_day_count(
        reference_date: Date,
        rate: f64,
        day_count: DayCountConvention,
    ) -> CreditResult<Self> {
        if !rate.is_finite() {
            return Err(CreditError::invalid_specification(format!(
                "flat forward rate {rate} is not finite"
            )));
        }
        Ok(Self {
            reference_date,
            rate: RwLock::new(rate),
            version: AtomicU64::new(0),
            day_count,
        })
    }

    /// Creates the curve wrapped in a shareable handle.
    pub fn handle(reference_date: Date, rate: f64) -> CreditResult<Arc<Self>> {
        Ok(Arc::new(Self::new(reference_date, rate)?))
    }

    /// Returns the current flat rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        *self.rate.read()
    }

    /// Sets a new flat rate and bumps the version stamp.
    pub fn set_rate(&self, rate: f64) -> CreditResult<()> {
        if !rate.is_finite() {
            return Err(CreditError::invalid_specification(format!(
                "flat forward rate {rate} is not finite"
            )));
        }
        *self.rate.write() = rate;
        self.version.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn year_fraction(&self, date: Date) -> f64 {
        self.day_count
            .to_day_count()
            .year_fraction(self.reference_date, date)
            .to_f64()
            .unwrap_or(0.0)
    }
}

impl DiscountCurve for FlatForwardCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn discount_factor(&self, date: Date) -> f64 {
        let t = self.year_fraction(date);
        if t <= 0.0 {
            return 1.0;
        }
        (-self.rate() * t).exp()
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_discount_factor() {
        let reference = Date::from_ymd(2007, 5, 15).unwrap();
        let curve = FlatForwardCurve::new(reference, 0.05).unwrap();

        let one_year = Date::from_ymd(2008, 5, 15).unwrap();
        let t: f64 = 366.0 / 365.0;
        assert_relative_eq!(
            curve.discount_factor(one_year),
            (-0.05 * t).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_rate_curve() {
        let reference = Date::from_ymd(2007, 5, 15).unwrap();
        let curve = FlatForwardCurve::new(reference, 0.0).unwrap();

        let far = Date::from_ymd(2017, 5, 15).unwrap();
        assert_relative_eq!(curve.discount_factor(far), 1.0);
    }

    #[test]
    fn test_unity_at_and_before_reference() {
        let reference = Date::from_ymd(2007, 5, 15).unwrap();
        let curve = FlatForwardCurve::new(reference, 0.05).unwrap();

        assert_relative_eq!(curve.discount_factor(reference), 1.0);
        let past = Date::from_ymd(2006, 5, 15).unwrap();
        assert_relative_eq!(curve.discount_factor(past), 1.0);
    }

    #[test]
    fn test_rate_change_bumps_version() {
        let reference = Date::from_ymd(2007, 5, 15).unwrap();
        let curve = FlatForwardCurve::new(reference, 0.05).unwrap();
        assert_eq!(curve.version(), 0);

        curve.set_rate(0.04).unwrap();
        assert_eq!(curve.version(), 1);
        assert_relative_eq!(curve.rate(), 0.04);
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let reference = Date::from_ymd(2007, 5, 15).unwrap();
        assert!(FlatForwardCurve::new(reference, f64::NAN).is_err());

        let curve = FlatForwardCurve::new(reference, 0.05).unwrap();
        assert!(curve.set_rate(f64::INFINITY).is_err());
        assert_relative_eq!(curve.rate(), 0.05);
    }
}
