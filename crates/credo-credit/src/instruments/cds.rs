//! The credit default swap contract.

use credo_core::calendars::BusinessDayConvention;
use credo_core::daycounts::DayCountConvention;
use credo_core::schedule::Schedule;
use credo_core::Date;

use crate::error::{CreditError, CreditResult};

/// Which side of the protection the contract holder takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionSide {
    /// Pays premium, receives the default payment.
    Buyer,
    /// Receives premium, pays the default payment.
    Seller,
}

/// A credit default swap.
///
/// The contract exchanges a periodic premium (and optionally a single
/// upfront payment) for the protection payment `(1 - R) * notional` on
/// default of the reference entity. Immutable once built; calibration
/// helpers rebuild the contract whenever its evaluation-date-relative
/// inputs change.
#[derive(Debug, Clone)]
pub struct CreditDefaultSwap {
    side: ProtectionSide,
    notional: f64,
    running_spread: f64,
    upfront: Option<f64>,
    schedule: Schedule,
    payment_convention: BusinessDayConvention,
    day_count: DayCountConvention,
    settles_accrual: bool,
    pays_at_default_time: bool,
    protection_start: Date,
    upfront_date: Option<Date>,
}

impl CreditDefaultSwap {
    /// Creates a running-spread-only CDS.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` on inconsistent inputs
    /// (non-positive notional, negative spread, protection starting after
    /// the first accrual date).
    #[allow(clippy::too_many_arguments)]
    pub fn new_running_only(
        side: ProtectionSide,
        notional: f64,
        running_spread: f64,
        schedule: Schedule,
        payment_convention: BusinessDayConvention,
        day_count: DayCountConvention,
        settles_accrual: bool,
        pays_at_default_time: bool,
        protection_start: Date,
    ) -> CreditResult<Self> {
        let swap = Self {
            side,
            notional,
            running_spread,
            upfront: None,
            schedule,
            payment_convention,
            day_count,
            settles_accrual,
            pays_at_default_time,
            protection_start,
            upfront_date: None,
        };
        swap.validate()?;
        Ok(swap)
    }

    /// Creates a CDS with an upfront payment and a fixed running spread.
    ///
    /// The upfront is quoted in fractional units of the notional and is
    /// exchanged on `upfront_date`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` on inconsistent inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_upfront(
        side: ProtectionSide,
        notional: f64,
        upfront: f64,
        running_spread: f64,
        schedule: Schedule,
        payment_convention: BusinessDayConvention,
        day_count: DayCountConvention,
        settles_accrual: bool,
        pays_at_default_time: bool,
        protection_start: Date,
        upfront_date: Date,
    ) -> CreditResult<Self> {
        let swap = Self {
            side,
            notional,
            running_spread,
            upfront: Some(upfront),
            schedule,
            payment_convention,
            day_count,
            settles_accrual,
            pays_at_default_time,
            protection_start,
            upfront_date: Some(upfront_date),
        };
        swap.validate()?;
        Ok(swap)
    }

    fn validate(&self) -> CreditResult<()> {
        if !self.notional.is_finite() || self.notional <= 0.0 {
            return Err(CreditError::invalid_specification(format!(
                "notional {} must be positive",
                self.notional
            )));
        }
        if !self.running_spread.is_finite() || self.running_spread < 0.0 {
            return Err(CreditError::invalid_specification(format!(
                "running spread {} must be non-negative",
                self.running_spread
            )));
        }
        if let Some(upfront) = self.upfront {
            if !upfront.is_finite() {
                return Err(CreditError::invalid_specification(
                    "upfront must be finite",
                ));
            }
        }
        if self.protection_start > self.schedule.first_date() {
            return Err(CreditError::invalid_specification(format!(
                "protection start {} is after the first accrual date {}",
                self.protection_start,
                self.schedule.first_date()
            )));
        }
        Ok(())
    }

    /// Returns the protection side.
    #[must_use]
    pub fn side(&self) -> ProtectionSide {
        self.side
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the running spread.
    #[must_use]
    pub fn running_spread(&self) -> f64 {
        self.running_spread
    }

    /// Returns the upfront fraction, if any.
    #[must_use]
    pub fn upfront(&self) -> Option<f64> {
        self.upfront
    }

    /// Returns the premium accrual schedule.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the payment business-day convention.
    #[must_use]
    pub fn payment_convention(&self) -> BusinessDayConvention {
        self.payment_convention
    }

    /// Returns the premium day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns true if accrued premium is settled on default.
    #[must_use]
    pub fn settles_accrual(&self) -> bool {
        self.settles_accrual
    }

    /// Returns true if default payments occur at default time rather than
    /// at the end of the accrual period.
    #[must_use]
    pub fn pays_at_default_time(&self) -> bool {
        self.pays_at_default_time
    }

    /// Returns the protection effective date.
    #[must_use]
    pub fn protection_start(&self) -> Date {
        self.protection_start
    }

    /// Returns the upfront settlement date, if any.
    #[must_use]
    pub fn upfront_date(&self) -> Option<Date> {
        self.upfront_date
    }

    /// Returns the contract maturity (last schedule date).
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.schedule.last_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::calendars::TargetCalendar;
    use credo_core::schedule::{DateGenerationRule, ScheduleBuilder};
    use credo_core::Frequency;

    fn sample_schedule() -> Schedule {
        let calendar = TargetCalendar::new();
        ScheduleBuilder::new(
            Date::from_ymd(2007, 5, 15).unwrap(),
            Date::from_ymd(2008, 5, 15).unwrap(),
            &calendar,
        )
        .with_frequency(Frequency::Quarterly)
        .with_rule(DateGenerationRule::TwentiethImm)
        .build()
        .unwrap()
    }

    #[test]
    fn test_running_only_construction() {
        let swap = CreditDefaultSwap::new_running_only(
            ProtectionSide::Buyer,
            100.0,
            0.0150,
            sample_schedule(),
            BusinessDayConvention::Following,
            DayCountConvention::Act365Fixed,
            true,
            true,
            Date::from_ymd(2007, 5, 15).unwrap(),
        )
        .unwrap();

        assert_eq!(swap.maturity(), Date::from_ymd(2008, 6, 20).unwrap());
        assert!(swap.upfront().is_none());
    }

    #[test]
    fn test_rejects_bad_notional_and_spread() {
        let protection_start = Date::from_ymd(2007, 5, 15).unwrap();

        let result = CreditDefaultSwap::new_running_only(
            ProtectionSide::Buyer,
            0.0,
            0.0150,
            sample_schedule(),
            BusinessDayConvention::Following,
            DayCountConvention::Act365Fixed,
            true,
            true,
            protection_start,
        );
        assert!(result.is_err());

        let result = CreditDefaultSwap::new_running_only(
            ProtectionSide::Buyer,
            100.0,
            -0.01,
            sample_schedule(),
            BusinessDayConvention::Following,
            DayCountConvention::Act365Fixed,
            true,
            true,
            protection_start,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_protection_after_first_accrual() {
        let result = CreditDefaultSwap::new_running_only(
            ProtectionSide::Buyer,
            100.0,
            0.0150,
            sample_schedule(),
            BusinessDayConvention::Following,
            DayCountConvention::Act365Fixed,
            true,
            true,
            Date::from_ymd(2007, 6, 1).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_upfront_construction() {
        let swap = CreditDefaultSwap::new_with_upfront(
            ProtectionSide::Buyer,
            100.0,
            0.01,
            0.0100,
            sample_schedule(),
            BusinessDayConvention::Following,
            DayCountConvention::Act365Fixed,
            true,
            true,
            Date::from_ymd(2007, 5, 15).unwrap(),
            Date::from_ymd(2007, 5, 15).unwrap(),
        )
        .unwrap();

        assert_eq!(swap.upfront(), Some(0.01));
        assert!(swap.upfront_date().is_some());
    }
}
