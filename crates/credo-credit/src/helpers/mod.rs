//! Calibration helpers for the hazard-rate bootstrap.
//!
//! A helper wraps one observed market quote together with the conventions
//! needed to build a synthetic CDS anchored to the evaluation date, and
//! translates the quote into an *implied quote* as a function of the
//! trial survival curve. The bootstrapper drives many helpers, ordered by
//! maturity, through the [`DefaultProbabilityHelper`] trait without
//! knowing which quoting convention each one carries.

mod base;
mod spread;
mod upfront;

pub use spread::SpreadCdsHelper;
pub use upfront::UpfrontCdsHelper;

use std::sync::Arc;

use credo_core::calendars::{BusinessDayConvention, Calendar};
use credo_core::daycounts::DayCountConvention;
use credo_core::schedule::DateGenerationRule;
use credo_core::{Date, Frequency, Tenor};

use crate::curves::{CurveHandle, DiscountCurve};
use crate::error::{CreditError, CreditResult};

/// The instrument specification shared by all CDS helpers.
///
/// Everything here is immutable once the helper is constructed; only the
/// evaluation-date-relative state (protection start, schedule, bounds) is
/// regenerated on updates.
#[derive(Clone)]
pub struct CdsSpec {
    /// Contract tenor (maturity relative to the evaluation date).
    pub tenor: Tenor,
    /// Settlement lag in calendar days for the protection start.
    pub settlement_days: u32,
    /// Business day calendar.
    pub calendar: Arc<dyn Calendar>,
    /// Premium payment frequency.
    pub frequency: Frequency,
    /// Business day convention for premium payments.
    pub payment_convention: BusinessDayConvention,
    /// Schedule date-generation rule.
    pub rule: DateGenerationRule,
    /// Premium accrual day count.
    pub day_count: DayCountConvention,
    /// Assumed recovery rate.
    pub recovery_rate: f64,
    /// Risk-free discount curve.
    pub discount: Arc<dyn DiscountCurve>,
    /// Whether accrued premium is settled on default.
    pub settles_accrual: bool,
    /// Whether default payments occur at default time.
    pub pays_at_default_time: bool,
}

impl CdsSpec {
    /// Validates the internal consistency of the specification.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` for a non-positive
    /// tenor or a recovery rate outside `[0, 1)`.
    pub fn validate(&self) -> CreditResult<()> {
        if !self.tenor.is_positive() {
            return Err(CreditError::invalid_specification(format!(
                "tenor {} must be positive",
                self.tenor
            )));
        }
        if !self.recovery_rate.is_finite() || !(0.0..1.0).contains(&self.recovery_rate) {
            return Err(CreditError::invalid_specification(format!(
                "recovery rate {} must lie in [0, 1)",
                self.recovery_rate
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CdsSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdsSpec")
            .field("tenor", &self.tenor)
            .field("settlement_days", &self.settlement_days)
            .field("calendar", &self.calendar.name())
            .field("frequency", &self.frequency)
            .field("payment_convention", &self.payment_convention)
            .field("rule", &self.rule)
            .field("day_count", &self.day_count)
            .field("recovery_rate", &self.recovery_rate)
            .field("settles_accrual", &self.settles_accrual)
            .field("pays_at_default_time", &self.pays_at_default_time)
            .finish()
    }
}

/// Trait for instruments that calibrate a default-probability curve.
///
/// The bootstrapper relies on the following contract:
///
/// - `latest_date()` is the pillar at which the curve node is solved
/// - `update()` regenerates all evaluation-date-relative state; it must
///   be called after any evaluation-date move and before the next
///   `implied_quote()`
/// - `set_term_structure()` binds the helper to the shared re-linkable
///   curve handle of the current bootstrap run
/// - `implied_quote()` prices the synthetic instrument against the
///   currently linked trial curve; calling it twice without an
///   intervening curve change returns the same value
/// - `quote_error()` is the root-finding objective
pub trait DefaultProbabilityHelper: Send + Sync {
    /// The current observed market quote.
    fn quote(&self) -> f64;

    /// Version stamp of the observed quote.
    fn quote_version(&self) -> u64;

    /// Version stamp of the referenced discount curve.
    fn discount_version(&self) -> u64;

    /// The earliest date relevant to this helper (first accrual date).
    fn earliest_date(&self) -> Date;

    /// The latest relevant date; the curve node is solved here.
    fn latest_date(&self) -> Date;

    /// Regenerates the protection start date and coupon schedule for a
    /// new evaluation date, and rebuilds the synthetic instrument.
    ///
    /// Idempotent; safe to call repeatedly.
    fn initialize_dates(&mut self, evaluation_date: Date) -> CreditResult<()>;

    /// Binds this helper to the survival curve under construction and
    /// rebuilds the pricing engine against it.
    fn set_term_structure(&mut self, handle: CurveHandle) -> CreditResult<()>;

    /// Notification handler for evaluation-date or input changes.
    fn update(&mut self, evaluation_date: Date) -> CreditResult<()> {
        self.initialize_dates(evaluation_date)
    }

    /// The model-implied quote given the currently linked trial curve.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::NotReady` if no curve has been bound.
    fn implied_quote(&self) -> CreditResult<f64>;

    /// The root-finding objective: `implied_quote() - quote()`.
    fn quote_error(&self) -> CreditResult<f64> {
        Ok(self.implied_quote()? - self.quote())
    }

    /// A description string for diagnostics.
    fn description(&self) -> String;
}
