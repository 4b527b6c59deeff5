//! Upfront-quoted CDS bootstrap helper.

use credo_core::Date;

use super::base::CdsHelperBase;
use super::{CdsSpec, DefaultProbabilityHelper};
use crate::curves::CurveHandle;
use crate::error::{CreditError, CreditResult};
use crate::instruments::{CreditDefaultSwap, ProtectionSide};
use crate::quotes::{QuoteHandle, SimpleQuote};

/// Placeholder notional of the synthetic swap; cancels in the fair upfront.
const SYNTHETIC_NOTIONAL: f64 = 100.0;
/// Placeholder upfront of the synthetic swap; the fair upfront does not
/// depend on it.
const SYNTHETIC_UPFRONT: f64 = 0.01;

/// Bootstrap helper for a CDS quoted as an upfront fractional price.
///
/// The contract carries a fixed running spread supplied separately from
/// the calibrated quote, plus an upfront settlement date recomputed
/// whenever the relative dates are regenerated. The implied quote is the
/// fair upfront price, valued *including* cashflows falling on the
/// valuation date itself - dropping them biases the implied quote.
pub struct UpfrontCdsHelper {
    base: CdsHelperBase,
    running_spread: f64,
    upfront_settlement_days: u32,
    upfront_date: Date,
    swap: Option<CreditDefaultSwap>,
}

impl UpfrontCdsHelper {
    /// Creates a helper observing a shared upfront quote.
    ///
    /// The upfront must be quoted in fractional units.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the specification is
    /// inconsistent or the fixed running spread is negative.
    pub fn new(
        upfront: QuoteHandle,
        running_spread: f64,
        upfront_settlement_days: u32,
        spec: CdsSpec,
        evaluation_date: Date,
    ) -> CreditResult<Self> {
        if !running_spread.is_finite() || running_spread < 0.0 {
            return Err(CreditError::invalid_specification(format!(
                "fixed running spread {running_spread} must be non-negative"
            )));
        }

        let base = CdsHelperBase::new(upfront, spec, evaluation_date)?;
        let upfront_date =
            upfront_settlement_date(&base, upfront_settlement_days, evaluation_date)?;
        let mut helper = Self {
            base,
            running_spread,
            upfront_settlement_days,
            upfront_date,
            swap: None,
        };
        helper.reset_instrument()?;
        Ok(helper)
    }

    /// Creates a helper from a plain quote value.
    pub fn with_value(
        upfront: f64,
        running_spread: f64,
        upfront_settlement_days: u32,
        spec: CdsSpec,
        evaluation_date: Date,
    ) -> CreditResult<Self> {
        Self::new(
            SimpleQuote::handle(upfront)?,
            running_spread,
            upfront_settlement_days,
            spec,
            evaluation_date,
        )
    }

    /// Returns the upfront settlement date.
    #[must_use]
    pub fn upfront_date(&self) -> Date {
        self.upfront_date
    }

    /// Rebuilds the synthetic swap from the current relative dates.
    fn reset_instrument(&mut self) -> CreditResult<()> {
        let spec = self.base.spec();
        let swap = CreditDefaultSwap::new_with_upfront(
            ProtectionSide::Buyer,
            SYNTHETIC_NOTIONAL,
            SYNTHETIC_UPFRONT,
            self.running_spread,
            self.base.schedule().clone(),
            spec.payment_convention,
            spec.day_count,
            spec.settles_accrual,
            spec.pays_at_default_time,
            self.base.protection_start(),
            self.upfront_date,
        )?;
        self.swap = Some(swap);
        Ok(())
    }

    fn swap(&self) -> CreditResult<&CreditDefaultSwap> {
        self.swap
            .as_ref()
            .ok_or_else(|| CreditError::not_ready("synthetic swap has not been built"))
    }
}

impl DefaultProbabilityHelper for UpfrontCdsHelper {
    fn quote(&self) -> f64 {
        self.base.quote_value()
    }

    fn quote_version(&self) -> u64 {
        self.base.quote_version()
    }

    fn discount_version(&self) -> u64 {
        self.base.discount_version()
    }

    fn earliest_date(&self) -> Date {
        self.base.earliest_date()
    }

    fn latest_date(&self) -> Date {
        self.base.latest_date()
    }

    fn initialize_dates(&mut self, evaluation_date: Date) -> CreditResult<()> {
        self.base.initialize_dates(evaluation_date)?;
        self.upfront_date =
            upfront_settlement_date(&self.base, self.upfront_settlement_days, evaluation_date)?;
        self.reset_instrument()
    }

    fn set_term_structure(&mut self, handle: CurveHandle) -> CreditResult<()> {
        self.base.set_term_structure(handle)?;
        self.reset_instrument()
    }

    fn implied_quote(&self) -> CreditResult<f64> {
        let engine = self.base.engine()?;
        // Historical cashflows between protection start and the valuation
        // date belong in the upfront valuation.
        engine.fair_upfront(self.swap()?, true)
    }

    fn description(&self) -> String {
        format!(
            "Upfront CDS {} @ {}bp running, maturing {}",
            self.base.spec().tenor,
            self.running_spread * 10_000.0,
            self.base.latest_date()
        )
    }
}

/// The upfront settlement date: the evaluation date advanced by the
/// settlement lag in business days, convention-adjusted for a zero lag.
fn upfront_settlement_date(
    base: &CdsHelperBase,
    settlement_days: u32,
    evaluation_date: Date,
) -> CreditResult<Date> {
    let spec = base.spec();
    if settlement_days == 0 {
        Ok(spec
            .calendar
            .adjust(evaluation_date, spec.payment_convention)?)
    } else {
        Ok(spec
            .calendar
            .add_business_days(evaluation_date, settlement_days as i32))
    }
}
