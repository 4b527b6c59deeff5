//! Spread-quoted CDS bootstrap helper.

use credo_core::Date;

use super::base::CdsHelperBase;
use super::{CdsSpec, DefaultProbabilityHelper};
use crate::curves::CurveHandle;
use crate::error::{CreditError, CreditResult};
use crate::instruments::{CreditDefaultSwap, ProtectionSide};
use crate::quotes::{QuoteHandle, SimpleQuote};

/// Placeholder notional of the synthetic swap; cancels in the fair spread.
const SYNTHETIC_NOTIONAL: f64 = 100.0;
/// Placeholder coupon of the synthetic swap; cancels in the fair spread.
const SYNTHETIC_COUPON: f64 = 0.01;

/// Bootstrap helper for a CDS quoted as a running par spread.
///
/// The implied quote is the fair running spread of a synthetic CDS built
/// from the specification's conventions, priced against the trial curve.
/// The synthetic instrument is rebuilt on every date initialization
/// because the schedule and protection start move with the evaluation
/// date.
pub struct SpreadCdsHelper {
    base: CdsHelperBase,
    swap: Option<CreditDefaultSwap>,
}

impl SpreadCdsHelper {
    /// Creates a helper observing a shared quote.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the specification is
    /// internally inconsistent.
    pub fn new(
        running_spread: QuoteHandle,
        spec: CdsSpec,
        evaluation_date: Date,
    ) -> CreditResult<Self> {
        let mut helper = Self {
            base: CdsHelperBase::new(running_spread, spec, evaluation_date)?,
            swap: None,
        };
        helper.reset_instrument()?;
        Ok(helper)
    }

    /// Creates a helper from a plain quote value.
    pub fn with_value(
        running_spread: f64,
        spec: CdsSpec,
        evaluation_date: Date,
    ) -> CreditResult<Self> {
        Self::new(SimpleQuote::handle(running_spread)?, spec, evaluation_date)
    }

    /// Rebuilds the synthetic swap from the current relative dates.
    fn reset_instrument(&mut self) -> CreditResult<()> {
        let spec = self.base.spec();
        let swap = CreditDefaultSwap::new_running_only(
            ProtectionSide::Buyer,
            SYNTHETIC_NOTIONAL,
            SYNTHETIC_COUPON,
            self.base.schedule().clone(),
            spec.payment_convention,
            spec.day_count,
            spec.settles_accrual,
            spec.pays_at_default_time,
            self.base.protection_start(),
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

impl DefaultProbabilityHelper for SpreadCdsHelper {
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
        self.reset_instrument()
    }

    fn set_term_structure(&mut self, handle: CurveHandle) -> CreditResult<()> {
        self.base.set_term_structure(handle)?;
        self.reset_instrument()
    }

    fn implied_quote(&self) -> CreditResult<f64> {
        let engine = self.base.engine()?;
        engine.fair_spread(self.swap()?)
    }

    fn description(&self) -> String {
        format!(
            "Spread CDS {} maturing {}",
            self.base.spec().tenor,
            self.base.latest_date()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{FlatForwardCurve, SurvivalCurve};
    use approx::assert_relative_eq;
    use credo_core::calendars::{BusinessDayConvention, TargetCalendar};
    use credo_core::daycounts::DayCountConvention;
    use credo_core::schedule::DateGenerationRule;
    use credo_core::{Frequency, Tenor};
    use std::sync::Arc;

    fn evaluation_date() -> Date {
        Date::from_ymd(2007, 5, 15).unwrap()
    }

    fn sample_spec(tenor: Tenor) -> CdsSpec {
        CdsSpec {
            tenor,
            settlement_days: 0,
            calendar: Arc::new(TargetCalendar::new()),
            frequency: Frequency::Quarterly,
            payment_convention: BusinessDayConvention::Following,
            rule: DateGenerationRule::TwentiethImm,
            day_count: DayCountConvention::Act365Fixed,
            recovery_rate: 0.5,
            discount: FlatForwardCurve::handle(evaluation_date(), 0.0).unwrap(),
            settles_accrual: true,
            pays_at_default_time: true,
        }
    }

    fn flat_hazard_handle(hazard: f64) -> CurveHandle {
        let curve = SurvivalCurve::new(evaluation_date())
            .extended_with(Date::from_ymd(2012, 5, 15).unwrap(), hazard)
            .unwrap();
        CurveHandle::new(curve)
    }

    #[test]
    fn test_not_ready_before_binding() {
        let helper =
            SpreadCdsHelper::with_value(0.0150, sample_spec(Tenor::years(1)), evaluation_date())
                .unwrap();

        assert!(matches!(
            helper.implied_quote(),
            Err(CreditError::NotReady { .. })
        ));
    }

    #[test]
    fn test_implied_quote_matches_credit_triangle() {
        let mut helper =
            SpreadCdsHelper::with_value(0.0150, sample_spec(Tenor::years(2)), evaluation_date())
                .unwrap();
        helper.set_term_structure(flat_hazard_handle(0.03)).unwrap();

        // Flat 3% hazard, 50% recovery, zero rates: implied spread ~150bp
        let implied = helper.implied_quote().unwrap();
        assert_relative_eq!(implied, 0.0150, epsilon = 2e-5);
    }

    #[test]
    fn test_implied_quote_is_deterministic() {
        let mut helper =
            SpreadCdsHelper::with_value(0.0150, sample_spec(Tenor::years(1)), evaluation_date())
                .unwrap();
        helper.set_term_structure(flat_hazard_handle(0.03)).unwrap();

        let first = helper.implied_quote().unwrap();
        let second = helper.implied_quote().unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_quote_error_reads_live_quote() {
        let quote = SimpleQuote::handle(0.0150).unwrap();
        let mut helper =
            SpreadCdsHelper::new(quote.clone(), sample_spec(Tenor::years(1)), evaluation_date())
                .unwrap();
        helper.set_term_structure(flat_hazard_handle(0.03)).unwrap();

        let before = helper.quote_error().unwrap();
        quote.set_value(0.0175).unwrap();
        let after = helper.quote_error().unwrap();

        // The implied side is unchanged; the observed side moved by 25bp
        assert_relative_eq!(before - after, 0.0025, epsilon = 1e-12);
    }

    #[test]
    fn test_update_regenerates_instrument() {
        let mut helper =
            SpreadCdsHelper::with_value(0.0150, sample_spec(Tenor::years(1)), evaluation_date())
                .unwrap();
        helper.set_term_structure(flat_hazard_handle(0.03)).unwrap();

        let old_maturity = helper.latest_date();
        helper.update(Date::from_ymd(2007, 11, 15).unwrap()).unwrap();

        assert!(helper.latest_date() > old_maturity);
        // Still priced cleanly after the roll
        assert!(helper.implied_quote().unwrap() > 0.0);
    }

    #[test]
    fn test_helper_observes_curve_relink() {
        let mut helper =
            SpreadCdsHelper::with_value(0.0150, sample_spec(Tenor::years(1)), evaluation_date())
                .unwrap();
        let handle = flat_hazard_handle(0.01);
        helper.set_term_structure(handle.clone()).unwrap();

        let low_hazard = helper.implied_quote().unwrap();

        let steeper = SurvivalCurve::new(evaluation_date())
            .extended_with(Date::from_ymd(2012, 5, 15).unwrap(), 0.05)
            .unwrap();
        handle.link(steeper);

        let high_hazard = helper.implied_quote().unwrap();
        assert!(high_hazard > low_hazard);
    }

    #[test]
    fn test_description_names_the_contract() {
        let helper =
            SpreadCdsHelper::with_value(0.0150, sample_spec(Tenor::years(1)), evaluation_date())
                .unwrap();
        let description = helper.description();
        assert!(description.contains("1Y"));
        assert!(description.contains("2008-06-20"));
    }
}
