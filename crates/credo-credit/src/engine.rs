//! Mid-point CDS pricing engine.
//!
//! Prices the premium and protection legs under the mid-point
//! approximation: defaults within an accrual period are assumed to occur
//! at the period's midpoint, where the accrued premium (if settled) and
//! the protection payment are exchanged.

use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;

use credo_core::daycounts::DayCount;
use credo_core::Date;

use crate::curves::{CurveHandle, DiscountCurve};
use crate::error::{CreditError, CreditResult};
use crate::instruments::{CreditDefaultSwap, ProtectionSide};

/// Present values of the two CDS legs, as positive magnitudes.
#[derive(Debug, Clone, Copy)]
struct LegValues {
    premium: f64,
    protection: f64,
}

/// Mid-point CDS pricing engine.
///
/// Reads survival probabilities through a re-linkable [`CurveHandle`], so
/// a bootstrap run can move the trial curve under the engine without
/// rebuilding it.
#[derive(Clone)]
pub struct MidPointCdsEngine {
    probability: CurveHandle,
    recovery_rate: f64,
    discount: Arc<dyn DiscountCurve>,
}

impl MidPointCdsEngine {
    /// Creates a new engine.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the recovery rate is
    /// outside `[0, 1)`.
    pub fn new(
        probability: CurveHandle,
        recovery_rate: f64,
        discount: Arc<dyn DiscountCurve>,
    ) -> CreditResult<Self> {
        if !recovery_rate.is_finite() || !(0.0..1.0).contains(&recovery_rate) {
            return Err(CreditError::invalid_specification(format!(
                "recovery rate {recovery_rate} must lie in [0, 1)"
            )));
        }
        Ok(Self {
            probability,
            recovery_rate,
            discount,
        })
    }

    /// Returns the recovery rate.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Returns the curve handle the engine prices against.
    #[must_use]
    pub fn probability(&self) -> &CurveHandle {
        &self.probability
    }

    /// Present value of the premium leg (positive magnitude).
    ///
    /// `include_settled` keeps cashflows falling on the valuation date
    /// itself instead of treating them as settled.
    pub fn premium_leg_npv(
        &self,
        swap: &CreditDefaultSwap,
        include_settled: bool,
    ) -> CreditResult<f64> {
        Ok(self.leg_values(swap, include_settled)?.premium)
    }

    /// Present value of the protection leg (positive magnitude).
    pub fn protection_leg_npv(
        &self,
        swap: &CreditDefaultSwap,
        include_settled: bool,
    ) -> CreditResult<f64> {
        Ok(self.leg_values(swap, include_settled)?.protection)
    }

    /// Contract NPV from the holder's perspective.
    pub fn npv(&self, swap: &CreditDefaultSwap, include_settled: bool) -> CreditResult<f64> {
        let legs = self.leg_values(swap, include_settled)?;
        let upfront = self.upfront_npv(swap, include_settled);
        let buyer_value = legs.protection - legs.premium - upfront;
        Ok(match swap.side() {
            ProtectionSide::Buyer => buyer_value,
            ProtectionSide::Seller => -buyer_value,
        })
    }

    /// The running spread that makes the contract worth zero, ignoring
    /// any upfront exchange.
    ///
    /// Both premium terms scale linearly in the running spread, so the
    /// fair spread is recovered by rescaling the contract's spread.
    pub fn fair_spread(&self, swap: &CreditDefaultSwap) -> CreditResult<f64> {
        let legs = self.leg_values(swap, false)?;
        if legs.premium <= 0.0 {
            return Err(CreditError::pricing(
                "premium leg has no value; fair spread is undefined",
            ));
        }
        Ok(swap.running_spread() * legs.protection / legs.premium)
    }

    /// The upfront fraction that makes the contract worth zero at the
    /// contract's fixed running spread.
    ///
    /// `include_settled` is a per-call choice: historical cashflows
    /// between protection start and the valuation date are part of the
    /// fair value when set.
    pub fn fair_upfront(
        &self,
        swap: &CreditDefaultSwap,
        include_settled: bool,
    ) -> CreditResult<f64> {
        let upfront_date = swap.upfront_date().ok_or_else(|| {
            CreditError::pricing("fair upfront requires an upfront settlement date")
        })?;
        let upfront_df = self.discount.discount_factor(upfront_date);
        if upfront_df <= 0.0 {
            return Err(CreditError::pricing(format!(
                "degenerate discount factor {upfront_df} at upfront settlement"
            )));
        }

        let legs = self.leg_values(swap, include_settled)?;
        Ok((legs.protection - legs.premium) / (swap.notional() * upfront_df))
    }

    /// Present value of the upfront exchange, zero when already settled.
    fn upfront_npv(&self, swap: &CreditDefaultSwap, include_settled: bool) -> f64 {
        let (Some(upfront), Some(upfront_date)) = (swap.upfront(), swap.upfront_date()) else {
            return 0.0;
        };
        if is_settled(upfront_date, self.discount.reference_date(), include_settled) {
            return 0.0;
        }
        upfront * swap.notional() * self.discount.discount_factor(upfront_date)
    }

    fn leg_values(&self, swap: &CreditDefaultSwap, include_settled: bool) -> CreditResult<LegValues> {
        let today = self.discount.reference_date();
        let day_count = swap.day_count().to_day_count();
        let claim = (1.0 - self.recovery_rate) * swap.notional();

        let mut premium = 0.0;
        let mut protection = 0.0;

        for (start, end) in swap.schedule().periods() {
            let payment_date = end;
            if is_settled(payment_date, today, include_settled) {
                continue;
            }

            // Premium coupon paid on survival to the payment date
            let accrual = year_fraction(day_count.as_ref(), start, end);
            let coupon = swap.notional() * swap.running_spread() * accrual;
            let survival = self.probability.survival_probability(payment_date);
            let payment_df = self.discount.discount_factor(payment_date);
            premium += coupon * survival * payment_df;

            // Default exposure starts no earlier than the protection date
            let effective_start = start.max(swap.protection_start());
            if end <= effective_start {
                continue;
            }

            let default_probability = self
                .probability
                .default_probability_between(effective_start, end);
            let mid = midpoint(effective_start, end);
            let default_df = if swap.pays_at_default_time() {
                self.discount.discount_factor(mid)
            } else {
                payment_df
            };

            if swap.settles_accrual() {
                let accrued =
                    swap.notional() * swap.running_spread() * year_fraction(day_count.as_ref(), start, mid);
                premium += default_probability * accrued * default_df;
            }

            protection += default_probability * claim * default_df;
        }

        Ok(LegValues {
            premium,
            protection,
        })
    }
}

/// Whether a cashflow date counts as settled at the valuation date.
fn is_settled(payment_date: Date, today: Date, include_settled: bool) -> bool {
    if include_settled {
        payment_date < today
    } else {
        payment_date <= today
    }
}

/// Mid-point of a period in calendar days.
fn midpoint(start: Date, end: Date) -> Date {
    start.add_days(start.days_between(&end) / 2)
}

fn year_fraction(day_count: &dyn DayCount, start: Date, end: Date) -> f64 {
    day_count.year_fraction(start, end).to_f64().unwrap_or(0.0)
}
