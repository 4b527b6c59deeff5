//! Shared state and date logic of the CDS helper variants.

use credo_core::calendars::BusinessDayConvention;
use credo_core::schedule::{Schedule, ScheduleBuilder};
use credo_core::Date;

use super::CdsSpec;
use crate::curves::CurveHandle;
use crate::engine::MidPointCdsEngine;
use crate::error::{CreditError, CreditResult};
use crate::quotes::QuoteHandle;

/// Evaluation-date-relative state shared by the spread and upfront
/// helpers: quote handle, specification, protection start, schedule,
/// solver bounds, and the bound curve/engine pair.
pub(super) struct CdsHelperBase {
    quote: QuoteHandle,
    spec: CdsSpec,
    evaluation_date: Date,
    protection_start: Date,
    schedule: Schedule,
    earliest_date: Date,
    latest_date: Date,
    engine: Option<MidPointCdsEngine>,
}

impl CdsHelperBase {
    pub(super) fn new(
        quote: QuoteHandle,
        spec: CdsSpec,
        evaluation_date: Date,
    ) -> CreditResult<Self> {
        spec.validate()?;
        let dates = RelativeDates::generate(&spec, evaluation_date)?;
        Ok(Self {
            quote,
            spec,
            evaluation_date,
            protection_start: dates.protection_start,
            schedule: dates.schedule,
            earliest_date: dates.earliest,
            latest_date: dates.latest,
            engine: None,
        })
    }

    /// Regenerates protection start, schedule, and solver bounds.
    ///
    /// Stale relative dates are a correctness bug, so this runs on every
    /// update even when the evaluation date is unchanged.
    pub(super) fn initialize_dates(&mut self, evaluation_date: Date) -> CreditResult<()> {
        let dates = RelativeDates::generate(&self.spec, evaluation_date)?;
        self.evaluation_date = evaluation_date;
        self.protection_start = dates.protection_start;
        self.schedule = dates.schedule;
        self.earliest_date = dates.earliest;
        self.latest_date = dates.latest;
        Ok(())
    }

    /// Re-links the helper to the curve under construction and rebuilds
    /// the pricing engine against it.
    pub(super) fn set_term_structure(&mut self, handle: CurveHandle) -> CreditResult<()> {
        let engine = MidPointCdsEngine::new(
            handle,
            self.spec.recovery_rate,
            self.spec.discount.clone(),
        )?;
        self.engine = Some(engine);
        Ok(())
    }

    pub(super) fn engine(&self) -> CreditResult<&MidPointCdsEngine> {
        self.engine
            .as_ref()
            .ok_or_else(|| CreditError::not_ready("helper is not bound to a survival curve"))
    }

    pub(super) fn is_bound(&self) -> bool {
        self.engine.is_some()
    }

    pub(super) fn quote_value(&self) -> f64 {
        self.quote.value()
    }

    pub(super) fn quote_version(&self) -> u64 {
        self.quote.version()
    }

    pub(super) fn discount_version(&self) -> u64 {
        self.spec.discount.version()
    }

    pub(super) fn spec(&self) -> &CdsSpec {
        &self.spec
    }

    pub(super) fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    pub(super) fn protection_start(&self) -> Date {
        self.protection_start
    }

    pub(super) fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub(super) fn earliest_date(&self) -> Date {
        self.earliest_date
    }

    pub(super) fn latest_date(&self) -> Date {
        self.latest_date
    }
}

/// The dates a helper must regenerate whenever the evaluation date moves.
struct RelativeDates {
    protection_start: Date,
    schedule: Schedule,
    earliest: Date,
    latest: Date,
}

impl RelativeDates {
    fn generate(spec: &CdsSpec, evaluation_date: Date) -> CreditResult<Self> {
        // Protection starts a settlement lag of calendar days after the
        // evaluation date; accrual starts at its adjusted counterpart.
        let protection_start = evaluation_date.add_days(i64::from(spec.settlement_days));
        let start = spec
            .calendar
            .adjust(protection_start, spec.payment_convention)?;
        let end = spec.tenor.advance(evaluation_date)?;

        let schedule = ScheduleBuilder::new(start, end, spec.calendar.as_ref())
            .with_frequency(spec.frequency)
            .with_convention(spec.payment_convention)
            .with_termination_convention(BusinessDayConvention::Unadjusted)
            .with_rule(spec.rule)
            .build()?;

        let earliest = schedule.first_date();
        let latest = spec
            .calendar
            .adjust(schedule.last_date(), spec.payment_convention)?;

        Ok(Self {
            protection_start,
            schedule,
            earliest,
            latest,
        })
    }
}
