//! Coupon schedule generation.
//!
//! A [`Schedule`] is an ordered sequence of accrual dates. The
//! [`ScheduleBuilder`] generates schedules between two dates under a
//! payment frequency, a calendar, business day conventions, and a
//! [`DateGenerationRule`], including the standard CDS roll on the 20th
//! of the IMM months.

use serde::{Deserialize, Serialize};

use crate::calendars::{BusinessDayConvention, Calendar};
use crate::error::{CredoError, CredoResult};
use crate::types::{Date, Frequency};

/// Rule used to generate intermediate schedule dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateGenerationRule {
    /// Dates are generated forward from the start date.
    #[default]
    Forward,
    /// Dates are generated backward from the end date.
    Backward,
    /// Dates fall on the 20th of March, June, September, and December
    /// (the credit IMM roll); the end date is rolled forward onto the
    /// next such twentieth.
    TwentiethImm,
}

/// An ordered sequence of accrual dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Creates a schedule from explicit dates.
    ///
    /// # Errors
    ///
    /// Returns `CredoError::InvalidSchedule` if fewer than two dates are
    /// given or the dates are not strictly increasing.
    pub fn from_dates(dates: Vec<Date>) -> CredoResult<Self> {
        if dates.len() < 2 {
            return Err(CredoError::invalid_schedule(format!(
                "need at least two dates, got {}",
                dates.len()
            )));
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(CredoError::invalid_schedule(format!(
                    "dates not strictly increasing: {} then {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { dates })
    }

    /// Returns the schedule dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the first schedule date.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.dates[0]
    }

    /// Returns the last schedule date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Returns the number of accrual periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.dates.len() - 1
    }

    /// Iterates over the accrual periods as (start, end) pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Builder for coupon schedules.
///
/// # Example
///
/// ```rust
/// use credo_core::prelude::*;
///
/// let calendar = TargetCalendar::new();
/// let schedule = ScheduleBuilder::new(
///     Date::from_ymd(2007, 5, 15).unwrap(),
///     Date::from_ymd(2008, 5, 15).unwrap(),
///     &calendar,
/// )
/// .with_frequency(Frequency::Quarterly)
/// .with_rule(DateGenerationRule::TwentiethImm)
/// .build()
/// .unwrap();
///
/// assert_eq!(schedule.last_date(), Date::from_ymd(2008, 6, 20).unwrap());
/// ```
pub struct ScheduleBuilder<'a> {
    from: Date,
    to: Date,
    calendar: &'a dyn Calendar,
    frequency: Frequency,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGenerationRule,
}

impl<'a> ScheduleBuilder<'a> {
    /// Creates a builder for a schedule from `from` to `to`.
    #[must_use]
    pub fn new(from: Date, to: Date, calendar: &'a dyn Calendar) -> Self {
        Self {
            from,
            to,
            calendar,
            frequency: Frequency::Quarterly,
            convention: BusinessDayConvention::Following,
            termination_convention: BusinessDayConvention::Unadjusted,
            rule: DateGenerationRule::Forward,
        }
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the business day convention for intermediate dates.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the business day convention for the termination date.
    #[must_use]
    pub fn with_termination_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.termination_convention = convention;
        self
    }

    /// Sets the date generation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: DateGenerationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Generates the schedule.
    ///
    /// # Errors
    ///
    /// Returns `CredoError::InvalidSchedule` if `from >= to` or the
    /// generated sequence degenerates.
    pub fn build(self) -> CredoResult<Schedule> {
        if self.from >= self.to {
            return Err(CredoError::invalid_schedule(format!(
                "start {} is not before end {}",
                self.from, self.to
            )));
        }

        let step = self.frequency.months_per_period() as i32;

        let mut dates = match self.rule {
            DateGenerationRule::Forward => self.generate_forward(step)?,
            DateGenerationRule::Backward => self.generate_backward(step)?,
            DateGenerationRule::TwentiethImm => self.generate_twentieth_imm(step)?,
        };

        // Adjustment can collapse neighbouring dates; drop the duplicates.
        dates.dedup();

        Schedule::from_dates(dates)
    }

    fn generate_forward(&self, step: i32) -> CredoResult<Vec<Date>> {
        let mut dates = vec![self.from];
        let mut nominal = self.from;

        loop {
            nominal = nominal.add_months(step)?;
            if nominal >= self.to {
                break;
            }
            dates.push(self.calendar.adjust(nominal, self.convention)?);
        }

        dates.push(self.calendar.adjust(self.to, self.termination_convention)?);
        Ok(dates)
    }

    fn generate_backward(&self, step: i32) -> CredoResult<Vec<Date>> {
        let mut stack = vec![self.calendar.adjust(self.to, self.termination_convention)?];
        let mut nominal = self.to;

        loop {
            nominal = nominal.add_months(-step)?;
            if nominal <= self.from {
                break;
            }
            stack.push(self.calendar.adjust(nominal, self.convention)?);
        }

        stack.push(self.from);
        stack.reverse();
        Ok(stack)
    }

    fn generate_twentieth_imm(&self, step: i32) -> CredoResult<Vec<Date>> {
        let last = self
            .calendar
            .adjust(next_twentieth(self.to)?, self.termination_convention)?;

        let mut dates = vec![self.from];
        let mut roll = next_twentieth(self.from)?;
        while roll < last {
            dates.push(self.calendar.adjust(roll, self.convention)?);
            roll = roll.add_months(step)?;
        }
        dates.push(last);
        Ok(dates)
    }
}

/// The next 20th of an IMM month (March/June/September/December)
/// on or after the given date.
fn next_twentieth(date: Date) -> CredoResult<Date> {
    let mut result = Date::from_ymd(date.year(), date.month(), 20)?;
    if result < date {
        result = result.add_months(1)?;
    }
    let to_imm = match result.month() % 3 {
        1 => 2,
        2 => 1,
        _ => 0,
    };
    if to_imm > 0 {
        result = result.add_months(to_imm)?;
    }
    Ok(result)
}
