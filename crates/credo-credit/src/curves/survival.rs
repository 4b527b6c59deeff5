//! Piecewise-flat hazard-rate survival curve.

use serde::{Deserialize, Serialize};

use credo_core::Date;

use crate::error::{CreditError, CreditResult};

/// Year basis used to convert dates to curve times (ACT/365F).
const DAYS_PER_YEAR: f64 = 365.0;

/// One solved node of a survival curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveNode {
    /// Node maturity.
    pub date: Date,
    /// Flat forward hazard rate on the segment ending at this node.
    pub hazard: f64,
}

/// A survival-probability term structure under a piecewise-flat forward
/// hazard-rate assumption.
///
/// Between consecutive nodes the instantaneous hazard rate is constant;
/// beyond the last node the final hazard rate is flat-continued, which
/// makes extrapolation deterministic while the curve is still under
/// construction. Extension never mutates an existing curve:
/// [`SurvivalCurve::extended_with`] returns a new instance, and the
/// owning bootstrap run re-links its [`super::CurveHandle`] to it.
///
/// # Example
///
/// ```rust
/// use credo_core::Date;
/// use credo_credit::curves::SurvivalCurve;
///
/// let reference = Date::from_ymd(2007, 5, 15).unwrap();
/// let curve = SurvivalCurve::new(reference)
///     .extended_with(Date::from_ymd(2008, 5, 15).unwrap(), 0.03)
///     .unwrap();
///
/// let survival = curve.survival_probability(Date::from_ymd(2008, 5, 15).unwrap());
/// assert!((survival - (-0.03f64 * 366.0 / 365.0).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalCurve {
    reference_date: Date,
    nodes: Vec<CurveNode>,
}

impl SurvivalCurve {
    /// Creates an empty curve (survival probability 1 everywhere).
    #[must_use]
    pub fn new(reference_date: Date) -> Self {
        Self {
            reference_date,
            nodes: Vec::new(),
        }
    }

    /// Returns the curve's reference date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Returns the solved nodes in ascending maturity order.
    #[must_use]
    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    /// Returns the last node date, or the reference date for an empty curve.
    #[must_use]
    pub fn max_date(&self) -> Date {
        self.nodes
            .last()
            .map_or(self.reference_date, |node| node.date)
    }

    /// Returns a new curve with one more flat-hazard segment appended.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the date does not
    /// extend the curve strictly or the hazard rate is negative or
    /// non-finite.
    pub fn extended_with(&self, date: Date, hazard: f64) -> CreditResult<Self> {
        if date <= self.max_date() {
            return Err(CreditError::invalid_specification(format!(
                "node {date} does not extend the curve past {}",
                self.max_date()
            )));
        }
        if !hazard.is_finite() || hazard < 0.0 {
            return Err(CreditError::invalid_specification(format!(
                "hazard rate {hazard} must be finite and non-negative"
            )));
        }

        let mut nodes = self.nodes.clone();
        nodes.push(CurveNode { date, hazard });
        Ok(Self {
            reference_date: self.reference_date,
            nodes,
        })
    }

    /// Converts a date to a curve time in years from the reference date.
    #[must_use]
    pub fn time_from_reference(&self, date: Date) -> f64 {
        self.reference_date.days_between(&date) as f64 / DAYS_PER_YEAR
    }

    /// Returns the survival probability at the given date.
    ///
    /// Q(T) = exp(-integral of the hazard rate over [0, T]); 1.0 at or
    /// before the reference date. Beyond the last node the final hazard
    /// rate is flat-continued.
    #[must_use]
    pub fn survival_probability(&self, date: Date) -> f64 {
        self.survival_probability_at_time(self.time_from_reference(date))
    }

    /// Returns the survival probability at a time in years.
    #[must_use]
    pub fn survival_probability_at_time(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }

        let mut integral = 0.0;
        let mut segment_start = 0.0;
        let mut last_hazard = 0.0;

        for node in &self.nodes {
            let segment_end = self.time_from_reference(node.date);
            last_hazard = node.hazard;
            if t <= segment_end {
                integral += node.hazard * (t - segment_start);
                return (-integral).exp();
            }
            integral += node.hazard * (segment_end - segment_start);
            segment_start = segment_end;
        }

        // Flat extrapolation of the last hazard rate
        integral += last_hazard * (t - segment_start);
        (-integral).exp()
    }

    /// Returns the default probability at the given date.
    #[must_use]
    pub fn default_probability(&self, date: Date) -> f64 {
        1.0 - self.survival_probability(date)
    }

    /// Returns the probability of default within `[start, end]`.
    ///
    /// Q(start) - Q(end), floored at zero.
    #[must_use]
    pub fn default_probability_between(&self, start: Date, end: Date) -> f64 {
        (self.survival_probability(start) - self.survival_probability(end)).max(0.0)
    }

    /// Returns the instantaneous hazard rate at the given date.
    ///
    /// Piecewise lookup; the last segment's rate is flat-continued, and
    /// an empty curve has zero hazard.
    #[must_use]
    pub fn hazard_rate(&self, date: Date) -> f64 {
        let t = self.time_from_reference(date);
        for node in &self.nodes {
            if t <= self.time_from_reference(node.date) {
                return node.hazard;
            }
        }
        self.nodes.last().map_or(0.0, |node| node.hazard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> Date {
        Date::from_ymd(2007, 5, 15).unwrap()
    }

    #[test]
    fn test_empty_curve_is_riskless() {
        let curve = SurvivalCurve::new(reference());
        let far = Date::from_ymd(2020, 1, 1).unwrap();
        assert_relative_eq!(curve.survival_probability(far), 1.0);
        assert_relative_eq!(curve.hazard_rate(far), 0.0);
    }

    #[test]
    fn test_survival_before_reference() {
        let curve = SurvivalCurve::new(reference())
            .extended_with(Date::from_ymd(2008, 5, 15).unwrap(), 0.03)
            .unwrap();
        let past = Date::from_ymd(2007, 1, 1).unwrap();
        assert_relative_eq!(curve.survival_probability(past), 1.0);
    }

    #[test]
    fn test_single_flat_segment() {
        let node = Date::from_ymd(2008, 5, 15).unwrap();
        let curve = SurvivalCurve::new(reference())
            .extended_with(node, 0.03)
            .unwrap();

        let t = curve.time_from_reference(node);
        assert_relative_eq!(
            curve.survival_probability(node),
            (-0.03 * t).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_piecewise_integration() {
        let mid = Date::from_ymd(2008, 5, 15).unwrap();
        let far = Date::from_ymd(2009, 5, 15).unwrap();
        let curve = SurvivalCurve::new(reference())
            .extended_with(mid, 0.02)
            .unwrap()
            .extended_with(far, 0.05)
            .unwrap();

        let t1 = curve.time_from_reference(mid);
        let t2 = curve.time_from_reference(far);
        let expected = (-(0.02 * t1 + 0.05 * (t2 - t1))).exp();
        assert_relative_eq!(curve.survival_probability(far), expected, epsilon = 1e-12);

        // Hazard lookup per segment
        assert_relative_eq!(curve.hazard_rate(mid), 0.02);
        assert_relative_eq!(curve.hazard_rate(far), 0.05);
    }

    #[test]
    fn test_flat_extrapolation() {
        let node = Date::from_ymd(2008, 5, 15).unwrap();
        let curve = SurvivalCurve::new(reference())
            .extended_with(node, 0.03)
            .unwrap();

        let beyond = Date::from_ymd(2010, 5, 15).unwrap();
        let t = curve.time_from_reference(beyond);
        assert_relative_eq!(
            curve.survival_probability(beyond),
            (-0.03 * t).exp(),
            epsilon = 1e-12
        );
        assert_relative_eq!(curve.hazard_rate(beyond), 0.03);
    }

    #[test]
    fn test_extension_is_immutable() {
        let base = SurvivalCurve::new(reference());
        let extended = base
            .extended_with(Date::from_ymd(2008, 5, 15).unwrap(), 0.03)
            .unwrap();

        assert!(base.nodes().is_empty());
        assert_eq!(extended.nodes().len(), 1);
    }

    #[test]
    fn test_extension_rejects_non_increasing_dates() {
        let node = Date::from_ymd(2008, 5, 15).unwrap();
        let curve = SurvivalCurve::new(reference())
            .extended_with(node, 0.03)
            .unwrap();

        assert!(curve.extended_with(node, 0.04).is_err());
        assert!(curve
            .extended_with(Date::from_ymd(2008, 1, 1).unwrap(), 0.04)
            .is_err());
    }

    #[test]
    fn test_extension_rejects_bad_hazard() {
        let curve = SurvivalCurve::new(reference());
        let node = Date::from_ymd(2008, 5, 15).unwrap();
        assert!(curve.extended_with(node, -0.01).is_err());
        assert!(curve.extended_with(node, f64::NAN).is_err());
    }

    #[test]
    fn test_default_probability_between() {
        let far = Date::from_ymd(2009, 5, 15).unwrap();
        let curve = SurvivalCurve::new(reference())
            .extended_with(far, 0.03)
            .unwrap();

        let d1 = Date::from_ymd(2008, 5, 15).unwrap();
        let p = curve.default_probability_between(d1, far);
        let expected = curve.survival_probability(d1) - curve.survival_probability(far);
        assert_relative_eq!(p, expected, epsilon = 1e-15);
        assert!(p > 0.0);

        // Reversed interval floors at zero
        assert_eq!(curve.default_probability_between(far, d1), 0.0);
    }
}
