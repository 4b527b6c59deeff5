//! Sequential hazard-rate bootstrap.
//!
//! Processes calibration helpers strictly in ascending maturity order.
//! For each helper, all curve segments at earlier maturities are already
//! fixed; the solver searches for the flat forward hazard rate on the new
//! segment that drives the helper's quote error to zero, re-linking the
//! shared curve handle with a freshly extended curve on every trial so
//! that the change is visible to every helper atomically.

use std::cell::RefCell;

use credo_core::Date;
use credo_math::solvers::{brent, SolverConfig};
use credo_math::MathError;

use crate::curves::{CurveHandle, SurvivalCurve};
use crate::error::{CreditError, CreditResult};
use crate::helpers::DefaultProbabilityHelper;

/// Configuration for the hazard-rate bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapConfig {
    /// Convergence threshold on the quote error.
    pub accuracy: f64,
    /// Hard cap on root-finder iterations per node.
    pub max_iterations: u32,
    /// Upper bound of the hazard-rate search bracket.
    pub max_hazard_rate: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            accuracy: 1e-10,
            max_iterations: 100,
            max_hazard_rate: 10.0,
        }
    }
}

/// Sequential bootstrapper for survival curves.
///
/// # Example
///
/// ```rust,ignore
/// let curve = HazardRateBootstrapper::new(evaluation_date)
///     .add_helper(SpreadCdsHelper::with_value(0.0150, spec.clone(), evaluation_date)?)
///     .add_helper(SpreadCdsHelper::with_value(0.0165, longer_spec, evaluation_date)?)
///     .bootstrap()?;
/// ```
///
/// Helpers are sorted by their latest (pillar) date before solving;
/// duplicate pillars are rejected. The finalized curve is only returned
/// after every node succeeds - a failing node aborts the whole run and no
/// partial curve escapes.
pub struct HazardRateBootstrapper {
    evaluation_date: Date,
    helpers: Vec<Box<dyn DefaultProbabilityHelper>>,
    config: BootstrapConfig,
    stale: bool,
    built_versions: Vec<(u64, u64)>,
}

impl HazardRateBootstrapper {
    /// Creates a bootstrapper for the given evaluation date.
    #[must_use]
    pub fn new(evaluation_date: Date) -> Self {
        Self {
            evaluation_date,
            helpers: Vec::new(),
            config: BootstrapConfig::default(),
            stale: true,
            built_versions: Vec::new(),
        }
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a calibration helper.
    #[must_use]
    pub fn add_helper<H: DefaultProbabilityHelper + 'static>(mut self, helper: H) -> Self {
        self.helpers.push(Box::new(helper));
        self.stale = true;
        self
    }

    /// Adds an already-boxed calibration helper.
    #[must_use]
    pub fn add_boxed_helper(mut self, helper: Box<dyn DefaultProbabilityHelper>) -> Self {
        self.helpers.push(helper);
        self.stale = true;
        self
    }

    /// Returns the current evaluation date.
    #[must_use]
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    /// Moves the evaluation date and marks the run stale.
    ///
    /// No recomputation happens here; helpers regenerate their relative
    /// dates lazily inside the next [`Self::bootstrap`] call.
    pub fn set_evaluation_date(&mut self, evaluation_date: Date) {
        if self.evaluation_date != evaluation_date {
            self.evaluation_date = evaluation_date;
            self.stale = true;
        }
    }

    /// Returns true if the last built curve no longer reflects the
    /// current inputs (evaluation date, quotes, or discount curves).
    #[must_use]
    pub fn is_stale(&self) -> bool {
        if self.stale || self.built_versions.len() != self.helpers.len() {
            return true;
        }
        self.helpers
            .iter()
            .zip(&self.built_versions)
            .any(|(helper, &(quote, discount))| {
                helper.quote_version() != quote || helper.discount_version() != discount
            })
    }

    /// Bootstraps the survival curve from the registered helpers.
    ///
    /// # Errors
    ///
    /// - `InvalidSpecification` if no helpers are registered, a helper's
    ///   pillar does not lie past the evaluation date, or two helpers
    ///   share a pillar date
    /// - `BracketingFailure` if a quote is not attainable within the
    ///   hazard bracket, naming the offending maturity
    /// - `NonConvergence` if the root-finder exhausts its iterations
    pub fn bootstrap(&mut self) -> CreditResult<SurvivalCurve> {
        if self.helpers.is_empty() {
            return Err(CreditError::invalid_specification(
                "no calibration helpers registered",
            ));
        }

        // Regenerate all evaluation-date-relative state, then order the
        // helpers by pillar date (sorting, not rejecting, is the policy
        // for out-of-order input).
        let evaluation_date = self.evaluation_date;
        for helper in &mut self.helpers {
            helper.update(evaluation_date)?;
        }
        self.helpers.sort_by_key(|helper| helper.latest_date());

        for pair in self.helpers.windows(2) {
            if pair[0].latest_date() == pair[1].latest_date() {
                return Err(CreditError::invalid_specification(format!(
                    "duplicate pillar date {} ({} and {})",
                    pair[0].latest_date(),
                    pair[0].description(),
                    pair[1].description()
                )));
            }
        }
        for helper in &self.helpers {
            if helper.latest_date() <= evaluation_date {
                return Err(CreditError::invalid_specification(format!(
                    "{} matures on or before the evaluation date",
                    helper.description()
                )));
            }
        }

        // One shared re-linkable handle per run, bound to every helper
        // before any node is solved.
        let handle = CurveHandle::new(SurvivalCurve::new(evaluation_date));
        for helper in &mut self.helpers {
            helper.set_term_structure(handle.clone())?;
        }

        let solver_config =
            SolverConfig::new(self.config.accuracy, self.config.max_iterations);
        let mut curve = SurvivalCurve::new(evaluation_date);

        for helper in &self.helpers {
            let pillar = helper.latest_date();
            let base = curve.clone();
            let trial_failure: RefCell<Option<CreditError>> = RefCell::new(None);

            let objective = |hazard: f64| -> f64 {
                let trial = match base.extended_with(pillar, hazard) {
                    Ok(trial) => trial,
                    Err(err) => {
                        *trial_failure.borrow_mut() = Some(err);
                        return f64::NAN;
                    }
                };
                handle.link(trial);
                match helper.quote_error() {
                    Ok(error) => error,
                    Err(err) => {
                        *trial_failure.borrow_mut() = Some(err);
                        f64::NAN
                    }
                }
            };

            log::trace!(
                "solving node at {} over hazard bracket [0, {}]",
                pillar,
                self.config.max_hazard_rate
            );
            let solved = brent(objective, 0.0, self.config.max_hazard_rate, &solver_config);

            if let Some(err) = trial_failure.into_inner() {
                return Err(err);
            }
            let result = solved.map_err(|err| match err {
                MathError::InvalidBracket { .. } => CreditError::bracketing_failure(
                    pillar,
                    0.0,
                    self.config.max_hazard_rate,
                ),
                MathError::ConvergenceFailed {
                    iterations,
                    best,
                    residual,
                } => CreditError::non_convergence(pillar, iterations, best, residual),
                MathError::InvalidInput { reason } => CreditError::pricing(reason),
            })?;

            log::debug!(
                "solved node at {}: hazard {:.6} in {} iterations ({})",
                pillar,
                result.root,
                result.iterations,
                helper.description()
            );

            curve = curve.extended_with(pillar, result.root)?;
            handle.link(curve.clone());
        }

        self.built_versions = self
            .helpers
            .iter()
            .map(|helper| (helper.quote_version(), helper.discount_version()))
            .collect();
        self.stale = false;

        Ok(curve)
    }
}
