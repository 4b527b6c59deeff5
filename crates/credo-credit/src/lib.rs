//! # Credo Credit
//!
//! Default-probability curve calibration from credit default swap quotes.
//!
//! This crate provides:
//!
//! - **Quotes**: Observable market quotes with change detection
//! - **Curves**: Piecewise-flat hazard-rate survival curves, a re-linkable
//!   curve handle, and the discount-curve contract
//! - **Instruments**: The synthetic CDS contract used for calibration
//! - **Engine**: Mid-point CDS pricing (fair spread / fair upfront)
//! - **Helpers**: Spread- and upfront-quoted bootstrap helpers
//! - **Bootstrap**: The sequential hazard-rate bootstrapper
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use credo_credit::prelude::*;
//!
//! let curve = HazardRateBootstrapper::new(evaluation_date)
//!     .add_helper(SpreadCdsHelper::new(quote_3m, spec.clone(), evaluation_date)?)
//!     .add_helper(SpreadCdsHelper::new(quote_1y, spec.clone(), evaluation_date)?)
//!     .bootstrap()?;
//!
//! let survival = curve.survival_probability(horizon);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod curves;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod instruments;
pub mod quotes;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapConfig, HazardRateBootstrapper};
    pub use crate::curves::{CurveHandle, DiscountCurve, FlatForwardCurve, SurvivalCurve};
    pub use crate::engine::MidPointCdsEngine;
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::helpers::{
        CdsSpec, DefaultProbabilityHelper, SpreadCdsHelper, UpfrontCdsHelper,
    };
    pub use crate::instruments::{CreditDefaultSwap, ProtectionSide};
    pub use crate::quotes::{QuoteHandle, SimpleQuote};
}

pub use bootstrap::HazardRateBootstrapper;
pub use curves::{CurveHandle, SurvivalCurve};
pub use error::{CreditError, CreditResult};
