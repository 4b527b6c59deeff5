//! # Credo Math
//!
//! Numerical utilities for the Credo credit analytics library.
//!
//! This crate provides bracketed 1-D root-finding algorithms (Brent,
//! bisection) with a shared configuration and result type. Curve
//! calibration reduces to repeated scalar root searches, so this crate
//! deliberately stays small.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
