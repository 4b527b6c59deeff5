//! Calibration instruments.

mod cds;

pub use cds::{CreditDefaultSwap, ProtectionSide};
