//! Survival and discount curves.

mod discount;
mod handle;
mod survival;

pub use discount::{DiscountCurve, FlatForwardCurve};
pub use handle::CurveHandle;
pub use survival::{CurveNode, SurvivalCurve};
