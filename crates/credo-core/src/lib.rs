//! # Credo Core
//!
//! Core types and conventions for the Credo credit analytics library.
//!
//! This crate provides the foundational building blocks used throughout Credo:
//!
//! - **Types**: Domain-specific types like `Date`, `Tenor`, `Frequency`
//! - **Day Count Conventions**: Industry-standard day count fraction calculations
//! - **Business Day Calendars**: Holiday calendars and date-rolling conventions
//! - **Schedules**: Coupon schedule generation, including the standard CDS roll
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use credo_core::prelude::*;
//!
//! let today = Date::from_ymd(2007, 5, 15).unwrap();
//! let tenor = Tenor::years(2);
//! let maturity = tenor.advance(today).unwrap();
//! assert_eq!(maturity.year(), 2009);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, TargetCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CredoError, CredoResult};
    pub use crate::schedule::{DateGenerationRule, Schedule, ScheduleBuilder};
    pub use crate::types::{Date, Frequency, Tenor, TimeUnit};
}

// Re-export commonly used types at crate root
pub use error::{CredoError, CredoResult};
pub use types::{Date, Frequency, Tenor};
