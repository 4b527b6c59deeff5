//! Observable market quotes.
//!
//! A [`SimpleQuote`] holds one scalar market value (a running spread in
//! rate units, or an upfront in fractional price units) together with a
//! monotonically increasing version stamp. Dependents do not recompute
//! when the value changes; they compare version stamps lazily at the next
//! read and refresh only then.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{CreditError, CreditResult};

/// Shared, non-owning reference to a quote.
pub type QuoteHandle = Arc<SimpleQuote>;

/// An observable scalar market value.
///
/// # Example
///
/// ```rust
/// use credo_credit::quotes::SimpleQuote;
///
/// let quote = SimpleQuote::handle(0.0150).unwrap();
/// let v0 = quote.version();
/// quote.set_value(0.0175).unwrap();
/// assert!(quote.version() > v0);
/// assert_eq!(quote.value(), 0.0175);
/// ```
#[derive(Debug)]
pub struct SimpleQuote {
    value: RwLock<f64>,
    version: AtomicU64,
}

impl SimpleQuote {
    /// Creates a new quote.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the value is not finite.
    pub fn new(value: f64) -> CreditResult<Self> {
        if !value.is_finite() {
            return Err(CreditError::invalid_specification(format!(
                "quote value {value} is not finite"
            )));
        }
        Ok(Self {
            value: RwLock::new(value),
            version: AtomicU64::new(0),
        })
    }

    /// Creates a new quote wrapped in a shareable handle.
    pub fn handle(value: f64) -> CreditResult<QuoteHandle> {
        Ok(Arc::new(Self::new(value)?))
    }

    /// Returns the current quote value.
    #[must_use]
    pub fn value(&self) -> f64 {
        *self.value.read()
    }

    /// Sets a new quote value and bumps the version stamp.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidSpecification` if the value is not finite.
    pub fn set_value(&self, value: f64) -> CreditResult<()> {
        if !value.is_finite() {
            return Err(CreditError::invalid_specification(format!(
                "quote value {value} is not finite"
            )));
        }
        *self.value.write() = value;
        self.version.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Returns the current version stamp.
    ///
    /// The stamp increases on every `set_value`; dependents cache the last
    /// stamp they priced against and refresh when it moves.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_round_trip() {
        let quote = SimpleQuote::new(0.0150).unwrap();
        assert_eq!(quote.value(), 0.0150);

        quote.set_value(0.0200).unwrap();
        assert_eq!(quote.value(), 0.0200);
    }

    #[test]
    fn test_version_bumps_on_set() {
        let quote = SimpleQuote::new(0.01).unwrap();
        assert_eq!(quote.version(), 0);

        quote.set_value(0.02).unwrap();
        quote.set_value(0.03).unwrap();
        assert_eq!(quote.version(), 2);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(SimpleQuote::new(f64::NAN).is_err());

        let quote = SimpleQuote::new(0.01).unwrap();
        assert!(quote.set_value(f64::INFINITY).is_err());
        // Value unchanged after a rejected set
        assert_eq!(quote.value(), 0.01);
    }

    #[test]
    fn test_shared_handle_sees_updates() {
        let quote = SimpleQuote::handle(0.01).unwrap();
        let other = quote.clone();

        quote.set_value(0.02).unwrap();
        assert_eq!(other.value(), 0.02);
        assert_eq!(other.version(), 1);
    }
}
