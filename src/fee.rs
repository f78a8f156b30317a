use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

/// Constants used to price an overdue return
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeePolicy {
    /// Fee charged per overdue day before modifiers
    pub base_rate_per_day: f64,
    /// Multiplier applied when the book is a bestseller
    pub bestseller_multiplier: f64,
    /// Multiplier applied when the borrower holds a premium membership
    pub premium_discount: f64,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self { base_rate_per_day: 0.5, bestseller_multiplier: 1.5, premium_discount: 0.8 }
    }
}

impl FeePolicy {
    /// Compute the late fee for a return `overdue_days` past its due date.
    ///
    /// The result is rounded half-up to whole cents for every policy, so a
    /// rate that is not a whole number of cents yields cent-rounded fees.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NegativeOverdueDays` if `overdue_days` is negative
    pub fn late_fee(
        &self,
        overdue_days: i32,
        is_bestseller: bool,
        is_premium_member: bool,
    ) -> Result<f64, LibraryError> {
        if overdue_days < 0 {
            return Err(LibraryError::NegativeOverdueDays);
        }

        let mut multiplier = 1.0;
        if is_bestseller {
            multiplier *= self.bestseller_multiplier;
        }
        if is_premium_member {
            multiplier *= self.premium_discount;
        }

        let fee = f64::from(overdue_days) * self.base_rate_per_day * multiplier;
        Ok(round_to_cents(fee))
    }
}

/// Round half-up to the second decimal.
///
/// Fees are never negative, so half away from zero is half-up here. The
/// midpoint test sees the binary value: `1.005` is stored just below the
/// midpoint and rounds to `1.0`.
fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
