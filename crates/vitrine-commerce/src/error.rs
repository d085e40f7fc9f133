//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce store operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Negative tax-exclusive price on a product record.
    #[error("Invalid price: {0} cents (prices must be non-negative)")]
    InvalidPrice(i64),

    /// VAT rate outside the `[0, 1]` fraction range.
    #[error("VAT rate out of range: {0}")]
    VatRateOutOfRange(f64),

    /// VAT rate in basis points above 100%.
    #[error("VAT rate exceeds 100%: {0} basis points")]
    VatRateBasisPoints(u32),

    /// Comparison store already holds the maximum number of entries.
    #[error("Comparison limit reached: at most {limit} products can be compared")]
    ComparisonFull { limit: usize },

    /// Currency mismatch between a line item and its cart.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
