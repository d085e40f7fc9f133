//! Price engine: integer-cent money, VAT conversion, display formatting.
//!
//! All monetary values are stored in the smallest unit of the currency
//! (cents). Floating-point never enters money arithmetic; VAT rates are
//! converted to basis points once at the boundary and every computation
//! after that is integral.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Basis points in 100% (the VAT arithmetic scale).
const BASIS_POINT_SCALE: i128 = 10_000;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl Currency {
    /// Get the ISO 4217 currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF",
        }
    }

    /// Get the number of decimal places in the currency's smallest unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::EUR | Currency::USD | Currency::GBP | Currency::CHF => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A value-added tax rate, stored in basis points (1% = 100 bp).
///
/// Construction validates the rate once; a `VatRate` value is always in
/// `[0%, 100%]`. Deserialization goes through the same check, so a
/// persisted snapshot cannot smuggle in an out-of-range rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct VatRate(u32);

impl VatRate {
    /// 0%, no VAT applied.
    pub const ZERO: VatRate = VatRate(0);
    /// French standard rate, 20%.
    pub const STANDARD_FR: VatRate = VatRate(2_000);
    /// French intermediate rate, 10%.
    pub const INTERMEDIATE_FR: VatRate = VatRate(1_000);
    /// French reduced rate, 5.5%.
    pub const REDUCED_FR: VatRate = VatRate(550);

    /// Create a rate from basis points (2000 = 20%).
    pub fn from_basis_points(bp: u32) -> Result<Self, CommerceError> {
        if bp > BASIS_POINT_SCALE as u32 {
            return Err(CommerceError::VatRateBasisPoints(bp));
        }
        Ok(Self(bp))
    }

    /// Create a rate from a decimal fraction (0.20 = 20%).
    ///
    /// This is the only place a float enters the price engine: catalog
    /// records carry the rate as a fraction. Rejects anything outside
    /// `[0, 1]`, NaN included.
    pub fn from_fraction(fraction: f64) -> Result<Self, CommerceError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(CommerceError::VatRateOutOfRange(fraction));
        }
        Ok(Self((fraction * BASIS_POINT_SCALE as f64).round() as u32))
    }

    /// Get the rate in basis points.
    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// Get the rate as a decimal fraction (for display only).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / BASIS_POINT_SCALE as f64
    }
}

impl TryFrom<u32> for VatRate {
    type Error = CommerceError;

    fn try_from(bp: u32) -> Result<Self, Self::Error> {
        Self::from_basis_points(bp)
    }
}

impl From<VatRate> for u32 {
    fn from(rate: VatRate) -> u32 {
        rate.0
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            write!(f, "{whole}.{frac:02}%")
        }
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest currency unit (cents). Arithmetic
/// is checked: operations return `None` on overflow or currency mismatch
/// rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (cents).
    pub cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.cents.checked_add(other.cents)?, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_sub(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.cents.checked_sub(other.cents)?, self.currency))
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_mul(&self, factor: i64) -> Option<Money> {
        Some(Money::new(self.cents.checked_mul(factor)?, self.currency))
    }

    /// Sum an iterator of Money values with checked arithmetic.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Convert a tax-exclusive (HT) amount into a tax-inclusive (TTC) one.
    ///
    /// Computes `round(ht × (1 + rate))` in integer arithmetic, rounding
    /// half away from zero to the nearest cent. A negative amount is a
    /// contract violation (a corrupted product record upstream) and is
    /// rejected rather than normalized.
    pub fn with_vat(&self, rate: VatRate) -> Result<Money, CommerceError> {
        if self.cents < 0 {
            return Err(CommerceError::InvalidPrice(self.cents));
        }
        let gross = i128::from(self.cents) * (BASIS_POINT_SCALE + i128::from(rate.basis_points()));
        // cents >= 0, so half away from zero is half up
        let rounded = (gross + BASIS_POINT_SCALE / 2) / BASIS_POINT_SCALE;
        let cents = i64::try_from(rounded).map_err(|_| CommerceError::Overflow)?;
        Ok(Money::new(cents, self.currency))
    }

    /// Format for display using the currency's locale convention.
    ///
    /// EUR renders French style (`2 999,00 €`, narrow no-break space as
    /// the thousands separator); USD and GBP render symbol-first with dot
    /// decimal; CHF uses the Swiss apostrophe separator.
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let places = self.currency.decimal_places() as usize;
        let scale = 10u64.pow(self.currency.decimal_places());
        let units = abs / scale;
        let frac = abs % scale;
        match self.currency {
            Currency::EUR => format!(
                "{sign}{},{frac:0places$}\u{a0}\u{20ac}",
                group_thousands(units, '\u{202f}')
            ),
            Currency::CHF => format!(
                "{sign}CHF\u{a0}{}.{frac:0places$}",
                group_thousands(units, '\u{2019}')
            ),
            Currency::USD | Currency::GBP => format!(
                "{sign}{}{}.{frac:0places$}",
                self.currency.symbol(),
                group_thousands(units, ',')
            ),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Group a whole-unit amount into thousands with the given separator.
fn group_thousands(units: u64, sep: char) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped
}
