//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored in the currency's standard unit (naira, not kobo).
//! The payment processor takes amounts in the minor unit, so [`Price`]
//! offers a checked conversion to minor units.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors converting a [`Price`] for the payment processor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// A chargeable amount must be positive.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount does not fit the processor's integer range.
    #[error("price is too large to charge")]
    TooLarge,
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., naira, not kobo).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Convert to the currency's minor unit (kobo for NGN).
    ///
    /// The amount is rounded to the nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is zero or negative, or too large
    /// for the processor's integer range.
    pub fn to_minor_units(&self) -> Result<u64, PriceError> {
        if self.amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        (self.amount * Decimal::ONE_HUNDRED)
            .round_dp(0)
            .to_u64()
            .ok_or(PriceError::TooLarge)
    }

    /// Format for display (e.g., `₦1,500` or `₦1,500.50`).
    ///
    /// Whole amounts drop the decimal places; fractional amounts keep two.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(2);
        let Some(total_minor) = (rounded * Decimal::ONE_HUNDRED).to_i128() else {
            // Out of i128 range; fall back to the plain decimal form.
            return format!("{}{rounded}", self.currency.symbol());
        };

        let sign = if total_minor < 0 { "-" } else { "" };
        let magnitude = total_minor.unsigned_abs();
        let units = group_thousands(magnitude / 100);
        let minor = magnitude % 100;

        if minor == 0 {
            format!("{sign}{}{units}", self.currency.symbol())
        } else {
            format!("{sign}{}{units}.{minor:02}", self.currency.symbol())
        }
    }
}

/// ISO 4217 currency codes accepted by the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Ngn,
    Usd,
    Ghs,
    Zar,
}

impl Currency {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ngn => "\u{20a6}",
            Self::Usd => "$",
            Self::Ghs => "GH\u{20b5}",
            Self::Zar => "R",
        }
    }

    /// ISO 4217 code as expected on the processor wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ngn => "NGN",
            Self::Usd => "USD",
            Self::Ghs => "GHS",
            Self::Zar => "ZAR",
        }
    }
}

/// Group an integer's digits in threes (`1500000` -> `"1,500,000"`).
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
