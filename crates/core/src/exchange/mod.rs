//! Currency exchange.
//!
//! CRITICAL: Rounding strategy for conversions:
//! - Always round to the target currency's decimal places
//! - Use banker's rounding (round half to even)
//!
//! `Money` never looks up rates itself. It hands the value to an
//! [`ExchangeProvider`] and returns whatever the provider answers, errors
//! included.

use std::collections::HashMap;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{MoneyError, MoneyResult};
use tracing::debug;

use crate::currency::Currency;
use crate::money::Money;

/// Converts money between currencies.
pub trait ExchangeProvider: Send + Sync {
    /// Returns `money` expressed in `target`.
    ///
    /// # Errors
    ///
    /// Returns `RateUnavailable` when no rate is known for the pair.
    fn exchange(&self, money: &Money, target: &Currency) -> MoneyResult<Money>;
}

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: String,
    /// Target currency code.
    pub to_currency: String,
    /// Exchange rate (1 from_currency = rate to_currency).
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate. Codes are stored uppercase.
    #[must_use]
    pub fn new(from_currency: &str, to_currency: &str, rate: Decimal) -> Self {
        Self {
            from_currency: from_currency.trim().to_uppercase(),
            to_currency: to_currency.trim().to_uppercase(),
            rate,
        }
    }

    /// Returns the inverse rate, or `None` for a zero rate.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let rate = Decimal::ONE.checked_div(self.rate)?;
        Some(Self {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate,
        })
    }
}

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> MoneyResult<Decimal> {
    let converted = amount
        .checked_mul(rate)
        .ok_or(MoneyError::Overflow("exchange"))?;
    Ok(converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven))
}

/// In-memory rate store.
///
/// A missing direct rate falls back to the inverse of the opposite pair.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), ExchangeRate>,
}

impl RateTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a rate, replacing any previous rate for the same pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` if the rate is not positive.
    pub fn add_rate(&mut self, rate: ExchangeRate) -> MoneyResult<()> {
        if rate.rate <= Decimal::ZERO {
            return Err(MoneyError::InvalidOperand(format!(
                "exchange rate {} -> {} must be positive, got {}",
                rate.from_currency, rate.to_currency, rate.rate
            )));
        }
        debug!(
            from = %rate.from_currency,
            to = %rate.to_currency,
            rate = %rate.rate,
            "Storing exchange rate"
        );
        self.rates
            .insert((rate.from_currency.clone(), rate.to_currency.clone()), rate);
        Ok(())
    }

    /// Builder form of [`RateTable::add_rate`].
    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> MoneyResult<Self> {
        self.add_rate(ExchangeRate::new(from, to, rate))?;
        Ok(self)
    }

    /// Rate for converting `from` into `to`.
    ///
    /// Identical codes always resolve to a rate of one.
    pub fn get_rate(&self, from: &str, to: &str) -> Option<ExchangeRate> {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();
        if from == to {
            return Some(ExchangeRate::new(&from, &to, Decimal::ONE));
        }
        if let Some(rate) = self.rates.get(&(from.clone(), to.clone())) {
            return Some(rate.clone());
        }
        self.rates
            .get(&(to, from))
            .and_then(ExchangeRate::inverse)
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no rate is stored.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl ExchangeProvider for RateTable {
    fn exchange(&self, money: &Money, target: &Currency) -> MoneyResult<Money> {
        let source = money.currency();
        let rate = self
            .get_rate(source.iso_code(), target.iso_code())
            .ok_or_else(|| MoneyError::RateUnavailable {
                from: source.iso_code().to_string(),
                to: target.iso_code().to_string(),
            })?;
        let amount = convert_amount(money.amount(), rate.rate, target.decimal_places())?;
        Ok(Money::new(amount, target.clone()))
    }
}
