//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values in major units: `1.00` is one
//! dollar, not one cent.

pub mod arithmetic;
pub mod columns;

#[cfg(test)]
mod props;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{MoneyError, MoneyResult};
use tracing::debug;

use crate::currency::{Currency, CurrencyLike, GENERIC_SYMBOL};
use crate::exchange::ExchangeProvider;
use crate::format::{FormatOptions, Formatter};
use crate::settings;

pub use arithmetic::{Operand, Quotient};
pub use columns::MoneyColumns;

/// A monetary amount in a currency.
///
/// Immutable: every operation returns a new value. Two values are equal
/// when their currencies share a code and their amounts are numerically
/// equal, so `1.0 USD == 1.00 USD`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates money from any numeric-like amount and currency-like value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the amount has no exact decimal form and
    /// `UnknownCurrency` if the currency cannot be resolved.
    pub fn try_new(amount: impl ToAmount, currency: impl CurrencyLike) -> MoneyResult<Self> {
        let amount = amount.to_amount()?;
        let currency = Currency::wrap(currency)?;
        Ok(Self::new(amount, currency))
    }

    /// Creates money in the process default currency.
    pub fn from_amount(amount: impl ToAmount) -> MoneyResult<Self> {
        let amount = amount.to_amount()?;
        Ok(Self::new(amount, settings::default_currency()?))
    }

    /// Creates money from a count of subunits (e.g., cents).
    pub fn from_subunits(subunits: i64, currency: Currency) -> MoneyResult<Self> {
        let amount = Decimal::from(subunits)
            .checked_div(currency.subunit_to_unit())
            .ok_or(MoneyError::Overflow("from_subunits"))?;
        Ok(Self::new(amount, currency))
    }

    /// Creates money from the two raw persistence columns.
    ///
    /// A missing amount becomes zero and a missing code becomes the default
    /// currency.
    pub fn from_columns(amount: Option<Decimal>, currency: Option<&str>) -> MoneyResult<Self> {
        let currency = match currency {
            Some(code) => Currency::wrap(code)?,
            None => settings::default_currency()?,
        };
        Ok(Self::new(amount.unwrap_or(Decimal::ZERO), currency))
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Creates a zero amount in a currency given by code or handle.
    pub fn empty(currency: impl CurrencyLike) -> MoneyResult<Self> {
        Ok(Self::zero(Currency::wrap(currency)?))
    }

    /// Creates US dollars.
    pub fn us_dollar(amount: impl ToAmount) -> MoneyResult<Self> {
        Self::try_new(amount, "USD")
    }

    /// Creates euros.
    pub fn euro(amount: impl ToAmount) -> MoneyResult<Self> {
        Self::try_new(amount, "EUR")
    }

    /// Creates Canadian dollars.
    pub fn ca_dollar(amount: impl ToAmount) -> MoneyResult<Self> {
        Self::try_new(amount, "CAD")
    }

    /// The exact amount in major units.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency of this amount.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// ISO code of the currency.
    pub fn currency_as_string(&self) -> String {
        self.currency.iso_code().to_string()
    }

    /// Replaces the currency by code, keeping the amount.
    pub fn set_currency_as_string(&mut self, code: &str) -> MoneyResult<()> {
        self.currency = Currency::wrap(code)?;
        Ok(())
    }

    /// The currency symbol, or `¤` when the currency has none.
    pub fn symbol(&self) -> &str {
        self.currency.symbol().unwrap_or(GENERIC_SYMBOL)
    }

    /// The exact amount.
    pub fn to_decimal(&self) -> Decimal {
        self.amount
    }

    /// Lossy floating-point view of the amount.
    ///
    /// Only for handing values to systems that cannot take decimals.
    pub fn to_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or(f64::NAN)
    }

    /// Alias of [`Money::to_f64`].
    pub fn dollars(&self) -> f64 {
        self.to_f64()
    }

    /// Returns this value in `target`, converting through `provider` only
    /// when the currencies differ.
    ///
    /// `None` or the same currency borrows `self` without calling the
    /// provider.
    pub fn to_money_in<'a>(
        &'a self,
        target: Option<&Currency>,
        provider: &dyn ExchangeProvider,
    ) -> MoneyResult<Cow<'a, Self>> {
        match target {
            Some(target) if *target != self.currency => {
                self.exchange_to(target, provider).map(Cow::Owned)
            }
            _ => Ok(Cow::Borrowed(self)),
        }
    }

    /// Converts to `target` through `provider`.
    ///
    /// Provider errors such as `RateUnavailable` are returned unchanged.
    pub fn exchange_to(
        &self,
        target: &Currency,
        provider: &dyn ExchangeProvider,
    ) -> MoneyResult<Self> {
        if *target == self.currency {
            return Ok(self.clone());
        }
        debug!(from = %self.currency, to = %target, amount = %self.amount, "Delegating exchange");
        provider.exchange(self, target)
    }

    /// Rounds to the nearest multiple of the currency's fraction.
    pub fn rounded(&self) -> MoneyResult<Self> {
        self.rounded_to(self.currency.fraction())
    }

    /// Rounds to the nearest multiple of `fraction`, halves away from zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` for a non-positive fraction and `Overflow` if
    /// the scaled amount does not fit.
    pub fn rounded_to(&self, fraction: Decimal) -> MoneyResult<Self> {
        if fraction <= Decimal::ZERO {
            return Err(MoneyError::InvalidOperand(format!(
                "fraction must be positive, got {fraction}"
            )));
        }
        let steps = self
            .amount
            .checked_div(fraction)
            .ok_or(MoneyError::Overflow("rounded"))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let amount = steps
            .checked_mul(fraction)
            .ok_or(MoneyError::Overflow("rounded"))?;
        Ok(Self::new(amount, self.currency.clone()))
    }

    /// Formats with the given options and no locale overrides.
    pub fn format(&self, options: &FormatOptions) -> String {
        Formatter::new().format(self, options)
    }

    /// Amount without symbol or grouping (e.g., `1000.34`).
    pub fn to_s(&self) -> String {
        self.format(&FormatOptions::new().symbol(false).thousands_separator(""))
    }

    /// Raw decimal amount, bypassing all formatting.
    pub fn to_s_exact(&self) -> String {
        self.amount.to_string()
    }

    /// Amount with the ISO code and no symbol: `CHF 10.30`, or `10.30 CHF`
    /// when `after` is set.
    pub fn with_currency(&self, after: bool) -> String {
        let options = FormatOptions::new().symbol(false).with_currency(true);
        let options = if after {
            options
        } else {
            options.code_before()
        };
        self.format(&options)
    }

    /// Equality against anything convertible to money.
    ///
    /// Values that fail to convert are simply unequal.
    pub fn loose_eq(&self, other: &dyn ToMoney) -> bool {
        other.to_money().is_ok_and(|other| *self == other)
    }

    /// Ordering against anything convertible to money.
    ///
    /// # Errors
    ///
    /// Returns `InvalidComparison` if `other` cannot be converted and
    /// `CurrencyMismatch` if the currencies differ.
    pub fn compare(&self, other: &dyn ToMoney) -> MoneyResult<Ordering> {
        let other = other
            .to_money()
            .map_err(|_| MoneyError::InvalidComparison(other.describe()))?;
        self.try_cmp(&other)
    }

    /// Ordering against another money value of the same currency.
    pub fn try_cmp(&self, other: &Self) -> MoneyResult<Ordering> {
        if self.currency != other.currency {
            return Err(MoneyError::mismatch(
                "comparison",
                self.currency.iso_code(),
                other.currency.iso_code(),
            ));
        }
        Ok(self.amount.cmp(&other.amount))
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }
}

impl Eq for Money {}

impl PartialEq<Decimal> for Money {
    fn eq(&self, other: &Decimal) -> bool {
        self.loose_eq(other)
    }
}

impl PartialOrd for Money {
    /// `None` across currencies; use [`Money::try_cmp`] for the error.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Hash for Money {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.amount.normalize().hash(state);
        self.currency.hash(state);
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_s())
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Money")
            .field("amount", &self.amount)
            .field("currency", &self.currency.iso_code())
            .finish()
    }
}

/// Numeric-like inputs that convert losslessly to a decimal amount.
pub trait ToAmount {
    /// Converts to an exact decimal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if there is no exact decimal form.
    fn to_amount(self) -> MoneyResult<Decimal>;
}

impl ToAmount for Decimal {
    fn to_amount(self) -> MoneyResult<Decimal> {
        Ok(self)
    }
}

impl ToAmount for &Decimal {
    fn to_amount(self) -> MoneyResult<Decimal> {
        Ok(*self)
    }
}

macro_rules! int_to_amount {
    ($($t:ty),*) => {
        $(impl ToAmount for $t {
            fn to_amount(self) -> MoneyResult<Decimal> {
                Ok(Decimal::from(self))
            }
        })*
    };
}

int_to_amount!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

/// Floats go through their shortest round-trip text so `1.57` stays `1.57`.
impl ToAmount for f64 {
    fn to_amount(self) -> MoneyResult<Decimal> {
        if !self.is_finite() {
            return Err(MoneyError::InvalidAmount(self.to_string()));
        }
        parse_amount(&self.to_string())
    }
}

impl ToAmount for f32 {
    fn to_amount(self) -> MoneyResult<Decimal> {
        if !self.is_finite() {
            return Err(MoneyError::InvalidAmount(self.to_string()));
        }
        parse_amount(&self.to_string())
    }
}

impl ToAmount for &str {
    fn to_amount(self) -> MoneyResult<Decimal> {
        parse_amount(self)
    }
}

impl ToAmount for String {
    fn to_amount(self) -> MoneyResult<Decimal> {
        parse_amount(&self)
    }
}

impl ToAmount for &String {
    fn to_amount(self) -> MoneyResult<Decimal> {
        parse_amount(self)
    }
}

fn parse_amount(text: &str) -> MoneyResult<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str_exact(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| MoneyError::InvalidAmount(text.to_string()))
}

/// Values that have a money representation.
///
/// Plain numbers convert into the process default currency.
pub trait ToMoney {
    /// Converts to money.
    fn to_money(&self) -> MoneyResult<Money>;

    /// Short description used in comparison errors.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl ToMoney for Money {
    fn to_money(&self) -> MoneyResult<Money> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl ToMoney for Decimal {
    fn to_money(&self) -> MoneyResult<Money> {
        Money::from_amount(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

macro_rules! number_to_money {
    ($($t:ty),*) => {
        $(impl ToMoney for $t {
            fn to_money(&self) -> MoneyResult<Money> {
                Money::from_amount(*self)
            }

            fn describe(&self) -> String {
                self.to_string()
            }
        })*
    };
}

number_to_money!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, f32, f64);

impl ToMoney for str {
    fn to_money(&self) -> MoneyResult<Money> {
        Money::from_amount(self)
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl ToMoney for &str {
    fn to_money(&self) -> MoneyResult<Money> {
        (**self).to_money()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ToMoney> ToMoney for Option<T> {
    fn to_money(&self) -> MoneyResult<Money> {
        match self {
            Some(value) => value.to_money(),
            None => Err(MoneyError::InvalidOperand("nil".to_string())),
        }
    }

    fn describe(&self) -> String {
        self.as_ref().map_or_else(|| "nil".to_string(), ToMoney::describe)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses `"<amount>"` or `"<amount> <code>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let amount = parts
            .next()
            .ok_or_else(|| MoneyError::InvalidAmount(s.to_string()))?;
        match (parts.next(), parts.next()) {
            (None, _) => Self::from_amount(amount),
            (Some(code), None) => Self::try_new(amount, code),
            (Some(_), Some(_)) => Err(MoneyError::InvalidAmount(s.to_string())),
        }
    }
}
