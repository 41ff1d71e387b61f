//! Two-column persistence binding.
//!
//! Storage layers keep money as a numeric value column plus a currency code
//! column. [`MoneyColumns`] is that pair; composing it back into [`Money`]
//! fills in zero and the default currency for missing columns.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::MoneyResult;

use super::{Money, ToMoney};
use crate::format::FormatOptions;

/// Raw value and currency columns of a stored money attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyColumns {
    /// Numeric column.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub value: Option<Decimal>,
    /// Currency code column.
    #[serde(default)]
    pub currency: Option<String>,
}

impl MoneyColumns {
    /// Columns holding `money`.
    #[must_use]
    pub fn from_money(money: &Money) -> Self {
        Self {
            value: Some(money.amount()),
            currency: Some(money.currency_as_string()),
        }
    }

    /// Composes the columns into money.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if the stored code is not registered.
    pub fn to_money(&self) -> MoneyResult<Money> {
        Money::from_columns(self.value, self.currency.as_deref())
    }

    /// Overwrites both columns from `money`.
    pub fn set_money(&mut self, money: &Money) {
        *self = Self::from_money(money);
    }

    /// Converts `value` to money and stores it.
    ///
    /// Plain numbers land in the default currency. On error the columns are
    /// left untouched.
    pub fn assign(&mut self, value: &dyn ToMoney) -> MoneyResult<()> {
        let money = value.to_money()?;
        self.set_money(&money);
        Ok(())
    }

    /// Grouped amount without symbol (e.g., `1,000.34`).
    pub fn to_s(&self) -> MoneyResult<String> {
        Ok(self.to_money()?.format(&FormatOptions::new().symbol(false)))
    }

    /// Amount with exactly two decimals and no grouping.
    pub fn exact(&self) -> MoneyResult<String> {
        let mut amount = self.to_money()?.amount();
        amount.rescale(2);
        Ok(amount.to_string())
    }

    /// Amount followed by the ISO code (e.g., `10.30 CHF`).
    pub fn with_currency(&self) -> MoneyResult<String> {
        Ok(self.to_money()?.with_currency(true))
    }
}

impl From<&Money> for MoneyColumns {
    fn from(money: &Money) -> Self {
        Self::from_money(money)
    }
}

impl TryFrom<&MoneyColumns> for Money {
    type Error = tally_shared::MoneyError;

    fn try_from(columns: &MoneyColumns) -> Result<Self, Self::Error> {
        columns.to_money()
    }
}
