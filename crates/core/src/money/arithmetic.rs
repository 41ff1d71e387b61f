//! Arithmetic on money.
//!
//! Binary operations between two money values require the same currency;
//! there is no implicit conversion. Scalars combine with any currency.

use std::ops::Neg;

use rust_decimal::Decimal;
use tally_shared::{MoneyError, MoneyResult};

use super::Money;

/// Right-hand side of a multiply, divide, or modulo.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Plain number.
    Scalar(Decimal),
    /// Another money value.
    Money(Money),
}

impl From<Decimal> for Operand {
    fn from(value: Decimal) -> Self {
        Self::Scalar(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<Money> for Operand {
    fn from(value: Money) -> Self {
        Self::Money(value)
    }
}

impl From<&Money> for Operand {
    fn from(value: &Money) -> Self {
        Self::Money(value.clone())
    }
}

impl Operand {
    fn amount(&self) -> Decimal {
        match self {
            Self::Scalar(value) => *value,
            Self::Money(money) => money.amount,
        }
    }
}

/// Result of a division: money for a scalar divisor, a plain ratio for a
/// money divisor.
#[derive(Debug, Clone, PartialEq)]
pub enum Quotient {
    /// `Money / scalar`.
    Money(Money),
    /// `Money / Money`.
    Ratio(Decimal),
}

impl Quotient {
    /// The money quotient, if the divisor was a scalar.
    pub fn as_money(&self) -> Option<&Money> {
        match self {
            Self::Money(money) => Some(money),
            Self::Ratio(_) => None,
        }
    }

    /// The ratio, if the divisor was money.
    pub fn as_ratio(&self) -> Option<Decimal> {
        match self {
            Self::Money(_) => None,
            Self::Ratio(ratio) => Some(*ratio),
        }
    }
}

/// Modulo with the sign of the divisor.
fn floored_mod(a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
    let rem = a.checked_rem(b).ok_or(MoneyError::DivisionByZero)?;
    if !rem.is_zero() && rem.is_sign_negative() != b.is_sign_negative() {
        return rem.checked_add(b).ok_or(MoneyError::Overflow("modulo"));
    }
    Ok(rem)
}

impl Money {
    fn ensure_same_currency(&self, other: &Self, operation: &'static str) -> MoneyResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::mismatch(
                operation,
                self.currency.iso_code(),
                other.currency.iso_code(),
            ))
        }
    }

    fn with_amount(&self, amount: Decimal) -> Self {
        Self::new(amount, self.currency.clone())
    }

    /// Exact sum of two amounts in the same currency.
    pub fn try_add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other, "+")?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow("+"))?;
        Ok(self.with_amount(amount))
    }

    /// Exact difference of two amounts in the same currency.
    pub fn try_sub(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other, "-")?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow("-"))?;
        Ok(self.with_amount(amount))
    }

    /// Multiplies by a scalar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` when the operand is money.
    pub fn try_mul(&self, operand: impl Into<Operand>) -> MoneyResult<Self> {
        match operand.into() {
            Operand::Money(_) => Err(MoneyError::InvalidOperand(
                "Can't multiply a Money by a Money".to_string(),
            )),
            Operand::Scalar(value) => {
                let amount = self
                    .amount
                    .checked_mul(value)
                    .ok_or(MoneyError::Overflow("*"))?;
                Ok(self.with_amount(amount))
            }
        }
    }

    /// Divides by a scalar (money result) or by money (ratio result).
    pub fn try_div(&self, operand: impl Into<Operand>) -> MoneyResult<Quotient> {
        match operand.into() {
            Operand::Scalar(value) => {
                let amount = self
                    .amount
                    .checked_div(value)
                    .ok_or(MoneyError::DivisionByZero)?;
                Ok(Quotient::Money(self.with_amount(amount)))
            }
            Operand::Money(other) => {
                self.ensure_same_currency(&other, "/")?;
                let ratio = self
                    .amount
                    .checked_div(other.amount)
                    .ok_or(MoneyError::DivisionByZero)?;
                Ok(Quotient::Ratio(ratio))
            }
        }
    }

    /// Quotient and modulus.
    ///
    /// For a money divisor the quotient is a whole-number ratio; for a scalar
    /// divisor it is the plain money quotient `self / divisor`. The modulus is
    /// always money in this currency and takes the divisor's sign.
    pub fn divmod(&self, operand: impl Into<Operand>) -> MoneyResult<(Quotient, Self)> {
        match operand.into() {
            Operand::Money(other) => {
                self.ensure_same_currency(&other, "divmod")?;
                let modulus = floored_mod(self.amount, other.amount)?;
                let whole = self
                    .amount
                    .checked_sub(modulus)
                    .ok_or(MoneyError::Overflow("divmod"))?
                    .checked_div(other.amount)
                    .ok_or(MoneyError::DivisionByZero)?
                    .round();
                Ok((Quotient::Ratio(whole), self.with_amount(modulus)))
            }
            Operand::Scalar(value) => {
                let quotient = self.try_div(value)?;
                let modulus = floored_mod(self.amount, value)?;
                Ok((quotient, self.with_amount(modulus)))
            }
        }
    }

    /// Modulus of [`Money::divmod`].
    pub fn modulo(&self, operand: impl Into<Operand>) -> MoneyResult<Self> {
        self.divmod(operand).map(|(_, modulus)| modulus)
    }

    /// Remainder with the sign of `self`.
    ///
    /// Equals `modulo` when both signs agree, otherwise `modulo - divisor`.
    pub fn remainder(&self, operand: impl Into<Operand>) -> MoneyResult<Self> {
        let operand = operand.into();
        let divisor = match &operand {
            Operand::Money(other) => {
                self.ensure_same_currency(other, "remainder")?;
                other.clone()
            }
            Operand::Scalar(value) => self.with_amount(*value),
        };

        let modulus = self.modulo(operand.clone())?;
        let same_sign = (self.amount < Decimal::ZERO) == (operand.amount() < Decimal::ZERO);
        if same_sign {
            Ok(modulus)
        } else {
            modulus.try_sub(&divisor)
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.with_amount(self.amount.abs())
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is less than zero.
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// `Some(self)` for a non-zero amount, `None` for zero.
    pub fn nonzero(&self) -> Option<&Self> {
        if self.is_zero() { None } else { Some(self) }
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.amount, self.currency)
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        self.with_amount(-self.amount)
    }
}
