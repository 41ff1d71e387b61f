//! Currency metadata and the currency registry.
//!
//! A `Currency` is a cheap handle: the definition record is shared and
//! immutable, while the rounding `fraction` belongs to the handle itself.
//! Overriding the fraction on one handle (`set_fraction` needs `&mut`) never
//! reaches another handle, and every registry lookup hands out a fresh one.

pub mod registry;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{CurrencyDefinition, MoneyError, MoneyResult};

pub use registry::CurrencyRegistry;

/// Placeholder glyph for currencies without a symbol.
pub const GENERIC_SYMBOL: &str = "¤";

/// Largest scale a `Decimal` can carry.
const MAX_PLACES: u32 = 28;

/// A currency with its display and rounding rules.
///
/// Equality and hashing use the ISO code only.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    definition: Arc<CurrencyDefinition>,
    fraction: Decimal,
}

impl Currency {
    /// Builds a standalone currency from a definition record.
    ///
    /// The result is not registered anywhere; use it for ad-hoc currencies.
    pub fn from_definition(definition: CurrencyDefinition) -> MoneyResult<Self> {
        let definition = definition.normalized()?;
        Ok(Self::from_shared(Arc::new(definition)))
    }

    /// Wraps a normalized, shared definition.
    pub(crate) fn from_shared(definition: Arc<CurrencyDefinition>) -> Self {
        let fraction = definition.fraction.unwrap_or(Decimal::ONE);
        Self {
            definition,
            fraction,
        }
    }

    /// Resolves a currency-like value through the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` for blank or unregistered codes.
    pub fn wrap(value: impl CurrencyLike) -> MoneyResult<Self> {
        value.resolve_in(CurrencyRegistry::global())
    }

    /// ISO 4217 alphabetic code, uppercase.
    pub fn iso_code(&self) -> &str {
        &self.definition.iso_code
    }

    /// ISO 4217 numeric code.
    pub fn iso_numeric(&self) -> &str {
        &self.definition.iso_numeric
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Disambiguation rank.
    pub fn priority(&self) -> i32 {
        self.definition.priority
    }

    /// Subunits per major unit.
    pub fn subunit_to_unit(&self) -> Decimal {
        self.definition.subunit_to_unit
    }

    /// Name of the subunit, if any.
    pub fn subunit(&self) -> Option<&str> {
        self.definition.subunit.as_deref()
    }

    /// Display symbol, if the currency has one.
    pub fn symbol(&self) -> Option<&str> {
        self.definition.symbol.as_deref()
    }

    /// HTML entity for the symbol, if any.
    pub fn html_entity(&self) -> Option<&str> {
        self.definition.html_entity.as_deref()
    }

    /// Whether the symbol precedes the amount.
    pub fn symbol_first(&self) -> bool {
        self.definition.symbol_first
    }

    /// Default decimal mark.
    pub fn decimal_mark(&self) -> &str {
        &self.definition.decimal_mark
    }

    /// Default thousands separator.
    pub fn thousands_separator(&self) -> &str {
        &self.definition.thousands_separator
    }

    /// Rounding increment used by `Money::rounded`.
    pub fn fraction(&self) -> Decimal {
        self.fraction
    }

    /// Overrides the rounding increment on this handle only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` if `fraction` is not positive.
    pub fn set_fraction(&mut self, fraction: Decimal) -> MoneyResult<()> {
        if fraction <= Decimal::ZERO {
            return Err(MoneyError::InvalidOperand(format!(
                "fraction must be positive, got {fraction}"
            )));
        }
        self.fraction = fraction;
        Ok(())
    }

    /// Returns a copy of this handle with a different rounding increment.
    pub fn with_fraction(mut self, fraction: Decimal) -> MoneyResult<Self> {
        self.set_fraction(fraction)?;
        Ok(self)
    }

    /// Number of fractional digits implied by `subunit_to_unit`.
    ///
    /// The smallest `n` with `10^n >= subunit_to_unit`: 100 gives 2, 1 gives
    /// 0, 5 gives 1.
    pub fn decimal_places(&self) -> u32 {
        let target = self.subunit_to_unit();
        let ten = Decimal::TEN;
        let mut power = Decimal::ONE;
        let mut places = 0;
        while power < target && places < MAX_PLACES {
            power *= ten;
            places += 1;
        }
        places
    }

    /// Shared definition record.
    pub fn definition(&self) -> &CurrencyDefinition {
        &self.definition
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.iso_code() == other.iso_code()
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iso_code().hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iso_code())
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Currency")
            .field("iso_code", &self.iso_code())
            .field("fraction", &self.fraction)
            .finish()
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::wrap(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::wrap(value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.iso_code().to_string()
    }
}

/// Anything that names a currency: a `Currency` itself or an ISO code.
pub trait CurrencyLike {
    /// Resolves the value against `registry`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if the code is blank or unregistered.
    fn resolve_in(self, registry: &CurrencyRegistry) -> MoneyResult<Currency>;
}

impl CurrencyLike for Currency {
    fn resolve_in(self, _registry: &CurrencyRegistry) -> MoneyResult<Currency> {
        Ok(self)
    }
}

impl CurrencyLike for &Currency {
    fn resolve_in(self, _registry: &CurrencyRegistry) -> MoneyResult<Currency> {
        Ok(self.clone())
    }
}

impl CurrencyLike for &str {
    fn resolve_in(self, registry: &CurrencyRegistry) -> MoneyResult<Currency> {
        registry.lookup(self)
    }
}

impl CurrencyLike for String {
    fn resolve_in(self, registry: &CurrencyRegistry) -> MoneyResult<Currency> {
        registry.lookup(&self)
    }
}

impl CurrencyLike for &String {
    fn resolve_in(self, registry: &CurrencyRegistry) -> MoneyResult<Currency> {
        registry.lookup(self)
    }
}
