//! Currency definition records.
//!
//! A definition is the raw, pre-parsed shape of one entry in a currency
//! data file. The registry in `tally-core` turns definitions into
//! `Currency` handles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};

/// One currency definition record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDefinition {
    /// Rank used to disambiguate currencies sharing a symbol.
    pub priority: i32,
    /// ISO 4217 alphabetic code (e.g., "USD").
    pub iso_code: String,
    /// ISO 4217 numeric code, kept as text (e.g., "840").
    #[serde(default)]
    pub iso_numeric: String,
    /// Human-readable name.
    pub name: String,
    /// Display glyph (e.g., "$").
    #[serde(default)]
    pub symbol: Option<String>,
    /// Name of the subunit (e.g., "Cent").
    #[serde(default)]
    pub subunit: Option<String>,
    /// Subunits per major unit. May be non-integer.
    pub subunit_to_unit: Decimal,
    /// Smallest rounding increment; defaults to `1 / subunit_to_unit`.
    #[serde(default)]
    pub fraction: Option<Decimal>,
    /// Whether the symbol precedes the amount.
    #[serde(default = "default_symbol_first")]
    pub symbol_first: bool,
    /// HTML entity for the symbol (e.g., "&#x20AC;").
    #[serde(default)]
    pub html_entity: Option<String>,
    /// Default decimal mark.
    #[serde(default = "default_decimal_mark")]
    pub decimal_mark: String,
    /// Default thousands separator.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

fn default_symbol_first() -> bool {
    true
}

fn default_decimal_mark() -> String {
    ".".to_string()
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

impl CurrencyDefinition {
    /// Normalizes the record: uppercases the code, drops empty glyphs, and
    /// fills in a missing fraction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDefinition` for a blank code or a non-positive
    /// `subunit_to_unit` / `fraction`.
    pub fn normalized(mut self) -> MoneyResult<Self> {
        let code = self.iso_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(MoneyError::InvalidDefinition(
                "iso_code must not be blank".to_string(),
            ));
        }
        self.iso_code = code;

        if self.subunit_to_unit <= Decimal::ZERO {
            return Err(MoneyError::InvalidDefinition(format!(
                "{}: subunit_to_unit must be positive, got {}",
                self.iso_code, self.subunit_to_unit
            )));
        }

        let fraction = match self.fraction {
            Some(fraction) => fraction,
            None => Decimal::ONE
                .checked_div(self.subunit_to_unit)
                .ok_or(MoneyError::Overflow("fraction"))?,
        };
        if fraction <= Decimal::ZERO {
            return Err(MoneyError::InvalidDefinition(format!(
                "{}: fraction must be positive, got {fraction}",
                self.iso_code
            )));
        }
        self.fraction = Some(fraction.normalize());

        self.symbol = self.symbol.filter(|s| !s.is_empty());
        self.html_entity = self.html_entity.filter(|s| !s.is_empty());
        Ok(self)
    }

    /// Parses a JSON array of definition records.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDefinition` if the document is not a valid array of
    /// records.
    pub fn parse_json(json: &str) -> MoneyResult<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| MoneyError::InvalidDefinition(e.to_string()))
    }
}
