//! Catalog of known currencies keyed by ISO code.
//!
//! The process-wide registry is written once (explicitly through
//! [`CurrencyRegistry::install`] or lazily with the built-in table on first
//! use) and read-only afterwards, so lookups need no locking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tally_shared::{CurrencyDefinition, MoneyError, MoneyResult};
use tracing::{debug, error, info};

use super::{Currency, CurrencyLike};

/// Built-in currency table.
const BUILTIN_CURRENCIES: &str = include_str!("currencies.json");

static GLOBAL: OnceCell<CurrencyRegistry> = OnceCell::new();

/// Immutable catalog of currency definitions.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: HashMap<String, Arc<CurrencyDefinition>>,
}

impl CurrencyRegistry {
    /// Builds a registry from definition records.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDefinition` for malformed records or duplicate codes.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CurrencyDefinition>,
    ) -> MoneyResult<Self> {
        let mut currencies = HashMap::new();
        for definition in definitions {
            let definition = definition.normalized()?;
            let code = definition.iso_code.clone();
            if currencies.insert(code.clone(), Arc::new(definition)).is_some() {
                return Err(MoneyError::InvalidDefinition(format!(
                    "duplicate currency code {code}"
                )));
            }
        }
        debug!(count = currencies.len(), "Currency registry built");
        Ok(Self { currencies })
    }

    /// Builds a registry from a JSON array of definition records.
    pub fn from_json(json: &str) -> MoneyResult<Self> {
        Self::from_definitions(CurrencyDefinition::parse_json(json)?)
    }

    /// Builds a registry from a JSON file.
    pub fn from_path(path: &Path) -> MoneyResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            MoneyError::InvalidDefinition(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Builds a registry from the built-in table.
    pub fn builtin() -> MoneyResult<Self> {
        Self::from_json(BUILTIN_CURRENCIES)
    }

    /// Installs `registry` as the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryAlreadyInitialized` if a registry was installed, or
    /// lazily created by an earlier lookup.
    pub fn install(registry: Self) -> MoneyResult<&'static Self> {
        let count = registry.len();
        let installed = GLOBAL
            .try_insert(registry)
            .map_err(|_| MoneyError::RegistryAlreadyInitialized)?;
        info!(count, "Currency registry installed");
        Ok(installed)
    }

    /// Returns the process-wide registry, installing the built-in table if
    /// nothing was installed yet.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            Self::builtin().unwrap_or_else(|e| {
                error!(error = %e, "Built-in currency table is invalid");
                Self::default()
            })
        })
    }

    /// Looks up a currency by code, ignoring case and surrounding blanks.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` for blank or unregistered codes.
    pub fn lookup(&self, code: &str) -> MoneyResult<Currency> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(MoneyError::UnknownCurrency(code.to_string()));
        }
        self.currencies
            .get(&normalized)
            .map(|definition| Currency::from_shared(Arc::clone(definition)))
            .ok_or(MoneyError::UnknownCurrency(normalized))
    }

    /// Resolves a currency-like value against this registry.
    pub fn wrap(&self, value: impl CurrencyLike) -> MoneyResult<Currency> {
        value.resolve_in(self)
    }

    /// Returns true if `code` is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(&code.trim().to_uppercase())
    }

    /// Number of registered currencies.
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if no currency is registered.
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// All currencies, ordered by priority then code.
    pub fn iter(&self) -> impl Iterator<Item = Currency> + '_ {
        let mut definitions: Vec<&Arc<CurrencyDefinition>> = self.currencies.values().collect();
        definitions.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.iso_code.cmp(&b.iso_code))
        });
        definitions
            .into_iter()
            .map(|definition| Currency::from_shared(Arc::clone(definition)))
    }

    /// All codes, ordered by priority then code.
    pub fn codes(&self) -> Vec<String> {
        self.iter().map(|c| c.iso_code().to_string()).collect()
    }
}
