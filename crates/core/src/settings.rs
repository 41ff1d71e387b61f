//! Process-wide defaults and the one-time initialization barrier.

use once_cell::sync::OnceCell;
use tally_shared::{MoneyError, MoneyResult, TallyConfig};
use tracing::info;

use crate::currency::{Currency, CurrencyRegistry};

/// Currency used when none is given and nothing was configured.
pub const FALLBACK_CURRENCY: &str = "USD";

static DEFAULT_CURRENCY: OnceCell<Currency> = OnceCell::new();

/// Returns the process default currency.
///
/// Falls back to USD from the global registry when `init` was never called.
///
/// # Errors
///
/// Returns `UnknownCurrency` if the fallback is not registered.
pub fn default_currency() -> MoneyResult<Currency> {
    DEFAULT_CURRENCY
        .get_or_try_init(|| CurrencyRegistry::global().lookup(FALLBACK_CURRENCY))
        .cloned()
}

/// Sets the process default currency once.
///
/// # Errors
///
/// Returns `RegistryAlreadyInitialized` if a default is already in place.
pub fn set_default_currency(currency: Currency) -> MoneyResult<()> {
    DEFAULT_CURRENCY
        .set(currency)
        .map_err(|_| MoneyError::RegistryAlreadyInitialized)
}

/// Installs the registry and default currency described by `config`.
///
/// Must run before the first lookup; afterwards all currency state is
/// read-only.
///
/// # Errors
///
/// Returns an error if the currency file is invalid, the default currency is
/// unknown, or initialization already happened.
pub fn init(config: &TallyConfig) -> MoneyResult<()> {
    let registry = match &config.currencies_file {
        Some(path) => CurrencyRegistry::from_path(path)?,
        None => CurrencyRegistry::builtin()?,
    };
    let default = registry.lookup(&config.default_currency)?;
    // Both slots are write-once; refuse before filling either.
    if DEFAULT_CURRENCY.get().is_some() {
        return Err(MoneyError::RegistryAlreadyInitialized);
    }
    let registry = CurrencyRegistry::install(registry)?;
    set_default_currency(default.clone())?;

    info!(
        currencies = registry.len(),
        default_currency = %default,
        use_i18n = config.use_i18n,
        locale = %config.locale,
        "Tally initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency_falls_back_to_usd() {
        assert_eq!(default_currency().unwrap().iso_code(), FALLBACK_CURRENCY);
    }

    #[test]
    fn test_init_after_first_use_is_rejected() {
        let _ = default_currency();
        let err = init(&TallyConfig::default()).unwrap_err();
        assert_eq!(err, MoneyError::RegistryAlreadyInitialized);
    }

    #[test]
    fn test_init_rejects_unknown_default_before_installing() {
        let config = TallyConfig {
            default_currency: "ZZZ".to_string(),
            ..TallyConfig::default()
        };
        assert!(matches!(init(&config), Err(MoneyError::UnknownCurrency(_))));
    }
}
