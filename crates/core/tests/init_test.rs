//! Integration tests for one-time initialization.
//!
//! Runs in its own process so the registry and default currency start empty.

use tally_core::{Currency, CurrencyRegistry, MoneyError, init, settings};
use tally_shared::{CurrencyDefinition, TallyConfig};

#[test]
fn test_init_with_default_already_set_leaves_registry_uninstalled() {
    let definition = CurrencyDefinition::parse_json(
        r#"[{ "priority": 1, "iso_code": "TLY", "name": "Tally Test", "subunit_to_unit": 100 }]"#,
    )
    .unwrap()
    .remove(0);
    settings::set_default_currency(Currency::from_definition(definition).unwrap()).unwrap();

    assert_eq!(
        init(&TallyConfig::default()).unwrap_err(),
        MoneyError::RegistryAlreadyInitialized
    );

    // The registry slot is still free.
    let registry = CurrencyRegistry::builtin().unwrap();
    assert!(CurrencyRegistry::install(registry).is_ok());
    assert_eq!(settings::default_currency().unwrap().iso_code(), "TLY");
}
