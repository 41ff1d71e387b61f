//! Configuration management.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Tally configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TallyConfig {
    /// ISO code used when money is built without an explicit currency.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Whether locale number formats override currency punctuation.
    #[serde(default = "default_use_i18n")]
    pub use_i18n: bool,
    /// Active locale for number format lookups.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// JSON array of currency definitions replacing the built-in table.
    #[serde(default)]
    pub currencies_file: Option<PathBuf>,
    /// JSON table of per-locale number formats.
    #[serde(default)]
    pub locales_file: Option<PathBuf>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_use_i18n() -> bool {
    true
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            use_i18n: default_use_i18n(),
            locale: default_locale(),
            currencies_file: None,
            locales_file: None,
        }
    }
}

impl TallyConfig {
    /// Loads configuration from `config/` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Loads `default.toml` and `{RUN_MODE}.toml` from `dir`, then applies
    /// `TALLY__*` environment overrides.
    ///
    /// Both files are optional.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
