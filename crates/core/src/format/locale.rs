//! Locale number formats.
//!
//! A resolver answers "which delimiter and separator does this locale use"
//! for two keys, tried in order: the currency format, then the generic
//! number format.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tally_shared::{MoneyError, MoneyResult};

/// Lookup key for a locale number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatScope {
    /// `number.currency.format`
    Currency,
    /// `number.format`
    Number,
}

impl FormatScope {
    /// Scopes in lookup order.
    pub const LOOKUP_ORDER: [Self; 2] = [Self::Currency, Self::Number];

    /// Dotted translation key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Currency => "number.currency.format",
            Self::Number => "number.format",
        }
    }
}

/// Punctuation a locale supplies. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Thousands separator.
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Decimal mark.
    #[serde(default)]
    pub separator: Option<String>,
}

/// Source of locale number formats.
pub trait LocaleResolver: Send + Sync {
    /// Returns the format stored under `scope` for `locale`, if any.
    fn lookup_number_format(&self, locale: &str, scope: FormatScope) -> Option<NumberFormat>;
}

/// In-memory resolver.
#[derive(Debug, Clone, Default)]
pub struct StaticLocaleResolver {
    formats: HashMap<(String, FormatScope), NumberFormat>,
}

#[derive(Deserialize)]
struct LocaleFile {
    number: NumberSection,
}

#[derive(Deserialize)]
struct NumberSection {
    #[serde(default)]
    format: Option<NumberFormat>,
    #[serde(default)]
    currency: Option<CurrencySection>,
}

#[derive(Deserialize)]
struct CurrencySection {
    format: NumberFormat,
}

impl StaticLocaleResolver {
    /// Empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a format for `locale` under `scope`.
    pub fn insert(&mut self, locale: impl Into<String>, scope: FormatScope, format: NumberFormat) {
        self.formats.insert((locale.into(), scope), format);
    }

    /// Builder form of [`StaticLocaleResolver::insert`].
    #[must_use]
    pub fn with(
        mut self,
        locale: impl Into<String>,
        scope: FormatScope,
        format: NumberFormat,
    ) -> Self {
        self.insert(locale, scope, format);
        self
    }

    /// Parses a translation-style JSON document:
    /// `{ "de": { "number": { "currency": { "format": { "delimiter": ".", "separator": "," } } } } }`.
    pub fn from_json(json: &str) -> MoneyResult<Self> {
        let locales: HashMap<String, LocaleFile> = serde_json::from_str(json)
            .map_err(|e| MoneyError::InvalidDefinition(format!("locale table: {e}")))?;

        let mut resolver = Self::new();
        for (locale, file) in locales {
            if let Some(format) = file.number.format {
                resolver.insert(locale.clone(), FormatScope::Number, format);
            }
            if let Some(currency) = file.number.currency {
                resolver.insert(locale, FormatScope::Currency, currency.format);
            }
        }
        Ok(resolver)
    }

    /// Reads [`StaticLocaleResolver::from_json`] input from a file.
    pub fn from_path(path: &Path) -> MoneyResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            MoneyError::InvalidDefinition(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

impl LocaleResolver for StaticLocaleResolver {
    fn lookup_number_format(&self, locale: &str, scope: FormatScope) -> Option<NumberFormat> {
        self.formats.get(&(locale.to_string(), scope)).cloned()
    }
}

/// A resolver bound to one locale, with the i18n switch.
#[derive(Clone, Copy)]
pub struct LocaleContext<'a> {
    resolver: &'a dyn LocaleResolver,
    locale: &'a str,
    enabled: bool,
}

impl<'a> LocaleContext<'a> {
    /// Enabled context for `locale`.
    pub fn new(resolver: &'a dyn LocaleResolver, locale: &'a str) -> Self {
        Self {
            resolver,
            locale,
            enabled: true,
        }
    }

    /// Turns locale lookups on or off.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Active locale.
    pub fn locale(&self) -> &str {
        self.locale
    }

    /// Returns true if lookups are active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// First delimiter along the lookup order.
    pub fn delimiter(&self) -> Option<String> {
        self.first(|format| format.delimiter)
    }

    /// First separator along the lookup order.
    pub fn separator(&self) -> Option<String> {
        self.first(|format| format.separator)
    }

    fn first(&self, field: impl Fn(NumberFormat) -> Option<String>) -> Option<String> {
        if !self.enabled {
            return None;
        }
        FormatScope::LOOKUP_ORDER.iter().find_map(|scope| {
            self.resolver
                .lookup_number_format(self.locale, *scope)
                .and_then(&field)
        })
    }
}

impl std::fmt::Debug for LocaleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleContext")
            .field("locale", &self.locale)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
