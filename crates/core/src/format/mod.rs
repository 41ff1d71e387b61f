//! Money formatting.
//!
//! One pass per call, in this order:
//! 1. Resolve decimal mark and thousands separator (option, locale, currency).
//! 2. Round to the currency fraction and pick the digit count.
//! 3. Short-circuit to the free text for zero amounts.
//! 4. Group the integer part.
//! 5. Resolve and place the symbol, then append the ISO code.

pub mod locale;
pub mod options;

#[cfg(test)]
mod tests;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::currency::{Currency, GENERIC_SYMBOL};
use crate::money::Money;

pub use locale::{FormatScope, LocaleContext, LocaleResolver, NumberFormat, StaticLocaleResolver};
pub use options::{CodePosition, FormatOptions, SymbolOption, SymbolPosition, DEFAULT_FREE_TEXT};

/// Renders money as text.
///
/// Without a locale the formatter only uses per-call options and currency
/// defaults. Formatters are cheap and hold no mutable state, so one can be
/// shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter<'a> {
    locale: Option<LocaleContext<'a>>,
}

impl<'a> Formatter<'a> {
    /// Formatter without locale lookups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter that consults `resolver` for `locale`.
    #[must_use]
    pub fn with_locale(resolver: &'a dyn LocaleResolver, locale: &'a str) -> Self {
        Self {
            locale: Some(LocaleContext::new(resolver, locale)),
        }
    }

    /// Enables or disables locale lookups.
    #[must_use]
    pub fn use_i18n(mut self, enabled: bool) -> Self {
        self.locale = self.locale.map(|context| context.enabled(enabled));
        self
    }

    /// Decimal mark for `currency` after locale resolution.
    pub fn decimal_mark(&self, currency: &Currency) -> String {
        self.locale
            .and_then(|context| context.separator())
            .unwrap_or_else(|| currency.decimal_mark().to_string())
    }

    /// Thousands separator for `currency` after locale resolution.
    pub fn thousands_separator(&self, currency: &Currency) -> String {
        self.locale
            .and_then(|context| context.delimiter())
            .unwrap_or_else(|| currency.thousands_separator().to_string())
    }

    /// Formats `money` according to `options`.
    pub fn format(&self, money: &Money, options: &FormatOptions) -> String {
        let currency = money.currency();

        let decimal_mark = options
            .decimal_mark
            .clone()
            .unwrap_or_else(|| self.decimal_mark(currency));
        let thousands_separator = options
            .thousands_separator
            .clone()
            .unwrap_or_else(|| self.thousands_separator(currency));

        let amount = display_amount(money, options.no_cents);

        if amount.is_zero()
            && let Some(free) = &options.display_free
        {
            return free.clone();
        }

        let number = render_number(amount, &decimal_mark, &thousands_separator);
        let sign = if amount < Decimal::ZERO { "-" } else { "" };

        let symbol = resolve_symbol(currency, options);
        let symbol_after = match options.symbol_position {
            Some(SymbolPosition::After) => true,
            Some(SymbolPosition::Before) => false,
            None => !currency.symbol_first(),
        };

        let body = match symbol {
            Some(symbol) if symbol_after => format!("{sign}{number} {symbol}"),
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{number}"),
        };

        if !options.with_currency {
            return body;
        }

        let code = if options.html {
            format!("<span class=\"currency\">{}</span>", currency.iso_code())
        } else {
            currency.iso_code().to_string()
        };
        match options.code_position {
            CodePosition::After => format!("{body} {code}"),
            CodePosition::Before => format!("{code} {body}"),
        }
    }
}

/// Amount as it will be printed: fraction-rounded, cut to the display
/// precision and padded to it.
fn display_amount(money: &Money, no_cents: bool) -> Decimal {
    let currency = money.currency();
    let amount = match money.rounded() {
        Ok(rounded) => rounded.amount(),
        Err(error) => {
            debug!(%error, currency = %currency, "Fraction rounding failed, formatting raw amount");
            money.amount()
        }
    };

    let places = if no_cents || currency.subunit_to_unit() == Decimal::ONE {
        0
    } else {
        currency.decimal_places()
    };

    let mut amount = if no_cents {
        amount.trunc()
    } else {
        amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
    };
    amount.rescale(places);
    amount
}

/// Digits of `|amount|` with grouping and the decimal mark applied.
fn render_number(amount: Decimal, decimal_mark: &str, thousands_separator: &str) -> String {
    let digits = amount.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut number = group_thousands(integer, thousands_separator);
    if let Some(fraction) = fraction {
        number.push_str(decimal_mark);
        number.push_str(fraction);
    }
    number
}

fn group_thousands(integer: &str, separator: &str) -> String {
    if separator.is_empty() || integer.len() <= 3 {
        return integer.to_string();
    }

    let head = integer.len() % 3;
    let mut grouped = String::with_capacity(integer.len() + separator.len() * (integer.len() / 3));
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (i + 3 - head) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

fn resolve_symbol(currency: &Currency, options: &FormatOptions) -> Option<String> {
    match &options.symbol {
        SymbolOption::Hidden => None,
        SymbolOption::Custom(text) if text.is_empty() => None,
        SymbolOption::Custom(text) => Some(text.clone()),
        SymbolOption::Currency => {
            let symbol = if options.html {
                currency.html_entity().or_else(|| currency.symbol())
            } else {
                currency.symbol()
            };
            Some(symbol.map_or_else(
                || {
                    warn!(currency = %currency, "Currency has no symbol, using placeholder");
                    GENERIC_SYMBOL.to_string()
                },
                ToString::to_string,
            ))
        }
    }
}
