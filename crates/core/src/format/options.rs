//! Per-call formatting options.

/// Which symbol, if any, to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SymbolOption {
    /// The currency's own symbol, or `¤` if it has none.
    #[default]
    Currency,
    /// No symbol.
    Hidden,
    /// This exact text. An empty string behaves like `Hidden`.
    Custom(String),
}

impl From<bool> for SymbolOption {
    fn from(show: bool) -> Self {
        if show { Self::Currency } else { Self::Hidden }
    }
}

impl From<&str> for SymbolOption {
    fn from(symbol: &str) -> Self {
        Self::Custom(symbol.to_string())
    }
}

impl From<String> for SymbolOption {
    fn from(symbol: String) -> Self {
        Self::Custom(symbol)
    }
}

/// Where the symbol goes relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1.00`
    Before,
    /// `1.00 $`
    After,
}

/// Where the ISO code goes when `with_currency` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodePosition {
    /// `CHF 10.30`
    Before,
    /// `10.30 CHF`
    #[default]
    After,
}

/// Recognized formatting options.
///
/// `None` punctuation falls through to the locale and then the currency.
/// `Some("")` as thousands separator disables grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Symbol selection.
    pub symbol: SymbolOption,
    /// Symbol placement; defaults to the currency's `symbol_first`.
    pub symbol_position: Option<SymbolPosition>,
    /// Decimal mark override (alias: separator).
    pub decimal_mark: Option<String>,
    /// Thousands separator override (alias: delimiter).
    pub thousands_separator: Option<String>,
    /// Append the ISO code.
    pub with_currency: bool,
    /// Placement of the ISO code.
    pub code_position: CodePosition,
    /// Prefer the HTML entity over the plain symbol.
    pub html: bool,
    /// Drop fractional digits.
    pub no_cents: bool,
    /// Text printed instead of a zero amount.
    pub display_free: Option<String>,
}

/// Text printed for zero amounts when `display_free` is on.
pub const DEFAULT_FREE_TEXT: &str = "free";

impl FormatOptions {
    /// Options with every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the symbol: `true`, `false`, or custom text.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<SymbolOption>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Sets the symbol placement.
    #[must_use]
    pub fn symbol_position(mut self, position: SymbolPosition) -> Self {
        self.symbol_position = Some(position);
        self
    }

    /// Sets the decimal mark.
    #[must_use]
    pub fn decimal_mark(mut self, mark: impl Into<String>) -> Self {
        self.decimal_mark = Some(mark.into());
        self
    }

    /// Alias of [`FormatOptions::decimal_mark`].
    #[must_use]
    pub fn separator(self, mark: impl Into<String>) -> Self {
        self.decimal_mark(mark)
    }

    /// Sets the thousands separator; `""` disables grouping.
    #[must_use]
    pub fn thousands_separator(mut self, separator: impl Into<String>) -> Self {
        self.thousands_separator = Some(separator.into());
        self
    }

    /// Alias of [`FormatOptions::thousands_separator`].
    #[must_use]
    pub fn delimiter(self, separator: impl Into<String>) -> Self {
        self.thousands_separator(separator)
    }

    /// Appends the ISO code.
    #[must_use]
    pub fn with_currency(mut self, with_currency: bool) -> Self {
        self.with_currency = with_currency;
        self
    }

    /// Puts the ISO code in front of the amount.
    #[must_use]
    pub fn code_before(mut self) -> Self {
        self.code_position = CodePosition::Before;
        self
    }

    /// Prefers the HTML entity.
    #[must_use]
    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    /// Drops fractional digits.
    #[must_use]
    pub fn no_cents(mut self, no_cents: bool) -> Self {
        self.no_cents = no_cents;
        self
    }

    /// Prints `free` for zero amounts.
    #[must_use]
    pub fn display_free(self) -> Self {
        self.display_free_as(DEFAULT_FREE_TEXT)
    }

    /// Prints `text` for zero amounts.
    #[must_use]
    pub fn display_free_as(mut self, text: impl Into<String>) -> Self {
        self.display_free = Some(text.into());
        self
    }
}
