//! Core money logic for Tally.
//!
//! This crate contains pure, synchronous money logic with no I/O outside of
//! loading definition files at startup.
//!
//! # Modules
//!
//! - `currency` - Currency handles and the process-wide registry
//! - `money` - The `Money` value, arithmetic, and the column binding
//! - `format` - Text rendering with locale-aware punctuation
//! - `exchange` - The rate-provider boundary and an in-memory rate table
//! - `settings` - Default currency and one-time initialization

pub mod currency;
pub mod exchange;
pub mod format;
pub mod money;
pub mod settings;

pub use currency::{Currency, CurrencyLike, CurrencyRegistry};
pub use exchange::{ExchangeProvider, ExchangeRate, RateTable};
pub use format::{FormatOptions, Formatter, LocaleResolver, StaticLocaleResolver};
pub use money::{Money, MoneyColumns, Operand, Quotient, ToAmount, ToMoney};
pub use settings::{default_currency, init};
pub use tally_shared::{MoneyError, MoneyResult};
