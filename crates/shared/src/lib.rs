//! Shared errors, configuration, and definition records for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Currency definition records as read from a data file
//! - The money error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::TallyConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::CurrencyDefinition;
