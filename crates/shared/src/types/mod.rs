//! Common types used across the workspace.

pub mod definition;

pub use definition::CurrencyDefinition;
