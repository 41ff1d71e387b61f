//! Error taxonomy shared by every tally crate.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by currency lookup, money arithmetic, and conversion.
///
/// None of these conditions are transient: callers get them once and
/// retrying the same call yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    // ========== Currency Errors ==========
    /// The code is empty, blank, or not present in the registry.
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),

    /// A currency definition record is malformed.
    #[error("Invalid currency definition: {0}")]
    InvalidDefinition(String),

    /// The process-wide registry was installed twice.
    #[error("Currency registry is already initialized")]
    RegistryAlreadyInitialized,

    // ========== Arithmetic Errors ==========
    /// Operands carry different currencies and no conversion was requested.
    #[error("Can't perform {operation} on two Money objects with different currencies ({left} and {right})")]
    CurrencyMismatch {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Currency code of the left operand.
        left: String,
        /// Currency code of the right operand.
        right: String,
    },

    /// The operand type cannot be combined with money (e.g. Money * Money).
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// The comparison target has no money representation.
    #[error("Comparison of Money with {0} failed")]
    InvalidComparison(String),

    /// The input cannot be read as an exact decimal amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Division or modulo by a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// The exact result does not fit the decimal representation.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    // ========== Exchange Errors ==========
    /// The exchange provider has no rate for the pair.
    #[error("No exchange rate available from {from} to {to}")]
    RateUnavailable {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },
}

impl MoneyError {
    /// Builds a currency mismatch error from two currency codes.
    pub fn mismatch(
        operation: &'static str,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self::CurrencyMismatch {
            operation,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::InvalidDefinition(_) => "INVALID_DEFINITION",
            Self::RegistryAlreadyInitialized => "REGISTRY_ALREADY_INITIALIZED",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::InvalidOperand(_) => "INVALID_OPERAND",
            Self::InvalidComparison(_) => "INVALID_COMPARISON",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::Overflow(_) => "OVERFLOW",
            Self::RateUnavailable { .. } => "RATE_UNAVAILABLE",
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Always false: rates, registries, and operands do not change between
    /// identical calls.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}
