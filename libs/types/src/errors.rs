//! Error types for token identities and raw-amount conversion
//!
//! Conversion between human decimal strings and raw integer units is the only
//! fallible operation in this crate; everything else is plain data.

use thiserror::Error;

/// Errors raised while building identities or converting amounts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Token identifier is empty after trimming
    #[error("Token identifier cannot be empty")]
    EmptyTokenId,

    /// Decimal string could not be parsed as a non-negative number
    #[error("Invalid decimal string: '{input}' - expected digits with an optional fractional part")]
    InvalidDecimal { input: String },

    /// Input carries more fractional digits than the token supports
    #[error("Amount '{input}' has {found} fractional digits but the token only has {decimals}")]
    TooManyDecimals {
        input: String,
        found: usize,
        decimals: u8,
    },

    /// Raw amount string in a snapshot or API payload is not a base-10 integer
    #[error("Invalid raw amount: '{0}'")]
    InvalidRawAmount(String),

    /// Pool was declared with the same token on both sides
    #[error("Pool tokens must differ, got {0} twice")]
    IdenticalTokens(String),
}

pub type Result<T> = std::result::Result<T, TypesError>;
