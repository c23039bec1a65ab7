//! Token identities
//!
//! Addresses arrive from wallets and RPC responses in mixed case (EIP-55
//! checksums) and in lowercase from indexers. [`TokenId`] stores the
//! lowercase form so equality, hashing and ordering all agree with the
//! case-insensitive comparison the pools were keyed with.

use crate::errors::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Case-insensitive token identifier, typically a hex address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(String);

impl TokenId {
    /// Normalized (lowercase) identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TokenId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyTokenId);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for TokenId {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenId> for String {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl AsRef<str> for TokenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token metadata as shown in selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: TokenId,
    pub symbol: String,
    pub decimals: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_equality() {
        let checksum: TokenId = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse().unwrap();
        let lower: TokenId = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse().unwrap();
        assert_eq!(checksum, lower);
        assert_eq!(checksum.as_str(), "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    }

    #[test]
    fn test_ordering_uses_normalized_form() {
        let upper: TokenId = "0xBB".parse().unwrap();
        let lower: TokenId = "0xaa".parse().unwrap();
        assert!(lower < upper);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!("  ".parse::<TokenId>(), Err(TypesError::EmptyTokenId));
    }

    #[test]
    fn test_serde_normalizes() {
        let id: TokenId = serde_json::from_str("\"0xABC\"").unwrap();
        assert_eq!(id.as_str(), "0xabc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xabc\"");
    }
}
