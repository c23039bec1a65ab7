//! Pool snapshots
//!
//! A [`PoolSnapshot`] is the plain-data view of one constant-product pair as
//! read from chain by the (external) state layer. Snapshots are always held in
//! canonical orientation: `token0` sorts before `token1` by normalized
//! identity, and reserves/decimals/symbols travel with their token. Callers
//! that think in "in/out" terms reorient through [`PoolSnapshot::oriented`].

use crate::amount::{amount_serde, RawAmount};
use crate::errors::{Result, TypesError};
use crate::token::{TokenId, TokenInfo};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

const DEFAULT_DECIMALS: u8 = 18;

/// Reserves oriented for a trade direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservePair {
    #[serde(with = "amount_serde")]
    pub reserve_in: RawAmount,
    #[serde(with = "amount_serde")]
    pub reserve_out: RawAmount,
}

impl ReservePair {
    pub fn new(reserve_in: RawAmount, reserve_out: RawAmount) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Both sides hold liquidity
    pub fn is_tradable(&self) -> bool {
        !self.reserve_in.is_zero() && !self.reserve_out.is_zero()
    }

    pub fn flipped(self) -> Self {
        Self {
            reserve_in: self.reserve_out,
            reserve_out: self.reserve_in,
        }
    }
}

/// One side of a pool before canonical ordering is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSide {
    pub token: TokenId,
    pub reserve: RawAmount,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl PoolSide {
    pub fn new(token: TokenId, reserve: impl Into<RawAmount>) -> Self {
        Self {
            token,
            reserve: reserve.into(),
            decimals: DEFAULT_DECIMALS,
            symbol: None,
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

/// Snapshot of a constant-product pair in canonical token order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedSnapshot")]
pub struct PoolSnapshot {
    /// Address of the pair (LP token) contract, when known
    pub pair: Option<TokenId>,
    pub token0: TokenId,
    pub token1: TokenId,
    pub decimals0: u8,
    pub decimals1: u8,
    #[serde(with = "amount_serde")]
    pub reserve0: RawAmount,
    #[serde(with = "amount_serde")]
    pub reserve1: RawAmount,
    #[serde(with = "amount_serde")]
    pub lp_total_supply: RawAmount,
    pub lp_decimals: u8,
    pub symbol0: Option<String>,
    pub symbol1: Option<String>,
}

impl PoolSnapshot {
    /// Build a snapshot from two sides in any order
    pub fn new(a: PoolSide, b: PoolSide) -> Result<Self> {
        if a.token == b.token {
            return Err(TypesError::IdenticalTokens(a.token.to_string()));
        }
        let (first, second) = if a.token < b.token { (a, b) } else { (b, a) };

        Ok(Self {
            pair: None,
            token0: first.token,
            token1: second.token,
            decimals0: first.decimals,
            decimals1: second.decimals,
            reserve0: first.reserve,
            reserve1: second.reserve,
            lp_total_supply: RawAmount::zero(),
            lp_decimals: DEFAULT_DECIMALS,
            symbol0: first.symbol,
            symbol1: second.symbol,
        })
    }

    pub fn with_lp_supply(mut self, supply: impl Into<RawAmount>, lp_decimals: u8) -> Self {
        self.lp_total_supply = supply.into();
        self.lp_decimals = lp_decimals;
        self
    }

    /// Whether this pool connects `a` and `b`, in either order
    pub fn connects(&self, a: &TokenId, b: &TokenId) -> bool {
        (&self.token0 == a && &self.token1 == b) || (&self.token0 == b && &self.token1 == a)
    }

    /// The token on the other side of `token`
    pub fn counterparty(&self, token: &TokenId) -> Option<&TokenId> {
        if &self.token0 == token {
            Some(&self.token1)
        } else if &self.token1 == token {
            Some(&self.token0)
        } else {
            None
        }
    }

    /// Reserves oriented so `reserve_in` belongs to `token_in`
    pub fn oriented(&self, token_in: &TokenId) -> Option<ReservePair> {
        if &self.token0 == token_in {
            Some(ReservePair::new(self.reserve0.clone(), self.reserve1.clone()))
        } else if &self.token1 == token_in {
            Some(ReservePair::new(self.reserve1.clone(), self.reserve0.clone()))
        } else {
            None
        }
    }

    /// Both reserves are positive
    pub fn has_liquidity(&self) -> bool {
        !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }

    /// Metadata for one side of the pool
    pub fn token_info(&self, token: &TokenId) -> Option<TokenInfo> {
        let (symbol, decimals) = if &self.token0 == token {
            (&self.symbol0, self.decimals0)
        } else if &self.token1 == token {
            (&self.symbol1, self.decimals1)
        } else {
            return None;
        };
        Some(TokenInfo {
            address: token.clone(),
            symbol: symbol.clone().unwrap_or_default(),
            decimals,
        })
    }
}

/// Wire shape accepted before canonical ordering is enforced
#[derive(Deserialize)]
struct UncheckedSnapshot {
    #[serde(default)]
    pair: Option<TokenId>,
    token0: TokenId,
    token1: TokenId,
    #[serde(default = "default_decimals")]
    decimals0: u8,
    #[serde(default = "default_decimals")]
    decimals1: u8,
    #[serde(with = "amount_serde")]
    reserve0: RawAmount,
    #[serde(with = "amount_serde")]
    reserve1: RawAmount,
    #[serde(default, with = "amount_serde::option")]
    lp_total_supply: Option<RawAmount>,
    #[serde(default = "default_decimals")]
    lp_decimals: u8,
    #[serde(default)]
    symbol0: Option<String>,
    #[serde(default)]
    symbol1: Option<String>,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

impl TryFrom<UncheckedSnapshot> for PoolSnapshot {
    type Error = TypesError;

    fn try_from(raw: UncheckedSnapshot) -> Result<Self> {
        let mut side0 = PoolSide::new(raw.token0, raw.reserve0).with_decimals(raw.decimals0);
        side0.symbol = raw.symbol0;
        let mut side1 = PoolSide::new(raw.token1, raw.reserve1).with_decimals(raw.decimals1);
        side1.symbol = raw.symbol1;

        let mut snapshot = PoolSnapshot::new(side0, side1)?
            .with_lp_supply(raw.lp_total_supply.unwrap_or_default(), raw.lp_decimals);
        snapshot.pair = raw.pair;
        Ok(snapshot)
    }
}

/// Find the pool trading `a` against `b`, in either order
pub fn find_pool<'a>(pools: &'a [PoolSnapshot], a: &TokenId, b: &TokenId) -> Option<&'a PoolSnapshot> {
    pools.iter().find(|pool| pool.connects(a, b))
}

/// Reserves for a trade from `token_in` to `token_out`, oriented for that direction
pub fn reserves_for_tokens(
    pools: &[PoolSnapshot],
    token_in: Option<&TokenId>,
    token_out: Option<&TokenId>,
) -> Option<ReservePair> {
    let (token_in, token_out) = (token_in?, token_out?);
    find_pool(pools, token_in, token_out)?.oriented(token_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> TokenId {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_canonicalizes_order() {
        let pool = PoolSnapshot::new(
            PoolSide::new(token("0xBB"), 2_000u32).with_decimals(6).with_symbol("USDC"),
            PoolSide::new(token("0xaa"), 1_000u32).with_symbol("WETH"),
        )
        .unwrap();

        assert_eq!(pool.token0, token("0xaa"));
        assert_eq!(pool.reserve0, RawAmount::from(1_000u32));
        assert_eq!(pool.decimals0, 18);
        assert_eq!(pool.decimals1, 6);
        assert_eq!(pool.symbol1.as_deref(), Some("USDC"));
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let result = PoolSnapshot::new(
            PoolSide::new(token("0xAA"), 1u32),
            PoolSide::new(token("0xaa"), 1u32),
        );
        assert!(matches!(result, Err(TypesError::IdenticalTokens(_))));
    }

    #[test]
    fn test_reserves_for_tokens_orients_both_ways() {
        let pools = vec![PoolSnapshot::new(
            PoolSide::new(token("0xaa"), 1_000u32),
            PoolSide::new(token("0xbb"), 2_000u32),
        )
        .unwrap()];

        let forward = reserves_for_tokens(&pools, Some(&token("0xAA")), Some(&token("0xbb"))).unwrap();
        assert_eq!(forward, ReservePair::new(1_000u32.into(), 2_000u32.into()));

        let backward = reserves_for_tokens(&pools, Some(&token("0xbb")), Some(&token("0xaa"))).unwrap();
        assert_eq!(backward, ReservePair::new(2_000u32.into(), 1_000u32.into()));

        assert!(reserves_for_tokens(&pools, None, Some(&token("0xaa"))).is_none());
        assert!(reserves_for_tokens(&pools, Some(&token("0xaa")), Some(&token("0xcc"))).is_none());
    }

    #[test]
    fn test_deserialize_reorders_non_canonical_snapshot() {
        let json = r#"{
            "token0": "0xBB",
            "token1": "0xAA",
            "decimals0": 6,
            "reserve0": "5000",
            "reserve1": "7000",
            "lp_total_supply": "100"
        }"#;
        let pool: PoolSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(pool.token0, token("0xaa"));
        assert_eq!(pool.reserve0, RawAmount::from(7_000u32));
        assert_eq!(pool.decimals1, 6);
        assert_eq!(pool.lp_total_supply, RawAmount::from(100u32));
    }
}
