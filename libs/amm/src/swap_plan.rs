//! Multi-hop swap planning
//!
//! Turns a routed [`Path`] into router call arguments. Each hop is priced
//! against its pool's reserves oriented for the hop direction, so a path whose
//! graph edge exists but whose pool is empty is rejected here, before
//! submission.

use crate::error::{AmmError, Result};
use crate::pool_traits::AmmPool;
use crate::routing::Path;
use crate::slippage::SlippageTolerance;
use crate::v2_math::{V2Math, V2PoolState};
use serde::{Deserialize, Serialize};
use types::{amount_serde, find_pool, PoolSnapshot, RawAmount, TokenId};

/// Router entry point and arguments for a swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SwapCall {
    /// `swapTokenForToken(tokenIn, tokenOut, amountIn, minAmountOut)`
    Direct {
        token_in: TokenId,
        token_out: TokenId,
        #[serde(with = "amount_serde")]
        amount_in: RawAmount,
        #[serde(with = "amount_serde")]
        min_amount_out: RawAmount,
    },
    /// `multiHopSwap(path, amountIn, minAmountOut)`
    MultiHop {
        path: Vec<TokenId>,
        #[serde(with = "amount_serde")]
        amount_in: RawAmount,
        #[serde(with = "amount_serde")]
        min_amount_out: RawAmount,
    },
}

/// Simulated swap along a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPlan")]
pub struct SwapPlan {
    pub path: Path,
    /// Amount held after each step, starting with the input
    #[serde(serialize_with = "serialize_amounts")]
    pub amounts: Vec<RawAmount>,
    #[serde(with = "amount_serde")]
    pub min_amount_out: RawAmount,
    pub call: SwapCall,
}

impl SwapPlan {
    pub fn amount_out(&self) -> &RawAmount {
        // amounts always holds the input plus one entry per hop
        &self.amounts[self.amounts.len() - 1]
    }
}

/// Wire shape accepted before the amount count is checked against the path
#[derive(Deserialize)]
struct UncheckedPlan {
    path: Path,
    #[serde(deserialize_with = "deserialize_amounts")]
    amounts: Vec<RawAmount>,
    #[serde(with = "amount_serde")]
    min_amount_out: RawAmount,
    call: SwapCall,
}

impl TryFrom<UncheckedPlan> for SwapPlan {
    type Error = AmmError;

    fn try_from(raw: UncheckedPlan) -> Result<Self> {
        if raw.amounts.len() != raw.path.tokens().len() {
            return Err(AmmError::MismatchedAmounts {
                path_len: raw.path.tokens().len(),
                amounts_len: raw.amounts.len(),
            });
        }
        Ok(Self {
            path: raw.path,
            amounts: raw.amounts,
            min_amount_out: raw.min_amount_out,
            call: raw.call,
        })
    }
}

fn serialize_amounts<S: serde::Serializer>(amounts: &[RawAmount], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(amounts.iter().map(|a| a.to_str_radix(10)))
}

fn deserialize_amounts<'de, D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<RawAmount>, D::Error> {
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|raw| types::parse_raw(raw).map_err(serde::de::Error::custom))
        .collect()
}

/// Amount after every hop of `path` starting from `amount_in`
pub fn amounts_out(
    math: &V2Math,
    pools: &[PoolSnapshot],
    path: &Path,
    amount_in: &RawAmount,
) -> Result<Vec<RawAmount>> {
    let mut amounts = Vec::with_capacity(path.tokens().len());
    amounts.push(amount_in.clone());

    for (token_in, token_out) in path.legs() {
        let pool = find_pool(pools, token_in, token_out).ok_or_else(|| AmmError::PoolNotFound {
            token_a: token_in.clone(),
            token_b: token_out.clone(),
        })?;
        let reserves = pool.oriented(token_in).ok_or_else(|| AmmError::PoolNotFound {
            token_a: token_in.clone(),
            token_b: token_out.clone(),
        })?;
        if !reserves.is_tradable() {
            return Err(AmmError::EmptyReserves {
                token_a: token_in.clone(),
                token_b: token_out.clone(),
            });
        }

        let hop = V2PoolState {
            reserves,
            fee: math.fee(),
        };
        let previous = &amounts[amounts.len() - 1];
        let next = hop.get_amount_out(previous);
        amounts.push(next);
    }

    Ok(amounts)
}

/// Simulate `amount_in` along `path` and build the router call
pub fn plan_swap(
    math: &V2Math,
    pools: &[PoolSnapshot],
    path: Path,
    amount_in: &RawAmount,
    slippage: SlippageTolerance,
) -> Result<SwapPlan> {
    let amounts = amounts_out(math, pools, &path, amount_in)?;
    let min_amount_out = slippage.min_amount(&amounts[amounts.len() - 1]);

    let call = if path.is_direct() {
        SwapCall::Direct {
            token_in: path.source().clone(),
            token_out: path.destination().clone(),
            amount_in: amount_in.clone(),
            min_amount_out: min_amount_out.clone(),
        }
    } else {
        SwapCall::MultiHop {
            path: path.tokens().to_vec(),
            amount_in: amount_in.clone(),
            min_amount_out: min_amount_out.clone(),
        }
    };

    Ok(SwapPlan {
        path,
        amounts,
        min_amount_out,
        call,
    })
}
