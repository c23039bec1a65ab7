//! Typed failures of the AMM engine
//!
//! Degenerate inputs (zero amounts, empty reserves, no route, infeasible
//! deposit ratio) are not errors; they come back as zero values, `None`, or a
//! sentinel variant. Only impossible preconditions end up here.

use num_bigint::BigUint;
use rust_decimal::Decimal;
use thiserror::Error;
use types::TokenId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Requested output is at or above the pool's output reserve
    #[error("Insufficient liquidity: requested {amount_out} but reserve is {reserve_out}")]
    InsufficientLiquidity {
        amount_out: BigUint,
        reserve_out: BigUint,
    },

    /// Slippage tolerance outside [0, 10000] basis points
    #[error("Invalid slippage tolerance: {bps} bps (must be 0-10000)")]
    InvalidSlippage { bps: u32 },

    /// Percentage that cannot be expressed as a tolerance
    #[error("Invalid slippage percentage: {percent}%")]
    InvalidSlippagePercent { percent: Decimal },

    /// Fee fraction that cannot price a trade
    #[error("Invalid fee schedule {numerator}/{denominator}: numerator must be in 1..=denominator")]
    InvalidFee { numerator: u32, denominator: u32 },

    /// No pool connects two consecutive tokens of a path
    #[error("No pool between {token_a} and {token_b}")]
    PoolNotFound { token_a: TokenId, token_b: TokenId },

    /// A hop's pool exists but holds nothing on one side
    #[error("Pool between {token_a} and {token_b} has no liquidity")]
    EmptyReserves { token_a: TokenId, token_b: TokenId },

    /// Path shorter than one hop
    #[error("Swap path needs at least two tokens, got {len}")]
    InvalidPath { len: usize },

    /// Simulated amounts that do not line up with the path's tokens
    #[error("Swap plan has {amounts_len} amounts for a {path_len}-token path")]
    MismatchedAmounts { path_len: usize, amounts_len: usize },

    /// Withdrawal larger than the LP balance held
    #[error("Insufficient LP balance: requested {requested}, balance {balance}")]
    InsufficientLpBalance { requested: BigUint, balance: BigUint },

    /// Withdrawal against a pool with zero LP supply
    #[error("Pool has no LP supply")]
    EmptyPool,
}

pub type Result<T> = std::result::Result<T, AmmError>;
