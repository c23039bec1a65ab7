//! LP positions and withdrawals
//!
//! An LP balance is a pro-rata claim on both reserves:
//! `claim_i = reserve_i * balance / total_supply`.

use crate::error::{AmmError, Result};
use crate::slippage::SlippageTolerance;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::{amount_serde, PoolSnapshot, RawAmount};

/// Share resolution: parts per million
pub const SHARE_PPM: u32 = 1_000_000;

/// A user's stake in one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpPosition {
    #[serde(with = "amount_serde")]
    pub balance: RawAmount,
    /// Share of LP supply in ppm, capped at 100%
    pub share_ppm: u32,
    #[serde(with = "amount_serde")]
    pub reserve0: RawAmount,
    #[serde(with = "amount_serde")]
    pub reserve1: RawAmount,
}

impl LpPosition {
    pub fn new(pool: &PoolSnapshot, balance: RawAmount) -> Self {
        let supply = &pool.lp_total_supply;
        if supply.is_zero() {
            return Self {
                balance,
                share_ppm: 0,
                reserve0: RawAmount::zero(),
                reserve1: RawAmount::zero(),
            };
        }

        let share_ppm = (&balance * SHARE_PPM / supply)
            .to_u32()
            .unwrap_or(SHARE_PPM)
            .min(SHARE_PPM);

        Self {
            reserve0: &pool.reserve0 * &balance / supply,
            reserve1: &pool.reserve1 * &balance / supply,
            share_ppm,
            balance,
        }
    }

    /// Share as a percentage with four decimal places (`12.3456`)
    pub fn share_percent(&self) -> Decimal {
        Decimal::new(i64::from(self.share_ppm), 4)
    }
}

/// Arguments for the router's `removeLiquidity` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPlan {
    #[serde(with = "amount_serde")]
    pub liquidity: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount0_expected: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount1_expected: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount0_min: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount1_min: RawAmount,
}

/// Plan burning `liquidity` LP tokens out of a held `lp_balance`
pub fn plan_withdrawal(
    pool: &PoolSnapshot,
    liquidity: &RawAmount,
    lp_balance: &RawAmount,
    slippage: SlippageTolerance,
) -> Result<WithdrawalPlan> {
    if liquidity > lp_balance {
        return Err(AmmError::InsufficientLpBalance {
            requested: liquidity.clone(),
            balance: lp_balance.clone(),
        });
    }
    let supply = &pool.lp_total_supply;
    if supply.is_zero() {
        return Err(AmmError::EmptyPool);
    }

    let amount0_expected = &pool.reserve0 * liquidity / supply;
    let amount1_expected = &pool.reserve1 * liquidity / supply;

    Ok(WithdrawalPlan {
        liquidity: liquidity.clone(),
        amount0_min: slippage.min_amount(&amount0_expected),
        amount1_min: slippage.min_amount(&amount1_expected),
        amount0_expected,
        amount1_expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use types::{PoolSide, TokenId};

    fn raw(v: u64) -> RawAmount {
        RawAmount::from(v)
    }

    fn pool(reserve0: u64, reserve1: u64, supply: u64) -> PoolSnapshot {
        let a: TokenId = "0xaa".parse().unwrap();
        let b: TokenId = "0xbb".parse().unwrap();
        PoolSnapshot::new(PoolSide::new(a, reserve0), PoolSide::new(b, reserve1))
            .unwrap()
            .with_lp_supply(supply, 18)
    }

    #[test]
    fn test_position_share() {
        let position = LpPosition::new(&pool(10_000, 40_000, 2_000), raw(250));
        assert_eq!(position.share_ppm, 125_000);
        assert_eq!(position.share_percent(), dec!(12.5));
        assert_eq!(position.reserve0, raw(1_250));
        assert_eq!(position.reserve1, raw(5_000));
    }

    #[test]
    fn test_position_without_supply() {
        let position = LpPosition::new(&pool(10_000, 40_000, 0), raw(250));
        assert_eq!(position.share_ppm, 0);
        assert_eq!(position.reserve0, raw(0));
    }

    #[test]
    fn test_withdrawal_plan() {
        let plan = plan_withdrawal(&pool(10_000, 40_000, 2_000), &raw(200), &raw(250), SlippageTolerance::default())
            .unwrap();
        assert_eq!(plan.amount0_expected, raw(1_000));
        assert_eq!(plan.amount1_expected, raw(4_000));
        assert_eq!(plan.amount0_min, raw(995));
        assert_eq!(plan.amount1_min, raw(3_980));
    }

    #[test]
    fn test_withdrawal_rejects_overdraw() {
        let err = plan_withdrawal(&pool(10_000, 40_000, 2_000), &raw(300), &raw(250), SlippageTolerance::default())
            .unwrap_err();
        assert_eq!(
            err,
            AmmError::InsufficientLpBalance {
                requested: raw(300),
                balance: raw(250)
            }
        );
    }

    #[test]
    fn test_withdrawal_rejects_empty_pool() {
        let err = plan_withdrawal(&pool(0, 0, 0), &raw(0), &raw(0), SlippageTolerance::default()).unwrap_err();
        assert_eq!(err, AmmError::EmptyPool);
    }
}
