//! Liquidity validation orchestrator
//!
//! Decides whether a two-sided deposit can go to the router as entered, needs
//! to be corrected to the pool ratio, or is too imbalanced to satisfy the
//! slippage floors at all.

use crate::liquidity::calculate_optimal_amounts;
use crate::slippage::SlippageTolerance;
use serde::{Deserialize, Serialize};
use types::{amount_serde, RawAmount};

/// Arguments for the router's `addLiquidity` call, token0/token1 order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPlan {
    #[serde(with = "amount_serde")]
    pub amount0: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount1: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount0_min: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount1_min: RawAmount,
}

impl DepositPlan {
    fn new(amount0: RawAmount, amount1: RawAmount, slippage: SlippageTolerance) -> Self {
        Self {
            amount0_min: slippage.min_amount(&amount0),
            amount1_min: slippage.min_amount(&amount1),
            amount0,
            amount1,
        }
    }
}

/// Outcome of validating a deposit against the pool ratio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum DepositDecision {
    /// The entered amounts already match the ratio
    Exact(DepositPlan),
    /// The router would only take this corrected pair
    Adjusted(DepositPlan),
    /// No pair within tolerance of the entered amounts matches the ratio.
    /// Recoverable: the user should rebalance the inputs.
    Imbalanced,
}

impl DepositDecision {
    pub fn plan(&self) -> Option<&DepositPlan> {
        match self {
            DepositDecision::Exact(plan) | DepositDecision::Adjusted(plan) => Some(plan),
            DepositDecision::Imbalanced => None,
        }
    }
}

/// Validate a deposit of `(amount0_desired, amount1_desired)` into reserves `(reserve0, reserve1)`
///
/// The floors passed to the ratio engine are the desired amounts less
/// slippage; the minimums in the returned plan are recomputed from the final
/// amounts.
pub fn plan_deposit(
    amount0_desired: &RawAmount,
    amount1_desired: &RawAmount,
    reserve0: &RawAmount,
    reserve1: &RawAmount,
    slippage: SlippageTolerance,
) -> DepositDecision {
    let amount0_floor = slippage.min_amount(amount0_desired);
    let amount1_floor = slippage.min_amount(amount1_desired);

    match calculate_optimal_amounts(
        amount0_desired,
        amount1_desired,
        &amount0_floor,
        &amount1_floor,
        reserve0,
        reserve1,
    ) {
        None => DepositDecision::Imbalanced,
        Some((amount0, amount1)) => {
            let exact = &amount0 == amount0_desired && &amount1 == amount1_desired;
            let plan = DepositPlan::new(amount0, amount1, slippage);
            if exact {
                DepositDecision::Exact(plan)
            } else {
                DepositDecision::Adjusted(plan)
            }
        }
    }
}

/// Whether the router must be approved before spending `required`
pub fn needs_approval(allowance: &RawAmount, required: &RawAmount) -> bool {
    allowance < required
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(v: u64) -> RawAmount {
        RawAmount::from(v)
    }

    #[test]
    fn test_exact_ratio() {
        let decision = plan_deposit(&raw(1_000), &raw(2_000), &raw(10_000), &raw(20_000), SlippageTolerance::default());
        assert_eq!(
            decision,
            DepositDecision::Exact(DepositPlan {
                amount0: raw(1_000),
                amount1: raw(2_000),
                amount0_min: raw(995),
                amount1_min: raw(1_990),
            })
        );
    }

    #[test]
    fn test_adjusted_within_tolerance() {
        // 1000 of token0 projects to 2000 of token1; 2005 offered, so token1 is trimmed
        let decision = plan_deposit(&raw(1_000), &raw(2_005), &raw(10_000), &raw(20_000), SlippageTolerance::default());
        let plan = decision.plan().unwrap();
        assert!(matches!(decision, DepositDecision::Adjusted(_)));
        assert_eq!((plan.amount0.clone(), plan.amount1.clone()), (raw(1_000), raw(2_000)));
        assert_eq!(plan.amount1_min, raw(1_990));
    }

    #[test]
    fn test_imbalanced_beyond_tolerance() {
        // token1 would be cut from 3000 to 2000, far below its 0.5% floor
        let decision = plan_deposit(&raw(1_000), &raw(3_000), &raw(10_000), &raw(20_000), SlippageTolerance::default());
        assert_eq!(decision, DepositDecision::Imbalanced);
        assert!(decision.plan().is_none());
    }

    #[test]
    fn test_first_deposit_sets_ratio() {
        let decision = plan_deposit(&raw(7), &raw(3), &raw(0), &raw(0), SlippageTolerance::ZERO);
        assert_eq!(
            decision,
            DepositDecision::Exact(DepositPlan {
                amount0: raw(7),
                amount1: raw(3),
                amount0_min: raw(7),
                amount1_min: raw(3),
            })
        );
    }

    #[test]
    fn test_needs_approval() {
        assert!(needs_approval(&raw(0), &raw(1)));
        assert!(!needs_approval(&raw(5), &raw(5)));
    }
}
