//! Liquidity ratio engine
//!
//! Fee-free projections at the current reserve ratio, and the two-sided
//! deposit algorithm the router runs on-chain when liquidity is added.

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use types::{amount_serde, RawAmount};

/// Amount of B matching `amount_a` at the pool ratio: `floor(amount_a * reserve_b / reserve_a)`
///
/// Zero when any argument is zero.
pub fn quote(amount_a: &RawAmount, reserve_a: &RawAmount, reserve_b: &RawAmount) -> RawAmount {
    if amount_a.is_zero() || reserve_a.is_zero() || reserve_b.is_zero() {
        return RawAmount::zero();
    }
    amount_a * reserve_b / reserve_a
}

/// Deposit pair that preserves the pool ratio without exceeding either desired amount
///
/// An empty pool accepts the desired amounts as-is (the first depositor sets
/// the price). Otherwise the side that binds is the one whose projection fits
/// inside the other side's desired amount; the projected side must still clear
/// its minimum. `None` means the amounts are too imbalanced for the floors.
pub fn calculate_optimal_amounts(
    amount_a_desired: &RawAmount,
    amount_b_desired: &RawAmount,
    amount_a_min: &RawAmount,
    amount_b_min: &RawAmount,
    reserve_a: &RawAmount,
    reserve_b: &RawAmount,
) -> Option<(RawAmount, RawAmount)> {
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Some((amount_a_desired.clone(), amount_b_desired.clone()));
    }

    let amount_b_optimal = quote(amount_a_desired, reserve_a, reserve_b);
    if &amount_b_optimal <= amount_b_desired {
        return (&amount_b_optimal >= amount_b_min)
            .then(|| (amount_a_desired.clone(), amount_b_optimal));
    }

    let amount_a_optimal = quote(amount_b_desired, reserve_b, reserve_a);
    (&amount_a_optimal <= amount_a_desired && &amount_a_optimal >= amount_a_min)
        .then(|| (amount_a_optimal, amount_b_desired.clone()))
}

/// Suggested value for the opposite input of an add-liquidity form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompanionAmount {
    /// Pool has no liquidity yet; the user picks both sides
    FreeRatio,
    /// Matching amount at the current ratio
    Amount {
        #[serde(with = "amount_serde")]
        amount: RawAmount,
    },
    /// Entered amount is too small to project to a non-zero counterpart
    InsufficientLiquidity,
}

/// Project the amount entered on one side onto the other side
pub fn companion_amount(
    amount: &RawAmount,
    reserve_this: &RawAmount,
    reserve_other: &RawAmount,
) -> CompanionAmount {
    if reserve_this.is_zero() || reserve_other.is_zero() {
        return CompanionAmount::FreeRatio;
    }
    if amount.is_zero() {
        return CompanionAmount::Amount {
            amount: RawAmount::zero(),
        };
    }

    let projected = quote(amount, reserve_this, reserve_other);
    if projected.is_zero() {
        CompanionAmount::InsufficientLiquidity
    } else {
        CompanionAmount::Amount { amount: projected }
    }
}
