//! Pool trait definitions shared by routing and swap simulation

use crate::error::Result;
use crate::v2_math::{FeeSchedule, V2Math, V2PoolState};
use types::{PoolSnapshot, RawAmount, ReservePair, TokenId};

/// Anything that names the two tokens of a pool
///
/// The route finder only needs pool existence, so it accepts bare token
/// pairs as well as full snapshots.
pub trait PoolPair {
    fn token0(&self) -> &TokenId;
    fn token1(&self) -> &TokenId;
}

impl PoolPair for PoolSnapshot {
    fn token0(&self) -> &TokenId {
        &self.token0
    }

    fn token1(&self) -> &TokenId {
        &self.token1
    }
}

impl PoolPair for (TokenId, TokenId) {
    fn token0(&self) -> &TokenId {
        &self.0
    }

    fn token1(&self) -> &TokenId {
        &self.1
    }
}

/// Unified pricing interface over oriented reserves
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: &RawAmount) -> RawAmount;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: &RawAmount) -> Result<RawAmount>;

    /// Current reserves, input side first
    fn reserves(&self) -> &ReservePair;

    fn fee(&self) -> FeeSchedule;
}

impl AmmPool for V2PoolState {
    fn get_amount_out(&self, amount_in: &RawAmount) -> RawAmount {
        V2Math::new(self.fee).get_amount_out(amount_in, &self.reserves.reserve_in, &self.reserves.reserve_out)
    }

    fn get_amount_in(&self, amount_out: &RawAmount) -> Result<RawAmount> {
        V2Math::new(self.fee).get_amount_in(amount_out, &self.reserves.reserve_in, &self.reserves.reserve_out)
    }

    fn reserves(&self) -> &ReservePair {
        &self.reserves
    }

    fn fee(&self) -> FeeSchedule {
        self.fee
    }
}
