//! Constant-product (x*y=k) pricing with exact integer arithmetic
//!
//! Mirrors the on-chain router bit for bit: every multiplication happens before
//! the single floor division, and the fee is applied as a numerator/denominator
//! pair rather than a rounded multiplier.

use crate::error::{AmmError, Result};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use types::{RawAmount, ReservePair};

/// Proportional trading fee expressed as the fraction of input that is kept
///
/// `997/1000` keeps 99.7% of the input, i.e. a 0.3% fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    numerator: u32,
    denominator: u32,
}

impl FeeSchedule {
    /// Standard 0.3% constant-product fee
    pub const STANDARD: FeeSchedule = FeeSchedule {
        numerator: 997,
        denominator: 1000,
    };

    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || numerator > denominator {
            return Err(AmmError::InvalidFee {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Fee in basis points, e.g. 30 => 9970/10000
    pub fn from_bps(fee_bps: u32) -> Result<Self> {
        Self::new(10_000u32.saturating_sub(fee_bps), 10_000)
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Pool reserves plus the fee they trade under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2PoolState {
    pub reserves: ReservePair,
    pub fee: FeeSchedule,
}

/// Constant-product math for a given fee schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V2Math {
    fee: FeeSchedule,
}

impl V2Math {
    pub const fn new(fee: FeeSchedule) -> Self {
        Self { fee }
    }

    pub fn fee(&self) -> FeeSchedule {
        self.fee
    }

    /// Output received for `amount_in`
    ///
    /// Returns zero when the input or either reserve is zero: there is nothing
    /// to price yet, which is a normal state while a form is being edited.
    ///
    /// ```text
    /// amount_in_with_fee = amount_in * fee_num
    /// amount_out = amount_in_with_fee * reserve_out
    ///            / (reserve_in * fee_den + amount_in_with_fee)
    /// ```
    pub fn get_amount_out(
        &self,
        amount_in: &RawAmount,
        reserve_in: &RawAmount,
        reserve_out: &RawAmount,
    ) -> RawAmount {
        if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
            return RawAmount::zero();
        }

        let amount_in_with_fee = amount_in * self.fee.numerator;
        let numerator = &amount_in_with_fee * reserve_out;
        let denominator = reserve_in * self.fee.denominator + &amount_in_with_fee;

        numerator / denominator
    }

    /// Input required to receive exactly `amount_out`
    ///
    /// The trailing `+ 1` rounds up so that feeding the result back through
    /// [`get_amount_out`](Self::get_amount_out) never yields less than
    /// `amount_out`.
    pub fn get_amount_in(
        &self,
        amount_out: &RawAmount,
        reserve_in: &RawAmount,
        reserve_out: &RawAmount,
    ) -> Result<RawAmount> {
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                amount_out: amount_out.clone(),
                reserve_out: reserve_out.clone(),
            });
        }

        let numerator = reserve_in * amount_out * self.fee.denominator;
        let denominator = (reserve_out - amount_out) * self.fee.numerator;

        Ok(numerator / denominator + RawAmount::one())
    }
}

/// [`V2Math::get_amount_out`] under the standard 0.3% fee
pub fn get_amount_out(amount_in: &RawAmount, reserve_in: &RawAmount, reserve_out: &RawAmount) -> RawAmount {
    V2Math::default().get_amount_out(amount_in, reserve_in, reserve_out)
}

/// [`V2Math::get_amount_in`] under the standard 0.3% fee
pub fn get_amount_in(
    amount_out: &RawAmount,
    reserve_in: &RawAmount,
    reserve_out: &RawAmount,
) -> Result<RawAmount> {
    V2Math::default().get_amount_in(amount_out, reserve_in, reserve_out)
}
