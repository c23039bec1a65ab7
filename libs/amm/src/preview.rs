//! Swap preview
//!
//! Two-way quote for the swap form: forward when the user typed the input
//! amount, reverse when they typed the output. Missing data while the user is
//! mid-edit yields a zeroed preview with [`PreviewStatus::MissingLiquidityOrInput`]
//! rather than an error.

use crate::error::Result;
use crate::slippage::SlippageTolerance;
use crate::v2_math::V2Math;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use types::{amount_serde, RawAmount, ReservePair};

/// Which side of the swap the user entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    /// Input given, output computed
    Forward,
    /// Output given, input computed
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStatus {
    Ready,
    MissingLiquidityOrInput,
}

/// Result of a preview; all amounts are raw units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPreview {
    #[serde(with = "amount_serde")]
    pub amount_in: RawAmount,
    #[serde(with = "amount_serde")]
    pub amount_out: RawAmount,
    /// Slippage-bounded output guard; zero in reverse mode, where the desired
    /// output itself is the router's minimum
    #[serde(with = "amount_serde")]
    pub min_amount_out: RawAmount,
    pub status: PreviewStatus,
}

impl SwapPreview {
    fn missing() -> Self {
        Self {
            amount_in: RawAmount::zero(),
            amount_out: RawAmount::zero(),
            min_amount_out: RawAmount::zero(),
            status: PreviewStatus::MissingLiquidityOrInput,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == PreviewStatus::Ready
    }
}

/// Preview calculator bound to a fee schedule
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapPreviewer {
    math: V2Math,
}

impl SwapPreviewer {
    pub fn new(math: V2Math) -> Self {
        Self { math }
    }

    /// Compute the complementary amount and guard for `amount`
    ///
    /// A zero amount counts as absent. Fails only with
    /// [`AmmError::InsufficientLiquidity`](crate::AmmError::InsufficientLiquidity)
    /// when a reverse preview asks for the whole output reserve or more.
    pub fn preview(
        &self,
        mode: PreviewMode,
        amount: Option<&RawAmount>,
        reserves: &ReservePair,
        slippage: SlippageTolerance,
    ) -> Result<SwapPreview> {
        let amount = match amount {
            Some(amount) if !amount.is_zero() && reserves.is_tradable() => amount,
            _ => return Ok(SwapPreview::missing()),
        };

        match mode {
            PreviewMode::Forward => {
                let amount_out = self
                    .math
                    .get_amount_out(amount, &reserves.reserve_in, &reserves.reserve_out);
                Ok(SwapPreview {
                    amount_in: amount.clone(),
                    min_amount_out: slippage.min_amount(&amount_out),
                    amount_out,
                    status: PreviewStatus::Ready,
                })
            }
            PreviewMode::Reverse => {
                let amount_in = self
                    .math
                    .get_amount_in(amount, &reserves.reserve_in, &reserves.reserve_out)?;
                Ok(SwapPreview {
                    amount_in,
                    amount_out: amount.clone(),
                    min_amount_out: RawAmount::zero(),
                    status: PreviewStatus::Ready,
                })
            }
        }
    }
}

/// [`SwapPreviewer::preview`] under the standard 0.3% fee
pub fn swap_preview(
    mode: PreviewMode,
    amount: Option<&RawAmount>,
    reserves: &ReservePair,
    slippage: SlippageTolerance,
) -> Result<SwapPreview> {
    SwapPreviewer::default().preview(mode, amount, reserves, slippage)
}
