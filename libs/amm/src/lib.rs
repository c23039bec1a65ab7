//! # AMM Library - Constant-Product Pool Mathematics
//!
//! ## Purpose
//!
//! Exact integer mathematics for two-token constant-product pools: swap pricing
//! in both directions, slippage floors, proportional deposits and withdrawals,
//! and shortest-hop routing across a set of pool snapshots. Every amount that
//! could end up in a transaction is a [`RawAmount`] in the token's smallest unit
//! and every division floors.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`PoolSnapshot`] lists supplied by an external reader
//! - **Output Destinations**: Quote previews, deposit/withdrawal plans, swap call plans
//! - **Precision**: Arbitrary-precision integers, no floating point on any transactional path
//! - **Display**: [`display`] converts to [`Decimal`] for rendering only
//!
//! ## Architecture Role
//!
//! ```text
//! PoolSnapshot[] ──► routing::best_path ──► swap_plan::plan_swap ──► SwapCall
//!        │                                        │
//!        └──► liquidity / deposit / position      └──► v2_math + slippage
//! ```
//!
//! The crate performs no I/O and no logging; callers own both.
//!
//! ## Examples
//!
//! ```
//! use amm::{get_amount_out, min_amount_after_slippage, SlippageTolerance};
//! use amm::RawAmount;
//!
//! let out = get_amount_out(
//!     &RawAmount::from(100u32),
//!     &RawAmount::from(1000u32),
//!     &RawAmount::from(2000u32),
//! );
//! assert_eq!(out, RawAmount::from(181u32));
//!
//! let floor = min_amount_after_slippage(&out, SlippageTolerance::from_bps(50).unwrap());
//! assert_eq!(floor, RawAmount::from(180u32));
//! ```

pub mod deposit;
pub mod display;
pub mod error;
pub mod liquidity;
pub mod pool_traits;
pub mod position;
pub mod preview;
pub mod routing;
pub mod slippage;
pub mod swap_plan;
pub mod v2_math;

pub use deposit::{needs_approval, plan_deposit, DepositDecision, DepositPlan};
pub use error::{AmmError, Result};
pub use liquidity::{calculate_optimal_amounts, companion_amount, quote, CompanionAmount};
pub use pool_traits::{AmmPool, PoolPair};
pub use position::{plan_withdrawal, LpPosition, WithdrawalPlan};
pub use preview::{swap_preview, PreviewMode, PreviewStatus, SwapPreview, SwapPreviewer};
pub use routing::{best_path, tradable_counterparties, Path, PoolGraph};
pub use slippage::{
    min_amount_after_slippage, SlippageBand, SlippageTolerance, SlippageWarning,
    DEFAULT_SLIPPAGE_BPS,
};
pub use swap_plan::{amounts_out, plan_swap, SwapCall, SwapPlan};
pub use v2_math::{get_amount_in, get_amount_out, FeeSchedule, V2Math, V2PoolState};

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
pub use types::{PoolSnapshot, RawAmount, ReservePair, TokenId};
