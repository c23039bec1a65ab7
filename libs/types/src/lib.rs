//! # Pool and Amount Types
//!
//! Plain-data vocabulary shared by the AMM engine and the services that feed
//! it: raw integer amounts, case-insensitive token identities, and canonical
//! pool snapshots.
//!
//! ## Design Rules
//!
//! - **Integer amounts only**: [`RawAmount`] is an unsigned big integer in the
//!   token's smallest unit; decimals are metadata for display
//! - **Canonical orientation**: a [`PoolSnapshot`] always has `token0 < token1`
//!   and carries reserves, decimals and symbols with their token
//! - **No I/O**: snapshots are produced by the chain-reading layer and handed in
//!   by value
//!
//! ## Example
//!
//! ```rust
//! use types::{parse_units, reserves_for_tokens, PoolSide, PoolSnapshot, TokenId};
//!
//! let weth: TokenId = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".parse()?;
//! let usdc: TokenId = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse()?;
//!
//! let pool = PoolSnapshot::new(
//!     PoolSide::new(weth.clone(), parse_units("100", 18)?),
//!     PoolSide::new(usdc.clone(), parse_units("350000", 6)?).with_decimals(6),
//! )?;
//!
//! let reserves = reserves_for_tokens(&[pool], Some(&weth), Some(&usdc)).unwrap();
//! assert_eq!(reserves.reserve_in, parse_units("100", 18)?);
//! # Ok::<(), types::TypesError>(())
//! ```

pub mod amount;
pub mod errors;
pub mod pool;
pub mod token;
pub mod units;

pub use amount::{amount_serde, parse_raw, RawAmount};
pub use errors::TypesError;
pub use pool::{find_pool, reserves_for_tokens, PoolSide, PoolSnapshot, ReservePair};
pub use token::{TokenId, TokenInfo};
pub use units::{format_units, parse_units, scale};
