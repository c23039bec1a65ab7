//! Quoter Service
//!
//! Offline previews for a constant-product DEX: reads a pool snapshot file,
//! answers swap, route and liquidity questions with the AMM library, and
//! prints the resulting router arguments as JSON.
//!
//! Architecture:
//! Snapshot file → THIS SERVICE → JSON report (stdout)
//!   (reserves)     (amm engine)    (router call args)

pub mod cli;
pub mod quoter;
pub mod snapshot;

pub use quoter::{AmountView, Quoter};
pub use snapshot::{load_pools, resolve_token};
