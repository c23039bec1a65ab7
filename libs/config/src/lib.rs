//! # AMM Engine Configuration
//!
//! Fee schedule, slippage defaults and the snapshot location for the AMM
//! libraries and the quoter service.
//!
//! ## Sources
//!
//! 1. Base file, `config/amm.toml` unless another path is given
//! 2. Environment overlay, `config/environments/<env>.toml`
//! 3. Environment variables, `AMM_<SECTION>__<KEY>`
//!
//! ## Usage
//!
//! ```rust
//! use amm_config::AmmConfig;
//!
//! let config = AmmConfig::default();
//! assert_eq!(config.pricing.fee_numerator, 997);
//! assert_eq!(config.default_slippage().unwrap().bps(), 50);
//! ```

pub mod defaults;
pub mod settings;

// Re-export commonly used types
pub use settings::{
    load_config, AmmConfig, ConfigSources, PricingConfig, SlippageConfig, SnapshotConfig,
};
