//! Default values and locations
//!
//! Loader paths and the built-in engine settings used when a value is
//! absent from every configuration source.

/// Where configuration files are looked up
pub mod paths {
    /// Base configuration file, relative to the working directory
    pub const BASE_CONFIG: &str = "config/amm.toml";

    /// Directory holding `<environment>.toml` overlays
    pub const ENVIRONMENTS_DIR: &str = "config/environments";

    /// Prefix for environment variable overrides, e.g. `AMM_PRICING__FEE_NUMERATOR`
    pub const ENV_PREFIX: &str = "AMM";

    /// Separator between nested keys in environment variable names
    pub const ENV_SEPARATOR: &str = "__";
}

/// Constant-product fee: 997/1000 keeps 99.7% of the input
pub mod pricing {
    pub const FEE_NUMERATOR: u32 = 997;
    pub const FEE_DENOMINATOR: u32 = 1_000;
}

/// Slippage tolerance and warning band, in basis points
pub mod slippage {
    pub const DEFAULT_BPS: u32 = 50;
    pub const WARN_LOW_BPS: u32 = 10;
    pub const WARN_HIGH_BPS: u32 = 500;
    pub const MAX_CUSTOM_BPS: u32 = 1_000;
}
