//! Pool snapshot loading and token lookup

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use types::{PoolSnapshot, TokenInfo};

/// Read a JSON array of pool snapshots
pub fn load_pools(path: &Path) -> Result<Vec<PoolSnapshot>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pool snapshot {:?}", path))?;
    let pools: Vec<PoolSnapshot> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse pool snapshot {:?}", path))?;

    let empty = pools.iter().filter(|pool| !pool.has_liquidity()).count();
    info!("Loaded {} pools from {:?}", pools.len(), path);
    if empty > 0 {
        debug!(empty, "Pools without liquidity on both sides");
    }
    Ok(pools)
}

/// Resolve a token by address or symbol, case-insensitively
pub fn resolve_token(pools: &[PoolSnapshot], query: &str) -> Result<TokenInfo> {
    let wanted = query.trim();
    let found = pools
        .iter()
        .flat_map(|pool| [pool.token_info(&pool.token0), pool.token_info(&pool.token1)])
        .flatten()
        .find(|info| {
            info.address.as_str().eq_ignore_ascii_case(wanted)
                || (!info.symbol.is_empty() && info.symbol.eq_ignore_ascii_case(wanted))
        });

    match found {
        Some(info) => Ok(info),
        None => bail!("Token '{}' not found in pool snapshot", query),
    }
}
