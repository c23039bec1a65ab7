//! Command-line arguments

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quoter")]
#[command(about = "Swap, route and liquidity previews over a pool snapshot")]
pub struct Args {
    /// Configuration file path (defaults to config/amm.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Environment (development, staging, production)
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Pool snapshot JSON file; overrides [snapshot] path
    #[arg(long, global = true)]
    pub pools: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Quote a swap and build the router call
    Swap(SwapArgs),
    /// Fewest-hop route between two tokens
    Route(RouteArgs),
    /// Validate a two-sided deposit against the pool ratio
    AddLiquidity(AddLiquidityArgs),
    /// Plan burning LP tokens
    RemoveLiquidity(RemoveLiquidityArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Tokens are given by address or symbol; amounts in whole-token units
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SwapArgs {
    #[arg(long)]
    pub token_in: String,

    #[arg(long)]
    pub token_out: String,

    /// Exact input amount
    #[arg(long, conflicts_with = "amount_out", required_unless_present = "amount_out")]
    pub amount_in: Option<String>,

    /// Exact output amount (direct pools only)
    #[arg(long)]
    pub amount_out: Option<String>,

    /// Slippage tolerance in basis points
    #[arg(long)]
    pub slippage_bps: Option<u32>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RouteArgs {
    #[arg(long)]
    pub from: String,

    #[arg(long)]
    pub to: String,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AddLiquidityArgs {
    #[arg(long)]
    pub token_a: String,

    #[arg(long)]
    pub token_b: String,

    #[arg(long)]
    pub amount_a: String,

    /// Paired amount; derived from the pool ratio when omitted
    #[arg(long)]
    pub amount_b: Option<String>,

    /// USD price of token A, used to pair amounts for an empty pool
    #[arg(long, requires = "price_b")]
    pub price_a: Option<Decimal>,

    /// USD price of token B
    #[arg(long, requires = "price_a")]
    pub price_b: Option<Decimal>,

    /// Current router allowance for token A
    #[arg(long)]
    pub allowance_a: Option<String>,

    /// Current router allowance for token B
    #[arg(long)]
    pub allowance_b: Option<String>,

    #[arg(long)]
    pub slippage_bps: Option<u32>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RemoveLiquidityArgs {
    #[arg(long)]
    pub token_a: String,

    #[arg(long)]
    pub token_b: String,

    /// LP tokens to burn
    #[arg(long)]
    pub liquidity: String,

    /// LP tokens held
    #[arg(long)]
    pub balance: String,

    #[arg(long)]
    pub slippage_bps: Option<u32>,
}
