//! Quote engine over a loaded snapshot
//!
//! Each command resolves its tokens against the snapshot, converts human
//! amounts with the token decimals, runs the AMM library and returns a
//! serializable report. Nothing here talks to a chain.

use crate::cli::{AddLiquidityArgs, RemoveLiquidityArgs, RouteArgs, SwapArgs};
use crate::snapshot::resolve_token;
use amm::display::{exchange_rate, usd_paired_amount};
use amm::{
    best_path, companion_amount, needs_approval, plan_deposit, plan_swap, plan_withdrawal,
    tradable_counterparties, CompanionAmount, DepositDecision, LpPosition, Path, PreviewMode,
    SlippageBand, SlippageTolerance, SwapCall, SwapPreviewer, V2Math, WithdrawalPlan,
};
use amm_config::AmmConfig;
use anyhow::{bail, ensure, Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};
use types::{
    amount_serde, find_pool, format_units, parse_units, PoolSnapshot, RawAmount, TokenId,
    TokenInfo,
};

/// An amount with its raw and human forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountView {
    #[serde(with = "amount_serde")]
    pub raw: RawAmount,
    pub formatted: String,
    pub symbol: String,
}

impl AmountView {
    fn new(raw: RawAmount, token: &TokenInfo) -> Self {
        Self {
            formatted: format_units(&raw, token.decimals),
            symbol: token.symbol.clone(),
            raw,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapReport {
    pub mode: PreviewMode,
    pub path: Path,
    pub amount_in: AmountView,
    pub amount_out: AmountView,
    /// Output guard for the router call
    pub min_amount_out: AmountView,
    pub slippage_bps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage_warning: Option<String>,
    /// Spot rate of a direct pool, output units per input unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    pub call: SwapCall,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub from: TokenInfo,
    pub to: TokenInfo,
    pub path: Option<Path>,
    /// Tokens directly tradable against `from`
    pub counterparties: Vec<TokenInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalStatus {
    pub token: TokenId,
    pub needs_approval: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositReport {
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    /// Amounts as entered or derived, before ratio validation
    pub amount0_desired: AmountView,
    pub amount1_desired: AmountView,
    pub decision: DepositDecision,
    pub slippage_bps: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approvals: Vec<ApprovalStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalReport {
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    pub position: LpPosition,
    pub share_percent: Decimal,
    pub plan: WithdrawalPlan,
    pub amount0_expected: AmountView,
    pub amount1_expected: AmountView,
    pub slippage_bps: u32,
}

/// Pools plus the engine settings they are quoted under
pub struct Quoter {
    pools: Vec<PoolSnapshot>,
    math: V2Math,
    default_slippage: SlippageTolerance,
    band: SlippageBand,
}

impl Quoter {
    pub fn new(pools: Vec<PoolSnapshot>, config: &AmmConfig) -> Result<Self> {
        Ok(Self {
            pools,
            math: V2Math::new(config.fee_schedule()?),
            default_slippage: config.default_slippage()?,
            band: config.slippage_band(),
        })
    }

    fn slippage(&self, bps: Option<u32>) -> Result<SlippageTolerance> {
        let tolerance = match bps {
            Some(bps) => SlippageTolerance::from_bps(bps)?,
            None => self.default_slippage,
        };
        if let Some(warning) = self.band.classify(tolerance) {
            warn!(bps = tolerance.bps(), "{}", warning);
        }
        Ok(tolerance)
    }

    fn pool_for(&self, a: &TokenInfo, b: &TokenInfo) -> Result<&PoolSnapshot> {
        find_pool(&self.pools, &a.address, &b.address)
            .with_context(|| format!("No pool for {} / {}", a.address, b.address))
    }

    pub fn swap(&self, args: &SwapArgs) -> Result<SwapReport> {
        let token_in = resolve_token(&self.pools, &args.token_in)?;
        let token_out = resolve_token(&self.pools, &args.token_out)?;
        ensure!(token_in.address != token_out.address, "Cannot swap a token for itself");

        let slippage = self.slippage(args.slippage_bps)?;
        let path = best_path(&self.pools, Some(&token_in.address), Some(&token_out.address))
            .with_context(|| format!("No route from {} to {}", args.token_in, args.token_out))?;
        debug!(hops = path.hops(), "Route selected");

        let rate = if path.is_direct() {
            find_pool(&self.pools, &token_in.address, &token_out.address)
                .and_then(|pool| pool.oriented(&token_in.address))
                .and_then(|reserves| exchange_rate(&reserves, token_in.decimals, token_out.decimals))
        } else {
            None
        };

        let (mode, amount_in, amount_out, min_amount_out, call) =
            match (&args.amount_in, &args.amount_out) {
                (Some(amount), _) => {
                    let amount_in = parse_units(amount, token_in.decimals)
                        .with_context(|| format!("Invalid --amount-in '{}'", amount))?;
                    let plan = plan_swap(&self.math, &self.pools, path.clone(), &amount_in, slippage)?;
                    let amount_out = plan.amount_out().clone();
                    (PreviewMode::Forward, amount_in, amount_out, plan.min_amount_out, plan.call)
                }
                (None, Some(amount)) => {
                    ensure!(
                        path.is_direct(),
                        "Exact-output quotes need a direct pool between {} and {}",
                        args.token_in,
                        args.token_out
                    );
                    let amount_out = parse_units(amount, token_out.decimals)
                        .with_context(|| format!("Invalid --amount-out '{}'", amount))?;
                    let reserves = self
                        .pool_for(&token_in, &token_out)?
                        .oriented(&token_in.address)
                        .context("Pool does not hold the input token")?;

                    let preview = SwapPreviewer::new(self.math).preview(
                        PreviewMode::Reverse,
                        Some(&amount_out),
                        &reserves,
                        slippage,
                    )?;
                    ensure!(preview.is_ready(), "Pool has no liquidity or amount is zero");

                    // the requested output is itself the router's minimum
                    let call = SwapCall::Direct {
                        token_in: token_in.address.clone(),
                        token_out: token_out.address.clone(),
                        amount_in: preview.amount_in.clone(),
                        min_amount_out: amount_out.clone(),
                    };
                    (PreviewMode::Reverse, preview.amount_in, amount_out.clone(), amount_out, call)
                }
                (None, None) => bail!("Either --amount-in or --amount-out is required"),
            };

        info!(
            token_in = %token_in.address,
            token_out = %token_out.address,
            amount_in = %amount_in,
            amount_out = %amount_out,
            "Swap quoted"
        );

        Ok(SwapReport {
            mode,
            path,
            amount_in: AmountView::new(amount_in, &token_in),
            amount_out: AmountView::new(amount_out, &token_out),
            min_amount_out: AmountView::new(min_amount_out, &token_out),
            slippage_bps: slippage.bps(),
            slippage_warning: self.band.classify(slippage).map(|w| w.to_string()),
            exchange_rate: rate,
            call,
        })
    }

    pub fn route(&self, args: &RouteArgs) -> Result<RouteReport> {
        let from = resolve_token(&self.pools, &args.from)?;
        let to = resolve_token(&self.pools, &args.to)?;

        let path = best_path(&self.pools, Some(&from.address), Some(&to.address));
        match &path {
            Some(path) => info!(hops = path.hops(), "Route found"),
            None => warn!("No route from {} to {}", from.address, to.address),
        }

        Ok(RouteReport {
            counterparties: tradable_counterparties(&self.pools, &from.address),
            from,
            to,
            path,
        })
    }

    pub fn add_liquidity(&self, args: &AddLiquidityArgs) -> Result<DepositReport> {
        let token_a = resolve_token(&self.pools, &args.token_a)?;
        let token_b = resolve_token(&self.pools, &args.token_b)?;
        let pool = self.pool_for(&token_a, &token_b)?;
        let reserves = pool
            .oriented(&token_a.address)
            .context("Pool does not hold token A")?;
        let slippage = self.slippage(args.slippage_bps)?;

        let amount_a = parse_units(&args.amount_a, token_a.decimals)
            .with_context(|| format!("Invalid --amount-a '{}'", args.amount_a))?;
        let amount_b = match &args.amount_b {
            Some(amount) => parse_units(amount, token_b.decimals)
                .with_context(|| format!("Invalid --amount-b '{}'", amount))?,
            None => self.paired_amount(args, &amount_a, &token_a, &token_b, &reserves.reserve_in, &reserves.reserve_out)?,
        };

        let a_is_token0 = pool.token0 == token_a.address;
        let (token0, token1, amount0, amount1) = if a_is_token0 {
            (token_a, token_b, amount_a, amount_b)
        } else {
            (token_b, token_a, amount_b, amount_a)
        };

        let decision = plan_deposit(&amount0, &amount1, &pool.reserve0, &pool.reserve1, slippage);
        match &decision {
            DepositDecision::Exact(_) => info!("Deposit matches the pool ratio"),
            DepositDecision::Adjusted(plan) => info!(
                amount0 = %plan.amount0,
                amount1 = %plan.amount1,
                "Deposit adjusted to the pool ratio"
            ),
            DepositDecision::Imbalanced => warn!("Deposit too imbalanced for the slippage tolerance"),
        }

        let mut approvals = Vec::new();
        let allowances = if a_is_token0 {
            [&args.allowance_a, &args.allowance_b]
        } else {
            [&args.allowance_b, &args.allowance_a]
        };
        if let Some(plan) = decision.plan() {
            for ((allowance, token), required) in allowances
                .into_iter()
                .zip([&token0, &token1])
                .zip([&plan.amount0, &plan.amount1])
            {
                if let Some(allowance) = allowance {
                    let allowance = parse_units(allowance, token.decimals)
                        .with_context(|| format!("Invalid allowance '{}'", allowance))?;
                    approvals.push(ApprovalStatus {
                        token: token.address.clone(),
                        needs_approval: needs_approval(&allowance, required),
                    });
                }
            }
        }

        Ok(DepositReport {
            amount0_desired: AmountView::new(amount0, &token0),
            amount1_desired: AmountView::new(amount1, &token1),
            token0,
            token1,
            decision,
            slippage_bps: slippage.bps(),
            approvals,
        })
    }

    /// Token B amount when only token A was entered
    fn paired_amount(
        &self,
        args: &AddLiquidityArgs,
        amount_a: &RawAmount,
        token_a: &TokenInfo,
        token_b: &TokenInfo,
        reserve_a: &RawAmount,
        reserve_b: &RawAmount,
    ) -> Result<RawAmount> {
        match companion_amount(amount_a, reserve_a, reserve_b) {
            CompanionAmount::Amount { amount } => Ok(amount),
            CompanionAmount::InsufficientLiquidity => {
                bail!("Amount {} is too small to pair at the current ratio", args.amount_a)
            }
            CompanionAmount::FreeRatio => match (args.price_a, args.price_b) {
                (Some(price_a), Some(price_b)) => {
                    debug!(%price_a, %price_b, "Pairing empty pool from USD prices");
                    usd_paired_amount(amount_a, token_a.decimals, price_a, token_b.decimals, price_b)
                        .context("USD prices must be positive")
                }
                _ => bail!("Pool is empty: pass --amount-b or both --price-a and --price-b"),
            },
        }
    }

    pub fn remove_liquidity(&self, args: &RemoveLiquidityArgs) -> Result<WithdrawalReport> {
        let token_a = resolve_token(&self.pools, &args.token_a)?;
        let token_b = resolve_token(&self.pools, &args.token_b)?;
        let pool = self.pool_for(&token_a, &token_b)?;
        let slippage = self.slippage(args.slippage_bps)?;

        let liquidity = parse_units(&args.liquidity, pool.lp_decimals)
            .with_context(|| format!("Invalid --liquidity '{}'", args.liquidity))?;
        let balance = parse_units(&args.balance, pool.lp_decimals)
            .with_context(|| format!("Invalid --balance '{}'", args.balance))?;

        let position = LpPosition::new(pool, balance.clone());
        let plan = plan_withdrawal(pool, &liquidity, &balance, slippage)?;

        let token0 = pool
            .token_info(&pool.token0)
            .context("Pool is missing token0 metadata")?;
        let token1 = pool
            .token_info(&pool.token1)
            .context("Pool is missing token1 metadata")?;

        info!(
            liquidity = %plan.liquidity,
            share_ppm = position.share_ppm,
            "Withdrawal planned"
        );

        Ok(WithdrawalReport {
            amount0_expected: AmountView::new(plan.amount0_expected.clone(), &token0),
            amount1_expected: AmountView::new(plan.amount1_expected.clone(), &token1),
            share_percent: position.share_percent(),
            token0,
            token1,
            position,
            plan,
            slippage_bps: slippage.bps(),
        })
    }
}
