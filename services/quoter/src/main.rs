use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use amm_config::AmmConfig;
use quoter::cli::{Args, Command};
use quoter::{load_pools, Quoter};

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quoter=info".parse()?),
        )
        .init();

    info!("Config file: {:?}", args.config);
    info!("Environment: {:?}", args.environment.as_deref().unwrap_or("default"));

    let config = AmmConfig::load(args.config.as_deref(), args.environment.as_deref())
        .context("Failed to load configuration")?;

    let output = match &args.command {
        Command::Config => config.to_toml_string()?,
        command => {
            let quoter = build_quoter(&args, &config)?;
            render(&quoter, command)?
        }
    };
    println!("{}", output);

    Ok(())
}

fn build_quoter(args: &Args, config: &AmmConfig) -> Result<Quoter> {
    let pools_path = args
        .pools
        .clone()
        .or_else(|| config.snapshot_path())
        .context("No pool snapshot given: pass --pools or set [snapshot] path")?;
    let pools = load_pools(&pools_path)?;
    Quoter::new(pools, config)
}

fn render(quoter: &Quoter, command: &Command) -> Result<String> {
    let json = match command {
        Command::Swap(swap) => serde_json::to_string_pretty(&quoter.swap(swap)?)?,
        Command::Route(route) => serde_json::to_string_pretty(&quoter.route(route)?)?,
        Command::AddLiquidity(add) => serde_json::to_string_pretty(&quoter.add_liquidity(add)?)?,
        Command::RemoveLiquidity(remove) => {
            serde_json::to_string_pretty(&quoter.remove_liquidity(remove)?)?
        }
        Command::Config => String::new(),
    };
    Ok(json)
}
