//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the dexscout scanner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::dexscreener::DexClient;
use crate::adapters::telegram::TelegramNotifier;
use crate::application::discovery::{DiscoveryMonitor, MonitorConfig};
use crate::config::{load_config, Config};
use crate::domain::filter::{TokenFilter, Verdict};
use crate::domain::scoring::PotentialScorer;
use crate::domain::seen::Feed;
use crate::domain::snapshot::select_best_pool;
use crate::ports::notifier::{ConsoleNotifier, Notifier};

/// Dexscout - DexScreener Early-Momentum Token Scanner
#[derive(Parser, Debug)]
#[command(
    name = "dexscout",
    version = env!("CARGO_PKG_VERSION"),
    about = "DexScreener early-momentum token scanner",
    long_about = "Dexscout polls the DexScreener boosted and latest-listing feeds, \
                  filters each candidate through liquidity/volume/momentum gates, \
                  scores the survivors, and pushes alerts to Telegram."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the discovery loop
    Run(RunCmd),

    /// Run a single discovery cycle with console alerts
    Scan(ScanCmd),

    /// Look up one token and print its filter verdict and score
    Check(CheckCmd),
}

/// Start the discovery loop
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Print alerts to the console instead of delivering them
    #[arg(long)]
    pub dry_run: bool,
}

/// Run a single discovery cycle
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Check one token against the filter and scorer
#[derive(Parser, Debug)]
pub struct CheckCmd {
    /// Chain identifier (e.g. solana, base)
    #[arg(value_name = "CHAIN")]
    pub chain: String,

    /// Token contract address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Path to configuration file; defaults apply when the file is absent
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Scan(cmd) => scan_command(cmd).await,
        Command::Check(cmd) => check_command(cmd).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}

/// Expand `~` in the config path and load the file
fn load_config_expanded(path: &Path) -> Result<Config> {
    let expanded = shellexpand::tilde(&path.display().to_string()).to_string();
    load_config(&expanded)
        .with_context(|| format!("Failed to load configuration from {expanded}"))
}

/// Build the configured discovery monitor
fn build_monitor(config: &Config, notifier: Arc<dyn Notifier>) -> Result<DiscoveryMonitor> {
    let client = DexClient::new(config.feed_endpoints())
        .context("Failed to create DexScreener client")?;

    Ok(DiscoveryMonitor::new(
        MonitorConfig::from(config),
        client,
        TokenFilter::new(config.filter_config()),
        PotentialScorer::new(config.scoring_config()),
        notifier,
    ))
}

/// Pick the notifier: Telegram when enabled, console otherwise
fn build_notifier(config: &Config, dry_run: bool) -> Result<Arc<dyn Notifier>> {
    if dry_run || !config.telegram.enabled {
        return Ok(Arc::new(ConsoleNotifier));
    }

    let bot_token = config
        .telegram
        .get_bot_token()
        .context("telegram.bot_token is not set (config or TELEGRAM_BOT_TOKEN)")?;
    let chat_id = config
        .telegram
        .get_chat_id()
        .context("telegram.chat_id is not set (config or TELEGRAM_CHAT_ID)")?;

    let notifier = TelegramNotifier::new(bot_token, chat_id)
        .context("Failed to create Telegram notifier")?;
    Ok(Arc::new(notifier))
}

/// Handle run command
async fn run_command(cmd: RunCmd) -> Result<()> {
    tracing::info!("Starting dexscout...");

    let config = load_config_expanded(&cmd.config)?;
    let notifier = build_notifier(&config, cmd.dry_run)?;
    let monitor = Arc::new(build_monitor(&config, notifier)?);

    // Ctrl+C requests a graceful stop at the next cycle boundary
    let handle = monitor.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        handle.stop().await;
    });

    if cmd.dry_run {
        tracing::warn!("DRY RUN mode - alerts go to the console");
    }

    monitor.run().await;
    tracing::info!("dexscout stopped");
    Ok(())
}

/// Handle scan command
async fn scan_command(cmd: ScanCmd) -> Result<()> {
    let config = load_config_expanded(&cmd.config)?;
    let monitor = build_monitor(&config, Arc::new(ConsoleNotifier))?;

    tracing::info!("Running a single discovery cycle");
    monitor.run_cycle().await;

    println!(
        "Cycle complete: {} boosted token(s) handled, {} listing(s) announced",
        monitor.seen_count(Feed::Boosted).await,
        monitor.seen_count(Feed::Latest).await
    );

    Ok(())
}

/// Handle check command
async fn check_command(cmd: CheckCmd) -> Result<()> {
    let expanded = shellexpand::tilde(&cmd.config.display().to_string()).to_string();
    let config = if Path::new(&expanded).exists() {
        load_config(&expanded)
            .with_context(|| format!("Failed to load configuration from {expanded}"))?
    } else {
        tracing::warn!("Config file {} not found, using defaults", expanded);
        Config::default()
    };

    let client = DexClient::new(config.feed_endpoints())
        .context("Failed to create DexScreener client")?;
    let filter = TokenFilter::new(config.filter_config());
    let scorer = PotentialScorer::new(config.scoring_config());

    let pools = client
        .token_pools(&cmd.chain, &cmd.address)
        .await
        .context("Pool lookup failed")?;

    let Some(best) = select_best_pool(&pools) else {
        println!("No pools found for {} on {}", cmd.address, cmd.chain);
        return Ok(());
    };

    println!(
        "Best pool for {} ({}) on {}:",
        if best.base_token.name.is_empty() { "Unknown" } else { best.base_token.name.as_str() },
        if best.base_token.symbol.is_empty() { "N/A" } else { best.base_token.symbol.as_str() },
        cmd.chain
    );
    println!("  Liquidity:        ${:.0}", best.liquidity.usd);
    println!("  24h volume:       ${:.0}", best.volume.h24);
    println!("  24h price change: {:.2}%", best.price_change.h24);
    println!("  5m price change:  {:.2}%", best.price_change.m5);
    println!(
        "  24h txns:         {} buys / {} sells",
        best.txns.h24.buys, best.txns.h24.sells
    );

    match filter.evaluate(best) {
        Verdict::Pass => println!("  Filter:           PASS"),
        Verdict::Rejected(reason) => println!("  Filter:           REJECTED ({reason})"),
    }
    println!(
        "  Score:            {:.2} (alert threshold {:.2})",
        scorer.score(best),
        config.scoring.score_threshold
    );

    Ok(())
}
