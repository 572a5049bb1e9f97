//! Dexscout - DexScreener Early-Momentum Token Scanner
//!
//! Thin binary entry point: load the environment, parse the CLI, dispatch.

use anyhow::Result;

use dexscout::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
