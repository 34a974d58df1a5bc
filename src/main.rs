use anyhow::Context;
use clap::Parser;
use helplane_sdk::config::AppConfig;
use helplane_sdk::{HelpLane, HttpSurface, PresentationStyle};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Serve the HelpLane chat widget locally in embedded mode.
#[derive(Debug, Parser)]
#[command(name = "helplane-sdk", version)]
struct Cli {
    /// Address to listen on (overrides BIND_ADDR).
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Brand token (overrides HELPLANE_BRAND_TOKEN).
    #[arg(long)]
    brand_token: Option<String>,
    /// API base URL (overrides HELPLANE_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,
    /// Presentation style (overrides HELPLANE_STYLE).
    #[arg(long)]
    style: Option<PresentationStyle>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if cli.brand_token.is_some() {
        config.brand_token = cli.brand_token;
    }
    if cli.base_url.is_some() {
        config.base_url = cli.base_url;
    }
    if let Some(style) = cli.style {
        config.style = style;
    }

    let brand_token = config
        .brand_token
        .clone()
        .context("a brand token is required (HELPLANE_BRAND_TOKEN or --brand-token)")?;

    let mut sdk = HelpLane::new();
    sdk.configure(brand_token, config.base_url.clone());
    if let Some(user) = config.user.clone() {
        sdk.identify(user);
    }

    let surface = HttpSurface::new();
    sdk.show(&surface, Some(config.style)).await?;

    tracing::info!(addr = %config.bind_addr, base_url = %sdk.base_url(), "starting helplane chat preview");
    helplane_sdk::server::run(config.bind_addr, surface).await?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
