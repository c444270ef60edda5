//! Research service entry point
//!
//! Builds the real collaborators from environment configuration and
//! injects them into the runner and HTTP server. All client lifecycles
//! are owned here, at startup; nothing is lazily initialized on first
//! use.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;

use research::core::runner::ResearchRunner;
use research::services::{
    PerplexityClient, RealCasinoDiscovery, RealOffersSource, RealPromotionResearch, RealRunStore,
};
use research::ResearchConfig;
use webserver::{ResearchServer, ServerError, ServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Casino promotion research HTTP service")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    shared::logging::init_tracing_with_level(Some(&args.log_level));

    let config = ResearchConfig::from_env()?;
    let cron_key = std::env::var("CRON_SECRET_KEY").unwrap_or_default();
    if cron_key.is_empty() {
        warn!("CRON_SECRET_KEY is not set; the scheduled endpoint stays locked");
    }

    let perplexity = PerplexityClient::new(
        config.perplexity_api_url.clone(),
        config.perplexity_api_key.clone(),
        config.perplexity_model.clone(),
    );

    let offers = Arc::new(RealOffersSource::new(config.offers_api_url.clone())?);
    let discovery = Arc::new(RealCasinoDiscovery::new(perplexity.clone()));
    let promotions = Arc::new(RealPromotionResearch::new(perplexity));
    let store = Arc::new(RealRunStore::new(
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
    ));

    let runner = Arc::new(ResearchRunner::new(
        offers,
        discovery,
        promotions,
        store.clone(),
        config.jurisdictions.clone(),
    ));

    let bind_address: SocketAddr = format!("0.0.0.0:{}", args.port)
        .parse()
        .map_err(|e| ServerError::ConfigError {
            message: format!("invalid port: {e}"),
        })?;

    let server = ResearchServer::new(bind_address, runner, store, cron_key);
    server.run().await
}
