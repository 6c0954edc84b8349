use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod gateway;
mod mcp;
mod resources;
mod tools;

use error::Result;

#[derive(Parser)]
#[command(
    name = "storegate-mcp",
    about = "Model Context Protocol server exposing commerce microservices as tools",
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// Enable debug logging
    #[arg(long, short)]
    debug: bool,

    /// Path to the gateway config file (defaults to ~/.storegate/config.json)
    #[arg(long, env = "STOREGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the RPC request timeout in seconds
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Override the customer service endpoint
    #[arg(long, env = "STOREGATE_CUSTOMER_ENDPOINT")]
    customer_endpoint: Option<String>,

    /// Override the product catalog service endpoint
    #[arg(long, env = "STOREGATE_CATALOG_ENDPOINT")]
    catalog_endpoint: Option<String>,

    /// Override the inventory service endpoint
    #[arg(long, env = "STOREGATE_INVENTORY_ENDPOINT")]
    inventory_endpoint: Option<String>,

    /// Override the reference data service endpoint
    #[arg(long, env = "STOREGATE_REFDATA_ENDPOINT")]
    refdata_endpoint: Option<String>,

    /// Override the review service endpoint
    #[arg(long, env = "STOREGATE_REVIEWS_ENDPOINT")]
    reviews_endpoint: Option<String>,

    /// Override the storefront service endpoint
    #[arg(long, env = "STOREGATE_STORE_ENDPOINT")]
    store_endpoint: Option<String>,

    /// Override the Telegram bot service endpoint
    #[arg(long, env = "STOREGATE_TELEGRAM_ENDPOINT")]
    telegram_endpoint: Option<String>,
}

/// Layer command-line overrides on top of the loaded config.
fn apply_overrides(config: &mut config::GatewayConfig, args: &Args) {
    if let Some(timeout) = args.request_timeout_secs {
        config.request_timeout_secs = timeout;
    }

    let endpoints = &mut config.endpoints;
    let overrides = [
        (&args.customer_endpoint, &mut endpoints.customer),
        (&args.catalog_endpoint, &mut endpoints.catalog),
        (&args.inventory_endpoint, &mut endpoints.inventory),
        (&args.refdata_endpoint, &mut endpoints.refdata),
        (&args.reviews_endpoint, &mut endpoints.reviews),
        (&args.store_endpoint, &mut endpoints.store),
        (&args.telegram_endpoint, &mut endpoints.telegram),
    ];
    for (arg, endpoint) in overrides {
        if let Some(url) = arg {
            *endpoint = url.clone();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("storegate_mcp={},storegate_rpc=info", level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storegate-mcp server v{}", env!("CARGO_PKG_VERSION"));

    let mut gateway_config = config::GatewayConfig::load_or_default(args.config.as_deref())?;
    apply_overrides(&mut gateway_config, &args);

    let service_gateway = gateway::ServiceGateway::new(gateway_config)?;
    info!("Service gateway initialized");

    let mcp_server = mcp::McpServer::new(service_gateway);

    info!("Starting MCP server on stdio");
    if let Err(e) = mcp_server.run().await {
        error!("MCP server error: {}", e);
        return Err(e);
    }

    Ok(())
}
