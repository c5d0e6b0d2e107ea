use clap::Parser;
use std::collections::HashSet;
use serde_json::{Map, Value};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use servicemap_search::{Config, SearchClient};

/// Look up hostnames in the service-map search API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Hostnames to search for
    #[arg(required = true)]
    hosts: Vec<String>,

    /// Service base URL (overrides SERVICEMAP_URL)
    #[arg(long)]
    url: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.url {
        config.service.base_url = url;
    }
    if cli.insecure {
        config.service.verify_tls = false;
    }

    let hosts = unique_hosts(cli.hosts);
    info!(
        "Searching {} host(s) at {}",
        hosts.len(),
        config.service.base_url
    );

    let mut client = SearchClient::from_config(&config.service)?;
    for host in &hosts {
        client.add_host(host.as_str());
    }
    client.execute().await?;

    let mut output = Map::new();
    for host in &hosts {
        let service = client.result_for_host(host).cloned().unwrap_or(Value::Null);
        output.insert(host.clone(), service);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Drops repeated hostnames, keeping first-seen order.
fn unique_hosts(hosts: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    hosts
        .into_iter()
        .filter(|host| seen.insert(host.clone()))
        .collect()
}
