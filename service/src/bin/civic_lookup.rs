#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use civicinfo::civic::{CivicInfoClient, HttpCivicInfoClient, RepresentativeInfoResponse};
use civicinfo::config::Config;

/// Look up the elected officials representing an address.
#[derive(Debug, Parser)]
#[command(name = "civic-lookup", version)]
struct Args {
    /// Free-form address, e.g. "2145 Whisper Way Reston, VA"
    address: String,

    /// Path to a YAML config file (defaults to ./config.yaml)
    #[arg(long)]
    config: Option<String>,

    /// Print the decoded graph as JSON
    #[arg(long)]
    json: bool,
}

fn print_listing(response: &RepresentativeInfoResponse) {
    for division in &response.divisions {
        println!("{} ({})", division.name, division.ocd_division_id);
        for office in division.offices() {
            println!("  {}", office.name);
            for official in office.officials() {
                let party = official.party().map(|p| format!(" [{p}]")).unwrap_or_default();
                println!("    {}{party}", official.name());
                for url in official.channels().iter().filter_map(|c| c.profile_url()) {
                    println!("      {url}");
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, anyhow::Error> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    std::env::set_var("RUST_LOG", &config.logging.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let http = reqwest::Client::builder()
        .user_agent(&config.api.user_agent)
        .timeout(Duration::from_secs(config.api.timeout_secs))
        .build()?;
    let client = HttpCivicInfoClient::with_client(http, &config.api.base_url, &config.api.key);

    tracing::info!(address = %args.address, "looking up representatives");
    match client.lookup_representatives(&args.address).await {
        Ok(response) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_listing(&response);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            match err.kind() {
                Some(kind) if kind.is_address_problem() => {
                    tracing::error!(?kind, "{err}; check the address and try again");
                }
                Some(kind) => tracing::error!(?kind, "{err}"),
                None => tracing::error!("{err}"),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
