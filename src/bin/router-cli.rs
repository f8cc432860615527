use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::path::PathBuf;

use tenant_router::auth::{build_validator, Credentials};
use tenant_router::config::load_config;
use tenant_router::routing::{RequestDescriptor, RoutingEngine};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Operator CLI for the tenant router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the routing decision for a URL using a configuration file
    Decide {
        #[arg(short, long)]
        config: PathBuf,
        /// Absolute URL, e.g. https://acme.example.com/dashboard
        #[arg(short, long)]
        url: String,
        /// Session token sent as a bearer credential
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
    /// Check router status via the admin API
    Status {
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// View decision counters via the admin API
    Stats {
        #[command(flatten)]
        admin: AdminArgs,
    },
}

#[derive(clap::Args)]
struct AdminArgs {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, env = "TENANT_ROUTER_ADMIN_KEY")]
    key: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load_config(&config)?;
            println!("Configuration OK");
            for (i, rule) in config.tenancy.domains.iter().enumerate() {
                println!(
                    "  {}. *.{} (min labels {}, banned {:?})",
                    i + 1,
                    rule.suffix,
                    rule.min_labels,
                    rule.banned_labels
                );
            }
            println!("  base hosts: {:?}", config.tenancy.base_hosts);
        }
        Commands::Decide { config, url, token, method } => {
            let config = load_config(&config)?;
            let engine = RoutingEngine::new(&config.tenancy, build_validator(&config.auth)?);

            let url: url::Url = url.parse()?;
            let credentials = token
                .as_deref()
                .map_or_else(Credentials::none, Credentials::with_bearer);
            let descriptor = RequestDescriptor::from_url(method.parse()?, &url, credentials);

            let decision = engine.decide(&descriptor).await;
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::Status { admin } => {
            admin_get(&admin, "/admin/status").await?;
        }
        Commands::Stats { admin } => {
            admin_get(&admin, "/admin/stats").await?;
        }
    }

    Ok(())
}

async fn admin_get(admin: &AdminArgs, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", admin.key))?,
    );

    let res = reqwest::Client::new()
        .get(format!("{}{}", admin.url.trim_end_matches('/'), path))
        .headers(headers)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
