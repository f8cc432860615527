//! Multi-tenant edge router.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────────┐
//!                     │                      TENANT ROUTER                       │
//!                     │                                                          │
//!   Client Request    │  ┌────────┐   ┌──────────────────────────────────────┐   │
//!   ──────────────────┼─▶│  http  │──▶│           routing engine             │   │
//!   (Host, path,      │  │ server │   │  host ─▶ tenant ─▶ exempt? ─▶ auth   │   │
//!    cookies)         │  └────────┘   │                      │         │     │   │
//!                     │               │                      ▼         ▼     │   │
//!                     │               │                 rewrite ◀── session  │   │
//!                     │               └───────┬──────────────────────┬───────┘   │
//!                     │                       │                      │           │
//!                     │          PassThrough / RewriteTo     RedirectTo / Login  │
//!                     │                       ▼                      ▼           │
//!   Client Response   │               ┌──────────────┐        ┌────────────┐     │
//!   ◀─────────────────┼───────────────│   forward    │        │    307     │     │
//!                     │               └──────┬───────┘        └────────────┘     │
//!                     │                      ▼                                   │
//!                     │                   renderer         session verifier ◀─ auth
//!                     └──────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use tenant_router::admin::{run_admin, AdminState};
use tenant_router::config::{load_config, RouterConfig};
use tenant_router::lifecycle::{signals::shutdown_on_signal, Shutdown};
use tenant_router::observability::{logging::init_logging, metrics::init_metrics};
use tenant_router::HttpServer;

#[derive(Parser)]
#[command(name = "tenant-router")]
#[command(about = "Routes requests to tenant namespaces by host", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "TENANT_ROUTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("tenant-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        renderer = %config.renderer.address,
        domains = config.tenancy.domains.len(),
        base_hosts = ?config.tenancy.base_hosts,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config.clone())?;

    let admin_task = if config.admin.enabled {
        let listener = tokio::net::TcpListener::bind(&config.admin.bind_address).await?;
        let state = AdminState::new(&server.state(), &config.admin.api_key);
        let rx = shutdown.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = run_admin(listener, state, rx).await {
                tracing::error!(error = %e, "Admin API failed");
            }
        }))
    } else {
        None
    };

    let rx = shutdown.subscribe();
    if config.listener.tls.is_some() {
        let addr: SocketAddr = config.listener.bind_address.parse()?;
        server.run_tls(addr, rx).await?;
    } else {
        let listener = tokio::net::TcpListener::bind(&config.listener.bind_address).await?;
        server.run(listener, rx).await?;
    }

    // The public listener can also stop on its own; make sure admin follows.
    shutdown.trigger();
    if let Some(task) = admin_task {
        let _ = task.await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
