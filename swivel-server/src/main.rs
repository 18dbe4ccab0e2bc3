use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use swivel_server::{AppState, ConnectionHub, RegistryPolicy, RoomRegistry, build_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swivel-relay")]
#[command(about = "Pairing and relay service for gyro-driven remote control")]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 5503)]
    port: u16,

    /// Keep rooms keyed by code with independent expiry instead of the
    /// source-compatible single current-room pointer.
    #[arg(long)]
    multi_room: bool,

    /// Room lifetime in multi-room mode, seconds.
    #[arg(long, default_value_t = 600)]
    room_ttl_secs: u64,

    #[arg(long, default_value_t = swivel_core::DEFAULT_CODE_LENGTH)]
    code_length: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swivel=info")),
        )
        .init();

    let policy = if args.multi_room {
        RegistryPolicy::MultiRoom {
            ttl: Duration::from_secs(args.room_ttl_secs),
        }
    } else {
        RegistryPolicy::SingleActive
    };

    let registry = Arc::new(RoomRegistry::new(policy, args.code_length));
    let hub = Arc::new(ConnectionHub::new(registry.clone()));
    let app = build_router(AppState { registry, hub });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("failed to bind port {}", args.port))?;
    info!("relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
