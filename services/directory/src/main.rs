use anyhow::Context;
use directory::{build_router, AppState, Config, Directory, UserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // An unreadable store is fatal; only a missing file starts empty.
    let directory = Directory::open(UserStore::new(&config.users_file))
        .with_context(|| format!("failed to load {}", config.users_file.display()))?;

    let app = build_router(AppState::new(directory));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind directory listener on {addr}"))?;
    tracing::info!(%addr, "directory service starting");

    axum::serve(listener, app)
        .await
        .context("directory server exited with error")
}
