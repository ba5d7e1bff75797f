use std::net::SocketAddr;

use navigator::{DirectoryMedia, Navigator, Renderer};
use storage::Storage;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, resolve_database_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = resolve_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let navigator = Navigator::new(
        storage,
        DirectoryMedia::new(&settings.media_root),
        Renderer::new(settings.currency),
    );
    let app = api::build_router(AppState::new(navigator));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, media_root = %settings.media_root, "catalog bot listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
