//! Server startup: seeded shared state and the listening loop.

use std::sync::Arc;

use tracing::info;

use taskhub_core::{seed, Config};

use crate::router::build_router;
use crate::state::AppState;

/// Load the seed dataset named by `config` and wrap it in shared state.
pub fn build_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = seed::load_store(config.seed.path.as_deref())?;
    info!("Task store ready with {} tasks", store.len());
    Ok(Arc::new(AppState::new(store)))
}

/// Bind, seed and serve until the process exits.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    config.log_summary();
    let state = build_app_state(config)?;
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
