use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{
    assist::{GeminiAssist, TextAssist},
    runtime,
    storage::{BlobStorage, JsonFileStorage},
    DataStore,
};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Open the persisted store and wire the assist client into handler state.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    runtime::ensure_env(&cfg.storage.data_dir).await?;

    let storage: Arc<dyn BlobStorage> = Arc::new(JsonFileStorage::new(&cfg.storage.data_dir)?);
    let store = DataStore::open(storage)?;

    let gemini = GeminiAssist::from_config(&cfg.assist);
    if !gemini.is_configured() {
        warn!("no assist API key configured; revisions will echo the submitted text");
    }
    let assist: Arc<dyn TextAssist> = Arc::new(gemini);

    Ok(AppState::new(store, assist))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, data_dir = %cfg.storage.data_dir, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 8088;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8088);
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
