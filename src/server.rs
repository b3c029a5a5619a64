use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    api,
    auth::RefreshLocks,
    config::Config,
    session::{MemorySessionStore, SessionStore},
};

/// Shared state behind every handler: the configuration, the session
/// store, and the per-session refresh locks. Cloned per request; all
/// fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<dyn SessionStore>,
    pub refresh_locks: Arc<RefreshLocks>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            sessions: Arc::new(MemorySessionStore::new()),
            refresh_locks: Arc::new(RefreshLocks::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/openapi.yaml", get(api::openapi))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/debug_token", get(api::debug_token))
        .route("/token_handoff", get(api::token_handoff))
        .route("/search_track", get(api::search_track))
        .route("/search_album", get(api::search_album))
        .route("/get_playlists", get(api::get_playlists))
        .route("/create_playlist", post(api::create_playlist))
        .route("/add_to_playlist", post(api::add_to_playlist))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
