#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde_json::{Value, json};

use sporelay::config::Config;
use sporelay::server::{self, AppState};
use sporelay::session::{SESSION_COOKIE, new_session_id};
use sporelay::types::TokenRecord;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("sporelay=debug".parse().unwrap())
            .add_directive("tower_http=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

/// In-process stand-in for Spotify's accounts and API hosts. Handlers
/// record what they saw so tests can assert on the exact upstream traffic.
#[derive(Default)]
pub struct SpotifyStub {
    pub token_requests: AtomicUsize,
    pub fail_token: AtomicBool,
    pub omit_refresh_token: AtomicBool,
    pub fail_api: AtomicBool,
    pub last_token_auth: Mutex<Option<String>>,
    pub last_token_form: Mutex<Option<HashMap<String, String>>>,
    pub last_bearer: Mutex<Option<String>>,
    pub last_playlist_body: Mutex<Option<Value>>,
    pub last_tracks_body: Mutex<Option<Value>>,
}

fn record_bearer(stub: &SpotifyStub, headers: &HeaderMap) {
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(String::from);
    *stub.last_bearer.lock().unwrap() = bearer;
}

async fn stub_token(
    State(stub): State<Arc<SpotifyStub>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    stub.token_requests.fetch_add(1, Ordering::SeqCst);
    *stub.last_token_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let grant_type = form.get("grant_type").cloned().unwrap_or_default();
    *stub.last_token_form.lock().unwrap() = Some(form);

    if stub.fail_token.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response();
    }

    let access_token = if grant_type == "refresh_token" {
        "refreshed-access-token"
    } else {
        "initial-access-token"
    };
    let mut payload = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "scope": "playlist-read-private playlist-modify-private playlist-modify-public",
        "expires_in": 3600,
        "refresh_token": "stub-refresh-token",
    });
    if stub.omit_refresh_token.load(Ordering::SeqCst) {
        payload.as_object_mut().unwrap().remove("refresh_token");
    }
    Json(payload).into_response()
}

async fn stub_search(
    State(stub): State<Arc<SpotifyStub>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record_bearer(&stub, &headers);
    if stub.fail_api.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({
        "q": params.get("q"),
        "type": params.get("type"),
        "limit": params.get("limit"),
        "tracks": { "items": [] },
    }))
    .into_response()
}

async fn stub_me(State(stub): State<Arc<SpotifyStub>>, headers: HeaderMap) -> Response {
    record_bearer(&stub, &headers);
    if stub.fail_api.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({ "id": "stub-user", "display_name": "Stub User" })).into_response()
}

async fn stub_playlists(State(stub): State<Arc<SpotifyStub>>, headers: HeaderMap) -> Response {
    record_bearer(&stub, &headers);
    if stub.fail_api.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({
        "items": [{ "id": "pl1", "name": "Existing" }],
        "total": 1,
    }))
    .into_response()
}

async fn stub_create_playlist(
    State(stub): State<Arc<SpotifyStub>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_bearer(&stub, &headers);
    let name = body["name"].clone();
    *stub.last_playlist_body.lock().unwrap() = Some(body);
    if stub.fail_api.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({
        "id": "new-playlist-id",
        "name": name,
        "owner": { "id": user_id },
    }))
    .into_response()
}

async fn stub_add_tracks(
    State(stub): State<Arc<SpotifyStub>>,
    Path(playlist_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_bearer(&stub, &headers);
    *stub.last_tracks_body.lock().unwrap() = Some(body);
    if stub.fail_api.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({ "snapshot_id": format!("snapshot-{playlist_id}") })).into_response()
}

fn stub_router(stub: Arc<SpotifyStub>) -> Router {
    Router::new()
        .route("/token", post(stub_token))
        .route("/v1/search", get(stub_search))
        .route("/v1/me", get(stub_me))
        .route("/v1/me/playlists", get(stub_playlists))
        .route("/v1/users/{user_id}/playlists", post(stub_create_playlist))
        .route("/v1/playlists/{playlist_id}/tracks", post(stub_add_tracks))
        .with_state(stub)
}

/// A relay listening on an ephemeral port, wired to the in-process Spotify
/// stub instead of the real accounts and API hosts.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub state: AppState,
    pub stub: Arc<SpotifyStub>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(mut config: Config) -> Self {
        setup_tracing();

        let stub = Arc::new(SpotifyStub::default());
        let stub_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let stub_addr = stub_listener.local_addr().unwrap();
        let stub_app = stub_router(stub.clone());
        tokio::spawn(async move {
            axum::serve(stub_listener, stub_app).await.unwrap();
        });

        config.token_url = format!("http://{stub_addr}/token");
        config.api_url = format!("http://{stub_addr}/v1");

        let state = AppState::new(config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let app = server::router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Redirects stay visible to the tests.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        TestApp {
            address,
            client,
            state,
            stub,
        }
    }

    /// Stores a token record under a fresh session id and returns the id.
    pub async fn seed_session(&self, record: TokenRecord) -> String {
        let session_id = new_session_id();
        self.state.sessions.set(&session_id, record).await;
        session_id
    }
}

/// A `Cookie` header value carrying the given session id.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}")
}

/// A token record expiring `secs` from now. Negative values produce an
/// already-expired record.
pub fn record_expiring_in(secs: i64) -> TokenRecord {
    TokenRecord {
        access_token: "seeded-access-token".to_string(),
        refresh_token: "seeded-refresh-token".to_string(),
        scope: "playlist-read-private".to_string(),
        expires_at: Utc::now().timestamp() + secs,
    }
}

/// A record comfortably outside the expiry skew window.
pub fn fresh_record() -> TokenRecord {
    record_expiring_in(3600)
}

pub fn get_test_config() -> Config {
    Config {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        redirect_uri: "http://localhost:8888/callback".to_string(),
        auth_url: "https://accounts.spotify.com/authorize".to_string(),
        token_url: String::new(), // overwritten with the stub address in spawn
        api_url: String::new(),   // overwritten with the stub address in spawn
        host: "127.0.0.1".to_string(),
        port: 0, // 0 means let OS choose
        debug_errors: false,
    }
}
