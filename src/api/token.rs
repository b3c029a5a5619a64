use axum::{extract::State, http::HeaderMap, response::Json};
use serde_json::Value;

use crate::{
    auth,
    error::{RelayError, Result},
    server::AppState,
    session, spotify,
    types::TokenRecord,
};

pub async fn debug_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let token = auth::resolve_token(&state, &headers)
        .await
        .ok_or_else(|| RelayError::Unauthorized("Not authenticated".to_string()))?;

    let client = spotify::Client::new(&state.config, token);
    Ok(Json(client.current_user().await?))
}

pub async fn token_handoff(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenRecord>> {
    // Reads the session record as-is. A bearer header is ignored here,
    // and an expired record is handed over without being refreshed.
    let session_id = session::session_id_from_headers(&headers)
        .ok_or_else(|| RelayError::Unauthorized("No session".to_string()))?;
    let record = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| RelayError::Unauthorized("No token for session".to_string()))?;

    Ok(Json(record))
}
