use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;

use crate::{
    auth,
    error::{RelayError, Result},
    server::AppState,
    spotify,
};

pub async fn search_track(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>> {
    let token = auth::resolve_token(&state, &headers)
        .await
        .ok_or(RelayError::LoginRedirect)?;
    let query = require_query(&params)?;

    let client = spotify::Client::new(&state.config, token);
    Ok(Json(client.search_tracks(query).await?))
}

pub async fn search_album(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>> {
    let token = auth::resolve_token(&state, &headers)
        .await
        .ok_or(RelayError::LoginRedirect)?;
    let query = require_query(&params)?;

    let client = spotify::Client::new(&state.config, token);
    Ok(Json(client.search_albums(query).await?))
}

fn require_query(params: &HashMap<String, String>) -> Result<&str> {
    params
        .get("q")
        .map(String::as_str)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| RelayError::BadRequest("Missing search query".to_string()))
}
