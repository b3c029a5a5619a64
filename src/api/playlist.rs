use axum::{body::Bytes, extract::State, http::HeaderMap, response::Json};
use serde_json::Value;

use crate::{
    auth,
    error::{RelayError, Result},
    server::AppState,
    spotify,
    types::{AddTracksRequest, CreatePlaylistRequest},
};

pub async fn get_playlists(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let token = auth::resolve_token(&state, &headers)
        .await
        .ok_or(RelayError::LoginRedirect)?;

    let client = spotify::Client::new(&state.config, token);
    Ok(Json(client.current_user_playlists().await?))
}

pub async fn create_playlist(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let token = auth::resolve_token(&state, &headers)
        .await
        .ok_or(RelayError::LoginRedirect)?;
    let request: CreatePlaylistRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayError::BadRequest(format!("Invalid playlist request: {e}")))?;

    let client = spotify::Client::new(&state.config, token);

    // Playlist creation is addressed by owner, so the user id has to be
    // resolved from the token first.
    let user = client.current_user().await?;
    let Some(user_id) = user["id"].as_str() else {
        return Err(RelayError::upstream(
            "Playlist creation failed",
            "user profile has no id field",
            state.config.debug_errors,
        ));
    };

    Ok(Json(client.create_playlist(user_id, &request).await?))
}

pub async fn add_to_playlist(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let token = auth::resolve_token(&state, &headers)
        .await
        .ok_or(RelayError::LoginRedirect)?;
    let request: AddTracksRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayError::BadRequest(format!("Invalid add-tracks request: {e}")))?;

    let client = spotify::Client::new(&state.config, token);
    Ok(Json(
        client
            .add_tracks(&request.playlist_id, &request.track_uris)
            .await?,
    ))
}
