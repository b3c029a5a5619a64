use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    error::{RelayError, Result},
    server::AppState,
    session, spotify,
};

pub async fn login(State(state): State<AppState>) -> Response {
    let url = spotify::auth::authorize_url(&state.config);
    (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
}

pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    // Reject before touching the token endpoint; an absent or empty code
    // is a client error, not an upstream one.
    let Some(code) = params.get("code").filter(|code| !code.is_empty()) else {
        return Err(RelayError::BadRequest(
            "Missing authorization code".to_string(),
        ));
    };

    let record = spotify::auth::exchange_code(&state.config, code).await?;

    let session_id = session::new_session_id();
    state.sessions.set(&session_id, record).await;
    tracing::info!(session = %session_id, "Session authorized");

    Ok((
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, session::session_cookie(&session_id)),
            (header::LOCATION, "/".to_string()),
        ],
    )
        .into_response())
}
