//! Credential resolution for incoming requests.
//!
//! Every protected endpoint funnels through [`resolve_token`]. The order is
//! fixed: a bearer header wins outright, then the session record is
//! consulted, and an expired record is refreshed in place. Refresh and
//! persist are serialized per session so that two concurrent requests
//! observing the same expired record spend the refresh token exactly once.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::{server::AppState, session, spotify};

/// Registry of per-session locks guarding refresh-then-persist. An entry is
/// created on first use and lives as long as the process; it holds no
/// token data, only the lock.
#[derive(Debug, Default)]
pub struct RefreshLocks(DashMap<String, Arc<Mutex<()>>>);

impl RefreshLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_session(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.0
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Resolves the access token an incoming request should use upstream.
///
/// # Resolution order
///
/// 1. An `Authorization: Bearer` header is used directly, without
///    validation or refresh and without touching the session. The caller
///    owns that token's lifecycle.
/// 2. Otherwise the session cookie is looked up in the store. No cookie or
///    no record resolves to `None`.
/// 3. An expired record is refreshed under the session's refresh lock; the
///    new record is persisted and its access token returned. A failed
///    refresh clears the record and resolves to `None`.
///
/// # Returns
///
/// `Some(access_token)` when the request can be dispatched upstream, else
/// `None`; the handler decides whether that means a 401 or a redirect to
/// the login flow.
pub async fn resolve_token(state: &AppState, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = bearer_token(headers) {
        return Some(token);
    }

    let session_id = session::session_id_from_headers(headers)?;
    let record = state.sessions.get(&session_id).await?;

    if !record.is_expired() {
        return Some(record.access_token);
    }

    refresh_session(state, &session_id).await
}

/// Refreshes an expired session record, serialized per session.
async fn refresh_session(state: &AppState, session_id: &str) -> Option<String> {
    let lock = state.refresh_locks.for_session(session_id);
    let _guard = lock.lock().await;

    // Re-read under the lock; a concurrent request may have refreshed this
    // session while we waited.
    let record = state.sessions.get(session_id).await?;
    if !record.is_expired() {
        return Some(record.access_token);
    }

    match spotify::auth::refresh(&state.config, &record).await {
        Ok(refreshed) => {
            tracing::debug!(session = %session_id, "Session token refreshed");
            let access_token = refreshed.access_token.clone();
            state.sessions.set(session_id, refreshed).await;
            Some(access_token)
        }
        Err(e) => {
            // Terminal for the session: the refresh token is spent or
            // revoked, so the record must go rather than be retried.
            tracing::warn!(session = %session_id, error = %e, "Token refresh failed, clearing session");
            state.sessions.remove(session_id).await;
            None
        }
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
