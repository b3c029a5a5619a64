//! Session cookies and the server-side session store.
//!
//! A session is nothing more than a random 128-bit identifier carried in an
//! HttpOnly cookie; the token record it refers to lives server-side behind
//! the [`SessionStore`] trait. Because the cookie holds no data, there is no
//! signing secret to configure and nothing for a client to tamper with.
//!
//! The store interface is deliberately narrow (get, set, remove) so the
//! resolution logic in [`crate::auth`] stays testable against the in-memory
//! implementation and a persistent backend could be swapped in later.

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use dashmap::DashMap;
use rand::Rng;

use crate::types::TokenRecord;

/// Name of the session cookie issued on a successful callback.
pub const SESSION_COOKIE: &str = "sporelay_session";

/// Generates a fresh session identifier: 16 random bytes, base64url.
pub fn new_session_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Builds the `Set-Cookie` value for a session. Browser-session lifetime;
/// no `Max-Age`, matching the transient nature of the stored tokens.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Extracts the relay's session id from the request's `Cookie` header,
/// ignoring any other cookies sharing the header.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('=')
            })
        })
        .map(str::to_string)
}

/// Storage abstraction for per-session token records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up the token record for a session.
    async fn get(&self, session_id: &str) -> Option<TokenRecord>;

    /// Store or replace the token record for a session.
    async fn set(&self, session_id: &str, record: TokenRecord);

    /// Drop the token record for a session.
    async fn remove(&self, session_id: &str);
}

/// In-memory session store. Sessions do not survive a restart, which is the
/// intended lifetime: clients simply re-run the login flow.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: DashMap<String, TokenRecord>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<TokenRecord> {
        self.records.get(session_id).map(|record| record.clone())
    }

    async fn set(&self, session_id: &str, record: TokenRecord) {
        self.records.insert(session_id.to_string(), record);
    }

    async fn remove(&self, session_id: &str) {
        self.records.remove(session_id);
    }
}
