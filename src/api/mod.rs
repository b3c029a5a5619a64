//! # API Module
//!
//! This module provides the HTTP endpoints exposed by the relay. It is the
//! boundary where sessions are established, credentials are resolved, and
//! upstream payloads or errors become HTTP responses.
//!
//! ## Overview
//!
//! Handlers fall into three groups:
//!
//! - **Authentication Flow**: [`login`] redirects the browser to Spotify's
//!   consent page; [`callback`] exchanges the returned authorization code
//!   for a token record and establishes the session cookie.
//! - **Relay Operations**: the search, playlist, and token endpoints that
//!   resolve an authenticated client per request and pass the upstream
//!   payload through.
//! - **Service Plumbing**: liveness text at `/`, a JSON health check, and
//!   the machine-readable API description at `/openapi.yaml`.
//!
//! ## Endpoints
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`index`] |
//! | GET | `/health` | [`health`] |
//! | GET | `/openapi.yaml` | [`openapi`] |
//! | GET | `/login` | [`login`] |
//! | GET | `/callback` | [`callback`] |
//! | GET | `/debug_token` | [`debug_token`] |
//! | GET | `/token_handoff` | [`token_handoff`] |
//! | GET | `/search_track` | [`search_track`] |
//! | GET | `/search_album` | [`search_album`] |
//! | GET | `/get_playlists` | [`get_playlists`] |
//! | POST | `/create_playlist` | [`create_playlist`] |
//! | POST | `/add_to_playlist` | [`add_to_playlist`] |
//!
//! ## Error Contract
//!
//! Handlers return `Result<_, RelayError>` and never write error bodies
//! themselves; the mapping to HTTP statuses lives in [`crate::error`].
//! Interactive endpoints answer an unauthenticated request with a 302 to
//! `/login`, programmatic ones with a 401.

mod callback;
mod health;
mod playlist;
mod search;
mod token;

pub use callback::{callback, login};
pub use health::{health, index, openapi};
pub use playlist::{add_to_playlist, create_playlist, get_playlists};
pub use search::{search_album, search_track};
pub use token::{debug_token, token_handoff};
