//! # Spotify Integration Module
//!
//! This module is the relay's only boundary with Spotify's services. It
//! implements the OAuth 2.0 authorization-code flow against the accounts
//! service and a thin, per-request client for the Web API operations the
//! relay exposes. Everything above this module deals in [`crate::types`]
//! and `serde_json::Value`; everything below it is HTTP.
//!
//! ## Core Modules
//!
//! ### Authorization Module
//!
//! [`auth`] - The token lifecycle of a confidential client:
//! - **Authorization URL**: a deterministic URL for the user-consent
//!   redirect, built from the configured client id and redirect URI
//! - **Code Exchange**: turns a single-use authorization code into a
//!   [`crate::types::TokenRecord`] via HTTP Basic client authentication
//! - **Refresh**: spends a refresh token for a new access token, keeping
//!   fields the token endpoint omits from the previous record
//!
//! ### Client Module
//!
//! [`client`] - Authenticated Web API calls, one client per request:
//! - **Search**: track and album search, capped at five results
//! - **Playlists**: list the user's playlists, create one, append tracks
//! - **Profile**: fetch the user the access token belongs to
//!
//! ## Authentication Strategy
//!
//! The relay holds the client secret server-side, so it runs the plain
//! authorization-code flow rather than PKCE: the token endpoint is called
//! with `Authorization: Basic <id:secret>` and no per-flow challenge. The
//! authorize URL carries no state parameter; sessions are established by
//! the callback itself, not correlated with the outbound redirect.
//!
//! ## Error Handling
//!
//! Every function returns `Result<_, RelayError>`. Transport failures,
//! non-success statuses, and undecodable bodies all become
//! [`crate::error::RelayError::Upstream`]; no retries are performed at this
//! layer, and a failed refresh must be treated as terminal for the session
//! that owned the refresh token.
//!
//! ## API Coverage
//!
//! ### Accounts service
//! - `GET /authorize` - user consent (URL construction only)
//! - `POST /api/token` - code exchange and refresh
//!
//! ### Web API
//! - `GET /search` - track and album search
//! - `GET /me` - current user profile
//! - `GET /me/playlists` - current user's playlists
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - append tracks

pub mod auth;
pub mod client;

pub use client::Client;
