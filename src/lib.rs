//! Spotify OAuth Relay Library
//!
//! This library implements a small HTTP relay that fronts the Spotify Web API
//! for clients that cannot run a browser-based login themselves, such as
//! conversational agents. It drives the OAuth 2.0 authorization-code flow,
//! keeps the resulting tokens in server-side sessions, refreshes them when
//! they expire, and forwards a curated set of search and playlist operations
//! to Spotify.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints exposed by the relay
//! - `auth` - Credential resolution for incoming requests
//! - `config` - Runtime settings from flags, environment, and `.env`
//! - `error` - Error taxonomy and HTTP response mapping
//! - `server` - Router assembly and the serve loop
//! - `session` - Session cookies and the session store
//! - `spotify` - OAuth flow and Web API calls against Spotify
//! - `types` - Token records and request payload types
//!
//! # Example
//!
//! ```
//! use sporelay::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = config::Config::load();
//!     server::serve(config).await
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;

pub use error::{RelayError, Result};
