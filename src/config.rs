//! Configuration management for the relay.
//!
//! This module defines the full set of runtime settings, sourced from
//! command-line flags and environment variables (a `.env` file is loaded by
//! `main` before parsing). Spotify client credentials are required and have
//! no default; the process refuses to start without them rather than falling
//! back to a placeholder.
//!
//! Settings resolve in the usual clap order:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables, including values from a local `.env` file
//! 3. Built-in defaults, where a setting has one
//!
//! The upstream endpoint URLs are configurable for the same reason the
//! bind address is: integration tests point them at a local stub server,
//! and deployments behind an API gateway can rewrite them.

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Spotify application client ID
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub client_id: String,

    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
    pub client_secret: String,

    /// OAuth redirect URI registered with the Spotify application
    #[arg(
        long,
        env = "SPOTIFY_REDIRECT_URI",
        default_value = "http://localhost:8888/callback"
    )]
    pub redirect_uri: String,

    /// Spotify authorization endpoint
    #[arg(
        long,
        env = "SPOTIFY_AUTH_URL",
        default_value = "https://accounts.spotify.com/authorize"
    )]
    pub auth_url: String,

    /// Spotify token endpoint
    #[arg(
        long,
        env = "SPOTIFY_TOKEN_URL",
        default_value = "https://accounts.spotify.com/api/token"
    )]
    pub token_url: String,

    /// Spotify Web API base URL
    #[arg(
        long,
        env = "SPOTIFY_API_URL",
        default_value = "https://api.spotify.com/v1"
    )]
    pub api_url: String,

    /// Host to listen on
    #[arg(long, env = "SPORELAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SPORELAY_PORT", default_value_t = 8888)]
    pub port: u16,

    /// Include upstream failure details in HTTP 500 bodies (not for production)
    #[arg(long, env = "SPORELAY_DEBUG_ERRORS", default_value_t = false)]
    pub debug_errors: bool,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
