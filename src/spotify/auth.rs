use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    config::Config,
    error::{RelayError, Result},
    types::{TokenRecord, TokenResponse},
};

/// Scopes requested during authorization: enough to read the user's
/// playlists and to modify both private and public ones.
pub const SCOPES: &str = "playlist-read-private playlist-modify-private playlist-modify-public";

/// Builds the Spotify authorization URL the login flow redirects to.
///
/// This is a deterministic function of the configured client id, redirect
/// URI, and the fixed scope set. It carries no state parameter or PKCE
/// challenge and performs no I/O. The relay is a confidential client: the
/// code exchange is protected by the client secret rather than a per-flow
/// challenge.
///
/// # Arguments
///
/// * `config` - Relay configuration carrying the client id, redirect URI,
///   and the authorization endpoint base URL
///
/// # Returns
///
/// The fully encoded authorization URL as a string.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("scope", SCOPES)
        .finish();

    format!("{}?{}", config.auth_url, query)
}

/// Exchanges an authorization code for a token record.
///
/// Completes the authorization-code flow by POSTing the code to Spotify's
/// token endpoint with HTTP Basic client authentication. This is the final
/// step of the login flow; the caller is responsible for rejecting a
/// missing code with a client error before ever calling this.
///
/// # Arguments
///
/// * `config` - Relay configuration with client credentials and endpoints
/// * `code` - Authorization code received on the OAuth callback
///
/// # Returns
///
/// A fresh [`TokenRecord`] with the absolute expiry already computed.
///
/// # Errors
///
/// Any transport failure, non-success status, or undecodable response body
/// becomes [`RelayError::Upstream`]; the authorization code is single-use,
/// so there is nothing to retry.
pub async fn exchange_code(config: &Config, code: &str) -> Result<TokenRecord> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .header("Authorization", basic_auth_header(config))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            RelayError::upstream("Token exchange failed", e.to_string(), config.debug_errors)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RelayError::upstream(
            "Token exchange failed",
            format!("HTTP {status} - {body}"),
            config.debug_errors,
        ));
    }

    let token_response: TokenResponse = response.json().await.map_err(|e| {
        RelayError::upstream(
            "Token exchange returned an invalid body",
            e.to_string(),
            config.debug_errors,
        )
    })?;

    Ok(TokenRecord::from_response(token_response, None))
}

/// Refreshes an expired token record using its refresh token.
///
/// Exchanges the refresh token for a new access token so a session keeps
/// working without the user re-authorizing. Spotify may omit the refresh
/// token and scope from the response; the returned record preserves them
/// from `previous` in that case.
///
/// # Arguments
///
/// * `config` - Relay configuration with client credentials and endpoints
/// * `previous` - The expired record whose refresh token is being spent
///
/// # Returns
///
/// A replacement [`TokenRecord`] with a fresh access token and expiry.
///
/// # Errors
///
/// Any failure, including an invalid or revoked refresh token, becomes
/// [`RelayError::Upstream`] and is terminal for the session: the caller
/// must treat it as "no valid token" and force re-authorization, never
/// retry with the same refresh token.
pub async fn refresh(config: &Config, previous: &TokenRecord) -> Result<TokenRecord> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .header("Authorization", basic_auth_header(config))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", previous.refresh_token.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            RelayError::upstream("Token refresh failed", e.to_string(), config.debug_errors)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RelayError::upstream(
            "Token refresh failed",
            format!("HTTP {status} - {body}"),
            config.debug_errors,
        ));
    }

    let token_response: TokenResponse = response.json().await.map_err(|e| {
        RelayError::upstream(
            "Token refresh returned an invalid body",
            e.to_string(),
            config.debug_errors,
        )
    })?;

    Ok(TokenRecord::from_response(token_response, Some(previous)))
}

/// Builds the `Authorization: Basic` header value from the configured
/// client credentials, as the token endpoint expects for a confidential
/// client.
fn basic_auth_header(config: &Config) -> String {
    let credentials = format!("{}:{}", config.client_id, config.client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}
