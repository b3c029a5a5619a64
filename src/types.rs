use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Treat a token as expired this many seconds before its literal expiry to
/// tolerate clock skew and in-flight request latency.
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// The access/refresh token pair governing calls to the Spotify Web API,
/// held per session in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_at: i64,
}

impl TokenRecord {
    /// Builds a record from a token-endpoint response, computing the
    /// absolute expiry from `expires_in`. Fields the endpoint may omit on
    /// refresh (`refresh_token`, `scope`) fall back to the previous record.
    pub fn from_response(response: TokenResponse, previous: Option<&TokenRecord>) -> Self {
        TokenRecord {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .or_else(|| previous.map(|p| p.refresh_token.clone()))
                .unwrap_or_default(),
            scope: response
                .scope
                .or_else(|| previous.map(|p| p.scope.clone()))
                .unwrap_or_default(),
            expires_at: Utc::now().timestamp() + response.expires_in,
        }
    }

    /// True once the current time is within the skew margin of `expires_at`.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at - EXPIRY_SKEW_SECS
    }
}

/// What the Spotify token endpoint returns on code exchange and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Inbound body of `POST /create_playlist`, forwarded verbatim as the
/// upstream playlist-creation body once the owner is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub collaborative: bool,
}

/// Inbound body of `POST /add_to_playlist`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksRequest {
    pub playlist_id: String,
    pub track_uris: Vec<String>,
}
