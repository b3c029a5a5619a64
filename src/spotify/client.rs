use serde_json::{Value, json};

use crate::{
    config::Config,
    error::{RelayError, Result},
    types::CreatePlaylistRequest,
};

/// An authenticated Spotify Web API client, constructed per request from a
/// resolved access token. Nothing is shared between requests; a client is
/// built, used for one dispatch, and dropped.
///
/// Every operation returns the upstream JSON payload untouched; the relay
/// passes Spotify's responses through rather than reshaping them.
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    access_token: String,
    debug_errors: bool,
}

impl Client {
    pub fn new(config: &Config, access_token: String) -> Self {
        Client {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            access_token,
            debug_errors: config.debug_errors,
        }
    }

    /// Searches tracks matching `query`, limited to the first 5 results.
    pub async fn search_tracks(&self, query: &str) -> Result<Value> {
        let request = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[("q", query), ("type", "track"), ("limit", "5")]);
        self.execute(request, "Track search failed").await
    }

    /// Searches albums matching `query`, limited to the first 5 results.
    pub async fn search_albums(&self, query: &str) -> Result<Value> {
        let request = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[("q", query), ("type", "album"), ("limit", "5")]);
        self.execute(request, "Album search failed").await
    }

    /// Fetches the current user's playlists.
    pub async fn current_user_playlists(&self) -> Result<Value> {
        let request = self.http.get(format!("{}/me/playlists", self.api_url));
        self.execute(request, "Fetching playlists failed").await
    }

    /// Fetches the profile of the user the access token belongs to.
    pub async fn current_user(&self) -> Result<Value> {
        let request = self.http.get(format!("{}/me", self.api_url));
        self.execute(request, "Fetching user profile failed").await
    }

    /// Creates a playlist owned by `user_id`. The request body goes out
    /// exactly as received, defaults already filled in.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        playlist: &CreatePlaylistRequest,
    ) -> Result<Value> {
        let request = self
            .http
            .post(format!("{}/users/{}/playlists", self.api_url, user_id))
            .json(playlist);
        self.execute(request, "Playlist creation failed").await
    }

    /// Appends track URIs to a playlist, in the order given.
    pub async fn add_tracks(&self, playlist_id: &str, track_uris: &[String]) -> Result<Value> {
        let request = self
            .http
            .post(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
            .json(&json!({ "uris": track_uris }));
        self.execute(request, "Adding tracks failed").await
    }

    /// Sends one upstream call and decodes the JSON body. Transport
    /// failures, non-success statuses, and undecodable bodies all collapse
    /// into [`RelayError::Upstream`] carrying `context` as the message.
    async fn execute(&self, request: reqwest::RequestBuilder, context: &str) -> Result<Value> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| RelayError::upstream(context, e.to_string(), self.debug_errors))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::upstream(
                context,
                format!("HTTP {status} - {body}"),
                self.debug_errors,
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::upstream(context, e.to_string(), self.debug_errors))
    }
}
