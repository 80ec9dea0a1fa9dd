//! # Spotify Integration Module
//!
//! Client for the parts of the Spotify Web API that setplaylist needs:
//! catalog search, artist lookups, top tracks, the current profile and
//! playlist writes. Authentication lives in [`auth`].
//!
//! ## API Coverage
//!
//! - `GET /search` - artist search and single-track resolution
//! - `GET /artists/{id}` and `GET /artists/{id}/top-tracks`
//! - `GET /me` - profile of the logged in user
//! - `POST /users/{user_id}/playlists` - create a private playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks, 100 per request
//! - `POST /api/token` - PKCE exchange, refresh and client credentials
//!
//! ## Retries
//!
//! `502 Bad Gateway` responses are retried after a pause. `429 Too Many
//! Requests` is retried after the `Retry-After` delay as long as that delay
//! is at most two minutes.

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod tracks;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    catalog::Catalog,
    config,
    errors::{Error, Result},
    types::{Artist, CreatePlaylistResponse, Track},
    warning,
};

const MAX_RETRY_AFTER: u64 = 120;
const MAX_ATTEMPTS: u32 = 5;

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
    market: String,
    retry_delay: Duration,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            market: "US".to_string(),
            retry_delay: Duration::from_secs(10),
        }
    }

    /// Client against the configured API URL and market.
    pub fn from_env(token: impl Into<String>) -> Self {
        Self::new(config::spotify_apiurl(), token).with_market(config::spotify_market())
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Pause before retrying a 502.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) fn market(&self) -> &str {
        &self.market
    }

    /// Sends an authorized request, rebuilding it for every retry.
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = build(&self.http).bearer_auth(&self.token).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if attempt < MAX_ATTEMPTS {
                if status == StatusCode::BAD_GATEWAY {
                    sleep(self.retry_delay).await;
                    continue;
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);
                    if retry_after <= MAX_RETRY_AFTER {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warning!(
                        "Spotify asks to retry after {} seconds. Try again later.",
                        retry_after
                    );
                }
            }

            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                service: "Spotify",
                status,
                body,
            });
        }
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        SpotifyClient::search_artists(self, query).await
    }

    async fn artist(&self, artist_id: &str) -> Result<Artist> {
        SpotifyClient::artist(self, artist_id).await
    }

    async fn search_track(&self, title: &str, artist_name: &str) -> Result<Option<Track>> {
        SpotifyClient::search_track(self, title, artist_name).await
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        SpotifyClient::top_tracks(self, artist_id).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse> {
        SpotifyClient::create_playlist(self, user_id, name, description).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        SpotifyClient::add_tracks(self, playlist_id, uris).await
    }
}
