//! Upcoming shows from Bandsintown.

use reqwest::Client;
use serde_json::Value;

use crate::{config, errors::Result, reconcile, types::Event};

pub struct BandsintownClient {
    http: Client,
    base_url: String,
    app_id: String,
}

impl BandsintownClient {
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
        }
    }

    /// `None` when no app id is configured.
    pub fn from_env() -> Option<Self> {
        config::bandsintown_app_id().map(|app_id| Self::new(config::bandsintown_url(), app_id))
    }

    /// Upcoming events of an artist. Bandsintown answers unknown artists
    /// with an object instead of a list, which counts as no events.
    pub async fn upcoming_events(&self, artist_name: &str) -> Result<Vec<Event>> {
        let url = format!(
            "{}/artists/{}/events",
            self.base_url,
            reconcile::bandsintown_name(artist_name)
        );

        let body: Value = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .query(&[("app_id", self.app_id.as_str())])
            .send()
            .await?
            .json()
            .await?;

        if !body.is_array() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_value(body)?)
    }
}
