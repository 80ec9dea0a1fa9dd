//! setlist.fm REST client.
//!
//! setlist.fm answers "nothing found" with a 404, so searches and setlist
//! pages map 404 to empty results. A missing single setlist stays an error.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{
    catalog::SetlistArchive,
    config,
    errors::{Error, Result},
    types::{FmArtist, FmArtistSearch, Setlist, SetlistPage},
};

pub struct SetlistFmClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SetlistFmClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(config::setlistfm_url(), config::setlistfm_api_key()?))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", "application/json")
            .header("x-api-key", &self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            service: "setlist.fm",
            status,
            body,
        })
    }

    /// Artists named like `name`, most relevant first.
    pub async fn search_artists(&self, name: &str) -> Result<Vec<FmArtist>> {
        let request = self
            .get("/search/artists")
            .query(&[("artistName", name), ("sort", "relevance")]);

        match self.send(request).await {
            Ok(response) => Ok(response.json::<FmArtistSearch>().await?.artist),
            Err(Error::Api { status, .. }) if status == StatusCode::NOT_FOUND => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// One page (20 entries) of an artist's setlists, newest first.
    pub async fn artist_setlists(&self, mbid: &str, page: u32) -> Result<SetlistPage> {
        let request = self
            .get(&format!("/artist/{}/setlists", mbid))
            .query(&[("p", page.to_string())]);

        match self.send(request).await {
            Ok(response) => Ok(response.json::<SetlistPage>().await?),
            Err(Error::Api { status, .. }) if status == StatusCode::NOT_FOUND => Ok(SetlistPage {
                page,
                ..SetlistPage::default()
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn setlist(&self, setlist_id: &str) -> Result<Setlist> {
        let request = self.get(&format!("/setlist/{}", setlist_id));

        match self.send(request).await {
            Ok(response) => Ok(response.json::<Setlist>().await?),
            Err(e) if e.is_not_found() => Err(Error::NotFound(format!("Setlist {}", setlist_id))),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SetlistArchive for SetlistFmClient {
    async fn search_artists(&self, name: &str) -> Result<Vec<FmArtist>> {
        SetlistFmClient::search_artists(self, name).await
    }

    async fn artist_setlists(&self, mbid: &str, page: u32) -> Result<SetlistPage> {
        SetlistFmClient::artist_setlists(self, mbid, page).await
    }

    async fn setlist(&self, setlist_id: &str) -> Result<Setlist> {
        SetlistFmClient::setlist(self, setlist_id).await
    }
}
