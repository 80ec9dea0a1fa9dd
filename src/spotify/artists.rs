use crate::{
    errors::Result,
    types::{Artist, SearchArtistsResponse},
};

use super::SpotifyClient;

const ARTIST_SEARCH_LIMIT: &str = "20";

impl SpotifyClient {
    /// Searches the catalog for artists whose name matches `query`.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        let url = self.url("/search");
        let q = format!("artist:{}", query);

        let response = self
            .send(|http| {
                http.get(&url).query(&[
                    ("q", q.as_str()),
                    ("type", "artist"),
                    ("limit", ARTIST_SEARCH_LIMIT),
                ])
            })
            .await?;

        let json = response.json::<SearchArtistsResponse>().await?;
        Ok(json.artists.items)
    }

    pub async fn artist(&self, artist_id: &str) -> Result<Artist> {
        let url = self.url(&format!("/artists/{}", artist_id));
        let response = self.send(|http| http.get(&url)).await?;
        Ok(response.json::<Artist>().await?)
    }
}
