use crate::{
    errors::Result,
    types::{SearchTracksResponse, TopTracksResponse, Track},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Resolves a song title to the best matching catalog track of the
    /// given artist.
    pub async fn search_track(&self, title: &str, artist_name: &str) -> Result<Option<Track>> {
        let url = self.url("/search");
        let q = format!("track:{} artist:{}", title, artist_name);

        let response = self
            .send(|http| {
                http.get(&url)
                    .query(&[("q", q.as_str()), ("type", "track"), ("limit", "1")])
            })
            .await?;

        let json = response.json::<SearchTracksResponse>().await?;
        Ok(json.tracks.items.into_iter().next())
    }

    /// Most popular tracks of an artist in the configured market.
    pub async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        let url = self.url(&format!("/artists/{}/top-tracks", artist_id));
        let market = self.market().to_string();

        let response = self
            .send(|http| http.get(&url).query(&[("market", market.as_str())]))
            .await?;

        let json = response.json::<TopTracksResponse>().await?;
        Ok(json.tracks)
    }
}
