use crate::{
    errors::Result,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, UserProfile,
    },
};

use super::SpotifyClient;

/// Spotify accepts at most 100 URIs per add request.
pub const TRACKS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    pub async fn current_user(&self) -> Result<UserProfile> {
        let url = self.url("/me");
        let response = self.send(|http| http.get(&url)).await?;
        Ok(response.json::<UserProfile>().await?)
    }

    /// Creates a private, non-collaborative playlist for `user_id`.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse> {
        let url = self.url(&format!("/users/{}/playlists", user_id));
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: false,
            collaborative: false,
        };

        let response = self.send(|http| http.post(&url).json(&body)).await?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    /// Appends tracks in request-sized chunks, keeping their order.
    pub async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));

        for chunk in uris.chunks(TRACKS_PER_REQUEST) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let response = self.send(|http| http.post(&url).json(&body)).await?;
            response.json::<AddTrackToPlaylistResponse>().await?;
        }

        Ok(())
    }
}
