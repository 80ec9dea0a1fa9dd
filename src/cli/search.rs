use tabled::Table;

use crate::{
    config, error,
    management::TokenManager,
    spotify::{self, SpotifyClient},
    types::ArtistTableRow,
    warning,
};

/// Searches with the user's token, or with an app token when nobody is
/// logged in and a client secret is configured.
async fn search_client() -> Option<SpotifyClient> {
    if let Ok(mut token_mgr) = TokenManager::load().await {
        if let Ok(token) = token_mgr.get_valid_token().await {
            return Some(SpotifyClient::from_env(token));
        }
    }

    let client_id = config::spotify_client_id().ok()?;
    let client_secret = config::spotify_client_secret()?;
    match spotify::auth::request_client_token(
        &config::spotify_apitoken_url(),
        &client_id,
        &client_secret,
    )
    .await
    {
        Ok(token) => Some(SpotifyClient::from_env(token.access_token)),
        Err(e) => {
            warning!("Client credentials login failed: {}", e);
            None
        }
    }
}

pub async fn search(query: String) {
    let Some(client) = search_client().await else {
        error!("Searching needs a login (setplaylist auth) or SPOTIFY_API_AUTH_CLIENT_SECRET.");
    };

    let pb = super::spinner("Searching artists...");
    let result = client.search_artists(&query).await;
    pb.finish_and_clear();

    let artists = match result {
        Ok(artists) => artists,
        Err(e) => error!("Artist search failed: {}", e),
    };

    if artists.is_empty() {
        warning!("No artists found for '{}'", query);
        return;
    }

    let rows: Vec<ArtistTableRow> = artists
        .into_iter()
        .map(|a| ArtistTableRow {
            id: a.id,
            name: a.name,
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
        })
        .collect();

    println!("{}", Table::new(rows));
}
