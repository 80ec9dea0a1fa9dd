//! The two remote catalogs the assembly workflow reconciles.

use async_trait::async_trait;

use crate::{
    errors::{Error, Result},
    types::{Artist, CreatePlaylistResponse, FmArtist, Setlist, SetlistPage, Track},
};

/// Streaming side: artist lookup, track resolution and playlist writes.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>>;

    async fn artist(&self, artist_id: &str) -> Result<Artist>;

    /// Best catalog hit for a song title by the given artist, if any.
    async fn search_track(&self, title: &str, artist_name: &str) -> Result<Option<Track>>;

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<Track>>;

    /// Creates a private playlist owned by `user_id`.
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}

/// Setlist side: artist search and historical setlists.
#[async_trait]
pub trait SetlistArchive: Send + Sync {
    async fn search_artists(&self, name: &str) -> Result<Vec<FmArtist>>;

    async fn artist_setlists(&self, mbid: &str, page: u32) -> Result<SetlistPage>;

    async fn setlist(&self, setlist_id: &str) -> Result<Setlist>;
}

/// A missing archive knows no artists and no setlists. Hype playlists only
/// need the catalog, so they run without setlist.fm credentials.
#[async_trait]
impl<A: SetlistArchive> SetlistArchive for Option<A> {
    async fn search_artists(&self, name: &str) -> Result<Vec<FmArtist>> {
        match self {
            Some(archive) => archive.search_artists(name).await,
            None => Ok(Vec::new()),
        }
    }

    async fn artist_setlists(&self, mbid: &str, page: u32) -> Result<SetlistPage> {
        match self {
            Some(archive) => archive.artist_setlists(mbid, page).await,
            None => Ok(SetlistPage {
                page,
                ..SetlistPage::default()
            }),
        }
    }

    async fn setlist(&self, setlist_id: &str) -> Result<Setlist> {
        match self {
            Some(archive) => archive.setlist(setlist_id).await,
            None => Err(Error::NotFound(format!("Setlist {}", setlist_id))),
        }
    }
}
