use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    config,
    errors::Result,
    types::{Band, Favorite, Playlist, PlaylistSong, Song, UserPlaylist},
};

/// A playlist record before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDraft {
    pub setlistfm_setlist_id: String,
    pub name: String,
    pub description: String,
    pub tour_name: String,
    pub venue_name: String,
    pub event_date: String,
    pub venue_location: String,
    pub band_id: u64,
}

/// A song record before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct SongDraft {
    pub spotify_song_id: String,
    pub spotify_song_uri: String,
    pub name: String,
    pub album_name: String,
    pub duration: u64,
    pub band_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Tables {
    #[serde(default)]
    next_band_id: u64,
    #[serde(default)]
    next_song_id: u64,
    #[serde(default)]
    next_playlist_id: u64,
    #[serde(default)]
    bands: Vec<Band>,
    #[serde(default)]
    songs: Vec<Song>,
    #[serde(default)]
    playlists: Vec<Playlist>,
    #[serde(default)]
    playlist_songs: Vec<PlaylistSong>,
    #[serde(default)]
    favorites: Vec<Favorite>,
    #[serde(default)]
    user_playlists: Vec<UserPlaylist>,
}

/// Local store of bands, songs and playlists, persisted as one JSON file.
///
/// Ids are handed out from per-table counters starting at 1, so they stay
/// stable across runs.
pub struct Library {
    tables: Tables,
    path: PathBuf,
}

impl Library {
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::library_path()).await
    }

    /// Opens the store at `path`. A missing file is an empty store.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let tables = match async_fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Tables::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            tables,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.tables)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn band(&self, band_id: u64) -> Option<&Band> {
        self.tables.bands.iter().find(|b| b.id == band_id)
    }

    pub fn band_by_spotify_id(&self, spotify_artist_id: &str) -> Option<&Band> {
        self.tables
            .bands
            .iter()
            .find(|b| b.spotify_artist_id == spotify_artist_id)
    }

    /// Stores a band once per Spotify artist. A later insert only fills in a
    /// setlist.fm id that was unknown before.
    pub fn insert_band(
        &mut self,
        spotify_artist_id: &str,
        setlistfm_artist_id: Option<String>,
        name: &str,
        photo: Option<String>,
    ) -> Band {
        if let Some(existing) = self
            .tables
            .bands
            .iter_mut()
            .find(|b| b.spotify_artist_id == spotify_artist_id)
        {
            if existing.setlistfm_artist_id.is_none() {
                existing.setlistfm_artist_id = setlistfm_artist_id;
            }
            return existing.clone();
        }

        self.tables.next_band_id += 1;
        let band = Band {
            id: self.tables.next_band_id,
            spotify_artist_id: spotify_artist_id.to_string(),
            setlistfm_artist_id,
            name: name.to_string(),
            photo,
        };
        self.tables.bands.push(band.clone());
        band
    }

    /// Returns the stored song with the same Spotify id, name and duration,
    /// inserting the draft when there is none.
    pub fn find_or_insert_song(&mut self, draft: SongDraft) -> Song {
        if let Some(song) = self.tables.songs.iter().find(|s| {
            s.spotify_song_id == draft.spotify_song_id
                && s.name == draft.name
                && s.duration == draft.duration
        }) {
            return song.clone();
        }

        self.tables.next_song_id += 1;
        let song = Song {
            id: self.tables.next_song_id,
            spotify_song_id: draft.spotify_song_id,
            spotify_song_uri: draft.spotify_song_uri,
            name: draft.name,
            album_name: draft.album_name,
            duration: draft.duration,
            band_id: draft.band_id,
        };
        self.tables.songs.push(song.clone());
        song
    }

    pub fn playlist(&self, playlist_id: u64) -> Option<&Playlist> {
        self.tables.playlists.iter().find(|p| p.id == playlist_id)
    }

    pub fn find_playlist(&self, setlist_id: &str, band_id: u64) -> Option<&Playlist> {
        self.tables
            .playlists
            .iter()
            .find(|p| p.setlistfm_setlist_id == setlist_id && p.band_id == band_id)
    }

    /// Inserts a playlist record, or returns the one already stored for the
    /// same setlist and band.
    pub fn insert_playlist(&mut self, draft: PlaylistDraft) -> Playlist {
        if let Some(existing) = self.find_playlist(&draft.setlistfm_setlist_id, draft.band_id) {
            return existing.clone();
        }

        self.tables.next_playlist_id += 1;
        let playlist = Playlist {
            id: self.tables.next_playlist_id,
            setlistfm_setlist_id: draft.setlistfm_setlist_id,
            name: draft.name,
            description: draft.description,
            tour_name: draft.tour_name,
            venue_name: draft.venue_name,
            event_date: draft.event_date,
            venue_location: draft.venue_location,
            length: 0,
            duration: String::new(),
            band_id: draft.band_id,
        };
        self.tables.playlists.push(playlist.clone());
        playlist
    }

    pub fn update_playlist_stats(&mut self, playlist_id: u64, length: usize, duration: String) {
        if let Some(p) = self
            .tables
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
        {
            p.length = length;
            p.duration = duration;
        }
    }

    /// Appends a song at the end of a playlist and returns its position.
    pub fn append_playlist_song(&mut self, playlist_id: u64, song_id: u64) -> usize {
        let position = self
            .tables
            .playlist_songs
            .iter()
            .filter(|ps| ps.playlist_id == playlist_id)
            .count();
        self.tables.playlist_songs.push(PlaylistSong {
            playlist_id,
            song_id,
            position,
        });
        position
    }

    /// Songs of a playlist in playlist order. A song played twice appears
    /// twice.
    pub fn playlist_songs(&self, playlist_id: u64) -> Vec<&Song> {
        let mut links: Vec<&PlaylistSong> = self
            .tables
            .playlist_songs
            .iter()
            .filter(|ps| ps.playlist_id == playlist_id)
            .collect();
        links.sort_by_key(|ps| ps.position);

        links
            .into_iter()
            .filter_map(|ps| self.tables.songs.iter().find(|s| s.id == ps.song_id))
            .collect()
    }

    /// Records that `user_id` owns a remote copy of the playlist. A second
    /// materialization replaces the remote id.
    pub fn link_user_playlist(
        &mut self,
        user_id: &str,
        playlist_id: u64,
        spotify_playlist_id: &str,
        spotify_playlist_url: Option<String>,
    ) {
        match self
            .tables
            .user_playlists
            .iter_mut()
            .find(|up| up.user_id == user_id && up.playlist_id == playlist_id)
        {
            Some(link) => {
                link.spotify_playlist_id = spotify_playlist_id.to_string();
                link.spotify_playlist_url = spotify_playlist_url;
            }
            None => self.tables.user_playlists.push(UserPlaylist {
                user_id: user_id.to_string(),
                playlist_id,
                spotify_playlist_id: spotify_playlist_id.to_string(),
                spotify_playlist_url,
            }),
        }
    }

    pub fn user_playlists(&self, user_id: &str) -> Vec<(&Playlist, &UserPlaylist)> {
        self.tables
            .user_playlists
            .iter()
            .filter(|up| up.user_id == user_id)
            .filter_map(|up| self.playlist(up.playlist_id).map(|p| (p, up)))
            .collect()
    }

    /// Newest playlists first.
    pub fn recent_playlists(&self, limit: usize) -> Vec<&Playlist> {
        let mut playlists: Vec<&Playlist> = self.tables.playlists.iter().collect();
        playlists.sort_by(|a, b| b.id.cmp(&a.id));
        playlists.truncate(limit);
        playlists
    }

    pub fn is_favorite(&self, user_id: &str, band_id: u64) -> bool {
        self.tables
            .favorites
            .iter()
            .any(|f| f.user_id == user_id && f.band_id == band_id)
    }

    /// Adds or removes a favorite. Returns whether the band is a favorite
    /// afterwards.
    pub fn toggle_favorite(&mut self, user_id: &str, band_id: u64) -> bool {
        if self.is_favorite(user_id, band_id) {
            self.tables
                .favorites
                .retain(|f| !(f.user_id == user_id && f.band_id == band_id));
            false
        } else {
            self.tables.favorites.push(Favorite {
                user_id: user_id.to_string(),
                band_id,
            });
            true
        }
    }

    pub fn favorites(&self, user_id: &str) -> Vec<&Band> {
        self.tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| self.band(f.band_id))
            .collect()
    }

    pub fn count_bands(&self) -> usize {
        self.tables.bands.len()
    }

    pub fn count_songs(&self) -> usize {
        self.tables.songs.len()
    }

    fn library_path() -> PathBuf {
        config::data_dir().join("library.json")
    }
}
