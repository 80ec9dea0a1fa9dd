//! Playlist assembly: reconciles an artist across the streaming catalog and
//! the setlist archive, caches what it learns in the [`Library`], and turns
//! a setlist (or an artist's top tracks) into a remote playlist.
//!
//! Remote calls happen in a fixed order. Every song is resolved before the
//! playlist record is written, so an aborted run leaves no half-filled
//! playlist behind. The record and its songs are stored before the remote
//! playlist exists, and a second run for the same setlist reuses them
//! instead of searching again. Songs the catalog cannot resolve are
//! reported, not fatal.

use reqwest::StatusCode;

use crate::{
    catalog::{Catalog, SetlistArchive},
    errors::{Error, Result},
    management::{Library, PlaylistDraft, SongDraft},
    reconcile,
    types::{Artist, Band, FmArtist, Playlist, Setlist, SetlistPage, Track},
    warning,
};

/// What `band` shows: the catalog artist, its setlist.fm counterpart and a
/// page of setlists.
#[derive(Debug, Clone)]
pub struct BandOverview {
    pub artist: Artist,
    pub setlistfm_artist_id: Option<String>,
    pub setlists: SetlistPage,
    pub stored_band: Option<Band>,
}

/// A playlist as it would be (or was) created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistPreview {
    pub name: String,
    pub description: String,
    pub tour_name: String,
    pub venue_name: String,
    pub event_date: String,
    pub venue_location: String,
    pub songs: Vec<String>,
    /// Known once the songs were resolved.
    pub duration: Option<String>,
    pub saved: bool,
}

impl PlaylistPreview {
    fn from_stored(playlist: &Playlist, songs: Vec<String>) -> Self {
        Self {
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            tour_name: playlist.tour_name.clone(),
            venue_name: playlist.venue_name.clone(),
            event_date: playlist.event_date.clone(),
            venue_location: playlist.venue_location.clone(),
            songs,
            duration: Some(playlist.duration.clone()),
            saved: true,
        }
    }

    fn from_draft(draft: PlaylistDraft, songs: Vec<String>) -> Self {
        Self {
            name: draft.name,
            description: draft.description,
            tour_name: draft.tour_name,
            venue_name: draft.venue_name,
            event_date: draft.event_date,
            venue_location: draft.venue_location,
            songs,
            duration: None,
            saved: false,
        }
    }
}

/// Outcome of materializing a playlist on the streaming account.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub playlist: Playlist,
    pub spotify_playlist_id: String,
    pub spotify_playlist_url: Option<String>,
    pub uris: Vec<String>,
    /// Setlist titles the catalog search could not resolve.
    pub not_included: Vec<String>,
    /// The stored playlist was reused without searching again.
    pub reused: bool,
}

pub struct PlaylistAssembler<'a, C, A> {
    catalog: &'a C,
    archive: &'a A,
    library: &'a mut Library,
}

fn setlist_draft(band: &Band, setlist: &Setlist) -> PlaylistDraft {
    let name = reconcile::setlist_playlist_name(&band.name, setlist);
    PlaylistDraft {
        setlistfm_setlist_id: setlist.id.clone(),
        description: reconcile::setlist_playlist_description(&name, setlist),
        name,
        tour_name: reconcile::tour_name(setlist),
        venue_name: setlist.venue.name.clone(),
        event_date: setlist.event_date.clone(),
        venue_location: reconcile::venue_location(&setlist.venue),
        band_id: band.id,
    }
}

fn hype_draft(band: &Band) -> PlaylistDraft {
    let name = reconcile::hype_playlist_name(&band.name);
    PlaylistDraft {
        setlistfm_setlist_id: reconcile::HYPE_SETLIST_ID.to_string(),
        description: name.clone(),
        name,
        tour_name: reconcile::NO_TOUR.to_string(),
        venue_name: reconcile::HYPE_VENUE.to_string(),
        event_date: reconcile::HYPE_DATE.to_string(),
        venue_location: reconcile::HYPE_LOCATION.to_string(),
        band_id: band.id,
    }
}

fn song_draft(track: &Track, band_id: u64) -> SongDraft {
    let uri = if track.uri.is_empty() {
        reconcile::track_uri(&track.id)
    } else {
        track.uri.clone()
    };

    SongDraft {
        spotify_song_id: track.id.clone(),
        spotify_song_uri: uri,
        name: track.name.clone(),
        album_name: track
            .album
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        duration: reconcile::track_seconds(track.duration_ms),
        band_id,
    }
}

fn is_unauthorized(err: &Error) -> bool {
    matches!(err, Error::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
}

impl<'a, C, A> PlaylistAssembler<'a, C, A>
where
    C: Catalog,
    A: SetlistArchive,
{
    pub fn new(catalog: &'a C, archive: &'a A, library: &'a mut Library) -> Self {
        Self {
            catalog,
            archive,
            library,
        }
    }

    /// Finds the setlist.fm artist for a catalog artist name.
    pub async fn match_archive_artist(&self, name: &str) -> Result<Option<FmArtist>> {
        let candidates = self.archive.search_artists(name).await?;
        Ok(reconcile::match_setlist_artist(&candidates, name).cloned())
    }

    /// Returns the stored band for a Spotify artist, creating it when needed.
    ///
    /// `setlistfm_hint` is the archive id the caller already knows (e.g. from
    /// a setlist), which saves the name search.
    pub async fn resolve_band(
        &mut self,
        spotify_artist_id: &str,
        setlistfm_hint: Option<&str>,
    ) -> Result<Band> {
        if let Some(band) = self.library.band_by_spotify_id(spotify_artist_id).cloned() {
            if band.setlistfm_artist_id.is_none() && setlistfm_hint.is_some() {
                return Ok(self.library.insert_band(
                    spotify_artist_id,
                    setlistfm_hint.map(str::to_string),
                    &band.name,
                    band.photo.clone(),
                ));
            }
            return Ok(band);
        }

        let artist = self.catalog.artist(spotify_artist_id).await?;

        let setlistfm_artist_id = match setlistfm_hint {
            Some(hint) => Some(hint.to_string()),
            None => match self.match_archive_artist(&artist.name).await {
                Ok(matched) => matched.map(|a| a.mbid),
                Err(e) => {
                    warning!("setlist.fm lookup for {} failed: {}", artist.name, e);
                    None
                }
            },
        };

        Ok(self.library.insert_band(
            spotify_artist_id,
            setlistfm_artist_id,
            &artist.name,
            reconcile::first_image(&artist),
        ))
    }

    /// Artist details with one page of setlists. Nothing is stored.
    pub async fn band_overview(&self, spotify_artist_id: &str, page: u32) -> Result<BandOverview> {
        let stored_band = self.library.band_by_spotify_id(spotify_artist_id).cloned();
        let artist = self.catalog.artist(spotify_artist_id).await?;

        let setlistfm_artist_id = match stored_band
            .as_ref()
            .and_then(|b| b.setlistfm_artist_id.clone())
        {
            Some(mbid) => Some(mbid),
            None => self.match_archive_artist(&artist.name).await?.map(|a| a.mbid),
        };

        let setlists = match &setlistfm_artist_id {
            Some(mbid) => self.archive.artist_setlists(mbid, page.max(1)).await?,
            None => SetlistPage::default(),
        };

        Ok(BandOverview {
            artist,
            setlistfm_artist_id,
            setlists,
            stored_band,
        })
    }

    fn stored_preview(&self, spotify_artist_id: &str, setlist_id: &str) -> Option<PlaylistPreview> {
        let band = self.library.band_by_spotify_id(spotify_artist_id)?;
        let playlist = self.library.find_playlist(setlist_id, band.id)?;
        let songs = self
            .library
            .playlist_songs(playlist.id)
            .into_iter()
            .map(|s| s.name.clone())
            .collect();
        Some(PlaylistPreview::from_stored(playlist, songs))
    }

    async fn band_name(&self, spotify_artist_id: &str) -> Result<String> {
        match self.library.band_by_spotify_id(spotify_artist_id) {
            Some(band) => Ok(band.name.clone()),
            None => Ok(self.catalog.artist(spotify_artist_id).await?.name),
        }
    }

    /// The playlist a setlist would become. Nothing is stored.
    pub async fn preview_setlist(
        &self,
        spotify_artist_id: &str,
        setlist_id: &str,
    ) -> Result<PlaylistPreview> {
        if let Some(preview) = self.stored_preview(spotify_artist_id, setlist_id) {
            return Ok(preview);
        }

        let name = self.band_name(spotify_artist_id).await?;
        let setlist = self.archive.setlist(setlist_id).await?;
        let band = Band {
            id: 0,
            spotify_artist_id: spotify_artist_id.to_string(),
            setlistfm_artist_id: Some(setlist.artist.mbid.clone()),
            name,
            photo: None,
        };

        let songs = reconcile::setlist_songs(&setlist)
            .into_iter()
            .map(reconcile::display_title)
            .collect();

        Ok(PlaylistPreview::from_draft(
            setlist_draft(&band, &setlist),
            songs,
        ))
    }

    /// The hype playlist of an artist. Nothing is stored.
    pub async fn preview_hype(&self, spotify_artist_id: &str) -> Result<PlaylistPreview> {
        if let Some(preview) = self.stored_preview(spotify_artist_id, reconcile::HYPE_SETLIST_ID) {
            return Ok(preview);
        }

        let name = self.band_name(spotify_artist_id).await?;
        let top_tracks = self.catalog.top_tracks(spotify_artist_id).await?;
        let band = Band {
            id: 0,
            spotify_artist_id: spotify_artist_id.to_string(),
            setlistfm_artist_id: None,
            name,
            photo: None,
        };

        let songs = reconcile::hype_order(&top_tracks)
            .into_iter()
            .map(|t| t.name)
            .collect();

        Ok(PlaylistPreview::from_draft(hype_draft(&band), songs))
    }

    fn stored_uris(&self, playlist_id: u64) -> Vec<String> {
        self.library
            .playlist_songs(playlist_id)
            .into_iter()
            .map(|s| s.spotify_song_uri.clone())
            .collect()
    }

    /// Searches every title in order. Nothing is stored.
    ///
    /// Misses and failed searches end up in the returned `not_included`
    /// list. An unauthorized response aborts, every following search would
    /// fail the same way.
    async fn resolve_titles(
        &self,
        band_name: &str,
        titles: Vec<String>,
    ) -> Result<(Vec<Track>, Vec<String>)> {
        let mut tracks = Vec::new();
        let mut not_included = Vec::new();

        for title in titles {
            match self.catalog.search_track(&title, band_name).await {
                Ok(Some(track)) => tracks.push(track),
                Ok(None) => not_included.push(title),
                Err(e) if is_unauthorized(&e) => return Err(e),
                Err(e) => {
                    warning!("Search for '{}' failed: {}", title, e);
                    not_included.push(title);
                }
            }
        }

        Ok((tracks, not_included))
    }

    /// Stores the tracks as the playlist's songs, in order, and updates its
    /// length and duration. Returns the URIs.
    fn link_tracks(&mut self, band: &Band, playlist_id: u64, tracks: &[Track]) -> Vec<String> {
        let mut uris = Vec::new();
        let mut total_seconds = 0;

        for track in tracks {
            let song = self.library.find_or_insert_song(song_draft(track, band.id));
            self.library.append_playlist_song(playlist_id, song.id);
            total_seconds += song.duration;
            uris.push(song.spotify_song_uri);
        }

        self.library.update_playlist_stats(
            playlist_id,
            uris.len(),
            reconcile::format_duration(total_seconds),
        );
        uris
    }

    /// Creates the remote playlist, records it for the user and fills it.
    async fn materialize(
        &mut self,
        user_id: &str,
        playlist_id: u64,
        uris: Vec<String>,
        not_included: Vec<String>,
        reused: bool,
    ) -> Result<AssemblyReport> {
        let playlist = self
            .library
            .playlist(playlist_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Playlist {}", playlist_id)))?;
        self.library.persist().await?;

        let remote = self
            .catalog
            .create_playlist(user_id, &playlist.name, &playlist.description)
            .await?;

        self.library.link_user_playlist(
            user_id,
            playlist.id,
            &remote.id,
            remote.external_urls.spotify.clone(),
        );
        self.library.persist().await?;

        if !uris.is_empty() {
            self.catalog.add_tracks(&remote.id, &uris).await?;
        }

        Ok(AssemblyReport {
            playlist,
            spotify_playlist_id: remote.id,
            spotify_playlist_url: remote.external_urls.spotify,
            uris,
            not_included,
            reused,
        })
    }

    /// Turns a setlist into a playlist on `user_id`'s account.
    pub async fn create_setlist_playlist(
        &mut self,
        user_id: &str,
        spotify_artist_id: &str,
        setlist_id: &str,
    ) -> Result<AssemblyReport> {
        let stored = self
            .library
            .band_by_spotify_id(spotify_artist_id)
            .and_then(|band| self.library.find_playlist(setlist_id, band.id))
            .map(|p| p.id);

        if let Some(playlist_id) = stored {
            let uris = self.stored_uris(playlist_id);
            return self
                .materialize(user_id, playlist_id, uris, Vec::new(), true)
                .await;
        }

        let setlist = self.archive.setlist(setlist_id).await?;
        let band = self
            .resolve_band(spotify_artist_id, Some(&setlist.artist.mbid))
            .await?;

        let titles = reconcile::setlist_songs(&setlist)
            .into_iter()
            .map(|s| s.name.clone())
            .collect();
        let (tracks, not_included) = self.resolve_titles(&band.name, titles).await?;

        let playlist = self.library.insert_playlist(setlist_draft(&band, &setlist));
        let uris = self.link_tracks(&band, playlist.id, &tracks);

        self.materialize(user_id, playlist.id, uris, not_included, false)
            .await
    }

    /// Builds the hype playlist from the artist's top tracks on `user_id`'s
    /// account.
    pub async fn create_hype_playlist(
        &mut self,
        user_id: &str,
        spotify_artist_id: &str,
    ) -> Result<AssemblyReport> {
        let band = self.resolve_band(spotify_artist_id, None).await?;

        if let Some(playlist_id) = self
            .library
            .find_playlist(reconcile::HYPE_SETLIST_ID, band.id)
            .map(|p| p.id)
        {
            let uris = self.stored_uris(playlist_id);
            return self
                .materialize(user_id, playlist_id, uris, Vec::new(), true)
                .await;
        }

        let top_tracks = self.catalog.top_tracks(spotify_artist_id).await?;
        let playlist = self.library.insert_playlist(hype_draft(&band));
        let uris = self.link_tracks(&band, playlist.id, &reconcile::hype_order(&top_tracks));

        self.materialize(user_id, playlist.id, uris, Vec::new(), false)
            .await
    }

    /// Adds or removes the artist from the user's favorites. Returns the
    /// band and whether it is a favorite now.
    pub async fn toggle_favorite(
        &mut self,
        user_id: &str,
        spotify_artist_id: &str,
    ) -> Result<(Band, bool)> {
        let band = self.resolve_band(spotify_artist_id, None).await?;
        let favorite = self.library.toggle_favorite(user_id, band.id);
        self.library.persist().await?;
        Ok((band, favorite))
    }
}
