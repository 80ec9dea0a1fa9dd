use serde::{Deserialize, Serialize};
use tabled::Tabled;

// Spotify

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: Page<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    pub duration_ms: u64,
    pub album: Option<TrackAlbum>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: Page<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

// setlist.fm

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FmArtist {
    pub mbid: String,
    pub name: String,
    #[serde(default)]
    pub sort_name: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FmArtistSearch {
    #[serde(default)]
    pub artist: Vec<FmArtist>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub items_per_page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FmCountry {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FmCity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub country: FmCountry,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FmVenue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: FmCity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmTour {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmSong {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cover: Option<FmArtist>,
    #[serde(default)]
    pub tape: bool,
    #[serde(default)]
    pub info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub encore: Option<u32>,
    #[serde(default)]
    pub song: Vec<FmSong>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FmSets {
    #[serde(default)]
    pub set: Vec<FmSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setlist {
    pub id: String,
    /// `dd-MM-yyyy`, as setlist.fm formats it.
    pub event_date: String,
    pub artist: FmArtist,
    #[serde(default)]
    pub venue: FmVenue,
    #[serde(default)]
    pub tour: Option<FmTour>,
    #[serde(default)]
    pub sets: FmSets,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetlistPage {
    #[serde(default)]
    pub setlist: Vec<Setlist>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub items_per_page: u32,
}

// Bandsintown

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventVenue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub datetime: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub venue: EventVenue,
    #[serde(default)]
    pub lineup: Vec<String>,
}

// Library records

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub spotify_user_id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub id: u64,
    pub spotify_artist_id: String,
    pub setlistfm_artist_id: Option<String>,
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: u64,
    pub spotify_song_id: String,
    pub spotify_song_uri: String,
    pub name: String,
    pub album_name: String,
    /// Whole seconds.
    pub duration: u64,
    pub band_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub setlistfm_setlist_id: String,
    pub name: String,
    pub description: String,
    pub tour_name: String,
    pub venue_name: String,
    pub event_date: String,
    pub venue_location: String,
    pub length: usize,
    pub duration: String,
    pub band_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSong {
    pub playlist_id: u64,
    pub song_id: u64,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: String,
    pub band_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPlaylist {
    pub user_id: String,
    pub playlist_id: u64,
    pub spotify_playlist_id: String,
    pub spotify_playlist_url: Option<String>,
}

// Tables

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub id: String,
    pub name: String,
    pub genres: String,
}

#[derive(Tabled)]
pub struct SetlistTableRow {
    pub id: String,
    pub show: String,
    pub songs: usize,
}

#[derive(Tabled)]
pub struct SongTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: u64,
    pub name: String,
    pub songs: usize,
    pub duration: String,
}

#[derive(Tabled)]
pub struct EventTableRow {
    pub date: String,
    pub venue: String,
    pub location: String,
}
