//! Rules that reconcile the streaming catalog with the setlist archive:
//! artist matching, setlist flattening, hype ordering and the display
//! strings stored alongside playlists.

use crate::types::{Artist, FmArtist, FmSong, FmVenue, Setlist};

/// Setlist id under which hype playlists are stored.
pub const HYPE_SETLIST_ID: &str = "Hype";

pub const HYPE_VENUE: &str = "Wherever you'd like!";
pub const HYPE_DATE: &str = "Whenever you'd like!";
pub const HYPE_LOCATION: &str = "Your speakers";

/// Placeholder for a missing tour name.
pub const NO_TOUR: &str = "N/A";

/// Positions of an artist's top tracks, in hype-playlist order.
pub const HYPE_ORDER: [usize; 10] = [1, 3, 5, 7, 9, 8, 6, 4, 2, 0];

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Picks the setlist.fm artist that corresponds to a streaming-catalog name.
///
/// The archive sorts by relevance, so a matching first candidate wins.
/// Otherwise the last matching candidate in the list is taken. Only case and
/// whitespace differences are tolerated; "The Band" and "Band" stay distinct.
pub fn match_setlist_artist<'a>(candidates: &'a [FmArtist], name: &str) -> Option<&'a FmArtist> {
    if let Some(first) = candidates.first() {
        if names_match(&first.name, name) {
            return Some(first);
        }
    }

    candidates.iter().rev().find(|c| names_match(&c.name, name))
}

/// All playable songs of a setlist in performance order, encores included.
pub fn setlist_songs(setlist: &Setlist) -> Vec<&FmSong> {
    setlist
        .sets
        .set
        .iter()
        .flat_map(|set| set.song.iter())
        .filter(|song| !song.name.trim().is_empty())
        .collect()
}

/// Title shown to the user. Covers name the original artist.
pub fn display_title(song: &FmSong) -> String {
    match &song.cover {
        Some(original) => format!("{} [Cover - {}]", song.name, original.name),
        None => song.name.clone(),
    }
}

pub fn format_setlist_display(setlist: &Setlist) -> String {
    let venue_name = if setlist.venue.name.is_empty() {
        "Venue Unknown"
    } else {
        setlist.venue.name.as_str()
    };
    let city = &setlist.venue.city;
    let state_code = city.state_code.clone().unwrap_or_default();

    format!(
        "{venue_name} - {date} - {city}, {state_code}, {country}",
        date = setlist.event_date,
        city = city.name,
        country = city.country.code,
    )
}

/// `"City, State"`, falling back to the country when no state is known.
pub fn venue_location(venue: &FmVenue) -> String {
    let city = &venue.city;
    let region = city
        .state
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| city.country.name.clone());

    [city.name.as_str(), region.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn tour_name(setlist: &Setlist) -> String {
    setlist
        .tour
        .as_ref()
        .map(|t| t.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| NO_TOUR.to_string())
}

pub fn setlist_playlist_name(band_name: &str, setlist: &Setlist) -> String {
    format!("{} @ {}", band_name, setlist.venue.name)
}

pub fn setlist_playlist_description(playlist_name: &str, setlist: &Setlist) -> String {
    format!(
        "{} in {} on {}. Tour - {}",
        playlist_name,
        venue_location(&setlist.venue),
        setlist.event_date,
        tour_name(setlist)
    )
}

pub fn hype_playlist_name(band_name: &str) -> String {
    format!("{} Hype-Up", band_name)
}

/// Re-orders top tracks by [`HYPE_ORDER`], skipping positions the catalog
/// did not fill.
pub fn hype_order<T: Clone>(top_tracks: &[T]) -> Vec<T> {
    HYPE_ORDER
        .iter()
        .filter_map(|&i| top_tracks.get(i).cloned())
        .collect()
}

pub fn track_seconds(duration_ms: u64) -> u64 {
    duration_ms / 1000
}

pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}hrs. {}min. {}sec.", hours, minutes, seconds)
}

pub fn track_uri(spotify_song_id: &str) -> String {
    format!("spotify:track:{}", spotify_song_id)
}

pub fn first_image(artist: &Artist) -> Option<String> {
    artist.images.first().map(|i| i.url.clone())
}

/// Escapes an artist name for a Bandsintown path segment.
///
/// Bandsintown wants a few characters double-encoded before the usual
/// percent-encoding of the segment.
pub fn bandsintown_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    let mut buf = [0u8; 4];

    for c in name.chars() {
        match c {
            '/' => escaped.push_str("%252F"),
            '?' => escaped.push_str("%253F"),
            '*' => escaped.push_str("%252A"),
            '"' => escaped.push_str("%27C"),
            _ => escaped.push_str(&urlencoding::encode(c.encode_utf8(&mut buf))),
        }
    }

    escaped
}
