//! # CLI Module
//!
//! User-facing commands. Each command wires the Spotify and setlist.fm
//! clients, the local [`Library`] and the [`assembly`](crate::assembly)
//! workflow together, and turns errors into terminal output.
//!
//! ## Usage
//!
//! ```bash
//! setplaylist auth                              # log in with Spotify
//! setplaylist search "phoebe bridgers"          # find the Spotify artist id
//! setplaylist band <artist-id>                  # setlists and upcoming shows
//! setplaylist setlist show <artist-id> <setlist-id>
//! setplaylist setlist create <artist-id> <setlist-id>
//! setplaylist hype create <artist-id>
//! setplaylist favorite <artist-id>              # toggle a favorite
//! setplaylist playlists --mine
//! ```

mod auth;
mod band;
mod favorites;
mod hype;
mod playlists;
mod search;
mod setlist;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    management::{Library, ProfileManager, TokenManager},
    setlistfm::SetlistFmClient,
    spotify::SpotifyClient,
};

pub use auth::auth;
pub use band::band;
pub use favorites::list_favorites;
pub use favorites::toggle_favorite;
pub use hype::create_hype;
pub use hype::show_hype;
pub use playlists::list_playlists;
pub use search::search;
pub use setlist::create_setlist;
pub use setlist::show_setlist;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Spotify client authorized as the logged in user.
async fn user_client() -> SpotifyClient {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!("Failed to load token. Please run setplaylist auth\n Error: {}", e),
    };

    match token_mgr.get_valid_token().await {
        Ok(token) => SpotifyClient::from_env(token),
        Err(e) => error!("Failed to refresh token. Please run setplaylist auth\n Error: {}", e),
    }
}

fn archive_client() -> SetlistFmClient {
    match SetlistFmClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot reach setlist.fm: {}", e),
    }
}

/// setlist.fm client when a key is configured. Hype playlists work without.
fn optional_archive_client() -> Option<SetlistFmClient> {
    SetlistFmClient::from_env().ok()
}

async fn current_user() -> String {
    match ProfileManager::load().await {
        Ok(profile) => profile.user_id().to_string(),
        Err(e) => error!("No Spotify profile found. Please run setplaylist auth\n Error: {}", e),
    }
}

async fn load_library() -> Library {
    match Library::load().await {
        Ok(library) => library,
        Err(e) => error!("Failed to load library: {}", e),
    }
}
