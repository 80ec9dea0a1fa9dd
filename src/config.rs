//! Configuration management for setplaylist.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::errors::{Error, Result};

/// Loads environment variables from `setplaylist/.env` in the local data
/// directory.
///
/// The directory is created when missing so that users have an obvious place
/// to put the file. A missing `.env` is fine, the process environment alone
/// may carry the configuration.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/setplaylist/.env`
/// - macOS: `~/Library/Application Support/setplaylist/.env`
/// - Windows: `%LOCALAPPDATA%/setplaylist/.env`
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
    }
    Ok(())
}

/// Root directory for every file setplaylist persists.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("setplaylist");
    path
}

fn required(key: &'static str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingConfig(key)),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback server binds to.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", "127.0.0.1:8888")
}

/// Client id of the registered Spotify application.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret of the registered Spotify application.
///
/// Only the client-credentials flow needs it, PKCE logins work without.
pub fn spotify_client_secret() -> Option<String> {
    optional("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Callback URL registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    or_default("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback")
}

/// Space separated OAuth scopes requested at login.
pub fn spotify_scope() -> String {
    or_default(
        "SPOTIFY_API_AUTH_SCOPE",
        "playlist-modify-private playlist-read-private user-read-private playlist-read-collaborative",
    )
}

pub fn spotify_apiauth_url() -> String {
    or_default(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

pub fn spotify_apitoken_url() -> String {
    or_default(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Market used for top-track lookups.
pub fn spotify_market() -> String {
    or_default("SPOTIFY_MARKET", "US")
}

pub fn setlistfm_url() -> String {
    or_default("SETLIST_FM_BASE_URL", "https://api.setlist.fm/rest/1.0")
}

pub fn setlistfm_api_key() -> Result<String> {
    required("SETLIST_FM_API_KEY")
}

pub fn bandsintown_url() -> String {
    or_default("BANDSINTOWN_BASE_URL", "https://rest.bandsintown.com")
}

/// Bandsintown app id. Upcoming shows are skipped without one.
pub fn bandsintown_app_id() -> Option<String> {
    optional("BIT_APP_ID")
}
