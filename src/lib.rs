//! setplaylist library
//!
//! Turns concert setlists from setlist.fm into Spotify playlists. The
//! library reconciles an artist across both services, caches bands, songs
//! and playlists in a local store and assembles playlists through the
//! Spotify Web API.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `assembly` - the setlist and hype playlist workflow
//! - `bandsintown` - upcoming shows
//! - `catalog` - traits for the streaming catalog and the setlist archive
//! - `cli` - command-line interface implementations
//! - `config` - configuration from environment variables and `.env`
//! - `errors` - crate error type
//! - `management` - token, profile and library persistence
//! - `reconcile` - artist matching and playlist naming rules
//! - `server` - local HTTP server for OAuth callbacks
//! - `setlistfm` - setlist.fm client
//! - `spotify` - Spotify Web API client
//! - `types` - data structures and type definitions
//! - `utils` - PKCE helpers

pub mod api;
pub mod assembly;
pub mod bandsintown;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod reconcile;
pub mod server;
pub mod setlistfm;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a status line with a blue "o" marker.
///
/// ```
/// info!("Resolving {} songs", titles.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a green check mark line for a finished step.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line to stderr and exits with status 1.
///
/// Only the CLI layer uses this. Library code returns
/// [`errors::Error`] instead.
///
/// ```
/// error!("Failed to load library: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow warning line to stderr for problems the current
/// operation survives, such as a song the catalog cannot find.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
