mod auth;
mod library;
mod profile;

pub use auth::TokenManager;
pub use library::Library;
pub use library::PlaylistDraft;
pub use library::SongDraft;
pub use profile::ProfileManager;
