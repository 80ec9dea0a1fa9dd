//! Error types shared by the catalog clients, the store and the assembly
//! workflow.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} must be set")]
    MissingConfig(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} responded with {status}: {body}")]
    Api {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not authenticated. Run `setplaylist auth` first ({0})")]
    NotAuthenticated(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl Error {
    /// True for API responses with status 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status == StatusCode::NOT_FOUND,
            Error::NotFound(_) => true,
            _ => false,
        }
    }
}
