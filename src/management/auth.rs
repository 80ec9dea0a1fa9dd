use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{
    config,
    errors::{Error, Result},
    spotify,
    types::Token,
};

/// Seconds before expiry at which a token counts as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::token_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| Error::NotAuthenticated(e.to_string()))?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.is_expired(Utc::now().timestamp() as u64) {
            let refreshed = spotify::auth::refresh_token(
                &config::spotify_apitoken_url(),
                &config::spotify_client_id()?,
                &self.token.refresh_token,
            )
            .await?;
            self.replace(refreshed);
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    /// Swaps in a refreshed token. Spotify may omit the refresh token on
    /// refresh, in which case the old one stays valid.
    pub fn replace(&mut self, mut token: Token) {
        if token.refresh_token.is_empty() {
            token.refresh_token = self.token.refresh_token.clone();
        }
        self.token = token;
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
