use std::path::{Path, PathBuf};

use crate::{
    config,
    errors::{Error, Result},
    types::Profile,
};

/// The Spotify account that logged in through `setplaylist auth`.
pub struct ProfileManager {
    profile: Profile,
    path: PathBuf,
}

impl ProfileManager {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            path: Self::profile_path(),
        }
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::profile_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| Error::NotAuthenticated(e.to_string()))?;
        let profile: Profile = serde_json::from_str(&content)?;
        Ok(Self {
            profile,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.profile)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn user_id(&self) -> &str {
        &self.profile.spotify_user_id
    }

    fn profile_path() -> PathBuf {
        config::data_dir().join("cache/profile.json")
    }
}
