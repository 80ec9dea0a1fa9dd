use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(shared_state).await {
        Ok(profile) => success!(
            "Authenticated as {}",
            profile
                .display_name
                .as_deref()
                .unwrap_or(&profile.spotify_user_id)
        ),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
