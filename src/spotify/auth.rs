use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config,
    errors::{Error, Result},
    management::{ProfileManager, TokenManager},
    server::start_api_server,
    types::{ClientToken, PkceToken, Profile, Token},
    utils, warning,
};

use super::SpotifyClient;

const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self.refresh_token.unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the PKCE login: starts the callback server, sends the user to the
/// Spotify consent page and waits for the callback to deliver a token.
///
/// The token and the logged in profile are persisted on success.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Profile> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            state: state.clone(),
            token: None,
        });
    }

    let server = start_api_server(Arc::clone(&shared_state)).await?;

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri(),
        &code_challenge,
        &config::spotify_scope(),
        &state,
    );

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    let token = token.ok_or_else(|| Error::AuthFailed("login timed out".to_string()))?;

    let token_manager = TokenManager::new(token.clone());
    token_manager.persist().await?;

    let user = SpotifyClient::from_env(token.access_token).current_user().await?;
    let profile = Profile {
        spotify_user_id: user.id,
        display_name: user.display_name,
    };
    ProfileManager::new(profile.clone()).persist().await?;

    Ok(profile)
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

async fn post_token_form(client: &Client, token_url: &str, form: &[(&str, &str)]) -> Result<Token> {
    let res = client.post(token_url).form(form).send().await?;

    if !res.status().is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(Error::AuthFailed(body));
    }

    Ok(res.json::<TokenResponse>().await?.into_token())
}

pub async fn refresh_token(token_url: &str, client_id: &str, refresh_token: &str) -> Result<Token> {
    post_token_form(
        &Client::new(),
        token_url,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
        ],
    )
    .await
}

pub async fn exchange_code_pkce(
    token_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code: &str,
    verifier: &str,
) -> Result<Token> {
    post_token_form(
        &Client::new(),
        token_url,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ],
    )
    .await
}

/// App-only token for catalog reads, no user involved.
pub async fn request_client_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<ClientToken> {
    let res = Client::new()
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    if !res.status().is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(Error::AuthFailed(body));
    }

    Ok(res.json::<ClientToken>().await?)
}
