use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{config, errors::Result, spotify, types::PkceToken, types::Token, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    if params.contains_key("error") {
        return Html("<h4>Login was declined.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    if params.get("state") != Some(&pkce_state.state) {
        return Html("<h4>State mismatch, login rejected.</h4>");
    }

    match exchange(code, &pkce_state.code_verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}

async fn exchange(code: &str, verifier: &str) -> Result<Token> {
    spotify::auth::exchange_code_pkce(
        &config::spotify_apitoken_url(),
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri(),
        code,
        verifier,
    )
    .await
}
