use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    api, config,
    errors::{Error, Result},
    types::PkceToken,
    warning,
};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Binds the callback server and serves it in the background.
///
/// Binding happens before this returns, so a taken port surfaces as an
/// error instead of a login that never completes.
pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> Result<JoinHandle<()>> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| Error::AuthFailed(format!("invalid SERVER_ADDRESS: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let app = router(state);

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    }))
}
