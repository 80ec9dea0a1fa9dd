//! # API Module
//!
//! HTTP endpoints served by the local callback server during
//! `setplaylist auth`:
//!
//! - [`callback`] - completes the Spotify OAuth 2.0 PKCE flow by exchanging
//!   the authorization code for a token. The `state` parameter must echo the
//!   value sent with the authorize request.
//! - [`health`] - status and version, handy when checking that the server
//!   came up on the configured address.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
