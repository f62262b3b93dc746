//! # API Module
//!
//! HTTP endpoints for the temporary local web server that backs the
//! `xmsync auth` flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the OAuth redirect from Spotify's authorization
//!   server and completes the PKCE code exchange.
//! - [`health`] - Health check returning application status and version,
//!   handy for verifying the callback server actually came up.
//!
//! ## Architecture
//!
//! Built on [Axum](https://docs.rs/axum); each endpoint is an async handler
//! wired into the router in [`crate::server`]. The callback handler shares
//! the PKCE verifier with the CLI flow through an `Arc<Mutex<_>>` extension.
//!
//! ## Security Considerations
//!
//! The server only runs for the duration of the auth flow, binds to the
//! configured local address, and never sees the client secret; the PKCE
//! verifier protects the code exchange.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
