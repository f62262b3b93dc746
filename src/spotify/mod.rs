//! # Spotify Integration Module
//!
//! This module is the integration layer between xmsync and the Spotify Web
//! API. It covers the two concerns the pipeline needs from Spotify and
//! nothing more: obtaining a usable bearer token and writing tracks into
//! playlists.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Token acquisition:
//! - **Refresh Grant**: Exchanges the long-lived refresh credential from the
//!   environment for a short-lived access token before every upload session.
//!   Tokens are never written to disk.
//! - **PKCE Bootstrap**: The interactive `xmsync auth` flow (code
//!   verifier/challenge, local callback server, browser launch) that obtains
//!   the refresh credential in the first place.
//!
//! ### Playlist Module
//!
//! [`playlist`] - Playlist writes behind the
//! [`PlaylistStore`](crate::uploader::PlaylistStore) seam:
//! - **Bulk Append**: `POST /playlists/{id}/tracks` with up to 100 URIs
//! - **Creation**: `POST /users/{user_id}/playlists`
//! - **Fill Level**: `GET /playlists/{id}/tracks?limit=1` for the total count
//!
//! ## Error Handling
//!
//! Authentication failures are fatal to the whole run and surface as
//! [`auth::AuthError`]; playlist writes report
//! [`UploadError`](crate::uploader::UploadError) per request so the uploader
//! can isolate chunk failures. Every outbound call carries the crate-wide
//! request timeout.

pub mod auth;
pub mod playlist;
