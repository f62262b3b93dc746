//! Configuration management for the XMPlaylist sync CLI.
//!
//! Configuration values come from environment variables, optionally loaded
//! from a `.env` file in the platform-specific local data directory
//! (`xmsync/.env`). The pipeline consumes its secrets through the explicit
//! [`Config`] struct so components can be constructed and tested without
//! touching the process environment; the remaining getters cover endpoint
//! URLs (with production defaults) and the OAuth helper flow.

use dotenv;
use std::{env, path::PathBuf};

/// Pipeline configuration, resolved once at startup.
///
/// The three credentials are required; everything else is optional and its
/// absence only restricts what the run can do (`playlist_id` missing means
/// "nothing to do", `user_id` missing means playlists cannot be created).
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub playlist_id: Option<String>,
    pub user_id: Option<String>,
}

impl Config {
    /// Builds a [`Config`] from the environment, naming the first missing
    /// required variable in the error.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            refresh_token: require("SPOTIFY_REFRESH_TOKEN")?,
            playlist_id: optional("SPOTIFY_PLAYLIST_ID"),
            user_id: optional("SPOTIFY_USER_ID"),
        })
    }
}

fn require(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{} must be set", name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Loads environment variables from `xmsync/.env` in the local data
/// directory, falling back to a `.env` file in the working directory.
/// A missing file is not an error; variables already present in the
/// process environment always win.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("xmsync/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    } else {
        dotenv::dotenv().ok();
    }
    Ok(())
}

/// Returns the default XMPlaylist station key, if one is configured.
pub fn default_station() -> Option<String> {
    optional("XMPLAYLIST_STATION")
}

/// Returns the XMPlaylist API base URL.
pub fn xmplaylist_apiurl() -> String {
    env::var("XMPLAYLIST_API_URL").unwrap_or_else(|_| "https://xmplaylist.com/api".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the scope requested during `xmsync auth`. Playlist modification
/// is all the pipeline ever needs.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE")
        .unwrap_or_else(|_| "playlist-modify-public playlist-modify-private".to_string())
}

/// Returns the Spotify API client ID for the OAuth helper flow.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI. This must match the redirect URI
/// registered in the Spotify application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}
