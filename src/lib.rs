//! XMPlaylist → Spotify Sync CLI Library
//!
//! This library implements the playlist-population pipeline behind the
//! `xmsync` binary: fetch the current rotation of a SiriusXM station from
//! XMPlaylist, normalize the external links into Spotify track URIs, and
//! append those tracks to a Spotify playlist in capped batches.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `extract` - Track-link normalization into canonical Spotify URIs
//! - `management` - Local snapshot of the last successful station fetch
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `uploader` - Chunked batch delivery with per-chunk failure isolation
//! - `utils` - PKCE helpers
//! - `xmplaylist` - XMPlaylist station API client

pub mod api;
pub mod cli;
pub mod config;
pub mod extract;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod uploader;
pub mod utils;
pub mod xmplaylist;

/// Upper bound applied to every outbound HTTP call.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with exit code 1. Only for unrecoverable errors where the run cannot
/// continue.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark. Used for
/// recoverable issues the user should notice; the run continues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
