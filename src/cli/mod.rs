//! # CLI Module
//!
//! User-facing command implementations for xmsync. Each command coordinates
//! the underlying source adapter, extractor, token provider and uploader,
//! and owns all console interaction.
//!
//! ## Commands
//!
//! ### Pipeline
//!
//! - [`sync`] - Runs the playlist-population pipeline once: fetch the
//!   station rotation, snapshot it, extract Spotify track URIs, obtain an
//!   access token, and deliver the tracks in chunks to either the configured
//!   playlist or a series of created ones.
//!
//! ### Inspection
//!
//! - [`tracks`] - Prints the station rotation as a table, either live from
//!   XMPlaylist or from the snapshot of the last successful fetch.
//!
//! ### Authentication
//!
//! - [`auth`] - Interactive OAuth 2.0 PKCE flow that produces the refresh
//!   credential the pipeline expects in the environment.
//!
//! ## Error Handling Philosophy
//!
//! Fatal stage failures (source blocked, token rejected) terminate the run
//! with a non-zero exit via the `error!` macro; recoverable conditions
//! (failed chunks, missing snapshot, capacity truncation) are warnings and
//! the command carries on with whatever remains doable.

mod auth;
mod sync;
mod tracks;

pub use auth::auth;
pub use sync::sync;
pub use tracks::tracks;
