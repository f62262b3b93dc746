//! Normalization of XMPlaylist track records into Spotify track URIs.
//!
//! XMPlaylist reports each track with a list of external links tagged by
//! site. The extractor scans that list in order and keeps the first Spotify
//! link that yields a valid track id; ties are broken by position, never by
//! confidence. Cross-record duplicates are passed through unchanged unless
//! the caller opts into [`dedupe_track_uris`].

use std::collections::HashSet;

use crate::types::{StationTrack, TrackUri};

/// Site tag XMPlaylist uses for Spotify links.
pub const SPOTIFY_SITE: &str = "spotify";

/// Maps station records to Spotify track URIs, order-preserving.
///
/// Each record contributes at most one URI (see [`first_spotify_uri`]);
/// records without a usable Spotify link contribute nothing. The output
/// length is therefore bounded by the number of input records, and the
/// relative order of the input records is kept.
pub fn extract_track_uris(records: &[StationTrack]) -> Vec<TrackUri> {
    records.iter().filter_map(first_spotify_uri).collect()
}

/// Returns the URI of the first link in the record that is tagged as
/// Spotify and carries a parseable share URL. Later links of the record are
/// ignored once a match is found; a Spotify-tagged link whose URL yields no
/// id is skipped and the scan continues.
pub fn first_spotify_uri(record: &StationTrack) -> Option<TrackUri> {
    record.links.iter().find_map(|link| {
        if link.site != SPOTIFY_SITE {
            return None;
        }
        uri_from_share_url(&link.url)
    })
}

/// Normalizes a Spotify share URL into a canonical track URI.
///
/// Both known shapes resolve to the same URI: a bare id suffix
/// (`https://open.spotify.com/track/ABC123`) and an id followed by a query
/// string (`.../track/ABC123?si=...`). The id must be non-empty ASCII
/// alphanumeric; anything else returns `None`.
pub fn uri_from_share_url(url: &str) -> Option<TrackUri> {
    let tail = url.rsplit('/').next()?;
    let id = tail.split('?').next().unwrap_or_default();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(TrackUri::new(id))
}

/// Removes cross-record duplicate URIs, keeping the first occurrence.
/// Opt-in: station rotations repeat tracks, and whether a playlist should
/// mirror that is the caller's choice.
pub fn dedupe_track_uris(uris: &mut Vec<TrackUri>) {
    let mut seen = HashSet::new();
    uris.retain(|uri| seen.insert(uri.clone()));
}
