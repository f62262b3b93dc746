//! Chunked batch delivery of track URIs into playlists.
//!
//! The uploader enforces the two Spotify-side limits independently: at most
//! 100 tracks per bulk-append request and at most 10,000 tracks per
//! playlist. Delivery is best-effort with per-chunk isolation: one rejected
//! chunk is recorded and logged, the remaining chunks still run. The caller
//! gets a structured [`UploadReport`] instead of having to scrape console
//! output to learn what happened.

use std::{fmt, time::Duration};

use reqwest::StatusCode;
use tokio::time::sleep;

use crate::{types::TrackUri, warning};

/// Bulk-append request ceiling of the Spotify Web API.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Total track capacity of a single Spotify playlist.
pub const MAX_TRACKS_PER_PLAYLIST: usize = 10_000;

#[derive(Debug)]
pub enum UploadError {
    Rejected(StatusCode),
    Network(reqwest::Error),
    Config(&'static str),
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Network(err)
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Rejected(status) => write!(f, "request rejected with status {}", status),
            UploadError::Network(err) => write!(f, "network error: {}", err),
            UploadError::Config(msg) => write!(f, "{}", msg),
        }
    }
}

/// Advisory pacing between chunk requests.
///
/// Not a backpressure or retry mechanism; the fixed delay merely keeps a
/// long run of bulk-appends from tripping upstream rate limiting. The delay
/// is configured independently of the upload logic, and [`Pacer::none`]
/// disables it entirely for tests.
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Pacer { delay }
    }

    pub fn none() -> Self {
        Pacer::new(Duration::ZERO)
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        // 100ms between bulk-appends
        Pacer::new(Duration::from_millis(100))
    }
}

/// Outcome of a single bulk-append request.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub index: usize,
    pub size: usize,
    pub error: Option<UploadError>,
}

/// Structured result of filling one playlist.
///
/// `added` counts tracks delivered by successful chunks, `dropped` counts
/// tracks cut by the per-playlist capacity limit, and `chunks` records every
/// attempted request in order.
#[derive(Debug)]
pub struct UploadReport {
    pub added: usize,
    pub dropped: usize,
    pub chunks: Vec<ChunkOutcome>,
}

impl UploadReport {
    pub fn failed(&self) -> usize {
        self.chunks.iter().filter(|c| c.error.is_some()).count()
    }

    pub fn is_partial(&self) -> bool {
        self.failed() > 0
    }
}

/// Destination-service seam used by the uploader.
///
/// The production implementation is
/// [`SpotifyStore`](crate::spotify::playlist::SpotifyStore); tests substitute
/// recording doubles to observe chunking and failure isolation without
/// network access.
#[allow(async_fn_in_trait)]
pub trait PlaylistStore {
    /// Appends the given URIs (at most [`MAX_TRACKS_PER_REQUEST`]) to the
    /// playlist in one bulk request.
    async fn append(&mut self, playlist_id: &str, uris: &[TrackUri]) -> Result<(), UploadError>;

    /// Creates a playlist with the given name and returns its id.
    async fn create(&mut self, name: &str) -> Result<String, UploadError>;

    /// Returns the number of tracks currently in the playlist.
    async fn track_count(&mut self, playlist_id: &str) -> Result<usize, UploadError>;
}

/// Appends the URIs to one playlist in capped, ordered chunks.
///
/// Input beyond [`MAX_TRACKS_PER_PLAYLIST`] is truncated with a single
/// warning; the overflow shows up as `dropped` in the report. A chunk
/// failure does not abort the run: it is logged, recorded, and the next
/// chunk is attempted. The pacer runs between consecutive requests.
pub async fn fill_playlist<S: PlaylistStore>(
    store: &mut S,
    playlist_id: &str,
    uris: &[TrackUri],
    pacer: &Pacer,
) -> UploadReport {
    let mut report = UploadReport {
        added: 0,
        dropped: 0,
        chunks: Vec::new(),
    };

    let mut uris = uris;
    if uris.len() > MAX_TRACKS_PER_PLAYLIST {
        report.dropped = uris.len() - MAX_TRACKS_PER_PLAYLIST;
        warning!(
            "Playlist capacity reached: only the first {} of {} tracks will be added.",
            MAX_TRACKS_PER_PLAYLIST,
            uris.len()
        );
        uris = &uris[..MAX_TRACKS_PER_PLAYLIST];
    }

    for (index, chunk) in uris.chunks(MAX_TRACKS_PER_REQUEST).enumerate() {
        if index > 0 {
            pacer.pause().await;
        }

        match store.append(playlist_id, chunk).await {
            Ok(()) => {
                report.added += chunk.len();
                report.chunks.push(ChunkOutcome {
                    index,
                    size: chunk.len(),
                    error: None,
                });
            }
            Err(e) => {
                warning!("Failed to add chunk {}: {}", index + 1, e);
                report.chunks.push(ChunkOutcome {
                    index,
                    size: chunk.len(),
                    error: Some(e),
                });
            }
        }
    }

    report
}

/// Spreads an unbounded track list across numbered playlists.
///
/// For each partition a playlist named `"<base> Part <n>"` is created, its
/// current fill level is re-queried from the service (tolerating concurrent
/// external modification at the cost of one extra read), and a prefix of
/// the remaining input sized to the free capacity is delegated to
/// [`fill_playlist`]. Creation or count-query failures are fatal to the
/// remainder; chunk failures inside a partition stay non-fatal.
pub async fn spread_across_playlists<S: PlaylistStore>(
    store: &mut S,
    base_name: &str,
    uris: &[TrackUri],
    pacer: &Pacer,
) -> Result<Vec<(String, UploadReport)>, UploadError> {
    let mut filled = Vec::new();
    let mut rest = uris;
    let mut part = 1usize;

    while !rest.is_empty() {
        let name = format!("{} Part {}", base_name, part);
        part += 1;

        let playlist_id = store.create(&name).await?;
        let occupied = store.track_count(&playlist_id).await?;
        let capacity = MAX_TRACKS_PER_PLAYLIST.saturating_sub(occupied);
        if capacity == 0 {
            continue;
        }

        let take = capacity.min(rest.len());
        let (head, tail) = rest.split_at(take);
        let report = fill_playlist(store, &playlist_id, head, pacer).await;
        filled.push((playlist_id, report));
        rest = tail;
    }

    Ok(filled)
}
