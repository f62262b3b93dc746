use std::collections::VecDeque;

use reqwest::StatusCode;
use xmsync::types::TrackUri;
use xmsync::uploader::{
    MAX_TRACKS_PER_PLAYLIST, MAX_TRACKS_PER_REQUEST, Pacer, PlaylistStore, UploadError,
    fill_playlist, spread_across_playlists,
};

// Recording double for the destination service: observes chunking and
// failure isolation without any network access.
struct RecordingStore {
    // every append attempt as (playlist_id, chunk size), including rejected ones
    attempts: Vec<(String, usize)>,
    // successful appends only
    appended: Vec<(String, Vec<TrackUri>)>,
    created: Vec<String>,
    // append call indexes to reject with a non-2xx status
    fail_on: Vec<usize>,
    // occupied counts handed out per track_count call; empty playlists after that
    occupied: VecDeque<usize>,
    next_id: usize,
}

impl RecordingStore {
    fn new() -> Self {
        RecordingStore {
            attempts: Vec::new(),
            appended: Vec::new(),
            created: Vec::new(),
            fail_on: Vec::new(),
            occupied: VecDeque::new(),
            next_id: 0,
        }
    }

    fn failing_on(fail_on: Vec<usize>) -> Self {
        RecordingStore {
            fail_on,
            ..Self::new()
        }
    }

    fn with_occupied(occupied: Vec<usize>) -> Self {
        RecordingStore {
            occupied: occupied.into(),
            ..Self::new()
        }
    }

    fn tracks_in(&self, playlist_id: &str) -> usize {
        self.appended
            .iter()
            .filter(|(id, _)| id == playlist_id)
            .map(|(_, uris)| uris.len())
            .sum()
    }
}

impl PlaylistStore for RecordingStore {
    async fn append(&mut self, playlist_id: &str, uris: &[TrackUri]) -> Result<(), UploadError> {
        let call = self.attempts.len();
        self.attempts.push((playlist_id.to_string(), uris.len()));
        if self.fail_on.contains(&call) {
            return Err(UploadError::Rejected(StatusCode::BAD_GATEWAY));
        }
        self.appended.push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }

    async fn create(&mut self, name: &str) -> Result<String, UploadError> {
        self.next_id += 1;
        self.created.push(name.to_string());
        Ok(format!("playlist-{}", self.next_id))
    }

    async fn track_count(&mut self, _playlist_id: &str) -> Result<usize, UploadError> {
        Ok(self.occupied.pop_front().unwrap_or(0))
    }
}

// Helper function to create n distinct track URIs
fn uris(n: usize) -> Vec<TrackUri> {
    (0..n).map(|i| TrackUri::new(&format!("id{}", i))).collect()
}

#[tokio::test]
async fn test_fill_playlist_chunks_preserve_size_and_order() {
    let mut store = RecordingStore::new();
    let input = uris(250);

    let report = fill_playlist(&mut store, "dest", &input, &Pacer::none()).await;

    // 250 tracks split into exactly [100, 100, 50], in order
    let sizes: Vec<usize> = store.attempts.iter().map(|(_, size)| size).copied().collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(store.appended[0].1[0], TrackUri::new("id0"));
    assert_eq!(store.appended[1].1[0], TrackUri::new("id100"));
    assert_eq!(store.appended[2].1[49], TrackUri::new("id249"));

    assert_eq!(report.added, 250);
    assert_eq!(report.dropped, 0);
    assert_eq!(report.failed(), 0);
    assert!(!report.is_partial());
}

#[tokio::test]
async fn test_fill_playlist_single_partial_chunk() {
    let mut store = RecordingStore::new();
    let input = uris(42);

    let report = fill_playlist(&mut store, "dest", &input, &Pacer::none()).await;

    assert_eq!(store.attempts.len(), 1);
    assert_eq!(store.attempts[0].1, 42);
    assert_eq!(report.added, 42);
}

#[tokio::test]
async fn test_fill_playlist_empty_input_issues_no_requests() {
    let mut store = RecordingStore::new();

    let report = fill_playlist(&mut store, "dest", &[], &Pacer::none()).await;

    assert!(store.attempts.is_empty());
    assert_eq!(report.added, 0);
    assert!(report.chunks.is_empty());
}

#[tokio::test]
async fn test_fill_playlist_truncates_at_playlist_capacity() {
    let mut store = RecordingStore::new();
    let input = uris(12_000);

    let report = fill_playlist(&mut store, "dest", &input, &Pacer::none()).await;

    // one truncation event, everything past 10,000 dropped
    assert_eq!(report.dropped, 2_000);
    assert_eq!(report.added, MAX_TRACKS_PER_PLAYLIST);
    assert_eq!(
        store.attempts.len(),
        MAX_TRACKS_PER_PLAYLIST / MAX_TRACKS_PER_REQUEST
    );
    let delivered: usize = store.attempts.iter().map(|(_, size)| size).sum();
    assert_eq!(delivered, MAX_TRACKS_PER_PLAYLIST);
    // the kept prefix is the head of the input
    assert_eq!(store.appended[0].1[0], TrackUri::new("id0"));
}

#[tokio::test]
async fn test_fill_playlist_isolates_chunk_failures() {
    // chunk 2 of 3 rejected; chunks 1 and 3 must still be attempted
    let mut store = RecordingStore::failing_on(vec![1]);
    let input = uris(250);

    let report = fill_playlist(&mut store, "dest", &input, &Pacer::none()).await;

    assert_eq!(store.attempts.len(), 3);
    assert_eq!(store.appended.len(), 2);
    assert_eq!(report.added, 150);
    assert_eq!(report.failed(), 1);
    assert!(report.is_partial());

    assert!(report.chunks[0].error.is_none());
    assert!(matches!(
        report.chunks[1].error,
        Some(UploadError::Rejected(StatusCode::BAD_GATEWAY))
    ));
    assert!(report.chunks[2].error.is_none());
    // the surviving third chunk carries the expected tail
    assert_eq!(store.appended[1].1[49], TrackUri::new("id249"));
}

#[tokio::test]
async fn test_spread_across_playlists_partitions_oversized_input() {
    let mut store = RecordingStore::new();
    let input = uris(15_000);

    let parts = spread_across_playlists(&mut store, "Mix", &input, &Pacer::none())
        .await
        .unwrap();

    // 15,000 ids over empty playlists: exactly two parts, 10,000 + 5,000
    assert_eq!(store.created, vec!["Mix Part 1", "Mix Part 2"]);
    assert_eq!(store.tracks_in("playlist-1"), 10_000);
    assert_eq!(store.tracks_in("playlist-2"), 5_000);

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].0, "playlist-1");
    assert_eq!(parts[0].1.added, 10_000);
    assert_eq!(parts[1].1.added, 5_000);
    // capacity was respected per playlist, so nothing was truncated
    assert!(parts.iter().all(|(_, report)| report.dropped == 0));
}

#[tokio::test]
async fn test_spread_across_playlists_respects_reported_fill_level() {
    // first playlist already holds 9,990 tracks per the service
    let mut store = RecordingStore::with_occupied(vec![9_990]);
    let input = uris(15);

    let parts = spread_across_playlists(&mut store, "Mix", &input, &Pacer::none())
        .await
        .unwrap();

    assert_eq!(store.created.len(), 2);
    assert_eq!(store.tracks_in("playlist-1"), 10);
    assert_eq!(store.tracks_in("playlist-2"), 5);
    assert_eq!(parts.len(), 2);
}

#[tokio::test]
async fn test_spread_across_playlists_skips_full_playlist() {
    // a playlist reported full contributes no partition and no report
    let mut store = RecordingStore::with_occupied(vec![10_000]);
    let input = uris(5);

    let parts = spread_across_playlists(&mut store, "Mix", &input, &Pacer::none())
        .await
        .unwrap();

    assert_eq!(store.created, vec!["Mix Part 1", "Mix Part 2"]);
    assert_eq!(store.tracks_in("playlist-2"), 5);
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].0, "playlist-2");
}
