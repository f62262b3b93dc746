use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::{self, Config},
    error, extract, info,
    management::SnapshotManager,
    spotify::{auth, playlist::SpotifyStore},
    success,
    uploader::{self, Pacer, UploadReport},
    warning, xmplaylist,
};

pub async fn sync(station: Option<String>, dedupe: bool, split: bool, name: Option<String>) {
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("Configuration incomplete: {}", e),
    };

    let station = match station.or_else(config::default_station) {
        Some(station) => station,
        None => error!("No station given. Pass --station or set XMPLAYLIST_STATION."),
    };

    info!("Fetching rotation for station {}...", station);
    let (records, raw) = match xmplaylist::get_station_tracks(&station).await {
        Ok(fetched) => fetched,
        Err(e) => error!("Failed to fetch station playlist: {}", e),
    };
    success!("Fetched {} station tracks.", records.len());

    let snapshot = SnapshotManager::new(station.clone(), Some(raw));
    if let Err(e) = snapshot.save_to_cache().await {
        warning!("Failed to write fetch snapshot: {:?}", e);
    }

    let mut uris = extract::extract_track_uris(&records);
    if dedupe {
        let before = uris.len();
        extract::dedupe_track_uris(&mut uris);
        if uris.len() < before {
            info!("Removed {} repeated tracks.", before - uris.len());
        }
    }

    if uris.is_empty() {
        info!("No Spotify links in the current rotation. Nothing to upload.");
        return;
    }

    // destination is resolved before the token exchange
    let playlist_id = cfg.playlist_id.clone();
    if !split && playlist_id.is_none() {
        info!("SPOTIFY_PLAYLIST_ID is not set. Nothing to do.");
        return;
    }
    if split && cfg.user_id.is_none() {
        error!("SPOTIFY_USER_ID must be set to create playlists with --split.");
    }

    let token = match auth::refresh_access_token(&cfg).await {
        Ok(token) => token,
        Err(e) => error!("Token exchange failed: {}", e),
    };

    let mut store = SpotifyStore::new(token.access_token, cfg.user_id.clone());
    let pacer = Pacer::default();

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Adding {} tracks...", uris.len()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    if split {
        let base = name.unwrap_or_else(|| format!("XMPlaylist {}", station));
        match uploader::spread_across_playlists(&mut store, &base, &uris, &pacer).await {
            Ok(parts) => {
                pb.finish_and_clear();
                for (playlist_id, report) in &parts {
                    report_outcome(playlist_id, report);
                }
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to prepare a destination playlist: {}", e);
            }
        }
    } else if let Some(playlist_id) = playlist_id {
        let report = uploader::fill_playlist(&mut store, &playlist_id, &uris, &pacer).await;
        pb.finish_and_clear();
        report_outcome(&playlist_id, &report);
    }
}

fn report_outcome(playlist_id: &str, report: &UploadReport) {
    if report.is_partial() {
        warning!(
            "Added {} tracks to playlist {} ({} of {} chunks failed).",
            report.added,
            playlist_id,
            report.failed(),
            report.chunks.len()
        );
    } else {
        success!("Added {} tracks to playlist {}.", report.added, playlist_id);
    }
}
