use tabled::Table;

use crate::{
    config, error, extract,
    management::SnapshotManager,
    types::{StationResponse, StationTableRow, StationTrack},
    warning, xmplaylist,
};

pub async fn tracks(station: Option<String>, cached: bool) {
    let station = match station.or_else(config::default_station) {
        Some(station) => station,
        None => error!("No station given. Pass --station or set XMPLAYLIST_STATION."),
    };

    let records = if cached {
        match load_snapshot_records(&station).await {
            Ok(records) => records,
            Err(e) => error!(
                "No readable snapshot for station {}. Run xmsync sync first. Err: {}",
                station, e
            ),
        }
    } else {
        match xmplaylist::get_station_tracks(&station).await {
            Ok((records, _)) => records,
            Err(e) => error!("Failed to fetch station playlist: {}", e),
        }
    };

    if records.is_empty() {
        warning!("Station {} reported an empty rotation.", station);
        return;
    }

    // keep rotation order: the feed is most-recently-played first
    let table_rows: Vec<StationTableRow> = records
        .iter()
        .map(|record| StationTableRow {
            name: record
                .track
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "(unknown)".to_string()),
            artists: record
                .track
                .as_ref()
                .map(|t| {
                    t.artists
                        .iter()
                        .take(3)
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_default(),
            spotify: extract::first_spotify_uri(record)
                .map(|uri| uri.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}

async fn load_snapshot_records(station: &str) -> Result<Vec<StationTrack>, String> {
    let snapshot = SnapshotManager::new(station.to_string(), None)
        .load_from_cache()
        .await
        .map_err(|e| format!("{:?}", e))?;
    let decoded: StationResponse =
        serde_json::from_value(snapshot.payload().clone()).map_err(|e| e.to_string())?;
    Ok(decoded.results)
}
