//! XMPlaylist station API client.

use std::fmt;

use reqwest::{Client, StatusCode, header};
use serde_json::Value;

use crate::{
    REQUEST_TIMEOUT, config,
    types::{StationResponse, StationTrack},
};

/// Request identity sent with every station fetch. XMPlaylist sits behind
/// bot protection that answers bare client requests with an access-denied
/// page, so the fetch presents itself as a regular browser.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

#[derive(Debug)]
pub enum SourceError {
    Blocked(StatusCode),
    Network(reqwest::Error),
    Malformed(serde_json::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Blocked(status) => {
                write!(f, "station fetch blocked with status {}", status)
            }
            SourceError::Network(err) => write!(f, "network error: {}", err),
            SourceError::Malformed(err) => write!(f, "unexpected response shape: {}", err),
        }
    }
}

/// Fetches the current rotation of a station from XMPlaylist.
///
/// Best-effort fetch with explicit failure: any non-2xx status is reported
/// as [`SourceError::Blocked`], transport failures as
/// [`SourceError::Network`]. On success the decoded records are returned
/// together with the unmodified response body so the caller can persist an
/// audit snapshot of exactly what the site served.
///
/// # Arguments
///
/// * `station` - XMPlaylist station key, e.g. `altnation`
///
/// # Errors
///
/// Returns [`SourceError`] when the upstream blocks the request, the
/// network fails, or the body does not decode into the expected results
/// list.
pub async fn get_station_tracks(station: &str) -> Result<(Vec<StationTrack>, Value), SourceError> {
    let api_url = format!(
        "{uri}/station/{station}",
        uri = &config::xmplaylist_apiurl(),
        station = station
    );

    let client = Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let response = client
        .get(&api_url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Blocked(status));
    }

    let raw: Value = response.json().await?;
    let decoded: StationResponse =
        serde_json::from_value(raw.clone()).map_err(SourceError::Malformed)?;

    Ok((decoded.results, raw))
}
