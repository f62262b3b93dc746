use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A canonical Spotify track URI of the form `spotify:track:<id>`.
///
/// Values only exist for validated ids, so a `TrackUri` can be serialized
/// straight into request bodies. Construction goes through [`TrackUri::new`]
/// or the share-URL normalization in [`crate::extract`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackUri(String);

impl TrackUri {
    pub fn new(id: &str) -> Self {
        TrackUri(format!("spotify:track:{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationResponse {
    #[serde(default)]
    pub results: Vec<StationTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationTrack {
    pub track: Option<TrackMeta>,
    #[serde(default)]
    pub links: Vec<TrackLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackMeta {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackLink {
    pub site: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct StationTableRow {
    pub name: String,
    pub artists: String,
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<TrackUri>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub total: u64,
}
