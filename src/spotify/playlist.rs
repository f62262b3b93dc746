use reqwest::{Client, StatusCode};

use crate::{
    REQUEST_TIMEOUT, config,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        PlaylistTracksResponse, TrackUri,
    },
    uploader::{PlaylistStore, UploadError},
};

/// Production [`PlaylistStore`] backed by the Spotify Web API.
///
/// Holds the bearer token for one upload session; a fresh store is built per
/// run from the token the refresh grant returned. `user_id` is only needed
/// for playlist creation and may be absent when the run only appends to an
/// existing playlist.
pub struct SpotifyStore {
    token: String,
    api_url: String,
    user_id: Option<String>,
}

impl SpotifyStore {
    pub fn new(access_token: String, user_id: Option<String>) -> Self {
        SpotifyStore {
            token: access_token,
            api_url: config::spotify_apiurl(),
            user_id,
        }
    }

    fn client(&self) -> Result<Client, UploadError> {
        Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
    }
}

impl PlaylistStore for SpotifyStore {
    /// Issues one bulk-append request. Success is 200 or 201; anything else
    /// is reported as [`UploadError::Rejected`] so the uploader can decide
    /// whether to continue with the next chunk.
    async fn append(&mut self, playlist_id: &str, uris: &[TrackUri]) -> Result<(), UploadError> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = &self.api_url,
            id = playlist_id
        );
        let body = AddTracksRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .client()?
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(UploadError::Rejected(status));
        }

        // the snapshot id is not used; a missing body on 201 is not a failure
        response.json::<AddTracksResponse>().await.ok();
        Ok(())
    }

    /// Creates a private playlist under the configured user and returns its
    /// id.
    async fn create(&mut self, name: &str) -> Result<String, UploadError> {
        let user_id = self
            .user_id
            .as_deref()
            .ok_or(UploadError::Config("SPOTIFY_USER_ID must be set to create playlists"))?;

        let api_url = format!(
            "{uri}/users/{user}/playlists",
            uri = &self.api_url,
            user = user_id
        );
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Tracks heard on an XMPlaylist station rotation.".to_string(),
            public: false,
            collaborative: false,
        };

        let response = self
            .client()?
            .post(&api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected(status));
        }

        let created = response.json::<CreatePlaylistResponse>().await?;
        Ok(created.id)
    }

    /// Reads the playlist's total track count with a minimal page size.
    async fn track_count(&mut self, playlist_id: &str) -> Result<usize, UploadError> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?limit=1",
            uri = &self.api_url,
            id = playlist_id
        );

        let response = self
            .client()?
            .get(&api_url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected(status));
        }

        let page = response.json::<PlaylistTracksResponse>().await?;
        Ok(page.total as usize)
    }
}
