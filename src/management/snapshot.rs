use std::{io::Error, path::PathBuf};

use serde_json::Value;

#[derive(Debug)]
pub enum SnapshotError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for SnapshotError {
    fn from(err: Error) -> Self {
        SnapshotError::IoError(err)
    }
}

/// Audit copy of the last successful station fetch, one file per station,
/// overwritten each run. The pipeline only ever writes it; `xmsync tracks
/// --cached` reads it back for offline listing.
pub struct SnapshotManager {
    station: String,
    payload: Value,
}

impl SnapshotManager {
    pub fn new(station: String, payload: Option<Value>) -> Self {
        Self {
            station,
            payload: payload.unwrap_or(Value::Null),
        }
    }

    pub async fn load_from_cache(&self) -> Result<Self, SnapshotError> {
        let path = Self::get_path(&self);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| SnapshotError::IoError(e))?;
        let payload = serde_json::from_str(&content).map_err(|e| SnapshotError::SerdeError(e))?;
        Ok(Self {
            station: self.station.clone(),
            payload,
        })
    }

    pub async fn save_to_cache(&self) -> Result<(), SnapshotError> {
        let path = Self::get_path(&self);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| SnapshotError::IoError(e))?;
        }

        let json =
            serde_json::to_string_pretty(&self.payload).map_err(|e| SnapshotError::SerdeError(e))?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| SnapshotError::IoError(e))
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    fn get_path(&self) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "xmsync/cache/{station}/playlist.json",
            station = self.station
        ));
        path
    }
}
