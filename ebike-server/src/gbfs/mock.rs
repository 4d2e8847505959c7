//! Mock GBFS client for development and tests without network access.
//!
//! Loads canned station documents from JSON files and serves them as if
//! they were live feed responses.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::GbfsError;
use super::types::{GbfsDocument, StationInformationData, StationStatusData};
use super::{FeedSnapshot, StationFeed};

/// Mock feed that serves data from JSON fixture files.
///
/// Expects a directory containing `station_information.json` and
/// `station_status.json` in their wire format (envelope included).
#[derive(Debug, Clone)]
pub struct MockGbfsClient {
    snapshot: FeedSnapshot,
}

impl MockGbfsClient {
    /// Create a mock client by loading fixtures from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, GbfsError> {
        let data_dir = data_dir.as_ref();

        let information: GbfsDocument<StationInformationData> =
            load_document(data_dir, "station_information")?;
        let status: GbfsDocument<StationStatusData> = load_document(data_dir, "station_status")?;

        let snapshot = FeedSnapshot {
            stations: information.data.stations.into_iter().map(Into::into).collect(),
            statuses: status.data.stations.into_iter().map(Into::into).collect(),
        };

        Ok(Self { snapshot })
    }
}

impl StationFeed for MockGbfsClient {
    /// Serve the loaded snapshot. Mock data is static, so every call
    /// returns the same counts.
    async fn fetch_stations(&self) -> Result<FeedSnapshot, GbfsError> {
        Ok(self.snapshot.clone())
    }
}

fn load_document<T: DeserializeOwned>(
    dir: &Path,
    document: &'static str,
) -> Result<GbfsDocument<T>, GbfsError> {
    let path = dir.join(format!("{document}.json"));

    let json = std::fs::read_to_string(&path).map_err(|e| GbfsError::Api {
        document,
        status: 0,
        message: format!("failed to read {:?}: {}", path, e),
    })?;

    serde_json::from_str(&json).map_err(|e| GbfsError::Json {
        document,
        message: e.to_string(),
    })
}
