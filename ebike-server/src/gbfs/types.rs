//! GBFS feed DTOs.
//!
//! These types map directly to the GBFS JSON documents. Field names in
//! GBFS are already snake_case, so no serde renames are needed. Only the
//! fields this application reads are modeled; serde skips the rest.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Coordinate, Station, StationId, StationStatus};

/// Envelope shared by every GBFS document.
#[derive(Debug, Clone, Deserialize)]
pub struct GbfsDocument<T> {
    /// POSIX timestamp at which the feed was last generated.
    pub last_updated: i64,

    /// Seconds the consumer may cache this document before refetching.
    pub ttl: u32,

    /// GBFS version string. Absent in pre-1.1 feeds.
    #[serde(default)]
    pub version: Option<String>,

    /// Document payload.
    pub data: T,
}

/// Payload of the discovery document (`gbfs.json`): feed lists keyed by
/// language tag.
pub type DiscoveryData = HashMap<String, LanguageFeeds>;

/// The feed list for one language.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageFeeds {
    pub feeds: Vec<FeedRef>,
}

/// One entry in the discovery document's feed list.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRef {
    /// Well-known feed name, e.g. `station_information`.
    pub name: String,

    /// Absolute URL where the feed document is served.
    pub url: String,
}

/// Payload of `station_information.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformationData {
    pub stations: Vec<StationInformationEntry>,
}

/// A dock described by the station metadata feed.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformationEntry {
    /// Operator-assigned station identifier; the join key with status.
    pub station_id: String,

    /// Human-readable station name.
    pub name: String,

    /// Latitude in decimal degrees.
    pub lat: f64,

    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// Payload of `station_status.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatusData {
    pub stations: Vec<StationStatusEntry>,
}

/// Live availability for one dock.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatusEntry {
    /// Station identifier matching the metadata feed.
    pub station_id: String,

    /// Electric bikes currently available. A common extension field;
    /// feeds without electric bikes omit it, which counts as zero.
    #[serde(default)]
    pub num_ebikes_available: u32,

    /// Regular bikes currently available. Defaults to zero if omitted.
    #[serde(default)]
    pub num_bikes_available: u32,
}

impl From<StationInformationEntry> for Station {
    fn from(entry: StationInformationEntry) -> Self {
        Station {
            id: StationId::new(entry.station_id),
            name: entry.name,
            location: Coordinate::new(entry.lat, entry.lon),
        }
    }
}

impl From<StationStatusEntry> for StationStatus {
    fn from(entry: StationStatusEntry) -> Self {
        StationStatus {
            id: StationId::new(entry.station_id),
            electric_bikes_available: entry.num_ebikes_available,
            regular_bikes_available: entry.num_bikes_available,
        }
    }
}
