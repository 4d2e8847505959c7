//! GBFS (General Bikeshare Feed Specification) client.
//!
//! A GBFS system publishes a discovery document (`gbfs.json`) listing its
//! sub-feeds per language. This module resolves the discovery document and
//! fetches the two feeds this application needs:
//!
//! - `station_information` - dock identity, name and position (static)
//! - `station_status` - live bike counts per dock (volatile)
//!
//! Everything a fetch can get wrong surfaces as a single [`GbfsError`];
//! the caller's cycle boundary is the only place errors are handled.

mod cache;
mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use cache::{CachedGbfsClient, FeedCacheConfig};
pub use client::{FeedUrls, GbfsClient, GbfsConfig};
pub use error::GbfsError;
pub use mock::MockGbfsClient;
pub use types::{
    DiscoveryData, FeedRef, GbfsDocument, LanguageFeeds, StationInformationData,
    StationInformationEntry, StationStatusData, StationStatusEntry,
};

use crate::domain::{Station, StationStatus};

/// The two station documents of one fetch, converted to domain types.
///
/// A snapshot is atomic: either both documents were fetched and parsed,
/// or the fetch failed as a whole. No partial snapshots exist.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Docks from `station_information`, in feed order.
    pub stations: Vec<Station>,

    /// Live counts from `station_status`, in feed order.
    pub statuses: Vec<StationStatus>,
}

/// Source of station data for a fetch cycle.
///
/// This abstraction lets the session loop run against the live client,
/// the URL-caching client, or canned fixtures in tests.
pub trait StationFeed {
    /// Fetch station metadata and live status as one snapshot.
    fn fetch_stations(&self) -> impl Future<Output = Result<FeedSnapshot, GbfsError>> + Send;
}
