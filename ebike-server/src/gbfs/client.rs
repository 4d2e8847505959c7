//! GBFS HTTP client.
//!
//! Resolves the discovery document, then fetches the station metadata and
//! status feeds it points at. Responses are read as text and parsed with
//! `serde_json` so parse failures can carry a snippet of the offending
//! body.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::{Station, StationStatus};

use super::error::GbfsError;
use super::types::{
    DiscoveryData, GbfsDocument, LanguageFeeds, StationInformationData, StationStatusData,
};
use super::{FeedSnapshot, StationFeed};

/// Default discovery URL: the Bixi Montréal system.
const DEFAULT_DISCOVERY_URL: &str = "https://gbfs.velobixi.com/gbfs/gbfs.json";

/// Default language block to read from the discovery document.
const DEFAULT_LANGUAGE: &str = "en";

/// Feed names looked up in the discovery document, exact match.
const STATION_INFORMATION: &str = "station_information";
const STATION_STATUS: &str = "station_status";

/// Configuration for the GBFS client.
#[derive(Debug, Clone)]
pub struct GbfsConfig {
    /// Discovery document URL (defaults to Bixi Montréal)
    pub discovery_url: String,

    /// Language block to read from the discovery document
    pub language: String,

    /// Request timeout in seconds. `None` (the default) applies no
    /// timeout: a hung request stalls that cycle's update, and recovery
    /// happens via the next scheduled cycle.
    pub timeout_secs: Option<u64>,
}

impl GbfsConfig {
    pub fn new() -> Self {
        Self {
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: None,
        }
    }

    /// Set a custom discovery URL (another system, or a test fixture).
    pub fn with_discovery_url(mut self, url: impl Into<String>) -> Self {
        self.discovery_url = url.into();
        self
    }

    /// Set the language block to read.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Apply a request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved URLs of the two station feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    pub station_information: String,
    pub station_status: String,
}

/// HTTP client for one GBFS system.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    discovery_url: String,
    language: String,
}

impl GbfsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GbfsConfig) -> Result<Self, GbfsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            discovery_url: config.discovery_url,
            language: config.language,
        })
    }

    /// The configured discovery URL.
    pub fn discovery_url(&self) -> &str {
        &self.discovery_url
    }

    /// Fetch the discovery document and resolve the URLs of the two
    /// station feeds from the configured language block.
    pub async fn resolve_feed_urls(&self) -> Result<FeedUrls, GbfsError> {
        let doc: GbfsDocument<DiscoveryData> =
            self.fetch_document(&self.discovery_url, "gbfs").await?;

        let language =
            doc.data
                .get(&self.language)
                .ok_or_else(|| GbfsError::MissingLanguage {
                    language: self.language.clone(),
                })?;

        Ok(FeedUrls {
            station_information: find_feed(language, STATION_INFORMATION)?,
            station_status: find_feed(language, STATION_STATUS)?,
        })
    }

    /// Fetch both station documents at the resolved URLs and convert
    /// them to domain types.
    pub async fn fetch_snapshot(&self, urls: &FeedUrls) -> Result<FeedSnapshot, GbfsError> {
        let (information, status) = tokio::try_join!(
            self.fetch_document::<StationInformationData>(
                &urls.station_information,
                STATION_INFORMATION,
            ),
            self.fetch_document::<StationStatusData>(&urls.station_status, STATION_STATUS),
        )?;

        let stations: Vec<Station> = information
            .data
            .stations
            .into_iter()
            .map(Station::from)
            .collect();
        let statuses: Vec<StationStatus> = status
            .data
            .stations
            .into_iter()
            .map(StationStatus::from)
            .collect();

        tracing::debug!(
            stations = stations.len(),
            statuses = statuses.len(),
            "fetched station documents"
        );

        Ok(FeedSnapshot { stations, statuses })
    }

    /// Fetch and parse one GBFS document.
    async fn fetch_document<T: DeserializeOwned>(
        &self,
        url: &str,
        document: &'static str,
    ) -> Result<GbfsDocument<T>, GbfsError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GbfsError::Api {
                document,
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let doc: GbfsDocument<T> = serde_json::from_str(&body).map_err(|e| {
            let snippet: String = body.chars().take(500).collect();
            GbfsError::Json {
                document,
                message: format!("{e} (body: {snippet})"),
            }
        })?;

        tracing::debug!(
            document,
            last_updated = doc.last_updated,
            ttl = doc.ttl,
            version = doc.version.as_deref(),
            "fetched GBFS document"
        );

        Ok(doc)
    }
}

impl StationFeed for GbfsClient {
    async fn fetch_stations(&self) -> Result<FeedSnapshot, GbfsError> {
        let urls = self.resolve_feed_urls().await?;
        self.fetch_snapshot(&urls).await
    }
}

/// Locate a feed by exact name in a language block.
fn find_feed(language: &LanguageFeeds, name: &'static str) -> Result<String, GbfsError> {
    language
        .feeds
        .iter()
        .find(|feed| feed.name == name)
        .map(|feed| feed.url.clone())
        .ok_or(GbfsError::MissingFeed { name })
}
