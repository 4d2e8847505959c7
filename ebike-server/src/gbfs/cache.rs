//! Caching layer for resolved feed URLs.
//!
//! The discovery document changes rarely (it lists where the other feeds
//! live), so its resolution is cached with a TTL. Station information and
//! status are always fetched fresh: every cycle must see live counts, and
//! the nearby set is recomputed wholesale from them.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::client::{FeedUrls, GbfsClient};
use super::error::GbfsError;
use super::{FeedSnapshot, StationFeed};

/// Configuration for the feed-URL cache.
#[derive(Debug, Clone)]
pub struct FeedCacheConfig {
    /// TTL for a resolved URL pair.
    pub ttl: Duration,

    /// Maximum number of cached entries. One per discovery URL, so a
    /// handful is plenty.
    pub max_capacity: u64,
}

impl Default for FeedCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 8,
        }
    }
}

/// GBFS client with cached discovery resolution.
///
/// Wraps a [`GbfsClient`]; `fetch_stations` resolves the discovery
/// document at most once per TTL window and fetches the station
/// documents fresh every call.
pub struct CachedGbfsClient {
    client: GbfsClient,
    urls: MokaCache<String, FeedUrls>,
    discovery_url: String,
}

impl CachedGbfsClient {
    /// Create a new cached client around `client`.
    pub fn new(client: GbfsClient, config: &FeedCacheConfig) -> Self {
        let urls = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        let discovery_url = client.discovery_url().to_string();

        Self {
            client,
            urls,
            discovery_url,
        }
    }

    /// Resolved feed URLs, from cache if fresh.
    ///
    /// A resolution failure is returned but never cached; the next call
    /// resolves again.
    pub async fn feed_urls(&self) -> Result<FeedUrls, GbfsError> {
        if let Some(urls) = self.urls.get(&self.discovery_url).await {
            return Ok(urls);
        }

        let urls = self.client.resolve_feed_urls().await?;
        self.urls.insert(self.discovery_url.clone(), urls.clone()).await;

        Ok(urls)
    }

    /// Drop the cached resolution, forcing the next call to hit the
    /// discovery document.
    pub fn invalidate(&self) {
        self.urls.invalidate_all();
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &GbfsClient {
        &self.client
    }
}

impl StationFeed for CachedGbfsClient {
    async fn fetch_stations(&self) -> Result<FeedSnapshot, GbfsError> {
        let urls = self.feed_urls().await?;
        self.client.fetch_snapshot(&urls).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Router;
    use axum::extract::State;
    use axum::routing::get;
    use tokio::net::TcpListener;

    use crate::gbfs::GbfsConfig;

    use super::*;

    #[test]
    fn default_config() {
        let config = FeedCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 8);
    }

    /// Counts discovery hits while serving a minimal but complete system.
    async fn spawn_counting_fixture() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let discovery = format!(
            r#"{{
                "last_updated": 1724590800,
                "ttl": 10,
                "data": {{
                    "en": {{
                        "feeds": [
                            {{"name": "station_information", "url": "{base}/station_information.json"}},
                            {{"name": "station_status", "url": "{base}/station_status.json"}}
                        ]
                    }}
                }}
            }}"#
        );

        async fn count_discovery(
            State((hits, discovery)): State<(Arc<AtomicUsize>, String)>,
        ) -> String {
            hits.fetch_add(1, Ordering::SeqCst);
            discovery
        }

        let app = Router::new()
            .route("/gbfs.json", get(count_discovery))
            .with_state((hits.clone(), discovery))
            .route(
                "/station_information.json",
                get(|| async {
                    r#"{"last_updated": 1, "ttl": 60, "data": {"stations": [
                        {"station_id": "1", "name": "Station", "lat": 45.52, "lon": -73.58}
                    ]}}"#
                }),
            )
            .route(
                "/station_status.json",
                get(|| async {
                    r#"{"last_updated": 1, "ttl": 10, "data": {"stations": [
                        {"station_id": "1", "num_bikes_available": 3, "num_ebikes_available": 1}
                    ]}}"#
                }),
            );

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (base, hits)
    }

    #[tokio::test]
    async fn discovery_is_resolved_once_within_ttl() {
        let (base, hits) = spawn_counting_fixture().await;
        let discovery_url = format!("{base}/gbfs.json");

        let inner =
            GbfsClient::new(GbfsConfig::new().with_discovery_url(&discovery_url)).unwrap();
        let cached = CachedGbfsClient::new(inner, &FeedCacheConfig::default());

        for _ in 0..3 {
            let snapshot = cached.fetch_stations().await.unwrap();
            assert_eq!(snapshot.stations.len(), 1);
            assert_eq!(snapshot.statuses[0].electric_bikes_available, 1);
        }

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_new_resolution() {
        let (base, hits) = spawn_counting_fixture().await;
        let discovery_url = format!("{base}/gbfs.json");

        let inner =
            GbfsClient::new(GbfsConfig::new().with_discovery_url(&discovery_url)).unwrap();
        let cached = CachedGbfsClient::new(inner, &FeedCacheConfig::default());

        cached.fetch_stations().await.unwrap();
        cached.invalidate();
        cached.fetch_stations().await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
