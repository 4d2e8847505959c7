use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use ebike_server::gbfs::{CachedGbfsClient, FeedCacheConfig, GbfsClient, GbfsConfig};
use ebike_server::location::{EnvLocationSource, LocationOutcome, acquire};
use ebike_server::presenter::{ScenePresenter, SceneStore, SummaryLine};
use ebike_server::session::{Controller, DEFAULT_RADIUS_KM, DEFAULT_REFRESH_SECS, Session};
use ebike_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Feed configuration from environment
    let mut gbfs_config = GbfsConfig::new();
    if let Ok(url) = std::env::var("EBIKE_DISCOVERY_URL") {
        gbfs_config = gbfs_config.with_discovery_url(url);
    }

    let radius_km = env_parsed("EBIKE_RADIUS_KM", DEFAULT_RADIUS_KM);
    let refresh_secs = env_parsed("EBIKE_REFRESH_SECS", DEFAULT_REFRESH_SECS);
    let addr: SocketAddr = env_parsed("EBIKE_BIND", SocketAddr::from(([127, 0, 0, 1], 3000)));

    // Create feed client
    let client = GbfsClient::new(gbfs_config).expect("Failed to create GBFS client");
    let cached = CachedGbfsClient::new(client, &FeedCacheConfig::default());

    // Page model shared between the session loop and the web layer
    let store = SceneStore::new();

    // Resolve the user position and start the refresh loop. A configured
    // source that fails leaves the page showing the location warning and
    // no loop runs.
    match acquire(&EnvLocationSource::from_env()) {
        LocationOutcome::Located(user) | LocationOutcome::Fallback(user) => {
            let controller = Controller::new(
                cached,
                ScenePresenter::new(store.clone()),
                store.clone(),
                Session::new(user, radius_km),
            )
            .with_refresh_period(refresh_secs);
            tokio::spawn(controller.run());
        }
        LocationOutcome::Failed(e) => {
            eprintln!("Warning: {e}. No fetch cycle will run.");
            store.set_summary(SummaryLine::location_failed());
        }
    }

    // Build app state
    let state = AppState::new(store);

    // Create router
    let app = create_router(state, "static");

    println!("E-bike station finder listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the map.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health   - Health check");
    println!("  GET  /api/map  - Live page model (scene, summary, countdown)");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Read an environment variable, falling back to `default` when unset or
/// unparsable.
fn env_parsed<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Warning: invalid {name}={raw:?}, using {default}");
                default
            }
        },
        Err(_) => default,
    }
}
