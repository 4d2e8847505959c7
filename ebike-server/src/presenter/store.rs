//! Shared page model.
//!
//! The session loop writes scenes and text lines in here; the web layer
//! serves read-only snapshots of it. Every access is a short critical
//! section with no await inside, so a std `RwLock` is enough.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use serde::Serialize;

use crate::domain::{Coordinate, NearbyStation};

use super::MapPresenter;
use super::scene::MapScene;

/// Visual state of the result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Loading,
    Ready,
    Error,
}

/// The result line shown above the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub text: String,
    pub kind: SummaryKind,
}

impl SummaryLine {
    /// Shown while a fetch cycle is in flight.
    pub fn loading() -> Self {
        SummaryLine {
            text: "Loading...".to_owned(),
            kind: SummaryKind::Loading,
        }
    }

    /// Shown after a successful cycle.
    pub fn ready(total_electric: u32, total_regular: u32, radius_km: f64) -> Self {
        SummaryLine {
            text: format!(
                "There are {total_electric} electric and {total_regular} regular bikes \
                 available within {radius_km} km of your location."
            ),
            kind: SummaryKind::Ready,
        }
    }

    /// Shown when a fetch cycle fails, whatever the cause.
    pub fn fetch_error() -> Self {
        SummaryLine {
            text: "Error fetching data. Please try again later.".to_owned(),
            kind: SummaryKind::Error,
        }
    }

    /// Shown when location acquisition fails; nothing else ever runs.
    pub fn location_failed() -> Self {
        SummaryLine {
            text: "Unable to get your location. Please check your configuration and try again."
                .to_owned(),
            kind: SummaryKind::Error,
        }
    }
}

/// Everything the page needs to draw.
#[derive(Debug, Clone, Serialize)]
pub struct PageModel {
    /// The current scene; `None` until the first successful render.
    pub scene: Option<MapScene>,

    /// The result line.
    pub summary: SummaryLine,

    /// The countdown line; `None` until the scheduler is active.
    pub countdown_text: Option<String>,
}

/// Shared, cloneable handle to the page model.
#[derive(Clone)]
pub struct SceneStore {
    inner: Arc<RwLock<PageModel>>,
}

impl SceneStore {
    pub fn new() -> Self {
        SceneStore {
            inner: Arc::new(RwLock::new(PageModel {
                scene: None,
                summary: SummaryLine::loading(),
                countdown_text: None,
            })),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, PageModel> {
        // A poisoned lock still holds the last written model
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current page model.
    pub fn snapshot(&self) -> PageModel {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_scene(&self, scene: MapScene) {
        self.write().scene = Some(scene);
    }

    pub fn clear_scene(&self) {
        self.write().scene = None;
    }

    pub fn set_summary(&self, summary: SummaryLine) {
        self.write().summary = summary;
    }

    pub fn set_countdown(&self, seconds: u32) {
        self.write().countdown_text = Some(format!("Next update in {seconds} seconds"));
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Presenter that publishes composed scenes into a [`SceneStore`].
pub struct ScenePresenter {
    store: SceneStore,
}

impl ScenePresenter {
    pub fn new(store: SceneStore) -> Self {
        ScenePresenter { store }
    }
}

impl MapPresenter for ScenePresenter {
    fn render(&mut self, stations: &[NearbyStation], user: Coordinate) {
        let scene = MapScene::compose(stations, user, Utc::now());
        self.store.set_scene(scene);
    }

    fn clear(&mut self) {
        self.store.clear_scene();
    }
}
