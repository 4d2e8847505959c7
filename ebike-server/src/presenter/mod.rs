//! Map presentation.
//!
//! The session loop talks to a [`MapPresenter`]; it never touches
//! presentation internals. The concrete presenter composes a
//! [`MapScene`] (markers, popups, viewport) and publishes it into a
//! [`SceneStore`], which the web layer serves to a map page as JSON.

mod directions;
mod marker;
mod scene;
mod store;

pub use directions::walking_directions_url;
pub use marker::MarkerTier;
pub use scene::{MapScene, StationMarker, VIEWPORT_PADDING, Viewport};
pub use store::{PageModel, SceneStore, ScenePresenter, SummaryKind, SummaryLine};

use crate::domain::{Coordinate, NearbyStation};

/// Drawing surface for the session's results.
///
/// Renders are wholesale: each call replaces everything previously
/// drawn. Implementations receive the full nearby set every time and
/// never see incremental updates.
pub trait MapPresenter {
    /// Replace the drawn scene with these stations plus the user marker.
    fn render(&mut self, stations: &[NearbyStation], user: Coordinate);

    /// Remove everything drawn.
    fn clear(&mut self);
}
