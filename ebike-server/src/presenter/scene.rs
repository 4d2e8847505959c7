//! Scene composition: view models for the map page.
//!
//! A [`MapScene`] is everything the map needs to draw one render pass:
//! station markers with their popups, the user marker, and a viewport
//! that bounds them. Scenes are composed wholesale - each one fully
//! replaces the previous.

use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{BoundingBox, Coordinate, NearbyStation};

use super::directions::walking_directions_url;
use super::marker::MarkerTier;

/// Uniform padding, in pixels, applied when fitting the viewport.
pub const VIEWPORT_PADDING: u32 = 50;

/// Popup shown when a station marker is clicked.
#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    name: &'a str,
    electric: u32,
    regular: u32,
    directions_url: &'a str,
}

/// One drawable station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub electric_bikes_available: u32,
    pub regular_bikes_available: u32,
    /// Distance from the user, kilometers.
    pub distance_km: f64,
    /// Visual tier; the page derives the marker style from this.
    pub tier: MarkerTier,
    /// Rendered popup markup, ready to hand to the map widget.
    pub popup_html: String,
}

impl StationMarker {
    fn compose(nearby: &NearbyStation) -> Self {
        let directions_url = walking_directions_url(nearby.station.location);
        let popup = PopupTemplate {
            name: &nearby.station.name,
            electric: nearby.electric_bikes_available,
            regular: nearby.regular_bikes_available,
            directions_url: &directions_url,
        };
        let popup_html = popup
            .render()
            .unwrap_or_else(|e| format!("<p>popup error: {e}</p>"));

        StationMarker {
            id: nearby.station.id.to_string(),
            name: nearby.station.name.clone(),
            latitude: nearby.station.location.latitude,
            longitude: nearby.station.location.longitude,
            electric_bikes_available: nearby.electric_bikes_available,
            regular_bikes_available: nearby.regular_bikes_available,
            distance_km: nearby.distance_km,
            tier: MarkerTier::for_electric_count(nearby.electric_bikes_available),
            popup_html,
        }
    }
}

/// Map viewport fitted around the drawn markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub bounds: BoundingBox,
    pub padding: u32,
}

/// A full render pass: markers, user position, viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    /// Markers for stations with at least one bike, metadata order.
    pub markers: Vec<StationMarker>,

    /// The distinguished user marker, always drawn.
    pub user: Coordinate,

    /// Bounds over every drawn marker plus the user.
    pub viewport: Viewport,

    /// When this scene was composed. The page redraws only when this
    /// changes.
    pub rendered_at: DateTime<Utc>,
}

impl MapScene {
    /// Compose a scene from the nearby set.
    ///
    /// Stations with no bikes of either kind get no marker but the user
    /// marker is always present, so the viewport is never empty.
    pub fn compose(
        stations: &[NearbyStation],
        user: Coordinate,
        rendered_at: DateTime<Utc>,
    ) -> Self {
        let markers: Vec<StationMarker> = stations
            .iter()
            .filter(|nearby| nearby.has_bikes())
            .map(StationMarker::compose)
            .collect();

        let mut bounds = BoundingBox {
            south_west: user,
            north_east: user,
        };
        for marker in &markers {
            bounds.extend(Coordinate::new(marker.latitude, marker.longitude));
        }

        MapScene {
            markers,
            user,
            viewport: Viewport {
                bounds,
                padding: VIEWPORT_PADDING,
            },
            rendered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Station, StationId};

    use super::*;

    fn user() -> Coordinate {
        Coordinate::new(45.5235, -73.5857)
    }

    fn rendered_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1724590800, 0).unwrap()
    }

    fn nearby(name: &str, lat: f64, lon: f64, electric: u32, regular: u32) -> NearbyStation {
        NearbyStation {
            station: Station {
                id: StationId::new(name),
                name: name.to_owned(),
                location: Coordinate::new(lat, lon),
            },
            electric_bikes_available: electric,
            regular_bikes_available: regular,
            distance_km: 0.3,
        }
    }

    #[test]
    fn stations_without_bikes_get_no_marker() {
        let stations = vec![
            nearby("empty", 45.5246, -73.5816, 0, 0),
            nearby("stocked", 45.5259, -73.5832, 2, 4),
        ];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        assert_eq!(scene.markers.len(), 1);
        assert_eq!(scene.markers[0].name, "stocked");
    }

    #[test]
    fn regular_only_station_still_gets_a_marker() {
        let stations = vec![nearby("regular-only", 45.5246, -73.5816, 0, 3)];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        assert_eq!(scene.markers.len(), 1);
        assert_eq!(scene.markers[0].tier, MarkerTier::Neutral);
    }

    #[test]
    fn tier_follows_electric_count() {
        let stations = vec![
            nearby("one", 45.5246, -73.5816, 1, 0),
            nearby("many", 45.5259, -73.5832, 5, 0),
        ];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        assert_eq!(scene.markers[0].tier, MarkerTier::Caution);
        assert_eq!(scene.markers[1].tier, MarkerTier::Positive);
    }

    #[test]
    fn empty_station_list_bounds_only_the_user() {
        let scene = MapScene::compose(&[], user(), rendered_at());

        assert!(scene.markers.is_empty());
        assert_eq!(scene.viewport.bounds.south_west, user());
        assert_eq!(scene.viewport.bounds.north_east, user());
        assert_eq!(scene.viewport.padding, VIEWPORT_PADDING);
    }

    #[test]
    fn viewport_bounds_drawn_markers_and_user() {
        let stations = vec![
            nearby("north-east", 45.5300, -73.5700, 2, 0),
            nearby("south", 45.5100, -73.5900, 1, 1),
        ];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        let bounds = scene.viewport.bounds;
        assert_eq!(bounds.south_west, Coordinate::new(45.5100, -73.5900));
        assert_eq!(bounds.north_east, Coordinate::new(45.5300, -73.5700));
    }

    #[test]
    fn undrawn_stations_do_not_stretch_the_viewport() {
        // An empty station far out would widen the bounds if it counted
        let stations = vec![
            nearby("close", 45.5240, -73.5850, 1, 0),
            nearby("far-and-empty", 45.6000, -73.4000, 0, 0),
        ];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        assert_eq!(scene.markers.len(), 1);
        assert!(scene.viewport.bounds.north_east.latitude < 45.53);
    }

    #[test]
    fn popup_contains_counts_and_directions_link() {
        let stations = vec![nearby("Berri / de Maisonneuve", 45.5155, -73.5610, 2, 7)];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        let popup = &scene.markers[0].popup_html;
        assert!(popup.contains("Berri / de Maisonneuve"));
        assert!(popup.contains("Electric bikes available: 2"));
        assert!(popup.contains("Regular bikes available: 7"));
        assert!(popup.contains("https://www.google.com/maps/dir/?api=1&amp;destination=45.5155,-73.561&amp;travelmode=walking"));
        assert!(popup.contains("target=\"_blank\""));
    }

    #[test]
    fn popup_escapes_markup_in_station_names() {
        let stations = vec![nearby("<script>alert('x')</script>", 45.5246, -73.5816, 1, 1)];

        let scene = MapScene::compose(&stations, user(), rendered_at());

        let popup = &scene.markers[0].popup_html;
        assert!(!popup.contains("<script>"));
        assert!(popup.contains("&lt;script&gt;"));
    }

    #[test]
    fn scene_serializes_for_the_page() {
        let stations = vec![nearby("stocked", 45.5246, -73.5816, 2, 4)];
        let scene = MapScene::compose(&stations, user(), rendered_at());

        let json = serde_json::to_value(&scene).unwrap();

        assert_eq!(json["markers"][0]["tier"], "positive");
        assert_eq!(json["markers"][0]["electric_bikes_available"], 2);
        assert_eq!(json["viewport"]["padding"], 50);
        assert_eq!(json["user"]["latitude"], 45.5235);
    }
}
