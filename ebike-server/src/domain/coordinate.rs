//! Geographic coordinate and great-circle distance.

use serde::Serialize;

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude and longitude are assumed to be finite and within the usual
/// ranges; validation happens where external input is parsed, not here.
///
/// # Examples
///
/// ```
/// use ebike_server::domain::Coordinate;
///
/// let old_port = Coordinate::new(45.5086, -73.5539);
/// assert_eq!(old_port.distance_km(old_port), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers, via the haversine
    /// formula.
    pub fn distance_km(self, other: Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Axis-aligned bounding box over a set of coordinates, used to fit the
/// map viewport around the drawn markers.
///
/// Longitudes are treated as plain numbers; a box spanning the antimeridian
/// is not handled (no supported feed is anywhere near it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty set.
    pub fn containing(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = BoundingBox {
            south_west: first,
            north_east: first,
        };
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Grow the box to include `point`.
    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.latitude = self.south_west.latitude.min(point.latitude);
        self.south_west.longitude = self.south_west.longitude.min(point.longitude);
        self.north_east.latitude = self.north_east.latitude.max(point.latitude);
        self.north_east.longitude = self.north_east.longitude.max(point.longitude);
    }
}
