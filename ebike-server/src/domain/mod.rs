//! Domain types for the e-bike finder.
//!
//! Plain value types shared across the feed client, the aggregator and
//! the presenter. Everything here is synchronous and side-effect free.

mod coordinate;
mod station;

pub use coordinate::{BoundingBox, Coordinate, EARTH_RADIUS_KM};
pub use station::{NearbyStation, Station, StationId, StationStatus};
