//! Station types shared by the feed client, aggregator and presenter.

use std::fmt;

use crate::domain::Coordinate;

/// Identifier of a station as assigned by the feed operator.
///
/// Treated as an opaque string: the feeds use it only as the join key
/// between station metadata and live status.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        StationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dock as described by the station metadata feed. Static within a
/// fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub location: Coordinate,
}

/// Live availability for one station, from the status feed.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStatus {
    pub id: StationId,
    pub electric_bikes_available: u32,
    pub regular_bikes_available: u32,
}

/// A station within the search radius, joined with its live counts.
///
/// A station missing from the status feed is represented with zero
/// counts rather than dropped or treated as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Station,
    pub electric_bikes_available: u32,
    pub regular_bikes_available: u32,
    /// Distance from the user's position, kilometers.
    pub distance_km: f64,
}

impl NearbyStation {
    /// Whether any bike of either kind is available here.
    pub fn has_bikes(&self) -> bool {
        self.electric_bikes_available > 0 || self.regular_bikes_available > 0
    }
}
