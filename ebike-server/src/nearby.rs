//! Nearby-station aggregation.
//!
//! This module contains the core logic of a fetch cycle: join station
//! metadata with live status, keep what lies within the search radius,
//! and sum availability for the result line.

use crate::domain::{Coordinate, NearbyStation, Station, StationStatus};

/// Stations within the search radius, joined with their live counts.
#[derive(Debug, Clone, Default)]
pub struct NearbySummary {
    /// In-radius stations, in metadata-feed order.
    pub stations: Vec<NearbyStation>,

    /// Sum of electric bikes across `stations`.
    pub total_electric: u32,

    /// Sum of regular bikes across `stations`.
    pub total_regular: u32,
}

/// Join metadata with status and filter to `radius_km` around `origin`.
///
/// The radius boundary is inclusive. Status lookup is by station id,
/// first match wins; a station with no status entry gets zero counts
/// rather than being dropped. The output preserves the metadata feed's
/// order, and the set is rebuilt from scratch on every call - nothing
/// carries over between cycles.
pub fn aggregate(
    stations: &[Station],
    statuses: &[StationStatus],
    origin: Coordinate,
    radius_km: f64,
) -> NearbySummary {
    let mut summary = NearbySummary::default();

    for station in stations {
        let distance_km = origin.distance_km(station.location);
        if distance_km > radius_km {
            continue;
        }

        let status = statuses.iter().find(|status| status.id == station.id);
        let electric = status.map_or(0, |s| s.electric_bikes_available);
        let regular = status.map_or(0, |s| s.regular_bikes_available);

        summary.total_electric += electric;
        summary.total_regular += regular;
        summary.stations.push(NearbyStation {
            station: station.clone(),
            electric_bikes_available: electric,
            regular_bikes_available: regular,
            distance_km,
        });
    }

    summary
}
