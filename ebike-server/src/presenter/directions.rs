//! Walking-directions URL generation.
//!
//! The navigate action on a station popup opens Google Maps walking
//! directions to the station, in a new browsing context.

use crate::domain::Coordinate;

/// Generate a Google Maps walking-directions URL to `destination`.
///
/// # Example
///
/// ```
/// use ebike_server::domain::Coordinate;
/// use ebike_server::presenter::walking_directions_url;
///
/// let url = walking_directions_url(Coordinate::new(45.5246, -73.5816));
/// assert_eq!(
///     url,
///     "https://www.google.com/maps/dir/?api=1&destination=45.5246,-73.5816&travelmode=walking"
/// );
/// ```
pub fn walking_directions_url(destination: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&travelmode=walking",
        destination.latitude, destination.longitude,
    )
}
