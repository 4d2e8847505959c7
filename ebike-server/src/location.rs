//! User location resolution.
//!
//! The server reads the `EBIKE_LOCATION` environment variable as
//! `"lat,lon"`. The two failure shapes are handled differently: an unset
//! variable means no location capability exists, so the fixed Montreal
//! fallback is used and the session proceeds; a set-but-unusable value is a
//! failed acquisition and the session does not start. The asymmetry is
//! deliberate.

use crate::domain::Coordinate;

/// Environment variable holding the user position.
const LOCATION_VAR: &str = "EBIKE_LOCATION";

/// Fallback position (central Montreal) used when no location source is
/// configured.
pub const MONTREAL: Coordinate = Coordinate {
    latitude: 45.5235,
    longitude: -73.5857,
};

/// Errors from a location source.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// No source is configured
    #[error("no location source configured: set EBIKE_LOCATION")]
    Unavailable,

    /// Value could not be parsed
    #[error("invalid EBIKE_LOCATION {value:?}: expected \"lat,lon\"")]
    Invalid { value: String },

    /// Value parsed but does not denote a point on Earth
    #[error("EBIKE_LOCATION out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// A source of the user's position.
///
/// Mirrors the two questions asked of a platform location capability:
/// whether one is present at all, and whether it can produce a position
/// right now.
pub trait LocationSource {
    /// Whether this source is configured at all.
    fn is_supported(&self) -> bool;

    /// The user's current position.
    fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Location source backed by the `EBIKE_LOCATION` environment variable.
///
/// The variable is read once at construction; the session holds one
/// position for its whole lifetime.
#[derive(Debug, Clone)]
pub struct EnvLocationSource {
    raw: Option<String>,
}

impl EnvLocationSource {
    /// Capture `EBIKE_LOCATION` from the environment.
    pub fn from_env() -> Self {
        EnvLocationSource {
            raw: std::env::var(LOCATION_VAR).ok(),
        }
    }
}

impl LocationSource for EnvLocationSource {
    fn is_supported(&self) -> bool {
        self.raw.is_some()
    }

    fn current_position(&self) -> Result<Coordinate, LocationError> {
        let raw = self.raw.as_deref().ok_or(LocationError::Unavailable)?;
        let invalid = || LocationError::Invalid {
            value: raw.to_string(),
        };

        let (lat, lon) = raw.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::OutOfRange {
                latitude,
                longitude,
            });
        }

        Ok(Coordinate {
            latitude,
            longitude,
        })
    }
}

/// How location acquisition resolved.
#[derive(Debug, PartialEq)]
pub enum LocationOutcome {
    /// The source produced a position.
    Located(Coordinate),

    /// No source is configured; the fixed fallback is used instead.
    Fallback(Coordinate),

    /// The source is configured but could not produce a position. The
    /// session does not start.
    Failed(LocationError),
}

/// Resolve the user's position from `source`.
///
/// An unconfigured source falls back to [`MONTREAL`] and the session
/// proceeds; a configured source that fails stops the session instead of
/// falling back.
pub fn acquire(source: &impl LocationSource) -> LocationOutcome {
    if !source.is_supported() {
        tracing::warn!(
            latitude = MONTREAL.latitude,
            longitude = MONTREAL.longitude,
            "no location source configured, using fallback position"
        );
        return LocationOutcome::Fallback(MONTREAL);
    }

    match source.current_position() {
        Ok(position) => LocationOutcome::Located(position),
        Err(e) => {
            tracing::warn!(error = %e, "location source failed");
            LocationOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(raw: &str) -> EnvLocationSource {
        EnvLocationSource {
            raw: Some(raw.to_string()),
        }
    }

    fn unset() -> EnvLocationSource {
        EnvLocationSource { raw: None }
    }

    #[test]
    fn unset_variable_is_unsupported() {
        assert!(!unset().is_supported());
        assert_eq!(unset().current_position(), Err(LocationError::Unavailable));
    }

    #[test]
    fn configured_variable_is_supported() {
        assert!(source("45.5,-73.6").is_supported());
    }

    #[test]
    fn parses_latitude_and_longitude() {
        let position = source("45.5235,-73.5857").current_position();

        assert_eq!(
            position,
            Ok(Coordinate {
                latitude: 45.5235,
                longitude: -73.5857,
            })
        );
    }

    #[test]
    fn tolerates_whitespace_around_components() {
        let position = source(" 45.5 , -73.6 ").current_position();

        assert_eq!(
            position,
            Ok(Coordinate {
                latitude: 45.5,
                longitude: -73.6,
            })
        );
    }

    #[test]
    fn rejects_value_without_comma() {
        assert_eq!(
            source("45.5 -73.6").current_position(),
            Err(LocationError::Invalid {
                value: "45.5 -73.6".to_string(),
            })
        );
    }

    #[test]
    fn rejects_non_numeric_components() {
        let position = source("north,west").current_position();
        assert!(matches!(position, Err(LocationError::Invalid { .. })));
    }

    #[test]
    fn rejects_extra_components() {
        // split at the first comma leaves "-73.6,0" as the longitude
        let position = source("45.5,-73.6,0").current_position();
        assert!(matches!(position, Err(LocationError::Invalid { .. })));
    }

    #[test]
    fn rejects_latitude_off_the_globe() {
        assert_eq!(
            source("91.0,-73.6").current_position(),
            Err(LocationError::OutOfRange {
                latitude: 91.0,
                longitude: -73.6,
            })
        );
    }

    #[test]
    fn rejects_longitude_off_the_globe() {
        let position = source("45.5,181.0").current_position();
        assert!(matches!(position, Err(LocationError::OutOfRange { .. })));
    }

    #[test]
    fn acquire_uses_fallback_when_unsupported() {
        assert_eq!(acquire(&unset()), LocationOutcome::Fallback(MONTREAL));
    }

    #[test]
    fn acquire_reports_position_when_available() {
        let outcome = acquire(&source("45.5088,-73.5540"));

        assert_eq!(
            outcome,
            LocationOutcome::Located(Coordinate {
                latitude: 45.5088,
                longitude: -73.5540,
            })
        );
    }

    #[test]
    fn acquire_fails_without_fallback_on_bad_value() {
        let outcome = acquire(&source("garbage"));

        assert_eq!(
            outcome,
            LocationOutcome::Failed(LocationError::Invalid {
                value: "garbage".to_string(),
            })
        );
    }
}
