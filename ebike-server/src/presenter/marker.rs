//! Marker tier classification.

use serde::Serialize;

/// Visual tier of a station marker, derived from its electric bike count.
///
/// Zero electric bikes is neutral, one is a caution state, two or more is
/// positive. The tier saturates - a station with 100 electric bikes looks
/// the same as one with 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTier {
    Neutral,
    Caution,
    Positive,
}

impl MarkerTier {
    /// Classify an electric bike count: 0 → neutral, 1 → caution,
    /// ≥2 → positive.
    pub fn for_electric_count(count: u32) -> Self {
        match count {
            0 => MarkerTier::Neutral,
            1 => MarkerTier::Caution,
            _ => MarkerTier::Positive,
        }
    }
}
