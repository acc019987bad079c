//! Free-spot filtering over the fetched zone list.

use serde::{Deserialize, Serialize};

use crate::models::Zone;

/// Which zones to keep by free-spot count.
///
/// Zones with unknown occupancy count as zero free spots, so only
/// [`FreeSpotFilter::All`] keeps them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreeSpotFilter {
    #[default]
    All,
    /// At least one free spot.
    Available,
    /// Exactly one free spot.
    One,
    /// Two or more free spots.
    TwoOrMore,
}

impl FreeSpotFilter {
    pub fn matches(self, zone: &Zone) -> bool {
        let free = zone.free_spots().unwrap_or(0);
        match self {
            FreeSpotFilter::All => true,
            FreeSpotFilter::Available => free >= 1,
            FreeSpotFilter::One => free == 1,
            FreeSpotFilter::TwoOrMore => free >= 2,
        }
    }
}

/// Zones matching `filter`, in source order. The source slice is untouched.
pub fn filter_zones(zones: &[Zone], filter: FreeSpotFilter) -> Vec<&Zone> {
    zones.iter().filter(|z| filter.matches(z)).collect()
}
