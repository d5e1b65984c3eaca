use crate::domain::CityId;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// A selectable city. Immutable once loaded; the set is cached locally with
/// a freshness window and refreshed in the background on cache hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}
