use crate::domain::{CityId, CuisineTag, RestaurantId};
use crate::geo::Coordinates;
use crate::models::video::VideoRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A restaurant row as returned by the backend, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub city_id: CityId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl Restaurant {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// A restaurant joined with its cuisine tags and featured video reference.
///
/// Produced by the loader; restaurants with no cuisine rows carry an empty
/// tag set, restaurants with no featured video carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub cuisines: BTreeSet<CuisineTag>,
    pub featured_video: Option<VideoRef>,
}

impl EnrichedRestaurant {
    /// Whether this restaurant carries at least one of the given tags.
    #[must_use]
    pub fn has_any_cuisine(&self, tags: &BTreeSet<CuisineTag>) -> bool {
        self.cuisines.intersection(tags).next().is_some()
    }
}
