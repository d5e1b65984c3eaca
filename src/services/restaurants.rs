//! Restaurant loading and enrichment.
//!
//! Loading a city is one primary query plus two enrichment queries issued
//! concurrently, followed by an in-memory left join keyed by restaurant id.
//! Enrichment failures degrade: restaurants still come back, with empty tag
//! sets or no video reference. Only the primary query failing is an error.

use crate::clients::BackendError;
use crate::clients::backend::{BackendClient, CuisineAssignment};
use crate::domain::{CityId, RestaurantId};
use crate::models::{EnrichedRestaurant, Restaurant, VideoRef};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("restaurant query failed: {0}")]
    Backend(#[from] BackendError),
}

/// Source of restaurant rows and their enrichment rows.
#[async_trait::async_trait]
pub trait RestaurantDirectory: Send + Sync {
    async fn fetch_restaurants(&self, city: CityId) -> Result<Vec<Restaurant>, BackendError>;

    async fn fetch_featured_videos(
        &self,
        restaurants: &[RestaurantId],
    ) -> Result<Vec<VideoRef>, BackendError>;

    async fn fetch_cuisine_assignments(
        &self,
        restaurants: &[RestaurantId],
    ) -> Result<Vec<CuisineAssignment>, BackendError>;
}

#[async_trait::async_trait]
impl RestaurantDirectory for BackendClient {
    async fn fetch_restaurants(&self, city: CityId) -> Result<Vec<Restaurant>, BackendError> {
        Self::fetch_restaurants(self, city).await
    }

    async fn fetch_featured_videos(
        &self,
        restaurants: &[RestaurantId],
    ) -> Result<Vec<VideoRef>, BackendError> {
        Self::fetch_featured_videos(self, restaurants).await
    }

    async fn fetch_cuisine_assignments(
        &self,
        restaurants: &[RestaurantId],
    ) -> Result<Vec<CuisineAssignment>, BackendError> {
        Self::fetch_cuisine_assignments(self, restaurants).await
    }
}

pub struct RestaurantService {
    directory: Arc<dyn RestaurantDirectory>,
}

impl RestaurantService {
    #[must_use]
    pub const fn new(directory: Arc<dyn RestaurantDirectory>) -> Self {
        Self { directory }
    }

    /// Loads and enriches all restaurants of a city.
    ///
    /// The returned order is backend order (newest first). Callers never see
    /// a partially joined result: the join runs only after both enrichment
    /// queries have settled.
    pub async fn load_for_city(
        &self,
        city: CityId,
    ) -> Result<Vec<EnrichedRestaurant>, LoadError> {
        let restaurants = self.directory.fetch_restaurants(city).await?;
        let ids: Vec<RestaurantId> = restaurants.iter().map(|r| r.id).collect();

        let (videos, cuisines) = tokio::join!(
            self.directory.fetch_featured_videos(&ids),
            self.directory.fetch_cuisine_assignments(&ids),
        );

        let videos = videos.unwrap_or_else(|e| {
            warn!(%city, "video reference query failed, rendering without videos: {e}");
            Vec::new()
        });
        let cuisines = cuisines.unwrap_or_else(|e| {
            warn!(%city, "cuisine query failed, rendering without tags: {e}");
            Vec::new()
        });

        Ok(join_enrichment(restaurants, videos, cuisines))
    }
}

/// Left-joins restaurants with their video references and cuisine tags.
///
/// The backend does not enforce a single featured video per restaurant;
/// when several arrive, the last one joined wins. That tie-break is
/// arbitrary, not meaningful.
#[must_use]
pub fn join_enrichment(
    restaurants: Vec<Restaurant>,
    videos: Vec<VideoRef>,
    cuisines: Vec<CuisineAssignment>,
) -> Vec<EnrichedRestaurant> {
    let mut video_by_restaurant: HashMap<RestaurantId, VideoRef> = HashMap::new();
    for video in videos {
        video_by_restaurant.insert(video.restaurant_id, video);
    }

    let mut tags_by_restaurant: HashMap<RestaurantId, BTreeSet<_>> = HashMap::new();
    for assignment in cuisines {
        tags_by_restaurant
            .entry(assignment.restaurant_id)
            .or_default()
            .insert(assignment.tag);
    }

    restaurants
        .into_iter()
        .map(|restaurant| {
            let featured_video = video_by_restaurant.remove(&restaurant.id);
            let tags = tags_by_restaurant.remove(&restaurant.id).unwrap_or_default();
            EnrichedRestaurant {
                restaurant,
                cuisines: tags,
                featured_video,
            }
        })
        .collect()
}
