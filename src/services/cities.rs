//! City catalog with a local cache in front of the backend.
//!
//! Reads are served from the cache while the entry is fresh; a cache hit
//! still spawns a background refresh so the entry converges on backend
//! state without blocking the caller. A stale copy is better than nothing
//! when the backend is down, so refresh failures fall back to it.

use crate::cache::CityCache;
use crate::clients::BackendError;
use crate::clients::backend::BackendClient;
use crate::domain::CityId;
use crate::models::City;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CityError {
    #[error("city query failed: {0}")]
    Backend(#[from] BackendError),

    #[error("city not found: {0}")]
    NotFound(CityId),
}

/// Source of city rows, a seam over the backend client.
#[async_trait::async_trait]
pub trait CityDirectory: Send + Sync {
    async fn fetch_cities(&self) -> Result<Vec<City>, BackendError>;
}

#[async_trait::async_trait]
impl CityDirectory for BackendClient {
    async fn fetch_cities(&self) -> Result<Vec<City>, BackendError> {
        Self::fetch_cities(self).await
    }
}

pub struct CityService {
    directory: Arc<dyn CityDirectory>,
    cache: CityCache,
}

impl CityService {
    #[must_use]
    pub const fn new(directory: Arc<dyn CityDirectory>, cache: CityCache) -> Self {
        Self { directory, cache }
    }

    /// Lists all cities.
    ///
    /// Serves from the local cache when fresh, kicking off a background
    /// refresh; otherwise fetches from the backend and rewrites the cache.
    /// When the fetch fails and a stale cache copy exists, the stale copy is
    /// returned with a warning instead of an error.
    pub async fn list_cities(&self) -> Result<Vec<City>, CityError> {
        if let Some(cities) = self.cache.read_fresh() {
            self.spawn_background_refresh();
            return Ok(cities);
        }

        match self.directory.fetch_cities().await {
            Ok(cities) => {
                if let Err(e) = self.cache.write(&cities) {
                    warn!("failed to write city cache: {e}");
                }
                Ok(cities)
            }
            Err(e) => {
                if let Some((stale, cached_at)) = self.cache.read_any() {
                    warn!(%cached_at, "city fetch failed, serving stale cache: {e}");
                    return Ok(stale);
                }
                Err(e.into())
            }
        }
    }

    /// Looks a city up in the listed set.
    pub async fn find_city(&self, id: CityId) -> Result<City, CityError> {
        self.list_cities()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(CityError::NotFound(id))
    }

    fn spawn_background_refresh(&self) {
        let directory = Arc::clone(&self.directory);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match directory.fetch_cities().await {
                Ok(cities) => {
                    debug!(count = cities.len(), "background city refresh complete");
                    if let Err(e) = cache.write(&cities) {
                        warn!("failed to rewrite city cache after refresh: {e}");
                    }
                }
                Err(e) => debug!("background city refresh failed: {e}"),
            }
        });
    }
}
