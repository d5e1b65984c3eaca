use std::sync::Arc;
use std::time::Duration;

use crate::cache::CityCache;
use crate::clients::backend::BackendClient;
use crate::config::Config;
use crate::services::{CityService, RestaurantService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent("Bitemap/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Wired-up application services, shared by CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub backend: Arc<BackendClient>,

    pub cities: Arc<CityService>,

    pub restaurants: Arc<RestaurantService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.backend.request_timeout_seconds)?;

        let backend = Arc::new(BackendClient::with_shared_client(
            http_client,
            &config.backend.base_url,
            config.backend.resolved_anon_key(),
        )?);

        let cache = CityCache::new(&config.cache.resolved_dir(), config.cache.city_ttl_hours);
        let cities = Arc::new(CityService::new(backend.clone(), cache));
        let restaurants = Arc::new(RestaurantService::new(backend.clone()));

        Ok(Self {
            config: Arc::new(config),
            backend,
            cities,
            restaurants,
        })
    }
}
