//! Local cache for the city list.
//!
//! A single entry under a fixed file name, holding the cities together with
//! the time they were fetched. Freshness is checked synchronously on read;
//! stale or unreadable entries are treated as misses. The stale copy stays
//! readable separately so callers can fall back to it when a refresh fails.

use crate::models::City;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CACHE_FILE: &str = "cities.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    cities: Vec<City>,
    cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CityCache {
    path: PathBuf,
    ttl: Duration,
}

impl CityCache {
    #[must_use]
    pub fn new(dir: &Path, ttl_hours: i64) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Reads the cached city list if the entry is younger than the TTL.
    #[must_use]
    pub fn read_fresh(&self) -> Option<Vec<City>> {
        let (cities, cached_at) = self.read_any()?;
        if Utc::now() - cached_at < self.ttl {
            debug!(count = cities.len(), "city cache hit");
            Some(cities)
        } else {
            debug!("city cache entry expired");
            None
        }
    }

    /// Reads the cached city list regardless of age.
    #[must_use]
    pub fn read_any(&self) -> Option<(Vec<City>, DateTime<Utc>)> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some((entry.cities, entry.cached_at)),
            Err(e) => {
                debug!("discarding unreadable city cache: {e}");
                None
            }
        }
    }

    /// Replaces the cache entry with a freshly fetched list.
    pub fn write(&self, cities: &[City]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating cache dir {}", parent.display()))?;
        }
        let entry = CacheEntry {
            cities: cities.to_vec(),
            cached_at: Utc::now(),
        };
        let json = serde_json::to_string(&entry)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing city cache {}", self.path.display()))
    }
}
