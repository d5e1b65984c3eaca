use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub backend: BackendConfig,

    pub cache: CacheConfig,

    pub geolocation: GeolocationConfig,

    pub map: MapConfig,

    pub embed: EmbedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the hosted backend project.
    pub base_url: String,

    /// Anon key sent with every request. Usually left empty here and
    /// provided via the `BITEMAP_ANON_KEY` environment variable.
    pub anon_key: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

impl BackendConfig {
    /// The anon key, preferring the environment over the config file.
    #[must_use]
    pub fn resolved_anon_key(&self) -> String {
        std::env::var("BITEMAP_ANON_KEY").unwrap_or_else(|_| self.anon_key.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Freshness window for the city list (default: 24)
    pub city_ttl_hours: i64,

    /// Overrides the platform cache directory when set.
    pub dir: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            city_ttl_hours: 24,
            dir: None,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return PathBuf::from(dir);
        }
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("bitemap")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// One-shot lookup timeout in seconds (default: 10)
    pub timeout_seconds: u64,

    /// Oldest acceptable cached device position, in seconds (default: 300)
    pub max_age_seconds: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            max_age_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Zoom when centering on a city.
    pub city_zoom: f64,

    /// Zoom when flying to a selected restaurant.
    pub detail_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            city_zoom: 12.0,
            detail_zoom: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Upper bound on the direct-frame attempt before falling back, in
    /// milliseconds (default: 3000)
    pub frame_timeout_ms: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            frame_timeout_ms: 3000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("bitemap").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".bitemap").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.backend.base_url)
            .with_context(|| format!("Invalid backend base_url: {}", self.backend.base_url))?;

        if self.cache.city_ttl_hours <= 0 {
            anyhow::bail!("cache.city_ttl_hours must be > 0");
        }

        if self.embed.frame_timeout_ms == 0 {
            anyhow::bail!("embed.frame_timeout_ms must be > 0");
        }

        Ok(())
    }
}
