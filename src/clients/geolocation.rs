//! One-shot position lookup.
//!
//! The device position comes from outside the crate (a browser API, a GPS
//! daemon, a flag on the CLI), so the provider is a trait seam. Lookups are
//! bounded by the configured timeout; a cached device position older than
//! the configured maximum age must not be returned by implementations.

use crate::geo::Coordinates;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("position permission denied")]
    Denied,

    #[error("position lookup timed out")]
    Timeout,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait Locator: Send + Sync {
    /// Resolves the current position once.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Bounds a position lookup with a timeout.
///
/// An elapsed timer maps to [`GeolocationError::Timeout`], matching the
/// one-shot lookup contract.
pub async fn locate_with_timeout(
    locator: &dyn Locator,
    timeout: Duration,
) -> Result<Coordinates, GeolocationError> {
    tokio::time::timeout(timeout, locator.current_position())
        .await
        .map_err(|_| GeolocationError::Timeout)?
}

/// A locator pinned to a known coordinate.
///
/// Backs the CLI `--at lat,lon` flag and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    position: Coordinates,
}

impl FixedLocator {
    #[must_use]
    pub const fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait::async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.position)
    }
}

/// Serves a previously resolved fix while it is younger than the configured
/// maximum age, delegating to the inner locator otherwise.
pub struct MaxAgeLocator<L> {
    inner: L,
    max_age: Duration,
    last_fix: std::sync::Mutex<Option<(Coordinates, std::time::Instant)>>,
}

impl<L: Locator> MaxAgeLocator<L> {
    #[must_use]
    pub const fn new(inner: L, max_age: Duration) -> Self {
        Self {
            inner,
            max_age,
            last_fix: std::sync::Mutex::new(None),
        }
    }

    fn cached(&self) -> Option<Coordinates> {
        let guard = self
            .last_fix
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard
            .filter(|(_, at)| at.elapsed() < self.max_age)
            .map(|(fix, _)| fix)
    }

    fn remember(&self, fix: Coordinates) {
        *self
            .last_fix
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some((fix, std::time::Instant::now()));
    }
}

#[async_trait::async_trait]
impl<L: Locator> Locator for MaxAgeLocator<L> {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        if let Some(fix) = self.cached() {
            return Ok(fix);
        }
        let fix = self.inner.current_position().await?;
        self.remember(fix);
        Ok(fix)
    }
}
