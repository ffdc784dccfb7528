pub mod memory;
pub mod redis;

pub use self::memory::MemoryCacheService;
pub use self::redis::RedisCacheService;

use crate::constants::EXPOSURE_CACHE_CELLS_PER_DEGREE;
use crate::error::Result;
use crate::models::{Coordinates, ExposureReading};
use crate::services::ExposureOracle;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Storage for exposure readings by grid cell. Every method is infallible
/// from the caller's view; backend errors are logged, counted, and treated
/// as misses.
#[async_trait]
pub trait ExposureCache: Send + Sync {
    async fn lookup(&self, cell: CacheKey) -> Option<ExposureReading>;
    async fn store(&self, cell: CacheKey, reading: &ExposureReading);
    async fn stats(&self) -> CacheStats;
    async fn health_check(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Grid cell of ~100m that nearby sample points share a reading in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat_cell: i32,
    lng_cell: i32,
}

impl CacheKey {
    pub fn for_point(point: &Coordinates) -> Self {
        CacheKey {
            lat_cell: (point.lat * EXPOSURE_CACHE_CELLS_PER_DEGREE).round() as i32,
            lng_cell: (point.lng * EXPOSURE_CACHE_CELLS_PER_DEGREE).round() as i32,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3}:{:.3}",
            f64::from(self.lat_cell) / EXPOSURE_CACHE_CELLS_PER_DEGREE,
            f64::from(self.lng_cell) / EXPOSURE_CACHE_CELLS_PER_DEGREE
        )
    }
}

/// Exposure lookups seen by one backend since start-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub backend: &'static str,
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    /// Backend failures (unreachable, unreadable entries)
    pub errors: u64,
    /// Readings currently held, when the backend can tell cheaply
    pub entries: Option<u64>,
    /// Share of lookups answered from the cache, 0.0 to 1.0
    pub hit_ratio: f64,
}

#[derive(Debug, Default)]
pub(crate) struct LookupCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
    errors: AtomicU64,
}

impl LookupCounters {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn stored(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, backend: &'static str, entries: Option<u64>) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            backend,
            hits,
            misses,
            stores: self.stores.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            entries,
            hit_ratio: if lookups > 0 {
                hits as f64 / lookups as f64
            } else {
                0.0
            },
        }
    }
}

/// Serves exposure readings from a cache, falling through to the wrapped
/// oracle on a miss. Only successful readings are stored.
pub struct CachedExposureOracle {
    inner: Arc<dyn ExposureOracle>,
    cache: Arc<dyn ExposureCache>,
}

impl CachedExposureOracle {
    pub fn new(inner: Arc<dyn ExposureOracle>, cache: Arc<dyn ExposureCache>) -> Self {
        CachedExposureOracle { inner, cache }
    }
}

#[async_trait]
impl ExposureOracle for CachedExposureOracle {
    async fn get_exposure(&self, point: &Coordinates) -> Result<ExposureReading> {
        let cell = CacheKey::for_point(point);

        if let Some(mut cached) = self.cache.lookup(cell).await {
            // the reading belongs to the cell, report it at the asked point
            cached.location = *point;
            return Ok(cached);
        }

        let reading = self.inner.get_exposure(point).await?;
        self.cache.store(cell, &reading).await;
        Ok(reading)
    }
}
