use crate::cache::{CacheKey, CacheStats, ExposureCache, LookupCounters};
use crate::models::ExposureReading;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Process-local exposure cache. Cells expire after the TTL and the least
/// recently used cells are evicted past `max_cells`.
pub struct MemoryCacheService {
    cells: Cache<CacheKey, ExposureReading>,
    counters: LookupCounters,
}

impl MemoryCacheService {
    pub fn new(ttl_seconds: u64, max_cells: u64) -> Self {
        MemoryCacheService {
            cells: Cache::builder()
                .time_to_live(Duration::from_secs(ttl_seconds))
                .max_capacity(max_cells)
                .build(),
            counters: LookupCounters::default(),
        }
    }
}

#[async_trait]
impl ExposureCache for MemoryCacheService {
    async fn lookup(&self, cell: CacheKey) -> Option<ExposureReading> {
        let reading = self.cells.get(&cell).await;
        match reading {
            Some(_) => self.counters.hit(),
            None => self.counters.miss(),
        }
        tracing::trace!(%cell, hit = reading.is_some(), "Memory exposure lookup");
        reading
    }

    async fn store(&self, cell: CacheKey, reading: &ExposureReading) {
        self.cells.insert(cell, reading.clone()).await;
        self.counters.stored();
    }

    async fn stats(&self) -> CacheStats {
        // entry_count lags inserts until moka runs its housekeeping
        self.cells.run_pending_tasks().await;
        self.counters
            .snapshot(self.backend_name(), Some(self.cells.entry_count()))
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn cell(lng: f64, lat: f64) -> CacheKey {
        CacheKey::for_point(&Coordinates::from_lng_lat(lng, lat))
    }

    fn reading(smog_level: f64) -> ExposureReading {
        ExposureReading {
            location: Coordinates::from_lng_lat(74.3436, 31.5497),
            pm25: Some(smog_level),
            pm10: None,
            smog_level,
            aqi_level: Some(3),
        }
    }

    #[tokio::test]
    async fn test_empty_cell_is_a_miss() {
        let cache = MemoryCacheService::new(3600, 100);
        assert!(cache.lookup(cell(74.3436, 31.5497)).await.is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, Some(0));
    }

    #[tokio::test]
    async fn test_stored_reading_is_served_for_its_cell() {
        let cache = MemoryCacheService::new(3600, 100);
        cache.store(cell(74.3436, 31.5497), &reading(88.0)).await;

        let hit = cache.lookup(cell(74.34358, 31.54972)).await.unwrap();
        assert_eq!(hit.smog_level, 88.0);
        assert!(cache.lookup(cell(74.3536, 31.5497)).await.is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.backend, "memory");
        assert_eq!((stats.hits, stats.misses, stats.stores), (1, 1, 1));
        assert_eq!(stats.entries, Some(1));
        assert_eq!(stats.hit_ratio, 0.5);
    }

    #[tokio::test]
    async fn test_restore_overwrites_cell() {
        let cache = MemoryCacheService::new(3600, 100);
        let key = cell(73.0479, 33.6844);
        cache.store(key, &reading(40.0)).await;
        cache.store(key, &reading(55.0)).await;

        assert_eq!(cache.lookup(key).await.unwrap().smog_level, 55.0);
        assert_eq!(cache.stats().await.entries, Some(1));
    }

    #[tokio::test]
    async fn test_cells_expire_after_ttl() {
        let cache = MemoryCacheService::new(1, 100);
        let key = cell(73.0479, 33.6844);
        cache.store(key, &reading(40.0)).await;
        assert!(cache.lookup(key).await.is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(cache.lookup(key).await.is_none());
        assert!(cache.health_check().await);
    }
}
