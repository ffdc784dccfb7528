use crate::cache::{CacheKey, CacheStats, ExposureCache, LookupCounters};
use crate::constants::REDIS_EXPOSURE_NAMESPACE;
use crate::error::{AppError, Result};
use crate::models::ExposureReading;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Exposure readings shared between instances through Redis. Each cell is
/// one JSON string under `smogroute:exposure:<lat>:<lng>` that Redis expires
/// after the TTL.
pub struct RedisCacheService {
    connection: ConnectionManager,
    ttl_seconds: u64,
    counters: LookupCounters,
}

impl RedisCacheService {
    /// Connects eagerly so a bad `REDIS_URL` is caught at start-up.
    pub async fn new(redis_url: &str, ttl_seconds: u64) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Cache(format!("invalid Redis URL: {}", e)))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Cache(format!("Redis unreachable: {}", e)))?;

        tracing::info!(ttl_seconds, "Exposure readings cached in Redis");

        Ok(RedisCacheService {
            connection,
            ttl_seconds,
            counters: LookupCounters::default(),
        })
    }
}

fn redis_key(cell: CacheKey) -> String {
    format!("{}:{}", REDIS_EXPOSURE_NAMESPACE, cell)
}

#[async_trait]
impl ExposureCache for RedisCacheService {
    async fn lookup(&self, cell: CacheKey) -> Option<ExposureReading> {
        let key = redis_key(cell);
        let stored: redis::RedisResult<Option<String>> = self.connection.clone().get(&key).await;

        let reading = match stored {
            Ok(Some(json)) => serde_json::from_str::<ExposureReading>(&json)
                .map_err(|e| {
                    // written by an incompatible build; let it be replaced
                    tracing::warn!(%key, "Unreadable cached exposure reading: {}", e);
                    self.counters.error();
                })
                .ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(%key, "Redis exposure lookup failed: {}", e);
                self.counters.error();
                None
            }
        };

        match reading {
            Some(_) => self.counters.hit(),
            None => self.counters.miss(),
        }
        reading
    }

    async fn store(&self, cell: CacheKey, reading: &ExposureReading) {
        let key = redis_key(cell);
        let json = match serde_json::to_string(reading) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(%key, "Exposure reading not cacheable: {}", e);
                self.counters.error();
                return;
            }
        };

        let written: redis::RedisResult<()> = self
            .connection
            .clone()
            .set_ex(&key, json, self.ttl_seconds)
            .await;
        match written {
            Ok(()) => self.counters.stored(),
            Err(e) => {
                tracing::warn!(%key, "Redis exposure store failed: {}", e);
                self.counters.error();
            }
        }
    }

    async fn stats(&self) -> CacheStats {
        // counting cells would need a keyspace SCAN
        self.counters.snapshot(self.backend_name(), None)
    }

    async fn health_check(&self) -> bool {
        let pong: redis::RedisResult<String> = redis::cmd("PING")
            .query_async(&mut self.connection.clone())
            .await;
        pong.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
