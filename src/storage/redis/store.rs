//! Redis-backed privilege store

use ::redis::{Client, Script, aio::MultiplexedConnection};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::RedisStorageConfig;
use crate::storage::{PrivilegeStore, ResourceKind, StoredResource};
use crate::utils::error::{PrivilegeError, Result};

// Returns {1, new_version} on success or {0, current_version} on a version mismatch.
// An expected version of -1 skips the check.
const SAVE_SCRIPT: &str = r#"
local current = tonumber(redis.call('HGET', KEYS[1], 'version') or '0')
local expected = tonumber(ARGV[1])
if expected >= 0 and expected ~= current then
    return {0, current}
end
local next_version = current + 1
redis.call('HSET', KEYS[1], 'version', next_version, 'data', ARGV[2], 'updated_at', ARGV[3])
return {1, next_version}
"#;

/// Store keeping each resource in a Redis hash
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    key_prefix: String,
    save_script: Script,
}

impl RedisStore {
    /// Connect to Redis
    pub async fn new(config: &RedisStorageConfig) -> Result<Self> {
        info!("Connecting privilege store to Redis");
        debug!("Redis key prefix: {}", config.key_prefix);

        let client = Client::open(config.url.as_str())?;
        let connection = client.get_multiplexed_async_connection().await?;

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
            save_script: Script::new(SAVE_SCRIPT),
        })
    }

    fn key(&self, kind: ResourceKind) -> String {
        format!("{}:{}", self.key_prefix, kind)
    }
}

#[async_trait]
impl PrivilegeStore for RedisStore {
    async fn load(&self, kind: ResourceKind) -> Result<Option<StoredResource>> {
        let mut conn = self.connection.clone();
        let (version, data, updated_at): (Option<u64>, Option<String>, Option<String>) =
            ::redis::cmd("HMGET")
                .arg(self.key(kind))
                .arg("version")
                .arg("data")
                .arg("updated_at")
                .query_async(&mut conn)
                .await?;

        let (Some(version), Some(data)) = (version, data) else {
            return Ok(None);
        };

        let updated_at = updated_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map_or_else(Utc::now, |parsed| parsed.with_timezone(&Utc));
        let data = serde_json::from_str(&data).map_err(|e| {
            PrivilegeError::persistence(format!("Corrupt {} document in Redis: {}", kind, e))
        })?;

        Ok(Some(StoredResource {
            version,
            updated_at,
            data,
        }))
    }

    async fn save(
        &self,
        kind: ResourceKind,
        data: serde_json::Value,
        expected_version: Option<u64>,
    ) -> Result<u64> {
        let expected = match expected_version {
            Some(version) => i64::try_from(version).map_err(|_| {
                PrivilegeError::validation(format!("Version {} out of range", version))
            })?,
            None => -1,
        };
        let payload = serde_json::to_string(&data)?;

        let mut conn = self.connection.clone();
        let (applied, version): (i64, u64) = self
            .save_script
            .key(self.key(kind))
            .arg(expected)
            .arg(payload)
            .arg(Utc::now().to_rfc3339())
            .invoke_async(&mut conn)
            .await?;

        if applied == 0 {
            return Err(PrivilegeError::conflict(format!(
                "{} was modified by someone else (expected version {}, found {})",
                kind, expected, version
            )));
        }

        debug!("Saved {} to Redis at version {}", kind, version);
        Ok(version)
    }

    async fn health_check(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: String = ::redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
