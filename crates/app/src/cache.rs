//! TTL key-value cache.
//!
//! The cart store's only persistence. The trait is deliberately small —
//! string keys, JSON string values, per-entry TTL — so any key-value
//! client can stand in without touching pricing logic.

use std::{
    sync::RwLock,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors surfaced by a cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store could not be reached or answered badly.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("cache store lock poisoned")]
    Poisoned,
}

/// Generic TTL key-value store.
#[automock]
#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetch a value; `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value, replacing any previous entry and resetting its TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Drop a key; absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache with lazy expiry.
///
/// Entries are dropped when read after their deadline; nothing sweeps
/// the map in the background.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<FxHashMap<String, Entry>>,
}

impl InMemoryCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let expired = {
            let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;

            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
            entries.remove(key);
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        entries.remove(key);

        Ok(())
    }
}
