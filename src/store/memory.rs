//! In-memory counter backend
//!
//! The default backend. Nothing survives a restart.

use super::{Backend, BackendError, BackendRegistry, ShardRouter};
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::{Arc, RwLock};
use siphasher::sip::SipHasher13;
use tracing::{debug, info, warn};

/// Name the in-memory backend registers under
pub const MEMORY_BACKEND: &str = "memory";

/// Type alias for our hash map with SipHasher
type CounterMap = HashMap<String, i64, BuildHasherDefault<SipHasher13>>;

/// Sharded in-memory counter store
///
/// Each key lives in exactly one shard, guarded by that shard's lock, so
/// concurrent mutations of the same key never lose updates and every write
/// is visible to the next read.
pub struct MemoryBackend {
    shards: Vec<RwLock<CounterMap>>,
    router: ShardRouter,
}

impl MemoryBackend {
    /// Create a backend with a single shard
    pub fn new() -> Self {
        Self::with_shards(1)
    }

    /// Create a backend with the given number of shards (at least 1)
    pub fn with_shards(num_shards: usize) -> Self {
        let router = ShardRouter::new(num_shards);
        let shards = (0..router.num_shards())
            .map(|_| RwLock::new(CounterMap::default()))
            .collect();

        MemoryBackend { shards, router }
    }

    /// Number of counters that have been materialised
    ///
    /// A poisoned shard is skipped (and logged), so the count is a lower bound
    /// once any shard is broken. Reads and writes on that shard report
    /// `BackendError::Unavailable` instead.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .enumerate()
            .map(|(id, shard)| match shard.read() {
                Ok(map) => map.len(),
                Err(_) => {
                    warn!("Memory shard {} lock poisoned, not counted", id);
                    0
                }
            })
            .sum()
    }

    /// Check if no counter exists yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `delta` to a counter under its shard's write lock
    fn apply(&self, key: &str, delta: i64) -> Result<(), BackendError> {
        let shard = &self.shards[self.router.route_key(key)];
        let mut map = shard.write().map_err(|_| poisoned())?;

        let current = map.get(key).copied().unwrap_or(0);
        let updated = current
            .checked_add(delta)
            .ok_or_else(|| BackendError::Overflow(key.to_string()))?;
        map.insert(key.to_string(), updated);

        debug!("Counter '{}' changed by {} to {}", key, delta, updated);
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<i64, BackendError> {
        let shard = &self.shards[self.router.route_key(key)];
        let map = shard.read().map_err(|_| poisoned())?;
        Ok(map.get(key).copied().unwrap_or(0))
    }

    fn increase(&self, key: &str, amount: i64) -> Result<(), BackendError> {
        if amount <= 0 {
            return Err(BackendError::NonPositiveAmount(amount));
        }
        self.apply(key, amount)
    }

    fn decrease(&self, key: &str, amount: i64) -> Result<(), BackendError> {
        if amount <= 0 {
            return Err(BackendError::NonPositiveAmount(amount));
        }
        self.apply(key, -amount)
    }

    fn name(&self) -> &'static str {
        MEMORY_BACKEND
    }
}

fn poisoned() -> BackendError {
    BackendError::Unavailable("memory shard lock poisoned".to_string())
}

/// Register the in-memory backend
///
/// Every resolution hands out the same shared store, so counters are kept
/// for the lifetime of the registry.
pub fn register(registry: &mut BackendRegistry, num_shards: usize) {
    let shared = Arc::new(MemoryBackend::with_shards(num_shards));
    info!("Registering '{}' backend with {} shards", MEMORY_BACKEND, num_shards.max(1));
    registry.register(MEMORY_BACKEND, move || shared.clone() as Arc<dyn Backend>);
}
