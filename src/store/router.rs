//! Key routing logic for sharding
//!
//! Routes counter keys to shards using SipHash.

use std::hash::{Hash, Hasher};
use siphasher::sip::SipHasher13;

/// Routes keys to shards
#[derive(Debug, Clone)]
pub struct ShardRouter {
    num_shards: usize,
}

impl ShardRouter {
    /// Create a new shard router. A shard count of 0 is raised to 1.
    pub fn new(num_shards: usize) -> Self {
        ShardRouter {
            num_shards: num_shards.max(1),
        }
    }

    /// Route a key to a shard ID
    ///
    /// The same key always lands on the same shard, so a single shard lock
    /// serializes every mutation of that key.
    pub fn route_key(&self, key: &str) -> usize {
        let hash = self.hash_key(key);
        (hash as usize) % self.num_shards
    }

    fn hash_key(&self, key: &str) -> u64 {
        let mut hasher = SipHasher13::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Get the number of shards
    pub fn num_shards(&self) -> usize {
        self.num_shards
    }
}
