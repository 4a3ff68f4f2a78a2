//! Run-scoped deduplication
//!
//! Stores 64-bit content hashes rather than the tokens themselves, so memory
//! cost is fixed per unique token regardless of token length. The set still
//! grows without bound over an unlimited run; that tradeoff belongs to the
//! caller, which is why the size and memory estimate are exposed.

use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;
use hashbrown::HashSet;

/// Hash-based seen-set for one generation run
pub struct DedupSet {
    hashes: HashSet<u64>,
    hasher: RandomState,
}

impl DedupSet {
    pub fn new() -> Self {
        Self {
            hashes: HashSet::new(),
            // Fixed keys keep hashes stable across runs within a build
            hasher: RandomState::with_seeds(0x6f6d6e69, 0x776f7264, 0x6c697374, 0x666f7267),
        }
    }

    /// Record a token. Returns true if it was not seen before.
    pub fn insert(&mut self, token: &str) -> bool {
        self.hashes.insert(self.hash_token(token))
    }

    /// Check without recording
    pub fn contains(&self, token: &str) -> bool {
        self.hashes.contains(&self.hash_token(token))
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }

    /// Approximate memory footprint in bytes
    pub fn memory_usage(&self) -> usize {
        self.hashes.capacity() * std::mem::size_of::<u64>()
    }

    fn hash_token(&self, token: &str) -> u64 {
        let mut hasher = self.hasher.build_hasher();
        token.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for DedupSet {
    fn default() -> Self {
        Self::new()
    }
}
