// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-process memoization cache for upstream fetches and derivations.
//!
//! Each cache is keyed by the exact (access token, encoded URN, viewable
//! guid) tuple hashed to a fixed-width key. Entries live for the life of
//! the process; a rotated token produces a fresh key, so there is no
//! staleness to evict. Two requests racing on the same uncomputed key may
//! both compute it — values are idempotent, so either write is fine and
//! no single-flight coordination is done.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-lifetime memoization map.
#[derive(Debug, Default)]
pub struct MemoCache<T: Clone> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone> MemoCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Derive a cache key from the argument tuple (SHA256, hex). Fields
    /// are length-prefixed so concatenation is unambiguous.
    pub fn generate_key(parts: &[&str]) -> String {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Look up a previously computed value.
    pub fn get(&self, key: &str) -> Option<T> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Store a computed value. Last write wins on a race, which is
    /// acceptable because values for a given key are idempotent.
    pub fn insert(&self, key: String, value: T) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, value);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_stored_value() {
        let cache: MemoCache<u32> = MemoCache::new();
        let key = MemoCache::<u32>::generate_key(&["token", "urn", "guid"]);
        assert_eq!(cache.get(&key), None);

        cache.insert(key.clone(), 7);
        assert_eq!(cache.get(&key), Some(7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_sensitive_to_every_tuple_component() {
        let base = MemoCache::<u32>::generate_key(&["token", "urn", "guid"]);
        assert_ne!(base, MemoCache::<u32>::generate_key(&["token2", "urn", "guid"]));
        assert_ne!(base, MemoCache::<u32>::generate_key(&["token", "urn2", "guid"]));
        assert_ne!(base, MemoCache::<u32>::generate_key(&["token", "urn", "guid2"]));
    }

    #[test]
    fn test_key_framing_is_unambiguous() {
        // without length prefixes these two tuples would collide
        let a = MemoCache::<u32>::generate_key(&["ab", "c"]);
        let b = MemoCache::<u32>::generate_key(&["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_tuple_same_key() {
        assert_eq!(
            MemoCache::<u32>::generate_key(&["t", "u", "g"]),
            MemoCache::<u32>::generate_key(&["t", "u", "g"])
        );
    }
}
