//! Explicit memoization for pure search calls.
//!
//! Each engine owns one [`MemoCache`] and keys it with a [`KeyBuilder`]
//! digest built from the call's identity and arguments. Keys are combined by
//! an order-sensitive fold with a strong mixing step, so permuting positional
//! components changes the key; named components are sorted by name before
//! folding, so naming order never does.
//!
//! The cache is deliberately not global: it lives for its engine's lifetime,
//! is bounded if the caller asks for a bound, and can be inspected through
//! [`CacheStats`].

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Mixing constant from the splitmix64 generator; the fold below reuses its
/// finalizer so single-bit differences in any component diffuse through the
/// whole digest.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn component_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Builds a 64-bit cache key from a call's identity and arguments.
///
/// The scope string stands in for the function identity; positional
/// components are folded in call order; named components are folded after
/// the positional ones, sorted by name.
#[derive(Debug)]
pub struct KeyBuilder {
    digest: u64,
    named: Vec<(&'static str, u64)>,
}

impl KeyBuilder {
    pub fn new(scope: &'static str) -> Self {
        Self {
            digest: splitmix64(component_hash(scope)),
            named: Vec::new(),
        }
    }

    /// Fold in a positional component. Order-sensitive.
    pub fn push<T: Hash + ?Sized>(mut self, value: &T) -> Self {
        self.digest = splitmix64(self.digest ^ component_hash(value));
        self
    }

    /// Fold in a raw 64-bit component (e.g. a state hash or float bits).
    pub fn push_raw(mut self, value: u64) -> Self {
        self.digest = splitmix64(self.digest ^ value);
        self
    }

    /// Record a named component. Folded at [`finish`](Self::finish) in
    /// name-sorted order, so callers may name components in any order.
    pub fn push_named<T: Hash + ?Sized>(mut self, name: &'static str, value: &T) -> Self {
        self.named.push((name, component_hash(value)));
        self
    }

    pub fn finish(mut self) -> u64 {
        self.named.sort_by_key(|(name, _)| *name);
        let mut digest = self.digest;
        for (name, value) in &self.named {
            digest = splitmix64(digest ^ component_hash(name));
            digest = splitmix64(digest ^ value);
        }
        digest
    }
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// A key -> result store for memoized search calls.
///
/// Lookups that miss are counted; inserts past the optional capacity bound
/// are silently dropped (results are recomputed on the next miss) — there is
/// no eviction policy by design.
#[derive(Debug)]
pub struct MemoCache<V> {
    entries: HashMap<u64, V>,
    capacity: Option<usize>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> MemoCache<V> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: u64) -> Option<V> {
        match self.entries.get(&key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: u64, value: V) {
        if let Some(cap) = self.capacity {
            if self.entries.len() >= cap && !self.entries.contains_key(&key) {
                return;
            }
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    /// Drop all entries and counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
