use crate::growth;
use crate::table::Table;

/// An owned key-value pair stored in a bucket chain.
#[derive(Debug, Clone, PartialEq)]
struct Entry<V> {
    /// The key; slot placement is `key % bucket_count`.
    key: u64,
    /// The value associated with the key.
    value: V,
}

/// A hash table using separate chaining.
///
/// Each bucket holds a vector of entries; colliding keys coexist in the same
/// bucket in insertion order. The bucket count is always prime and grows
/// (never shrinks) whenever the load factor reaches 0.75.
///
/// Note: this implementation is not thread-safe. Concurrent callers must wrap
/// the whole map in a single exclusive lock.
#[derive(Debug, Clone)]
pub struct ChainedMap<V> {
    /// The bucket array; invariant: every entry in `buckets[i]` hashes to `i`.
    buckets: Vec<Vec<Entry<V>>>,
    /// Number of live entries across all buckets.
    len: usize,
}

impl<V: PartialEq> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> Extend<(u64, V)> for ChainedMap<V> {
    fn extend<T: IntoIterator<Item = (u64, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: PartialEq> ChainedMap<V> {
    /// Creates a map with the default bucket count (11).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(growth::DEFAULT_CAPACITY)
    }

    /// Creates a map with at least `capacity` buckets, rounded up to the next
    /// prime. The bucket count is never below 2, so hashing can never divide
    /// by zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = growth::initial_capacity(capacity);
        Self { buckets: (0..capacity).map(|_| Vec::new()).collect(), len: 0 }
    }

    /// Home bucket for a key under the current bucket count.
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: u64) -> usize {
        // The constructor and every rehash keep the bucket count >= 2.
        (key % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` without mutating the map when an entry equal to the
    /// whole `(key, value)` pair already exists. The same key with a different
    /// value is stored as a second entry; `get` returns whichever entry sits
    /// earlier in the bucket.
    pub fn insert(&mut self, key: u64, value: V) -> bool {
        let index = self.bucket_index(key);
        let Some(bucket) = self.buckets.get_mut(index) else {
            return false;
        };
        if bucket.iter().any(|entry| entry.key == key && entry.value == value) {
            return false;
        }
        bucket.push(Entry { key, value });
        self.len = self.len.saturating_add(1);
        self.grow_if_needed();
        true
    }

    /// Returns the value of the first entry in the home bucket matching `key`.
    pub fn get(&self, key: u64) -> Option<&V> {
        let bucket = self.buckets.get(self.bucket_index(key))?;
        bucket.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
    }

    /// Removes at most one entry matching `key` and returns its value.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = self.buckets.get_mut(index)?;
        let position = bucket.iter().position(|entry| entry.key == key)?;
        let entry = bucket.remove(position);
        self.len = self.len.saturating_sub(1);
        Some(entry.value)
    }

    /// Removes every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets. Always prime.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Ratio of live entries to buckets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns an iterator over the live entries, bucket by bucket.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, offset: 0 }
    }

    /// Rehashes when the load factor has reached the ceiling.
    fn grow_if_needed(&mut self) {
        if self.load_factor() >= growth::MAX_LOAD_FACTOR {
            self.rehash();
        }
    }

    /// Grows the bucket array to the next prime capacity and re-homes every
    /// entry whose bucket changed under the new modulus.
    ///
    /// Traversal is by explicit bucket/offset indices: an entry that stays put
    /// advances the offset, a misplaced entry is relocated to its new home
    /// bucket and the offset is left pointing at the chain's next entry. Each
    /// entry is visited exactly once: relocated entries land either in an
    /// already-scanned bucket or at the tail of a bucket still to be scanned,
    /// where they are already in place. `len` never changes during the pass,
    /// so no nested growth check can fire.
    fn rehash(&mut self) {
        let new_capacity = growth::grow_capacity(self.buckets.len(), self.len);
        self.buckets.resize_with(new_capacity, Vec::new);
        for index in 0..new_capacity {
            let mut offset = 0;
            while let Some(key) =
                self.buckets.get(index).and_then(|bucket| bucket.get(offset)).map(|entry| entry.key)
            {
                let home = self.bucket_index(key);
                if home == index {
                    offset = offset.saturating_add(1);
                } else {
                    let Some(bucket) = self.buckets.get_mut(index) else {
                        break;
                    };
                    let entry = bucket.remove(offset);
                    if let Some(target) = self.buckets.get_mut(home) {
                        target.push(entry);
                    }
                }
            }
        }
    }
}

impl<V: PartialEq> Table<V> for ChainedMap<V> {
    fn insert(&mut self, key: u64, value: V) -> bool {
        Self::insert(self, key, value)
    }

    fn get(&self, key: u64) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: u64) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn bucket_count(&self) -> usize {
        Self::bucket_count(self)
    }

    fn load_factor(&self) -> f64 {
        Self::load_factor(self)
    }
}

/// Iterator over the live entries of a `ChainedMap`.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The bucket array being walked.
    buckets: &'a [Vec<Entry<V>>],
    /// Index of the bucket currently being drained.
    bucket: usize,
    /// Position within the current bucket's chain.
    offset: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bucket = self.buckets.get(self.bucket)?;
            if let Some(entry) = bucket.get(self.offset) {
                self.offset = self.offset.saturating_add(1);
                return Some((entry.key, &entry.value));
            }
            self.bucket = self.bucket.saturating_add(1);
            self.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn insert_and_get_round_trip() {
        let mut map = ChainedMap::new();
        assert!(map.insert(1, "one"));
        assert!(map.insert(2, "two"));
        assert!(map.insert(3, "three"));

        assert_eq!(map.get(1), Some(&"one"));
        assert_eq!(map.get(2), Some(&"two"));
        assert_eq!(map.get(3), Some(&"three"));
        assert_eq!(map.get(4), None);
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let mut map = ChainedMap::new();
        assert!(map.insert(5, "x"));
        assert!(!map.insert(5, "x"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn same_key_different_value_stores_both() {
        let mut map = ChainedMap::new();
        assert!(map.insert(5, "x"));
        assert!(map.insert(5, "y"));
        assert_eq!(map.len(), 2);
        // The first entry in the bucket wins on lookup.
        assert_eq!(map.get(5), Some(&"x"));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut map = ChainedMap::new();
        map.insert(7, "seven");
        assert_eq!(map.remove(7), Some("seven"));
        assert_eq!(map.get(7), None);
        assert_eq!(map.remove(7), None);
        assert_eq!(map.remove(7), None);
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn colliding_keys_share_a_bucket() {
        let mut map = ChainedMap::new();
        // 3, 14 and 25 all hash to bucket 3 under 11 buckets.
        map.insert(3, "a");
        map.insert(14, "b");
        map.insert(25, "c");

        assert_eq!(map.get(3), Some(&"a"));
        assert_eq!(map.get(14), Some(&"b"));
        assert_eq!(map.get(25), Some(&"c"));

        assert_eq!(map.remove(14), Some("b"));
        assert_eq!(map.get(3), Some(&"a"));
        assert_eq!(map.get(25), Some(&"c"));
    }

    #[test]
    fn ninth_insert_grows_eleven_to_twenty_three() {
        let mut map = ChainedMap::new();
        for key in 0..8_u64 {
            assert!(map.insert(key, key));
        }
        // 8/11 is still under the ceiling.
        assert_eq!(map.bucket_count(), 11);

        assert!(map.insert(8, 8));
        // 9/11 crossed 0.75, so the table grew to the next prime >= 22.
        assert_eq!(map.bucket_count(), 23);
        assert_eq!(map.len(), 9);
        for key in 0..9_u64 {
            assert_eq!(map.get(key), Some(&key));
        }
    }

    #[test]
    fn load_factor_stays_under_ceiling_after_every_insert() {
        let mut map = ChainedMap::new();
        for key in 0..500_u64 {
            assert!(map.insert(key, key));
            assert!(map.load_factor() < growth::MAX_LOAD_FACTOR + f64::EPSILON);
            assert!(growth::is_prime(map.bucket_count()));
        }
        assert_eq!(map.len(), 500);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut map = ChainedMap::new();
        for key in 0..50_u64 {
            map.insert(key, key);
        }
        let grown = map.bucket_count();
        assert!(grown > 11);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.bucket_count(), grown);
        assert_eq!(map.get(0), None);
    }

    #[test]
    fn with_capacity_rounds_to_a_prime() {
        let map: ChainedMap<u64> = ChainedMap::with_capacity(0);
        assert_eq!(map.bucket_count(), 2);
        let map: ChainedMap<u64> = ChainedMap::with_capacity(12);
        assert_eq!(map.bucket_count(), 13);
        let map: ChainedMap<u64> = ChainedMap::with_capacity(23);
        assert_eq!(map.bucket_count(), 23);
    }

    #[test]
    fn iter_visits_every_live_entry_once() {
        let mut map = ChainedMap::new();
        for key in 0..20_u64 {
            map.insert(key, key);
        }
        map.remove(4);
        map.remove(17);

        let mut seen: Vec<u64> = map.iter().map(|(key, _)| key).collect();
        seen.sort_unstable();
        let expected: Vec<u64> = (0..20).filter(|key| *key != 4 && *key != 17).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn extend_inserts_pairs() {
        let mut map = ChainedMap::new();
        map.extend((0..5_u64).map(|key| (key, key.wrapping_mul(10))));
        assert_eq!(map.len(), 5);
        assert_eq!(map.get(3), Some(&30));
    }

    #[test]
    fn matches_std_hashmap_under_random_workload() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut map = ChainedMap::new();
        let mut model: HashMap<u64, u64> = HashMap::new();

        for _ in 0..2_000 {
            let key = rng.random_range(0..256_u64);
            // Values are derived from keys so a repeat insert is an exact
            // duplicate pair, matching the model's key-presence semantics.
            let value = key.wrapping_mul(7);
            if rng.random_bool(0.6) {
                let inserted = map.insert(key, value);
                let was_new = model.insert(key, value).is_none();
                assert_eq!(inserted, was_new);
            } else {
                assert_eq!(map.remove(key), model.remove(&key));
            }
            assert_eq!(map.len(), model.len());
        }

        for key in 0..256_u64 {
            assert_eq!(map.get(key), model.get(&key));
        }
        assert!(growth::is_prime(map.bucket_count()));
    }
}
