//! The contract shared by both table implementations.

/// Common interface over the two collision-resolution strategies.
///
/// `ChainedMap` and `ProbingMap` both implement this trait with identical
/// observable semantics, so callers can swap strategies behind a
/// `&mut dyn Table<V>` or a generic bound without touching call sites.
pub trait Table<V> {
    /// Inserts a key-value pair.
    ///
    /// Returns `false` without mutating the table when an entry equal to the
    /// whole `(key, value)` pair is already present. Inserting the same key
    /// with a *different* value stores a second entry rather than overwriting;
    /// `get` then returns whichever entry the traversal order reaches first.
    fn insert(&mut self, key: u64, value: V) -> bool;

    /// Returns the value of the first entry matching `key`, or `None`.
    fn get(&self, key: u64) -> Option<&V>;

    /// Removes at most one entry matching `key` and returns its value.
    /// Removing an absent key is a no-op returning `None`.
    fn remove(&mut self, key: u64) -> Option<V>;

    /// Removes every entry. The bucket count is preserved; capacity never
    /// shrinks over the lifetime of a table.
    fn clear(&mut self);

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` when the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current capacity of the slot/bucket array. Always prime.
    fn bucket_count(&self) -> usize;

    /// Ratio of live entries to buckets. Stays below 0.75 after every insert.
    fn load_factor(&self) -> f64;
}
