//! Utility extensions shared by both table implementations.

use crate::{ChainedMap, ProbingMap};

/// Extension trait providing convenience queries on top of the core contract.
pub trait TableExtensions<V> {
    /// Returns the keys of the table as a Vec, in traversal order.
    fn keys(&self) -> Vec<u64>;

    /// Returns the values of the table as a Vec, in traversal order.
    fn values(&self) -> Vec<V>;

    /// Returns `true` if the table holds at least one entry with this key.
    fn contains_key(&self, key: u64) -> bool;
}

impl<V: PartialEq + Clone> TableExtensions<V> for ChainedMap<V> {
    fn keys(&self) -> Vec<u64> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    fn contains_key(&self, key: u64) -> bool {
        self.get(key).is_some()
    }
}

impl<V: PartialEq + Clone> TableExtensions<V> for ProbingMap<V> {
    fn keys(&self) -> Vec<u64> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    fn contains_key(&self, key: u64) -> bool {
        self.get(key).is_some()
    }
}

/// Creates a `ChainedMap` from an iterator of key-value pairs.
#[must_use]
pub fn chained_from_iter<V, I>(iter: I) -> ChainedMap<V>
where
    V: PartialEq,
    I: IntoIterator<Item = (u64, V)>,
{
    let mut map = ChainedMap::new();
    map.extend(iter);
    map
}

/// Creates a `ProbingMap` from an iterator of key-value pairs.
#[must_use]
pub fn probing_from_iter<V, I>(iter: I) -> ProbingMap<V>
where
    V: PartialEq,
    I: IntoIterator<Item = (u64, V)>,
{
    let mut map = ProbingMap::new();
    map.extend(iter);
    map
}
