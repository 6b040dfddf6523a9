use crate::growth;
use crate::table::Table;
use std::mem;

/// An owned key-value pair stored in a slot.
#[derive(Debug, Clone, PartialEq)]
struct Entry<V> {
    /// The key; the probe sequence starts at `key % bucket_count`.
    key: u64,
    /// The value associated with the key.
    value: V,
}

/// State of a single slot in the flat table.
///
/// A `Tombstone` marks a deleted entry. It stays in place so probe sequences
/// that ran past this slot while it was occupied still reach their targets.
#[derive(Debug, Clone, PartialEq, Default)]
enum Slot<V> {
    /// Never held an entry since the last clear/rehash touched it.
    #[default]
    Empty,
    /// Held an entry that was since removed; transparent to searches.
    Tombstone,
    /// Holds a live entry.
    Occupied(Entry<V>),
}

/// Outcome of probing for an insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeResult {
    /// First empty slot on the probe path.
    Vacant(usize),
    /// The exact `(key, value)` pair is already present.
    Duplicate,
    /// A full scan found neither an empty slot nor a duplicate; every slot is
    /// occupied or a tombstone.
    Saturated,
}

/// A hash table using open addressing with linear probing and lazy deletion.
///
/// Collisions advance one slot at a time, wrapping at the table size. Deleted
/// entries leave tombstones behind; insertion probes past tombstones rather
/// than reusing them, so the probe order of surviving entries never changes.
/// The slot count is always prime and grows (never shrinks) whenever the load
/// factor reaches 0.75. Tombstones do not count toward the load factor.
///
/// Note: this implementation is not thread-safe. Concurrent callers must wrap
/// the whole map in a single exclusive lock.
#[derive(Debug, Clone)]
pub struct ProbingMap<V> {
    /// The flat slot array.
    slots: Vec<Slot<V>>,
    /// Number of occupied slots; tombstones are not counted.
    len: usize,
}

impl<V: PartialEq> Default for ProbingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> Extend<(u64, V)> for ProbingMap<V> {
    fn extend<T: IntoIterator<Item = (u64, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: PartialEq> ProbingMap<V> {
    /// Creates a map with the default slot count (11).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(growth::DEFAULT_CAPACITY)
    }

    /// Creates a map with at least `capacity` slots, rounded up to the next
    /// prime. The slot count is never below 2, so hashing can never divide by
    /// zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = growth::initial_capacity(capacity);
        Self { slots: (0..capacity).map(|_| Slot::Empty).collect(), len: 0 }
    }

    /// Home slot for a key under the current slot count.
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn slot_index(&self, key: u64) -> usize {
        // The constructor and every rehash keep the slot count >= 2.
        (key % self.slots.len() as u64) as usize
    }

    /// Next slot on the linear probe path, wrapping at the table size.
    fn next_slot(&self, index: usize) -> usize {
        let next = index.saturating_add(1);
        if next >= self.slots.len() { 0 } else { next }
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` without mutating the map when an entry equal to the
    /// whole `(key, value)` pair already exists on the probe path. The same
    /// key with a different value is stored in a second slot; `get` returns
    /// whichever entry sits earlier on the probe path.
    pub fn insert(&mut self, key: u64, value: V) -> bool {
        match self.probe_for_insert(key, &value) {
            ProbeResult::Duplicate => false,
            ProbeResult::Vacant(index) => {
                self.occupy(index, Entry { key, value });
                true
            }
            ProbeResult::Saturated => {
                // Tombstones are invisible to the load factor, so a table can
                // run out of empty slots while still under the ceiling. A
                // saturated scan has also ruled out a duplicate, so grow and
                // place on the fresh probe path.
                self.rehash();
                match self.probe_for_insert(key, &value) {
                    ProbeResult::Vacant(index) => {
                        self.occupy(index, Entry { key, value });
                        true
                    }
                    ProbeResult::Duplicate | ProbeResult::Saturated => false,
                }
            }
        }
    }

    /// Returns the value of the first entry on the probe path matching `key`.
    pub fn get(&self, key: u64) -> Option<&V> {
        let index = self.find(key)?;
        match self.slots.get(index) {
            Some(Slot::Occupied(entry)) => Some(&entry.value),
            _ => None,
        }
    }

    /// Removes at most one entry matching `key` and returns its value. The
    /// vacated slot becomes a tombstone, keeping later entries on the same
    /// probe path reachable.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let index = self.find(key)?;
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.len = self.len.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Removes every entry and tombstone, keeping the current slot count.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots. Always prime.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    /// Ratio of occupied slots to total slots; tombstones count as free.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Returns an iterator over the occupied slots in table order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Walks the probe path from the key's home slot, treating tombstones and
    /// non-matching occupied slots as "keep searching". Returns the index of
    /// the first occupied slot holding `key`, `None` on reaching an empty slot
    /// or after scanning every slot once.
    fn find(&self, key: u64) -> Option<usize> {
        let mut index = self.slot_index(key);
        for _ in 0..self.slots.len() {
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                _ => {}
            }
            index = self.next_slot(index);
        }
        None
    }

    /// Walks the probe path looking for an insertion point. Probes past
    /// tombstones without reusing them; the scan is bounded by the slot count
    /// so it terminates even when no slot is empty.
    fn probe_for_insert(&self, key: u64, value: &V) -> ProbeResult {
        let mut index = self.slot_index(key);
        for _ in 0..self.slots.len() {
            match self.slots.get(index) {
                Some(Slot::Empty) => return ProbeResult::Vacant(index),
                Some(Slot::Occupied(entry)) if entry.key == key && entry.value == *value => {
                    return ProbeResult::Duplicate;
                }
                _ => {}
            }
            index = self.next_slot(index);
        }
        ProbeResult::Saturated
    }

    /// Writes an entry into an empty slot found by `probe_for_insert`, then
    /// runs the growth check.
    fn occupy(&mut self, index: usize, entry: Entry<V>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Occupied(entry);
            self.len = self.len.saturating_add(1);
            self.grow_if_needed();
        }
    }

    /// Rehashes when the load factor has reached the ceiling.
    fn grow_if_needed(&mut self) {
        if self.load_factor() >= growth::MAX_LOAD_FACTOR {
            self.rehash();
        }
    }

    /// Grows the slot array to the next prime capacity and re-homes every
    /// occupied slot whose key no longer hashes to its current index.
    ///
    /// Two phases over the extended array. The snapshot sweep pulls out each
    /// displaced entry, leaving a tombstone so probe paths that crossed its
    /// slot stay intact; entries whose home is unchanged are left untouched.
    /// The placement phase then drops every displaced entry at the first
    /// empty slot on its new probe path. Placing nothing during the sweep
    /// keeps it single-visit, and growth sizing leaves more empty slots than
    /// displaced entries, so every placement lands. `len` never changes, so
    /// no nested growth check can fire.
    fn rehash(&mut self) {
        let new_capacity = growth::grow_capacity(self.slots.len(), self.len);
        self.slots.resize_with(new_capacity, || Slot::Empty);
        let mut displaced = Vec::new();
        for index in 0..new_capacity {
            let home = match self.slots.get(index) {
                Some(Slot::Occupied(entry)) => self.slot_index(entry.key),
                _ => continue,
            };
            if home == index {
                continue;
            }
            let Some(slot) = self.slots.get_mut(index) else {
                continue;
            };
            if let Slot::Occupied(entry) = mem::replace(slot, Slot::Tombstone) {
                displaced.push(entry);
            }
        }
        for entry in displaced {
            self.place(entry);
        }
    }

    /// Places a relocated entry at the first empty slot on its probe path
    /// without touching `len`. Growth sizing guarantees an empty slot exists.
    fn place(&mut self, entry: Entry<V>) {
        let mut index = self.slot_index(entry.key);
        for _ in 0..self.slots.len() {
            if matches!(self.slots.get(index), Some(Slot::Empty)) {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Occupied(entry);
                }
                return;
            }
            index = self.next_slot(index);
        }
    }
}

impl<V: PartialEq> Table<V> for ProbingMap<V> {
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

/// Iterator over the occupied slots of a `ProbingMap`.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slot array being walked.
    slots: &'a [Slot<V>],
    /// Current position in the walk.
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let slot = self.slots.get(self.index)?;
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key, &entry.value));
            }
        }
    }
}
