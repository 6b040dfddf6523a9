//! # Primetable
//!
//! Prime-sized hash tables over integer keys, with two interchangeable
//! collision-resolution strategies:
//!
//! - `ChainedMap`: separate chaining, where each bucket holds a chain of entries
//! - `ProbingMap`: open addressing with linear probing and tombstone deletion
//!
//! Both implement the same [`Table`] contract: keys hash by integer modulo,
//! capacities are always prime, and a table rehashes to a larger prime as soon
//! as its load factor reaches 0.75. Capacity never shrinks.
//!
//! One deliberate quirk of the contract: `insert` rejects only an exact
//! `(key, value)` duplicate. Inserting the same key with a *different* value
//! stores a second entry instead of overwriting, and `get` returns the entry
//! that comes first in the structure's traversal order.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primetable::ChainedMap;
//!
//! let mut map = ChainedMap::new();
//!
//! // Insert values; `false` means the exact pair was already present
//! assert!(map.insert(1, "apple"));
//! assert!(map.insert(2, "banana"));
//! assert!(!map.insert(1, "apple"));
//!
//! // Retrieve values
//! assert_eq!(map.get(1), Some(&"apple"));
//!
//! // Remove values
//! assert_eq!(map.remove(1), Some("apple"));
//! assert_eq!(map.get(1), None);
//! ```
//!
//! ## Swapping strategies behind the contract
//!
//! ```rust
//! use primetable::{ChainedMap, ProbingMap, Table};
//!
//! fn fill(table: &mut dyn Table<u64>) {
//!     for key in 0..9 {
//!         table.insert(key, key);
//!     }
//! }
//!
//! let mut chained = ChainedMap::new();
//! let mut probing = ProbingMap::new();
//! fill(&mut chained);
//! fill(&mut probing);
//!
//! // Both started at 11 buckets; the ninth insert crossed the 0.75 ceiling
//! // and grew each table to the next prime past double the capacity.
//! assert_eq!(chained.bucket_count(), 23);
//! assert_eq!(probing.bucket_count(), 23);
//! assert_eq!(chained.len(), probing.len());
//! ```

/// Module implementing separate chaining
mod chaining;
/// Module implementing the prime-capacity growth policy
mod growth;
/// Module implementing open addressing with linear probing
mod open_addressing;
/// Module defining the contract shared by both strategies
mod table;
/// Utility functions and traits for the tables
mod utils;

pub use chaining::ChainedMap;
pub use open_addressing::ProbingMap;
pub use table::Table;
pub use utils::{TableExtensions, chained_from_iter, probing_from_iter};
