use std::collections::hash_map;

use ahash::AHashMap;

/// Expected distinct-entity cardinality; partition tables are pre-sized with
/// this so bulk ingestion does not pay for rehashing.
pub const EXPECTED_ENTITIES: usize = 10_000;

/// Running statistics for one entity, in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl Aggregate {
    pub fn of(tenths: i32) -> Self {
        Aggregate {
            min: tenths,
            max: tenths,
            sum: tenths as i64,
            count: 1,
        }
    }

    pub fn observe(&mut self, tenths: i32) {
        self.min = self.min.min(tenths);
        self.max = self.max.max(tenths);
        self.sum += tenths as i64;
        self.count += 1;
    }

    /// Commutative and associative, so reduction order and partition count
    /// never change the result.
    pub fn merge(&mut self, other: &Aggregate) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in tenths, rounded half away from zero. Requires at least one
    /// observation; the merge identity has no mean.
    pub fn mean_tenths(&self) -> i64 {
        debug_assert!(self.count > 0);
        let denom = self.count as i64;
        if self.sum >= 0 {
            (self.sum + denom / 2) / denom
        } else {
            -((-self.sum + denom / 2) / denom)
        }
    }
}

impl Default for Aggregate {
    /// The identity under `merge`.
    fn default() -> Self {
        Aggregate {
            min: i32::MAX,
            max: i32::MIN,
            sum: 0,
            count: 0,
        }
    }
}

/// Per-worker mapping from entity name views to running aggregates. Keys
/// borrow from the mapped input, so the buffer outlives every table.
pub struct PartitionTable<'a> {
    entries: AHashMap<&'a [u8], Aggregate>,
}

impl<'a> PartitionTable<'a> {
    pub fn new() -> Self {
        PartitionTable {
            entries: AHashMap::with_capacity(EXPECTED_ENTITIES),
        }
    }

    pub fn update(&mut self, name: &'a [u8], tenths: i32) {
        match self.entries.entry(name) {
            hash_map::Entry::Occupied(mut slot) => slot.get_mut().observe(tenths),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(Aggregate::of(tenths));
            }
        }
    }

    pub fn get(&self, name: &[u8]) -> Option<&Aggregate> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PartitionTable<'_> {
    fn default() -> Self {
        PartitionTable::new()
    }
}

impl<'a> IntoIterator for PartitionTable<'a> {
    type Item = (&'a [u8], Aggregate);
    type IntoIter = hash_map::IntoIter<&'a [u8], Aggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
