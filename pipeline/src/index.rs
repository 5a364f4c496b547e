use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::table::Aggregate;

/// Tower height cap; enough headroom for far more entities than any input
/// holds (2^42).
const MAX_HEIGHT: usize = 42;

/// End-of-list marker in `forward` links.
const NIL: u32 = u32::MAX;

/// Arena slot of the head sentinel. Its name is never compared.
const HEAD: u32 = 0;

#[derive(Debug)]
struct Node<'a> {
    name: &'a [u8],
    agg: Aggregate,
    forward: Vec<u32>,
}

/// Skiplist keyed by entity name bytes. Nodes live in an arena and link to
/// each other by slot index, so there is no pointer juggling and the whole
/// structure frees in one shot.
#[derive(Debug)]
pub struct OrderedIndex<'a> {
    arena: Vec<Node<'a>>,
    rng: SmallRng,
}

impl<'a> OrderedIndex<'a> {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Deterministic tower shape for a given seed and upsert sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        let head = Node {
            name: &[],
            agg: Aggregate::default(),
            forward: vec![NIL],
        };
        OrderedIndex { arena: vec![head], rng }
    }

    fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < MAX_HEIGHT && self.rng.random::<bool>() {
            height += 1;
        }
        height
    }

    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 1
    }

    /// Merges `agg` into the node for `name`, inserting the node at its
    /// ordered position if the name is new.
    pub fn upsert(&mut self, name: &'a [u8], agg: &Aggregate) {
        let top = self.arena[HEAD as usize].forward.len();
        let mut update = [HEAD; MAX_HEIGHT];
        let mut at = HEAD;
        for level in (0..top).rev() {
            loop {
                let next = self.arena[at as usize].forward[level];
                if next == NIL || self.arena[next as usize].name >= name {
                    break;
                }
                at = next;
            }
            update[level] = at;
        }

        let candidate = self.arena[at as usize].forward[0];
        if candidate != NIL && self.arena[candidate as usize].name == name {
            self.arena[candidate as usize].agg.merge(agg);
            return;
        }

        let height = self.random_height();
        let id = self.arena.len() as u32;
        let mut forward = vec![NIL; height];
        for (level, link) in forward.iter_mut().enumerate().take(top) {
            let prev = update[level] as usize;
            *link = self.arena[prev].forward[level];
            self.arena[prev].forward[level] = id;
        }
        if height > top {
            // Levels the list has not reached yet start at the new node.
            self.arena[HEAD as usize].forward.resize(height, id);
        }
        self.arena.push(Node { name, agg: *agg, forward });
    }

    pub fn get(&self, name: &[u8]) -> Option<&Aggregate> {
        let mut at = HEAD;
        for level in (0..self.arena[HEAD as usize].forward.len()).rev() {
            loop {
                let next = self.arena[at as usize].forward[level];
                if next == NIL {
                    break;
                }
                match self.arena[next as usize].name.cmp(name) {
                    Ordering::Less => at = next,
                    Ordering::Equal => return Some(&self.arena[next as usize].agg),
                    Ordering::Greater => break,
                }
            }
        }
        None
    }

    /// Walks level zero, yielding entries in ascending byte order of name.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            arena: &self.arena,
            at: self.arena[HEAD as usize].forward[0],
        }
    }

    #[cfg(test)]
    fn tower_heights(&self) -> Vec<usize> {
        self.arena[1..].iter().map(|node| node.forward.len()).collect()
    }
}

impl Default for OrderedIndex<'_> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'idx, 'a> {
    arena: &'idx [Node<'a>],
    at: u32,
}

impl<'idx, 'a> Iterator for Iter<'idx, 'a> {
    type Item = (&'a [u8], &'idx Aggregate);

    fn next(&mut self) -> Option<Self::Item> {
        if self.at == NIL {
            return None;
        }
        let node = &self.arena[self.at as usize];
        self.at = node.forward[0];
        Some((node.name, &node.agg))
    }
}
