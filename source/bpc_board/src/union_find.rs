// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Disjoint-set structure used to answer "are these two holes electrically
//! equivalent right now?" in near-constant time. The board rebuilds it from
//! scratch whenever the wire inventory changes non-monotonically, so the
//! structure stays small and never needs un-union support.

#[cfg(test)]
mod tests;

use rustc_hash::FxHashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct UnionFind<T: std::hash::Hash + Eq> {
    parent: FxHashMap<T, T>,
    rank: FxHashMap<T, u8>,
}

impl<T: Copy + Eq + Hash> UnionFind<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: FxHashMap::default(),
            rank: FxHashMap::default(),
        }
    }

    /// Registers `x` as a singleton class. No-op if `x` is already known.
    pub fn add(&mut self, x: T) {
        self.parent.entry(x).or_insert(x);
        self.rank.entry(x).or_insert(0);
    }

    /// Returns the representative of `x`'s class, compressing the path.
    /// Unknown elements are added as singletons first.
    pub fn find(&mut self, x: T) -> T {
        self.add(x);
        let mut root = x;
        while let Some(&p) = self.parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }
        // Point every element on the walked path directly at the root.
        let mut cur = x;
        while cur != root {
            let next = self.parent[&cur];
            self.parent.insert(cur, root);
            cur = next;
        }
        root
    }

    /// Merges the classes of `a` and `b`, union by rank.
    pub fn union(&mut self, a: T, b: T) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let rank_a = self.rank[&ra];
        let rank_b = self.rank[&rb];
        if rank_a < rank_b {
            self.parent.insert(ra, rb);
        } else if rank_a > rank_b {
            self.parent.insert(rb, ra);
        } else {
            self.parent.insert(rb, ra);
            self.rank.insert(ra, rank_a + 1);
        }
    }

    pub fn same(&mut self, a: T, b: T) -> bool {
        self.find(a) == self.find(b)
    }
}

impl<T: Copy + Eq + Hash> Default for UnionFind<T> {
    fn default() -> Self {
        Self::new()
    }
}
