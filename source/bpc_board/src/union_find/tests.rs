// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::UnionFind;

#[test]
fn singletons_are_their_own_representative() {
    let mut uf = UnionFind::new();
    uf.add(1);
    uf.add(2);
    assert_eq!(uf.find(1), 1);
    assert_eq!(uf.find(2), 2);
    assert!(!uf.same(1, 2));
}

#[test]
fn union_merges_classes() {
    let mut uf = UnionFind::new();
    uf.union(1, 2);
    uf.union(2, 3);
    assert!(uf.same(1, 3));
    assert!(!uf.same(1, 4));
}

#[test]
fn find_adds_unknown_elements() {
    let mut uf = UnionFind::new();
    assert_eq!(uf.find(42), 42);
}

#[test]
fn union_is_idempotent() {
    let mut uf = UnionFind::new();
    uf.union(1, 2);
    uf.union(1, 2);
    uf.union(2, 1);
    assert!(uf.same(1, 2));
    assert_eq!(uf.find(3), 3);
}

#[test]
fn transitive_closure_over_chains() {
    let mut uf = UnionFind::new();
    for i in 0..100 {
        uf.union(i, i + 1);
    }
    assert!(uf.same(0, 100));
    let root = uf.find(0);
    for i in 0..=100 {
        assert_eq!(uf.find(i), root);
    }
}
