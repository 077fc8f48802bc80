// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use bpc_board::{Breadboard, CompId, Config, Hole, Net, Polarity};
use std::collections::BTreeMap;

fn board() -> Breadboard {
    Breadboard::new(&Config::default())
}

/// Pins a two-hole stub component so its first hole becomes an occupied
/// terminal, the way a placed passive's pin would be.
fn pin_at(board: &mut Breadboard, id: usize, h: Hole) {
    let below = Hole::new(h.row + 1, h.col);
    board
        .claim_component(CompId(id), &[h, below], [h, below])
        .expect("stub claim succeeds");
}

#[test]
fn terminals_on_one_strip_need_no_wire() {
    let mut b = board();
    pin_at(&mut b, 0, Hole::new(0, 0));
    pin_at(&mut b, 1, Hole::new(0, 4));
    let mut nets = BTreeMap::new();
    let mut n1 = Net::internal("N1");
    n1.add_term(Hole::new(0, 0));
    n1.add_term(Hole::new(0, 4));
    nets.insert("N1".to_string(), n1);

    let mut ids = SegIdAlloc::default();
    route_net(&mut b, &mut nets, "N1", &mut ids).expect("routes");
    assert!(nets["N1"].segments.is_empty());
    assert!(b.connected(Hole::new(0, 0), Hole::new(0, 4)));
}

#[test]
fn nearby_strips_are_joined_by_jumpers() {
    let mut b = board();
    pin_at(&mut b, 0, Hole::new(0, 0));
    pin_at(&mut b, 1, Hole::new(2, 0));
    let mut nets = BTreeMap::new();
    let mut n1 = Net::internal("N1");
    n1.add_term(Hole::new(0, 0));
    n1.add_term(Hole::new(2, 0));
    nets.insert("N1".to_string(), n1);

    let mut ids = SegIdAlloc::default();
    route_net(&mut b, &mut nets, "N1", &mut ids).expect("routes");
    assert!(!nets["N1"].segments.is_empty());
    assert!(b.connected(Hole::new(0, 0), Hole::new(2, 0)));
    // Every committed jumper has a permitted span.
    for seg in &nets["N1"].segments {
        assert!(b.wire_lengths().contains(&seg.span()), "span {}", seg.span());
    }
}

#[test]
fn rail_net_lands_on_its_own_rail_only() {
    let mut b = board();
    pin_at(&mut b, 0, Hole::new(10, 0));
    let mut nets = BTreeMap::new();
    let mut gnd = Net::rail(Polarity::Gnd);
    gnd.add_term(Hole::new(10, 0));
    nets.insert("GND".to_string(), gnd);

    let mut ids = SegIdAlloc::default();
    route_net(&mut b, &mut nets, "GND", &mut ids).expect("routes");
    assert!(b.connected(Hole::new(10, 0), Hole::new(0, -3)));
    assert!(!b.connected(Hole::new(10, 0), Hole::new(0, -4)));
    for seg in &nets["GND"].segments {
        for (i, &h) in seg.holes.iter().enumerate() {
            let endpoint = i == 0 || i + 1 == seg.holes.len();
            if let Some(polarity) = b.rail_of(h) {
                assert!(endpoint, "rail hole {h} in a jumper interior");
                assert_eq!(polarity, Polarity::Gnd);
            }
        }
    }
}

#[test]
fn find_path_returns_empty_when_frontiers_meet() {
    let b = board();
    let src = vec![Hole::new(0, 1), Hole::new(0, 2)];
    let dst = vec![Hole::new(0, 2), Hole::new(0, 3)];
    assert_eq!(find_path_edges(&b, &src, &dst, None), Some(Vec::new()));
}

#[test]
fn find_path_prefers_the_shortest_straight_jumper() {
    let b = board();
    let src = vec![Hole::new(0, 1)];
    let dst = vec![Hole::new(1, 1), Hole::new(3, 1), Hole::new(5, 1)];
    // Lengths 1, 3, and 5 all reach a destination; 1 must win.
    assert_eq!(
        find_path_edges(&b, &src, &dst, None),
        Some(vec![(Hole::new(0, 1), Hole::new(1, 1))])
    );
}

#[test]
fn segment_bound_limits_path_depth() {
    let b = board();
    // (0,1) to (2,1) needs two unit jumpers; a one-segment budget fails.
    let src = vec![Hole::new(0, 1)];
    let dst = vec![Hole::new(2, 1)];
    let two = find_path_edges(&b, &src, &dst, Some(2)).expect("two segments reach");
    assert_eq!(two.len(), 2);
    assert_eq!(find_path_edges(&b, &src, &dst, Some(1)), None);
}

#[test]
fn bfs_joints_share_a_hole() {
    let b = board();
    let src = vec![Hole::new(0, 1)];
    let dst = vec![Hole::new(2, 2)];
    // No straight jumper exists; the L-route's edges must chain.
    let edges = find_path_edges(&b, &src, &dst, None).expect("path exists");
    assert!(edges.len() >= 2);
    for pair in edges.windows(2) {
        assert_eq!(pair[0].1, pair[1].0, "edges must meet at a joint");
    }
}

#[test]
fn commit_rejects_rail_endpoint_on_internal_net() {
    let mut b = board();
    let mut nets = BTreeMap::new();
    nets.insert("N1".to_string(), Net::internal("N1"));
    let mut ids = SegIdAlloc::default();
    let edges = vec![(Hole::new(0, 0), Hole::new(0, -3))];
    let err = commit_path(&mut b, &mut nets, "N1", &edges, &mut ids)
        .expect_err("internal net may not terminate on a rail");
    assert_eq!(err, RouteError::Exhausted("N1".to_string()));
    // The rejected commit left nothing claimed.
    assert!(b.is_empty_hole(Hole::new(0, 0)));
    assert!(b.is_empty_hole(Hole::new(0, -3)));
    assert!(nets["N1"].segments.is_empty());
}

#[test]
fn commit_rejects_wrong_polarity_rail() {
    let mut b = board();
    let mut nets = BTreeMap::new();
    nets.insert("V+".to_string(), Net::rail(Polarity::VPlus));
    let mut ids = SegIdAlloc::default();
    // Column -3 is GND; a V+ net may not land there.
    let edges = vec![(Hole::new(0, 0), Hole::new(0, -3))];
    assert!(commit_path(&mut b, &mut nets, "V+", &edges, &mut ids).is_err());
}

#[test]
fn partial_commit_rolls_back_on_rejection() {
    let mut b = board();
    let mut nets = BTreeMap::new();
    nets.insert("N1".to_string(), Net::internal("N1"));
    let mut ids = SegIdAlloc::default();
    // First edge is fine; the second terminates on a rail and is rejected.
    let edges = vec![
        (Hole::new(0, 0), Hole::new(3, 0)),
        (Hole::new(3, 0), Hole::new(3, -3)),
    ];
    assert!(commit_path(&mut b, &mut nets, "N1", &edges, &mut ids).is_err());
    for row in 0..=3 {
        assert!(b.is_empty_hole(Hole::new(row, 0)), "row {row} not rolled back");
    }
    assert!(!b.connected(Hole::new(0, 0), Hole::new(3, 0)));
}

#[test]
fn shorts_checker_flags_nets_sharing_a_class() {
    let mut b = board();
    let mut nets = BTreeMap::new();
    let mut n1 = Net::internal("N1");
    n1.add_term(Hole::new(0, 0));
    let mut n2 = Net::internal("N2");
    // Same strip as N1's terminal: intrinsically shorted.
    n2.add_term(Hole::new(0, 3));
    nets.insert("N1".to_string(), n1);
    nets.insert("N2".to_string(), n2);

    let err = check_shorts(&mut b, &nets).expect_err("strip short detected");
    assert_eq!(
        err,
        RouteError::ShortDetected("N1".to_string(), "N2".to_string())
    );
}

#[test]
fn shorts_checker_passes_disjoint_nets() {
    let mut b = board();
    let mut nets = BTreeMap::new();
    let mut n1 = Net::internal("N1");
    n1.add_term(Hole::new(0, 0));
    let mut n2 = Net::internal("N2");
    n2.add_term(Hole::new(1, 0));
    nets.insert("N1".to_string(), n1);
    nets.insert("N2".to_string(), n2);
    check_shorts(&mut b, &nets).expect("different strips are disjoint");
}
