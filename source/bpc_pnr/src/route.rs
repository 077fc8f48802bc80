// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wires a fully placed layout: each net's terminals and rail anchors must
//! end up in one union-find class, using straight jumpers of the board's
//! permitted lengths. A net that cannot be reached by a single jumper falls
//! back to a breadth-first search over the jumper-segment graph, where two
//! jumpers may meet at a shared empty hole (an L-shaped route).
//!
//! Determinism: connectivity groups are ordered by their smallest member,
//! straight-jumper candidates sort by `(length, src, dst)`, and the BFS
//! expands edge targets in ascending `(row, col)` order, so a given input
//! always wires the same way.

#[cfg(test)]
mod tests;

use crate::error::RouteError;
use bpc_board::{Breadboard, Hole, InvariantViolation, Net, NetKind, SegId, WireSeg};
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, VecDeque};

/// Upper bound on BFS node visits per path query; beyond this the net is
/// declared unreachable rather than searched further.
const MAX_BFS_VISITS: usize = 2000;

/// Allocates unique wire-segment ids across one solve.
#[derive(Default)]
pub struct SegIdAlloc(usize);

impl SegIdAlloc {
    pub fn next(&mut self) -> SegId {
        let id = SegId(self.0);
        self.0 += 1;
        id
    }
}

/// Routes every net in iteration order. On failure the offending net's wires
/// are already released; wires of previously routed nets stay committed and
/// are the caller's to roll back.
pub fn route_all(
    board: &mut Breadboard,
    nets: &mut BTreeMap<String, Net>,
    seg_ids: &mut SegIdAlloc,
) -> Result<(), RouteError> {
    let names: Vec<String> = nets.keys().cloned().collect();
    for name in names {
        route_net(board, nets, &name, seg_ids)?;
    }
    Ok(())
}

/// Connects one net: partitions its terminals (plus one representative hole
/// per fixed rail anchor) into connectivity groups and wires every group to
/// the base group.
pub fn route_net(
    board: &mut Breadboard,
    nets: &mut BTreeMap<String, Net>,
    name: &str,
    seg_ids: &mut SegIdAlloc,
) -> Result<(), RouteError> {
    board.rebuild_uf(nets.values());

    let (members, anchors) = {
        let Some(net) = nets.get(name) else {
            return Ok(());
        };
        let mut members = net.terms.clone();
        for &polarity in &net.fixed_anchors {
            if let Some(&rep) = board.rail_holes(polarity).first() {
                members.push(rep);
            }
        }
        (members, net.fixed_anchors.clone())
    };
    if members.len() <= 1 {
        return Ok(());
    }

    // Group members by their current electrical class.
    let mut groups: FxHashMap<Hole, Vec<Hole>> = FxHashMap::default();
    for &m in &members {
        let rep = board.find(m);
        groups.entry(rep).or_default().push(m);
    }
    let mut groups: Vec<Vec<Hole>> = groups.into_values().collect();
    for group in &mut groups {
        group.sort_unstable();
        group.dedup();
    }
    groups.sort_unstable_by_key(|g| g[0]);

    // The anchor's group is the base; otherwise the first group is.
    let anchor_rep = anchors
        .first()
        .and_then(|&p| board.rail_holes(p).first().copied());
    let base_idx = anchor_rep
        .and_then(|rep| groups.iter().position(|g| g.contains(&rep)))
        .unwrap_or(0);
    let mut base = groups.swap_remove(base_idx);
    groups.sort_unstable_by_key(|g| g[0]);

    for group in groups {
        let src = frontier_of_members(board, &base);
        let dst = frontier_of_members(board, &group);
        if src.is_empty() || dst.is_empty() {
            debug!("net {name}: empty frontier, releasing wires");
            release_net_wires(board, nets, name);
            return Err(RouteError::Exhausted(name.to_string()));
        }
        match find_path_edges(board, &src, &dst, None) {
            None => {
                debug!("net {name}: no jumper path between groups");
                release_net_wires(board, nets, name);
                return Err(RouteError::Exhausted(name.to_string()));
            }
            Some(edges) if edges.is_empty() => {
                // The frontiers already meet; the groups merge for free.
            }
            Some(edges) => {
                if let Err(err) = commit_path(board, nets, name, &edges, seg_ids) {
                    release_net_wires(board, nets, name);
                    return Err(err);
                }
            }
        }
        base.extend(group);
        base.sort_unstable();
    }
    Ok(())
}

/// The union of landing frontiers over a group's members. A rail member
/// contributes the whole rail; a board member contributes its strip.
fn frontier_of_members(board: &Breadboard, members: &[Hole]) -> Vec<Hole> {
    let mut frontier: Vec<Hole> = members
        .iter()
        .flat_map(|&m| match board.rail_of(m) {
            Some(polarity) => board.frontier_of_rail(polarity),
            None => board.frontier_of_hole(m),
        })
        .collect();
    frontier.sort_unstable();
    frontier.dedup();
    frontier
}

/// Finds a jumper path from any `src` hole to any `dst` hole.
///
/// Returns `Some(vec![])` when the frontiers already share a hole, a
/// single-edge path when one straight jumper suffices, a multi-edge path from
/// the segment-graph BFS otherwise, and `None` when no path exists within
/// the visit cap (or within `max_edges` jumpers, when bounded).
#[must_use]
pub fn find_path_edges(
    board: &Breadboard,
    src: &[Hole],
    dst: &[Hole],
    max_edges: Option<usize>,
) -> Option<Vec<(Hole, Hole)>> {
    let dst_set: FxHashSet<Hole> = dst.iter().copied().collect();
    if src.iter().any(|s| dst_set.contains(s)) {
        return Some(Vec::new());
    }

    // Fast path: a single straight jumper of a permitted length.
    let mut straight: Vec<(i32, Hole, Hole)> = Vec::new();
    for &s in src {
        for &d in dst {
            if s.row != d.row && s.col != d.col {
                continue;
            }
            let len = s.manhattan(d);
            if board.wire_lengths().contains(&len) {
                straight.push((len, s, d));
            }
        }
    }
    straight.sort_unstable();
    for (_, s, d) in straight {
        if jumper_is_clear(board, s, d) {
            return Some(vec![(s, d)]);
        }
    }

    bfs_path(board, src, &dst_set, max_edges)
}

/// A jumper from `s` to `d` is legal when every real hole strictly between
/// them is empty and none of them is a rail hole (rails may only appear at
/// jumper endpoints).
fn jumper_is_clear(board: &Breadboard, s: Hole, d: Hole) -> bool {
    let Some(holes) = board.line_holes(s, d) else {
        return false;
    };
    holes.iter().all(|&h| {
        if h == s || h == d {
            board.is_empty_hole(h)
        } else {
            board.is_empty_hole(h) && board.rail_of(h).is_none()
        }
    })
}

/// BFS over the jumper-segment graph: nodes are empty real holes, edges are
/// straight legal jumpers. Rail holes may only terminate a path (they never
/// serve as intermediate joints), so they are expanded only when they are
/// goals.
fn bfs_path(
    board: &Breadboard,
    src: &[Hole],
    dst: &FxHashSet<Hole>,
    max_edges: Option<usize>,
) -> Option<Vec<(Hole, Hole)>> {
    let mut parent: FxHashMap<Hole, Hole> = FxHashMap::default();
    let mut depth: FxHashMap<Hole, usize> = FxHashMap::default();
    let mut queue: VecDeque<Hole> = VecDeque::new();
    let mut visits = 0usize;

    let mut starts: Vec<Hole> = src.to_vec();
    starts.sort_unstable();
    for s in starts {
        if depth.insert(s, 0).is_none() {
            queue.push_back(s);
        }
    }

    while let Some(u) = queue.pop_front() {
        visits += 1;
        if visits > MAX_BFS_VISITS {
            return None;
        }
        let u_depth = depth[&u];
        if max_edges.is_some_and(|m| u_depth >= m) {
            continue;
        }

        let mut targets: Vec<Hole> = Vec::new();
        for &len in board.wire_lengths() {
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let v = Hole::new(u.row + dr * len, u.col + dc * len);
                if !board.is_real_hole(v) || !board.is_empty_hole(v) {
                    continue;
                }
                if board.rail_of(v).is_some() && !dst.contains(&v) {
                    continue;
                }
                if jumper_is_clear(board, u, v) {
                    targets.push(v);
                }
            }
        }
        targets.sort_unstable();

        for v in targets {
            if depth.contains_key(&v) {
                continue;
            }
            parent.insert(v, u);
            depth.insert(v, u_depth + 1);
            if dst.contains(&v) {
                return Some(reconstruct(&parent, v));
            }
            queue.push_back(v);
        }
    }
    None
}

fn reconstruct(parent: &FxHashMap<Hole, Hole>, goal: Hole) -> Vec<(Hole, Hole)> {
    let mut holes = vec![goal];
    let mut cur = goal;
    while let Some(&p) = parent.get(&cur) {
        holes.push(p);
        cur = p;
    }
    holes.reverse();
    holes.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Claims every edge of a path for `name`'s net, unioning as it goes.
///
/// Rejected edges: a rail hole in the strict interior; a rail endpoint whose
/// polarity is not the net's fixed anchor; any rail endpoint on an internal
/// net. A rejection (or a failed claim) releases the segments this call
/// already committed and fails the route.
pub fn commit_path(
    board: &mut Breadboard,
    nets: &mut BTreeMap<String, Net>,
    name: &str,
    edges: &[(Hole, Hole)],
    seg_ids: &mut SegIdAlloc,
) -> Result<(), RouteError> {
    let kind = match nets.get(name) {
        Some(net) => net.kind,
        None => return Ok(()),
    };

    let mut committed: Vec<WireSeg> = Vec::new();
    let mut failure: Option<RouteError> = None;
    for (i, &(a, b)) in edges.iter().enumerate() {
        if let Err(err) = check_edge_rails(board, kind, name, a, b) {
            failure = Some(err);
            break;
        }
        let Some(holes) = board.line_holes(a, b) else {
            failure = Some(RouteError::Exhausted(name.to_string()));
            break;
        };
        let shared_end = if i > 0 { Some(a) } else { None };
        let id = seg_ids.next();
        if let Err(err) = board.claim_wire_segment(id, &holes, shared_end) {
            failure = Some(RouteError::Invariant(err));
            break;
        }
        committed.push(WireSeg { id, holes });
    }

    if let Some(err) = failure {
        for seg in committed.drain(..).rev() {
            board.release_wire_segment(&seg.holes);
        }
        board.rebuild_uf(nets.values());
        return Err(err);
    }

    if let Some(net) = nets.get_mut(name) {
        net.segments.append(&mut committed);
    }
    Ok(())
}

fn check_edge_rails(
    board: &Breadboard,
    kind: NetKind,
    name: &str,
    a: Hole,
    b: Hole,
) -> Result<(), RouteError> {
    let Some(holes) = board.line_holes(a, b) else {
        return Err(RouteError::Invariant(InvariantViolation::NotCollinear(
            a, b,
        )));
    };
    for &h in &holes {
        let Some(polarity) = board.rail_of(h) else {
            continue;
        };
        let is_endpoint = h == a || h == b;
        let allowed = is_endpoint && matches!(kind, NetKind::Rail(p) if p == polarity);
        if !allowed {
            return Err(RouteError::Exhausted(name.to_string()));
        }
    }
    Ok(())
}

/// Releases every wire the named net has claimed and rebuilds the union-find
/// from the remaining inventory.
pub fn release_net_wires(board: &mut Breadboard, nets: &mut BTreeMap<String, Net>, name: &str) {
    if let Some(net) = nets.get_mut(name) {
        for seg in net.segments.drain(..) {
            board.release_wire_segment(&seg.holes);
        }
    }
    board.rebuild_uf(nets.values());
}

/// Releases the wires of every net; used when a fully placed layout fails the
/// shorts check and the search must backtrack.
pub fn release_all_wires(board: &mut Breadboard, nets: &mut BTreeMap<String, Net>) {
    for net in nets.values_mut() {
        for seg in net.segments.drain(..) {
            board.release_wire_segment(&seg.holes);
        }
    }
    board.rebuild_uf(nets.values());
}

/// Verifies that no two distinct nets share an electrical class. Each net is
/// judged by its terminals plus one materialized hole per fixed anchor.
pub fn check_shorts(
    board: &mut Breadboard,
    nets: &BTreeMap<String, Net>,
) -> Result<(), RouteError> {
    let mut probes: Vec<(String, Vec<Hole>)> = Vec::new();
    for net in nets.values() {
        if net.terms.is_empty() {
            continue;
        }
        let mut holes = net.terms.clone();
        for &polarity in &net.fixed_anchors {
            if let Some(&rep) = board.rail_holes(polarity).first() {
                holes.push(rep);
            }
        }
        probes.push((net.name.clone(), holes));
    }
    for i in 0..probes.len() {
        for j in (i + 1)..probes.len() {
            for a in 0..probes[i].1.len() {
                for b in 0..probes[j].1.len() {
                    if board.connected(probes[i].1[a], probes[j].1[b]) {
                        return Err(RouteError::ShortDetected(
                            probes[i].0.clone(),
                            probes[j].0.clone(),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
