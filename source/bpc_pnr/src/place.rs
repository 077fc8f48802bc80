// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Backtracking placement search. Components are ordered most-constrained
//! first (rail-bound, then longest), candidates for each are scored and
//! truncated to a fan-out cap, and a depth-first search claims and releases
//! placements until a fully placed layout also routes and passes the shorts
//! check. Every mutation on the way down has a paired release on the way
//! back up, so the board state at each node is exactly the placements of the
//! path to it.


use crate::error::{Error, RouteError};
use crate::route::{self, SegIdAlloc, find_path_edges};
use crate::solution::Solution;
use bpc_board::board::{RAIL_GND_LEFT, RAIL_GND_RIGHT, RAIL_VPLUS_LEFT, RAIL_VPLUS_RIGHT};
use bpc_board::{Breadboard, CompId, Hole, Net, NetKind, Passive, Placement, Polarity};
use log::debug;
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Per-pin reachability bound in the forward check, in jumper segments.
    pub max_segments: usize,
    /// Fan-out cap: candidates tried per component at each search node.
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_segments: 3,
            top_k: 60,
        }
    }
}

/// Places and routes every component, returning the first layout that routes
/// completely and is short-free.
///
/// `nets` must hold the translator's internal nets; rail nets are created
/// here when a component binds one. `cancel` is polled at each search node;
/// when it reports true the search stops with [`Error::Interrupted`].
pub fn place_and_route(
    board: &mut Breadboard,
    nets: &mut BTreeMap<String, Net>,
    components: &mut [Passive],
    config: &SearchConfig,
    cancel: Option<&dyn Fn() -> bool>,
) -> Result<Solution, Error> {
    // Materialize every net a component binds, rails included.
    for comp in components.iter() {
        for name in comp.pin_nets() {
            match NetKind::of_name(name) {
                NetKind::Rail(polarity) => {
                    nets.entry(name.to_string())
                        .or_insert_with(|| Net::rail(polarity));
                }
                NetKind::Internal => {
                    nets.entry(name.to_string())
                        .or_insert_with(|| Net::internal(name));
                }
            }
        }
    }

    // Rail-anchored parts constrain the space most; place them first.
    let mut order: Vec<usize> = (0..components.len()).collect();
    order.sort_by_key(|&i| {
        let c = &components[i];
        (
            Reverse(c.rail_weight()),
            Reverse(c.length),
            c.name.clone(),
        )
    });

    let mut search = Search {
        board,
        nets,
        components,
        order,
        config,
        cancel,
        seg_ids: SegIdAlloc::default(),
    };
    if search.dfs(0)? {
        Ok(Solution::collect(&*search.components, &*search.nets))
    } else {
        Err(Error::PlacementExhausted)
    }
}

#[derive(Clone, Debug)]
struct Candidate {
    body: Vec<Hole>,
    pins: [Hole; 2],
    score: i64,
}

struct Search<'a> {
    board: &'a mut Breadboard,
    nets: &'a mut BTreeMap<String, Net>,
    components: &'a mut [Passive],
    order: Vec<usize>,
    config: &'a SearchConfig,
    cancel: Option<&'a dyn Fn() -> bool>,
    seg_ids: SegIdAlloc,
}

impl Search<'_> {
    fn dfs(&mut self, depth: usize) -> Result<bool, Error> {
        if self.cancel.is_some_and(|cancel| cancel()) {
            return Err(Error::Interrupted);
        }
        if depth == self.order.len() {
            return self.route_and_check();
        }

        let idx = self.order[depth];
        let candidates = self.candidates(idx);
        debug!(
            "depth {depth}: {} candidates for {}",
            candidates.len(),
            self.components[idx].name
        );
        for candidate in candidates {
            if self.try_place(idx, &candidate)? {
                if self.dfs(depth + 1)? {
                    return Ok(true);
                }
                self.unplace(idx);
            }
        }
        Ok(false)
    }

    /// Admissible placements for one component, best score first, truncated
    /// to the fan-out cap. Scores are computed against the current partial
    /// layout, so candidate order adapts as the search deepens.
    fn candidates(&self, idx: usize) -> Vec<Candidate> {
        let comp = &self.components[idx];
        let (dr, dc) = comp.orientation.delta();
        let len = comp.length;
        let mut candidates = Vec::new();

        for anchor in self.board.board_holes() {
            let body: Vec<Hole> = (0..len)
                .map(|i| Hole::new(anchor.row + dr * i, anchor.col + dc * i))
                .collect();
            // Bodies must stay on real, free board holes; consecutive columns
            // rule out any candidate that would straddle the trough.
            if !body
                .iter()
                .all(|&h| self.board.is_board_hole(h) && self.board.is_empty_hole(h))
            {
                continue;
            }
            let pins = [body[0], body[body.len() - 1]];

            // Each pin's strip must keep a landing hole that the body itself
            // does not swallow.
            if !pins.iter().all(|&pin| {
                self.board
                    .frontier_of_hole(pin)
                    .iter()
                    .any(|f| !body.contains(f))
            }) {
                continue;
            }

            // A shared strip would hard-wire the two pins together.
            let strip_a = self.board.strip_of(pins[0]);
            let strip_b = self.board.strip_of(pins[1]);
            if strip_a == strip_b && comp.net_a != comp.net_b {
                continue;
            }

            // A pin may not land on a strip that already carries another net.
            if self.strip_hosts_foreign_term(pins[0], &comp.net_a)
                || self.strip_hosts_foreign_term(pins[1], &comp.net_b)
            {
                continue;
            }

            let score = self.score(comp, &body, pins);
            candidates.push(Candidate { body, pins, score });
        }

        candidates.sort_by(|a, b| (a.score, a.body[0]).cmp(&(b.score, b.body[0])));
        candidates.truncate(self.config.top_k);
        candidates
    }

    fn strip_hosts_foreign_term(&self, pin: Hole, net_name: &str) -> bool {
        let Some(strip) = self.board.strip_of(pin) else {
            return false;
        };
        self.nets.values().any(|net| {
            net.name != net_name && net.terms.iter().any(|t| strip.contains(t))
        })
    }

    /// Smaller is better: rail pins want to sit near their rail, internal
    /// pins near the net's existing terminals, and components repeating an
    /// already-placed net pair cluster next to their twin.
    fn score(&self, comp: &Passive, body: &[Hole], pins: [Hole; 2]) -> i64 {
        let mut score = 0i64;
        for (pin, net_name) in [(pins[0], &comp.net_a), (pins[1], &comp.net_b)] {
            match NetKind::of_name(net_name) {
                NetKind::Rail(polarity) => {
                    let cols = match polarity {
                        Polarity::VPlus => [RAIL_VPLUS_LEFT, RAIL_VPLUS_RIGHT],
                        Polarity::Gnd => [RAIL_GND_LEFT, RAIL_GND_RIGHT],
                    };
                    let dist = cols
                        .iter()
                        .map(|&c| i64::from((pin.col - c).abs()))
                        .min()
                        .unwrap_or(0);
                    score += dist;
                }
                NetKind::Internal => {
                    if let Some(net) = self.nets.get(net_name.as_str()) {
                        if let Some(dist) =
                            net.terms.iter().map(|&t| pin.manhattan(t)).min()
                        {
                            score += i64::from(dist);
                        }
                    }
                }
            }
        }
        for other in self.components.iter() {
            if other.name == comp.name {
                continue;
            }
            if other.net_a != comp.net_a || other.net_b != comp.net_b {
                continue;
            }
            if let Some(placement) = &other.placement {
                let dist = i64::from(body[0].manhattan(placement.anchor));
                score -= (4 - dist).max(0);
            }
        }
        score
    }

    /// Claims the candidate and runs the per-pin reachability forward check.
    /// On success the pins are bound into their nets; on a failed check the
    /// claim is released and `Ok(false)` tells the caller to try the next
    /// candidate.
    fn try_place(&mut self, idx: usize, candidate: &Candidate) -> Result<bool, Error> {
        let (net_a, net_b) = {
            let comp = &self.components[idx];
            (comp.net_a.clone(), comp.net_b.clone())
        };
        self.board
            .claim_component(CompId(idx), &candidate.body, candidate.pins)?;

        let reachable = self.pin_reachable(candidate.pins[0], &net_a)
            && self.pin_reachable(candidate.pins[1], &net_b);
        if !reachable {
            self.board
                .release_component(&candidate.body, candidate.pins);
            return Ok(false);
        }

        if let Some(net) = self.nets.get_mut(&net_a) {
            net.add_term(candidate.pins[0]);
        }
        if let Some(net) = self.nets.get_mut(&net_b) {
            net.add_term(candidate.pins[1]);
        }
        self.components[idx].placement = Some(Placement {
            anchor: candidate.body[0],
            body: candidate.body.clone(),
            pins: candidate.pins,
        });
        Ok(true)
    }

    /// A pin is reachable when its net has no targets yet, already shares a
    /// class with one, or a jumper path of at most `max_segments` edges
    /// connects the pin's frontier to a target frontier.
    fn pin_reachable(&mut self, pin: Hole, net_name: &str) -> bool {
        let (targets, anchors) = match self.nets.get(net_name) {
            Some(net) => (net.terms.clone(), net.fixed_anchors.clone()),
            None => return true,
        };
        if targets.is_empty() && anchors.is_empty() {
            return true;
        }
        if targets.iter().any(|&t| self.board.connected(pin, t)) {
            return true;
        }

        let src = self.board.frontier_of_hole(pin);
        if src.is_empty() {
            return false;
        }
        let mut dst: Vec<Hole> = targets
            .iter()
            .flat_map(|&t| self.board.frontier_of_hole(t))
            .collect();
        for &polarity in &anchors {
            dst.extend(self.board.frontier_of_rail(polarity));
        }
        dst.sort_unstable();
        dst.dedup();
        if dst.is_empty() {
            return false;
        }
        find_path_edges(self.board, &src, &dst, Some(self.config.max_segments)).is_some()
    }

    fn unplace(&mut self, idx: usize) {
        let (net_a, net_b, placement) = {
            let comp = &mut self.components[idx];
            let placement = comp.placement.take();
            (comp.net_a.clone(), comp.net_b.clone(), placement)
        };
        let Some(placement) = placement else {
            return;
        };
        if let Some(net) = self.nets.get_mut(&net_a) {
            net.remove_term(placement.pins[0]);
        }
        if let Some(net) = self.nets.get_mut(&net_b) {
            net.remove_term(placement.pins[1]);
        }
        self.board.release_component(&placement.body, placement.pins);
    }

    /// Leaf of the search: route every net, then confirm no two nets share a
    /// class. Route and short failures roll the wires back and report a dead
    /// leaf; invariant violations are bugs and abort the solve.
    fn route_and_check(&mut self) -> Result<bool, Error> {
        match route::route_all(self.board, self.nets, &mut self.seg_ids) {
            Ok(()) => {}
            Err(RouteError::Invariant(violation)) => return Err(Error::Invariant(violation)),
            Err(err) => {
                debug!("routing failed, backtracking: {err}");
                route::release_all_wires(self.board, self.nets);
                return Ok(false);
            }
        }
        match route::check_shorts(self.board, self.nets) {
            Ok(()) => Ok(true),
            Err(err) => {
                debug!("shorts check failed, backtracking: {err}");
                route::release_all_wires(self.board, self.nets);
                Ok(false)
            }
        }
    }
}
