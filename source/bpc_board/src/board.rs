// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The fixed geometric and electrical model of a solderless breadboard.
//!
//! Columns `0..=4` and `7..=11` are board holes; each row's five holes on one
//! half form a strip that is electrically one node. Columns `5..=6` are the
//! central trough and `-2..=-1` / `12..=13` the rail gaps; none of these have
//! holes. The four rail columns (`-4`/`14` carry V+, `-3`/`15` carry GND) run
//! the full height of the board and are each one electrical node.
//!
//! The board owns per-hole occupancy and a union-find over holes seeded with
//! the intrinsic strip and rail connectivity. Claims are transactional: every
//! claim has a symmetric release, and the union-find is rebuilt from the
//! current wire inventory whenever wires are released.


use crate::config::Config;
use crate::net::{Net, Polarity};
use crate::union_find::UnionFind;
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

pub const LEFT_COL_LO: i32 = 0;
pub const LEFT_COL_HI: i32 = 4;
pub const RIGHT_COL_LO: i32 = 7;
pub const RIGHT_COL_HI: i32 = 11;
pub const TROUGH_LO: i32 = 5;
pub const TROUGH_HI: i32 = 6;
pub const LEFT_GAP: [i32; 2] = [-2, -1];
pub const RIGHT_GAP: [i32; 2] = [12, 13];
pub const RAIL_VPLUS_LEFT: i32 = -4;
pub const RAIL_GND_LEFT: i32 = -3;
pub const RAIL_VPLUS_RIGHT: i32 = 14;
pub const RAIL_GND_RIGHT: i32 = 15;

/// A discrete insertion point at integer `(row, col)`. Rail holes live at
/// negative columns on the left and past the board on the right.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Hole {
    pub row: i32,
    pub col: i32,
}

impl Hole {
    #[must_use]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl From<(i32, i32)> for Hole {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<Hole> for (i32, i32) {
    fn from(h: Hole) -> Self {
        (h.row, h.col)
    }
}

impl Display for Hole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CompId(pub usize);

impl Display for CompId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "comp_{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SegId(pub usize);

impl Display for SegId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "seg_{}", self.0)
    }
}

/// What currently sits in a hole. Every real hole always has exactly one tag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Occupancy {
    #[default]
    Empty,
    CompBody(CompId),
    CompPin(CompId),
    WireEnd(SegId),
    WireBody(SegId),
}

impl Occupancy {
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Occupancy::Empty)
    }
}

#[derive(Clone, Debug, Diagnostic, Error, Eq, PartialEq)]
pub enum InvariantViolation {
    #[error("claim on occupied hole {0}")]
    #[diagnostic(code("bpc.board.occupied"))]
    Occupied(Hole),
    #[error("reference to nonexistent hole {0}")]
    #[diagnostic(code("bpc.board.no_such_hole"))]
    NoSuchHole(Hole),
    #[error("holes {0} and {1} are not collinear")]
    #[diagnostic(code("bpc.board.not_collinear"))]
    NotCollinear(Hole, Hole),
}

#[derive(Debug)]
pub struct Breadboard {
    rows: i32,
    wire_lengths: Vec<i32>,
    occupancy: FxHashMap<Hole, Occupancy>,
    uf: UnionFind<Hole>,
}

impl Breadboard {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut board = Self {
            rows: config.rows,
            wire_lengths: config.wire_lengths.clone(),
            occupancy: FxHashMap::default(),
            uf: UnionFind::new(),
        };
        for row in 0..board.rows {
            for col in (LEFT_COL_LO..=LEFT_COL_HI).chain(RIGHT_COL_LO..=RIGHT_COL_HI) {
                board.occupancy.insert(Hole::new(row, col), Occupancy::Empty);
            }
            for col in [
                RAIL_VPLUS_LEFT,
                RAIL_GND_LEFT,
                RAIL_VPLUS_RIGHT,
                RAIL_GND_RIGHT,
            ] {
                board.occupancy.insert(Hole::new(row, col), Occupancy::Empty);
            }
        }
        board.seed_uf();
        board
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn wire_lengths(&self) -> &[i32] {
        &self.wire_lengths
    }

    /// Which rail a column belongs to, independent of row.
    #[must_use]
    pub fn rail_of_col(col: i32) -> Option<Polarity> {
        match col {
            RAIL_VPLUS_LEFT | RAIL_VPLUS_RIGHT => Some(Polarity::VPlus),
            RAIL_GND_LEFT | RAIL_GND_RIGHT => Some(Polarity::Gnd),
            _ => None,
        }
    }

    #[must_use]
    pub fn rail_of(&self, h: Hole) -> Option<Polarity> {
        if h.row >= 0 && h.row < self.rows {
            Self::rail_of_col(h.col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_board_hole(&self, h: Hole) -> bool {
        h.row >= 0
            && h.row < self.rows
            && ((LEFT_COL_LO..=LEFT_COL_HI).contains(&h.col)
                || (RIGHT_COL_LO..=RIGHT_COL_HI).contains(&h.col))
    }

    #[must_use]
    pub fn is_rail_hole(&self, h: Hole) -> bool {
        self.rail_of(h).is_some()
    }

    #[must_use]
    pub fn is_real_hole(&self, h: Hole) -> bool {
        self.occupancy.contains_key(&h)
    }

    /// All board holes in ascending `(row, col)` order; the candidate
    /// enumeration of the placement search iterates this.
    #[must_use]
    pub fn board_holes(&self) -> Vec<Hole> {
        let mut holes: Vec<Hole> = (0..self.rows)
            .flat_map(|row| {
                (LEFT_COL_LO..=LEFT_COL_HI)
                    .chain(RIGHT_COL_LO..=RIGHT_COL_HI)
                    .map(move |col| Hole::new(row, col))
            })
            .collect();
        holes.sort_unstable();
        holes
    }

    /// All holes of the named rail (both sides), ascending.
    #[must_use]
    pub fn rail_holes(&self, polarity: Polarity) -> Vec<Hole> {
        let cols = match polarity {
            Polarity::VPlus => [RAIL_VPLUS_LEFT, RAIL_VPLUS_RIGHT],
            Polarity::Gnd => [RAIL_GND_LEFT, RAIL_GND_RIGHT],
        };
        let mut holes: Vec<Hole> = (0..self.rows)
            .flat_map(|row| cols.into_iter().map(move |col| Hole::new(row, col)))
            .collect();
        holes.sort_unstable();
        holes
    }

    /// The five holes of the strip containing a board hole, ascending.
    #[must_use]
    pub fn strip_of(&self, h: Hole) -> Option<Vec<Hole>> {
        if !self.is_board_hole(h) {
            return None;
        }
        let (lo, hi) = if h.col <= LEFT_COL_HI {
            (LEFT_COL_LO, LEFT_COL_HI)
        } else {
            (RIGHT_COL_LO, RIGHT_COL_HI)
        };
        Some((lo..=hi).map(|col| Hole::new(h.row, col)).collect())
    }

    #[must_use]
    pub fn occupancy(&self, h: Hole) -> Option<Occupancy> {
        self.occupancy.get(&h).copied()
    }

    #[must_use]
    pub fn is_empty_hole(&self, h: Hole) -> bool {
        matches!(self.occupancy.get(&h), Some(o) if o.is_empty())
    }

    /// The legal landing sites for a jumper that must reach the electrical
    /// node of `h`: the other empty holes of `h`'s strip (board holes) or of
    /// `h`'s rail (rail holes).
    #[must_use]
    pub fn frontier_of_hole(&self, h: Hole) -> Vec<Hole> {
        if let Some(polarity) = self.rail_of(h) {
            return self
                .frontier_of_rail(polarity)
                .into_iter()
                .filter(|&other| other != h)
                .collect();
        }
        match self.strip_of(h) {
            Some(strip) => strip
                .into_iter()
                .filter(|&other| other != h && self.is_empty_hole(other))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All empty holes of the named rail: where a rail-bound net may land.
    #[must_use]
    pub fn frontier_of_rail(&self, polarity: Polarity) -> Vec<Hole> {
        self.rail_holes(polarity)
            .into_iter()
            .filter(|&h| self.is_empty_hole(h))
            .collect()
    }

    /// Every real hole on the straight line from `a` to `b` inclusive, in
    /// walk order. Columns with no holes (trough and gaps) are skipped, which
    /// is how a jumper hops from a rail over the gap onto the board. `None`
    /// if the holes are not axis-aligned or an endpoint does not exist.
    #[must_use]
    pub fn line_holes(&self, a: Hole, b: Hole) -> Option<Vec<Hole>> {
        if !self.is_real_hole(a) || !self.is_real_hole(b) {
            return None;
        }
        if a.row != b.row && a.col != b.col {
            return None;
        }
        let steps = a.manhattan(b);
        let dr = (b.row - a.row).signum();
        let dc = (b.col - a.col).signum();
        let mut holes = Vec::new();
        for i in 0..=steps {
            let h = Hole::new(a.row + dr * i, a.col + dc * i);
            if self.is_real_hole(h) {
                holes.push(h);
            }
        }
        Some(holes)
    }

    /// Claims a component body. Body holes become `CompBody`, the pin holes
    /// (the body's two ends) become `CompPin`. Fails without mutating if any
    /// hole is missing or occupied.
    pub fn claim_component(
        &mut self,
        id: CompId,
        body: &[Hole],
        pins: [Hole; 2],
    ) -> Result<(), InvariantViolation> {
        for &h in body.iter().chain(pins.iter()) {
            match self.occupancy.get(&h) {
                None => return Err(InvariantViolation::NoSuchHole(h)),
                Some(o) if !o.is_empty() => return Err(InvariantViolation::Occupied(h)),
                Some(_) => {}
            }
        }
        for &h in body {
            self.occupancy.insert(h, Occupancy::CompBody(id));
        }
        for h in pins {
            self.occupancy.insert(h, Occupancy::CompPin(id));
        }
        Ok(())
    }

    /// Restores every hole of a previously claimed component to empty.
    pub fn release_component(&mut self, body: &[Hole], pins: [Hole; 2]) {
        for &h in body.iter().chain(pins.iter()) {
            self.occupancy.insert(h, Occupancy::Empty);
        }
    }

    /// Claims a wire segment over `holes` (walk order, endpoints first and
    /// last). Endpoints become `WireEnd`, interiors `WireBody`, and the
    /// segment's holes are unioned so the electrical state reflects the new
    /// jumper immediately.
    ///
    /// `shared_end` names the one endpoint that may already carry a
    /// `WireEnd`: the joint where an L-shaped route's segments meet. The
    /// joint keeps its original tag. Every other hole must be empty.
    pub fn claim_wire_segment(
        &mut self,
        id: SegId,
        holes: &[Hole],
        shared_end: Option<Hole>,
    ) -> Result<(), InvariantViolation> {
        let (&first, &last) = match (holes.first(), holes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(()),
        };
        for &h in holes {
            match self.occupancy.get(&h) {
                None => return Err(InvariantViolation::NoSuchHole(h)),
                Some(Occupancy::WireEnd(_))
                    if Some(h) == shared_end && (h == first || h == last) => {}
                Some(o) if !o.is_empty() => return Err(InvariantViolation::Occupied(h)),
                Some(_) => {}
            }
        }
        for &h in holes {
            if Some(h) == shared_end {
                continue;
            }
            let tag = if h == first || h == last {
                Occupancy::WireEnd(id)
            } else {
                Occupancy::WireBody(id)
            };
            self.occupancy.insert(h, tag);
        }
        for pair in holes.windows(2) {
            self.uf.union(pair[0], pair[1]);
        }
        Ok(())
    }

    /// Restores a segment's holes to empty. The union-find now overstates
    /// connectivity; callers must follow up with [`Self::rebuild_uf`].
    pub fn release_wire_segment(&mut self, holes: &[Hole]) {
        for &h in holes {
            self.occupancy.insert(h, Occupancy::Empty);
        }
    }

    pub fn find(&mut self, h: Hole) -> Hole {
        self.uf.find(h)
    }

    pub fn connected(&mut self, a: Hole, b: Hole) -> bool {
        self.uf.same(a, b)
    }

    /// Resets the union-find to the empty-board baseline, then re-unions the
    /// holes of every claimed wire segment across all nets.
    pub fn rebuild_uf<'a>(&mut self, nets: impl IntoIterator<Item = &'a Net>) {
        self.seed_uf();
        for net in nets {
            for seg in &net.segments {
                for pair in seg.holes.windows(2) {
                    self.uf.union(pair[0], pair[1]);
                }
            }
        }
    }

    /// Empty-board baseline: each strip is one class, each rail is one class.
    fn seed_uf(&mut self) {
        self.uf = UnionFind::new();
        for &h in self.occupancy.keys() {
            self.uf.add(h);
        }
        for row in 0..self.rows {
            for col in LEFT_COL_LO..LEFT_COL_HI {
                self.uf.union(Hole::new(row, col), Hole::new(row, col + 1));
            }
            for col in RIGHT_COL_LO..RIGHT_COL_HI {
                self.uf.union(Hole::new(row, col), Hole::new(row, col + 1));
            }
        }
        for polarity in [Polarity::VPlus, Polarity::Gnd] {
            let holes = self.rail_holes(polarity);
            for pair in holes.windows(2) {
                self.uf.union(pair[0], pair[1]);
            }
        }
    }
}
