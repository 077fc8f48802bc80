// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::board::{Hole, SegId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Which rail a net (or rail hole) is tied to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Polarity {
    #[serde(rename = "V+")]
    VPlus,
    #[serde(rename = "GND")]
    Gnd,
}

impl Polarity {
    /// The canonical net name the translator assigns to this rail.
    #[must_use]
    pub fn net_name(self) -> &'static str {
        match self {
            Polarity::VPlus => "V+",
            Polarity::Gnd => "GND",
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.net_name())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NetKind {
    Rail(Polarity),
    Internal,
}

impl NetKind {
    /// Classifies a net by its canonical name.
    #[must_use]
    pub fn of_name(name: &str) -> Self {
        match name {
            "V+" => NetKind::Rail(Polarity::VPlus),
            "GND" => NetKind::Rail(Polarity::Gnd),
            _ => NetKind::Internal,
        }
    }
}

/// A committed jumper: the claimed segment id plus every real hole on the
/// straight line between its endpoints (gap and trough columns have no holes
/// and are skipped).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WireSeg {
    pub id: SegId,
    pub holes: Vec<Hole>,
}

impl WireSeg {
    /// Manhattan distance between the segment's endpoints.
    #[must_use]
    pub fn span(&self) -> i32 {
        match (self.holes.first(), self.holes.last()) {
            (Some(a), Some(b)) => (a.row - b.row).abs() + (a.col - b.col).abs(),
            _ => 0,
        }
    }
}

/// A named electrical node: the pin holes that must end up connected, the
/// rails it is anchored to, and the jumpers claimed for it so far.
#[derive(Clone, Debug)]
pub struct Net {
    pub name: String,
    pub kind: NetKind,
    /// Pin holes currently attached to the net, in binding order.
    pub terms: Vec<Hole>,
    pub fixed_anchors: Vec<Polarity>,
    pub segments: Vec<WireSeg>,
}

impl Net {
    #[must_use]
    pub fn internal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NetKind::Internal,
            terms: Vec::new(),
            fixed_anchors: Vec::new(),
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn rail(polarity: Polarity) -> Self {
        Self {
            name: polarity.net_name().to_string(),
            kind: NetKind::Rail(polarity),
            terms: Vec::new(),
            fixed_anchors: vec![polarity],
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_rail(&self) -> bool {
        matches!(self.kind, NetKind::Rail(_))
    }

    pub fn add_term(&mut self, hole: Hole) {
        if !self.terms.contains(&hole) {
            self.terms.push(hole);
        }
    }

    /// Removes one specific pin hole; used when the search unbinds a
    /// candidate placement.
    pub fn remove_term(&mut self, hole: Hole) {
        self.terms.retain(|&t| t != hole);
    }
}
