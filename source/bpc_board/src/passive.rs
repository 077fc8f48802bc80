// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::board::Hole;
use crate::net::NetKind;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Per-hole step of a body laid out in this orientation.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("h"),
            Orientation::Vertical => f.write_str("v"),
        }
    }
}

/// A claimed location on the board: `body[0]` is the anchor, the pins are the
/// two ends of the body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    pub anchor: Hole,
    pub body: Vec<Hole>,
    pub pins: [Hole; 2],
}

/// A two-pin part bound to an ordered pair of nets. `length` is the number of
/// collinear holes the body covers; the placement stays `None` until the
/// search claims a spot and is cleared again on backtrack.
#[derive(Clone, Debug)]
pub struct Passive {
    pub name: String,
    pub length: i32,
    pub orientation: Orientation,
    pub net_a: String,
    pub net_b: String,
    pub placement: Option<Placement>,
}

impl Passive {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        length: i32,
        orientation: Orientation,
        net_a: impl Into<String>,
        net_b: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            length: length.max(2),
            orientation,
            net_a: net_a.into(),
            net_b: net_b.into(),
            placement: None,
        }
    }

    /// Number of pins bound to a rail net; parts anchored to rails constrain
    /// the search most and are placed first.
    #[must_use]
    pub fn rail_weight(&self) -> usize {
        [&self.net_a, &self.net_b]
            .iter()
            .filter(|n| matches!(NetKind::of_name(n), NetKind::Rail(_)))
            .count()
    }

    /// The net bound to each pin, in body order.
    #[must_use]
    pub fn pin_nets(&self) -> [&str; 2] {
        [&self.net_a, &self.net_b]
    }
}
