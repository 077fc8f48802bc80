// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The externally visible result of a solve: placed components, committed
//! wires, and a post-hoc audit flag. The schema is serialized as-is for the
//! surrounding pipeline.


use bpc_board::{Hole, Net, Passive};
use log::error;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedComponent {
    pub anchor: Hole,
    pub body: Vec<Hole>,
    pub pins: Vec<Hole>,
    pub nets: (String, String),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedWire {
    pub net: String,
    pub holes: Vec<Hole>,
}

impl SolvedWire {
    /// Manhattan distance between the wire's endpoints.
    #[must_use]
    pub fn span(&self) -> i32 {
        match (self.holes.first(), self.holes.last()) {
            (Some(a), Some(b)) => a.manhattan(*b),
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub components: BTreeMap<String, SolvedComponent>,
    pub wires: Vec<SolvedWire>,
    /// Result of the duplicate-claim audit. `false` means an internal
    /// invariant was violated and is a bug, not a routing failure.
    pub ok: bool,
}

impl Solution {
    /// Snapshots placed components and committed wires. Wires appear in net
    /// iteration order, then in the order their segments were claimed.
    #[must_use]
    pub fn collect(components: &[Passive], nets: &BTreeMap<String, Net>) -> Self {
        let mut solved = BTreeMap::new();
        for comp in components {
            if let Some(placement) = &comp.placement {
                solved.insert(
                    comp.name.clone(),
                    SolvedComponent {
                        anchor: placement.anchor,
                        body: placement.body.clone(),
                        pins: placement.pins.to_vec(),
                        nets: (comp.net_a.clone(), comp.net_b.clone()),
                    },
                );
            }
        }
        let mut wires = Vec::new();
        for net in nets.values() {
            for seg in &net.segments {
                wires.push(SolvedWire {
                    net: net.name.clone(),
                    holes: seg.holes.clone(),
                });
            }
        }
        let ok = audit(&solved, &wires);
        if !ok {
            error!("solution failed the duplicate-claim audit");
        }
        Self {
            components: solved,
            wires,
            ok,
        }
    }
}

/// Every claimed hole must have exactly one owner; the one sanctioned overlap
/// is two wire endpoints of the same net meeting at an L-joint.
fn audit(components: &BTreeMap<String, SolvedComponent>, wires: &[SolvedWire]) -> bool {
    #[derive(PartialEq)]
    enum Owner<'a> {
        Component,
        WireEnd(&'a str),
        WireBody,
    }
    let mut owners: FxHashMap<Hole, Owner> = FxHashMap::default();
    for comp in components.values() {
        for &h in &comp.body {
            if owners.insert(h, Owner::Component).is_some() {
                return false;
            }
        }
    }
    for wire in wires {
        let last = wire.holes.len().saturating_sub(1);
        for (i, &h) in wire.holes.iter().enumerate() {
            let endpoint = i == 0 || i == last;
            match owners.get(&h) {
                None => {
                    let owner = if endpoint {
                        Owner::WireEnd(&wire.net)
                    } else {
                        Owner::WireBody
                    };
                    owners.insert(h, owner);
                }
                Some(Owner::WireEnd(net)) if endpoint && *net == wire.net => {}
                Some(_) => return false,
            }
        }
    }
    true
}

fn write_holes(f: &mut String, holes: &[Hole]) {
    let mut first = true;
    for h in holes {
        if !first {
            f.push_str(", ");
        }
        let _ = write!(f, "{h}");
        first = false;
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, comp) in &self.components {
            let mut body = String::new();
            write_holes(&mut body, &comp.body);
            let mut pins = String::new();
            write_holes(&mut pins, &comp.pins);
            writeln!(
                f,
                "{name} anchor={} body=[{body}] pins=[{pins}] nets=({}, {})",
                comp.anchor, comp.nets.0, comp.nets.1
            )?;
        }
        for wire in &self.wires {
            let mut holes = String::new();
            write_holes(&mut holes, &wire.holes);
            writeln!(f, "wire {} [{holes}]", wire.net)?;
        }
        if !self.ok {
            writeln!(f, "!! duplicate-claim audit failed")?;
        }
        Ok(())
    }
}
