// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lowers a parsed netlist into the abstract placement problem: canonical
//! rail names, compacted internal nets, and two-pin passives bound to net
//! pairs.

#[cfg(test)]
mod tests;

use crate::error::Error;
use crate::parse::{Family, Netlist};
use bpc_board::{Net, Orientation, Passive};
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

/// Per-family placement defaults (body length in holes, orientation). The
/// default length of a family is board inventory calibration, so it is
/// configuration rather than a constant.
#[derive(Clone, Debug)]
pub struct FamilyDefaults {
    families: FxHashMap<String, (i32, Orientation)>,
    fallback: (i32, Orientation),
}

impl FamilyDefaults {
    pub fn set(&mut self, family: impl Into<String>, length: i32, orientation: Orientation) {
        self.families.insert(family.into(), (length, orientation));
    }

    #[must_use]
    pub fn of(&self, family: &str) -> (i32, Orientation) {
        self.families.get(family).copied().unwrap_or(self.fallback)
    }
}

impl Default for FamilyDefaults {
    fn default() -> Self {
        let mut families = FxHashMap::default();
        for family in ["R", "C", "L", "D", "LED"] {
            families.insert(family.to_string(), (3, Orientation::Vertical));
        }
        Self {
            families,
            fallback: (3, Orientation::Vertical),
        }
    }
}

/// The translator's output: empty internal nets (rail nets are created by the
/// search when first bound), defaulted passives, and the component→net-pair
/// bindings.
#[derive(Clone, Debug)]
pub struct Translation {
    pub nets: BTreeMap<String, Net>,
    pub components: Vec<Passive>,
    pub bindings: BTreeMap<String, (String, String)>,
}

pub fn translate(netlist: &Netlist) -> Result<Translation, Error> {
    translate_with(netlist, &FamilyDefaults::default())
}

pub fn translate_with(
    netlist: &Netlist,
    defaults: &FamilyDefaults,
) -> Result<Translation, Error> {
    // The supply is a voltage source whose negative terminal is ground; its
    // positive node becomes the canonical V+.
    let vplus = netlist
        .elements
        .iter()
        .find(|e| e.family == Family::VoltageSource && e.nodes[1] == "0")
        .map(|e| e.nodes[0].clone());
    debug!("detected V+ net: {vplus:?}");

    // Diode models whose names mention LED mark their instances as LEDs.
    let led_models: FxHashSet<&str> = netlist
        .models
        .iter()
        .filter(|m| {
            m.kind.to_ascii_uppercase().starts_with('D')
                && m.name.to_ascii_uppercase().contains("LED")
        })
        .map(|m| m.name.as_str())
        .collect();

    let alias = |node: &str| -> String {
        if node == "0" || node.eq_ignore_ascii_case("gnd") {
            return "GND".to_string();
        }
        if vplus.as_deref() == Some(node) {
            return "V+".to_string();
        }
        node.to_string()
    };

    let mut entries: Vec<(String, String, String)> = Vec::new();
    for element in &netlist.elements {
        if element.family.is_source() {
            continue;
        }
        let a = alias(&element.nodes[0]);
        let b = alias(&element.nodes[1]);
        if vplus.is_none() && (a == "V+" || b == "V+") {
            return Err(Error::MissingSupply);
        }

        let mut base = element.ref_name.clone();
        if element.family == Family::Diode {
            let model = element.tail.first().map(String::as_str).unwrap_or("");
            if led_models.contains(model) || model.to_ascii_uppercase().contains("LED") {
                base = "LED".to_string();
            }
        }
        entries.push((base, a, b));
    }

    // Rename internal nets to N1, N2, ... in first-seen order.
    let mut mapping: FxHashMap<String, String> = FxHashMap::default();
    let mut compact = |net: String| -> String {
        if net == "V+" || net == "GND" {
            return net;
        }
        let next = format!("N{}", mapping.len() + 1);
        mapping.entry(net).or_insert(next).clone()
    };
    let entries: Vec<(String, String, String)> = entries
        .into_iter()
        .map(|(base, a, b)| (base, compact(a), compact(b)))
        .collect();
    debug!("compacted nets: {mapping:?}");

    // Duplicate base names: the first instance keeps the base, the rest get
    // numeric suffixes (LED, LED1, LED2, ...).
    let mut name_counts: FxHashMap<String, usize> = FxHashMap::default();
    let mut components = Vec::new();
    let mut bindings = BTreeMap::new();
    let mut nets = BTreeMap::new();
    for (base, a, b) in entries {
        let seen = name_counts.entry(base.clone()).or_insert(0);
        let name = if *seen == 0 {
            base.clone()
        } else {
            format!("{base}{seen}")
        };
        *seen += 1;

        for net in [&a, &b] {
            if net != "V+" && net != "GND" {
                nets.entry(net.clone())
                    .or_insert_with(|| Net::internal(net.clone()));
            }
        }

        let (length, orientation) = defaults.of(&family_key(&name));
        components.push(Passive::new(
            name.as_str(),
            length,
            orientation,
            a.as_str(),
            b.as_str(),
        ));
        bindings.insert(name, (a, b));
    }

    Ok(Translation {
        nets,
        components,
        bindings,
    })
}

/// The defaults key for a component name: `LED`-prefixed names map to the LED
/// family, anything else to its leading letter.
fn family_key(name: &str) -> String {
    let letters: String = name
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>()
        .to_ascii_uppercase();
    if letters.starts_with("LED") {
        "LED".to_string()
    } else {
        letters.chars().next().map(String::from).unwrap_or_default()
    }
}
