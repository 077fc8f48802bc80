// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Turns a solved layout into a deterministic pick-and-place program.
//!
//! Components are emitted in sorted name order, wires in their stored order.
//! Each part gets a two-phase cycle: pick it up from its tray slot, then set
//! it down at its placement centroid. Every motion block opens with `G90`
//! and XY moves run at `F6000`; Z moves use the default feed.


use crate::machine::{MachineConfig, fmt_mm};
use bpc_pnr::{Solution, SolvedWire};
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One pickup-tray strip: the tray column it occupies and the hole length of
/// each slot along it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraySlot {
    pub column: i32,
    pub slot_len: i32,
}

/// Maps a part's base name (`R`, `LED`, `W4`, ...) to its tray strip. Wire
/// classes are keyed by hole count: a span-3 jumper covers 4 holes and picks
/// from `W4`.
#[derive(Clone, Debug)]
pub struct TrayLayout {
    slots: FxHashMap<String, TraySlot>,
}

impl TrayLayout {
    pub fn set(&mut self, base: impl Into<String>, column: i32, slot_len: i32) {
        self.slots.insert(base.into(), TraySlot { column, slot_len });
    }

    #[must_use]
    pub fn slot(&self, base: &str) -> Option<TraySlot> {
        self.slots.get(base).copied()
    }
}

impl Default for TrayLayout {
    fn default() -> Self {
        let mut slots = FxHashMap::default();
        for (base, column) in [
            ("R", 0),
            ("C", 3),
            ("L", 6),
            ("LED", 9),
            ("W2", 12),
            ("W4", 14),
            ("W6", 16),
        ] {
            slots.insert(base.to_string(), TraySlot {
                column,
                slot_len: 6,
            });
        }
        Self { slots }
    }
}

/// The emitted program plus the parts that had no tray entry and were
/// skipped.
#[derive(Clone, Debug)]
pub struct EmittedProgram {
    pub gcode: String,
    pub skipped: Vec<String>,
}

/// Stateful emitter: wire-slot counters advance per emitted wire and belong
/// to this instance, so concurrent emitters never interleave slots.
pub struct GcodeEmitter {
    config: MachineConfig,
    tray: TrayLayout,
    wire_slots: FxHashMap<String, i32>,
}

impl GcodeEmitter {
    #[must_use]
    pub fn new(config: MachineConfig, tray: TrayLayout) -> Self {
        Self {
            config,
            tray,
            wire_slots: FxHashMap::default(),
        }
    }

    pub fn emit(&mut self, solution: &Solution) -> EmittedProgram {
        let mut out = String::new();
        let mut skipped = Vec::new();

        // Prologue: travel height before any motion.
        let _ = writeln!(out, "G0 Z{}", fmt_mm(self.config.passive_z));

        for (name, comp) in &solution.components {
            let (base, instance) = split_name(name);
            let Some(slot) = self.tray.slot(&base) else {
                warn!("no pickup tray for part {name} (base {base}); skipping");
                skipped.push(name.clone());
                continue;
            };
            let (px, py) = self.slot_center(slot, instance);
            self.pickup_cycle(&mut out, px, py);
            let (bx, by) = self.centroid(&comp.pins);
            self.place_cycle(&mut out, bx, by);
        }

        for wire in &solution.wires {
            let class = format!("W{}", wire.span() + 1);
            let Some(slot) = self.tray.slot(&class) else {
                warn!("no pickup tray for wire class {class}; skipping");
                skipped.push(format!("{class} ({})", wire.net));
                continue;
            };
            let used = self.wire_slots.entry(class).or_insert(0);
            *used += 1;
            let instance = *used;
            let (px, py) = self.slot_center(slot, instance);
            self.pickup_cycle(&mut out, px, py);
            let ends = wire_endpoints(wire);
            let (bx, by) = self.centroid(&ends);
            self.place_cycle(&mut out, bx, by);
        }

        EmittedProgram { gcode: out, skipped }
    }

    /// Board-local centroid of a set of holes: mean of their physical x and
    /// y coordinates.
    fn centroid(&self, holes: &[bpc_board::Hole]) -> (f64, f64) {
        let n = holes.len() as f64;
        let x = holes
            .iter()
            .map(|h| self.config.column_to_x(h.col))
            .sum::<f64>()
            / n;
        let y = holes.iter().map(|h| self.config.row_to_y(h.row)).sum::<f64>() / n;
        (x, y)
    }

    /// Tray-local center of the `instance`-th slot (1-based) of a strip.
    fn slot_center(&self, slot: TraySlot, instance: i32) -> (f64, f64) {
        let x = self.config.column_to_x(slot.column);
        let lo = self.config.row_to_y((instance - 1) * (slot.slot_len - 1));
        let hi = self.config.row_to_y(instance * (slot.slot_len - 1));
        (x, (lo + hi) / 2.0)
    }

    fn pickup_cycle(&self, out: &mut String, x: f64, y: f64) {
        let bed_x = self.config.x_origin_pickup + x;
        let bed_y = self.config.y_origin_pickup - y;
        self.move_block(out, bed_x, bed_y);
        let _ = writeln!(out, "G0 Z{}", fmt_mm(self.config.pickup_z));
        let _ = writeln!(out, "VACUUM_ON");
        let _ = writeln!(out, "G0 Z{}", fmt_mm(self.config.passive_z));
    }

    fn place_cycle(&self, out: &mut String, x: f64, y: f64) {
        let bed_x = self.config.x_origin_placement + x;
        let bed_y = self.config.y_origin_placement - y;
        self.move_block(out, bed_x, bed_y);
        let _ = writeln!(out, "G0 Z{}", fmt_mm(self.config.place_z));
        let _ = writeln!(out, "VACUUM_OFF");
        let _ = writeln!(out, "G0 Z{}", fmt_mm(self.config.passive_z));
    }

    fn move_block(&self, out: &mut String, x: f64, y: f64) {
        let _ = writeln!(out, "G90");
        let _ = writeln!(out, "G0 F6000 X{} Y{}", fmt_mm(x), fmt_mm(y));
        let _ = writeln!(out, "G0 Z{}", fmt_mm(self.config.approach_z));
    }
}

/// `R12` becomes `("R", 12)`; a bare base like `LED` is instance 1.
fn split_name(name: &str) -> (String, i32) {
    let split = name
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map_or(name.len(), |(i, _)| i);
    let base = name[..split].to_ascii_uppercase();
    let instance = name[split..].parse::<i32>().unwrap_or(1).max(1);
    if base.is_empty() {
        (name.to_ascii_uppercase(), 1)
    } else {
        (base, instance)
    }
}

fn wire_endpoints(wire: &SolvedWire) -> Vec<bpc_board::Hole> {
    match (wire.holes.first(), wire.holes.last()) {
        (Some(&a), Some(&b)) => vec![a, b],
        _ => Vec::new(),
    }
}
