// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Physical calibration of the gantry and the board it serves: hole pitch,
//! bed origins of the pickup and placement areas, the named Z heights, and
//! the asymmetric inter-column distances near the rail gaps.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// An inter-column stretch whose physical width differs from `span * pitch`;
/// the gaps flanking the rails are wider than the hole grid suggests.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpan {
    pub lo: i32,
    pub hi: i32,
    /// Total width of the stretch in mm.
    pub distance: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    /// Hole-to-hole spacing in mm.
    pub pitch: f64,
    pub x_origin_pickup: f64,
    pub y_origin_pickup: f64,
    pub x_origin_placement: f64,
    pub y_origin_placement: f64,
    pub pickup_z: f64,
    pub place_z: f64,
    /// Travel height between stations.
    pub passive_z: f64,
    /// Height at which the head approaches a station before the final drop.
    pub approach_z: f64,
    pub column_spans: Vec<ColumnSpan>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            pitch: 2.54,
            x_origin_pickup: 156.7,
            y_origin_pickup: 193.25,
            x_origin_placement: 23.7,
            y_origin_placement: 228.25,
            pickup_z: 15.0,
            place_z: 14.0,
            passive_z: 45.0,
            approach_z: 25.0,
            column_spans: vec![
                ColumnSpan {
                    lo: -3,
                    hi: 0,
                    distance: 6.7,
                },
                ColumnSpan {
                    lo: 11,
                    hi: 14,
                    distance: 6.7,
                },
            ],
        }
    }
}

impl MachineConfig {
    /// Board-local x of a column: the summed inter-column distances walking
    /// from column 0, using a span's pro-rated width where one is configured
    /// and the pitch everywhere else.
    #[must_use]
    pub fn column_to_x(&self, col: i32) -> f64 {
        let step = if col >= 0 { 1 } else { -1 };
        let mut x = 0.0;
        let mut c = 0;
        while c != col {
            let next = c + step;
            let (lo, hi) = if c < next { (c, next) } else { (next, c) };
            let width = self
                .column_spans
                .iter()
                .find(|s| s.lo <= lo && hi <= s.hi)
                .map_or(self.pitch, |s| s.distance / f64::from(s.hi - s.lo));
            x += f64::from(step) * width;
            c = next;
        }
        x
    }

    #[must_use]
    pub fn row_to_y(&self, row: i32) -> f64 {
        f64::from(row) * self.pitch
    }
}

/// Formats a coordinate with at most three decimals, trailing zeros trimmed,
/// the way the printer expects its numbers.
#[must_use]
pub fn fmt_mm(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
