// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Deterministic SVG rendering of a solved board: every real hole as an
//! outlined dot, dashed rectangles over the trough and the rail gaps,
//! labeled rail columns, translucent component bodies, and wire lines with
//! highlighted end dots. The document is plain text built in a fixed order,
//! so byte-identical output is guaranteed for a given layout; the base64
//! form is what the surrounding pipeline ships to its consumers.

#[cfg(test)]
mod tests;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bpc_board::Hole;
use bpc_board::board::{
    LEFT_COL_HI, LEFT_COL_LO, LEFT_GAP, RAIL_GND_LEFT, RAIL_GND_RIGHT, RAIL_VPLUS_LEFT,
    RAIL_VPLUS_RIGHT, RIGHT_COL_HI, RIGHT_COL_LO, RIGHT_GAP, TROUGH_HI, TROUGH_LO,
};
use bpc_pnr::Solution;
use std::fmt::Write;

const CELL: f64 = 18.0;
const MARGIN: f64 = 36.0;

fn x(col: i32) -> f64 {
    MARGIN + f64::from(col - RAIL_VPLUS_LEFT) * CELL
}

fn y(row: i32) -> f64 {
    MARGIN + f64::from(row) * CELL
}

fn board_cols() -> impl Iterator<Item = i32> {
    (LEFT_COL_LO..=LEFT_COL_HI).chain(RIGHT_COL_LO..=RIGHT_COL_HI)
}

/// Renders the layout as an SVG document.
#[must_use]
pub fn render_svg(solution: &Solution, rows: i32) -> String {
    let width = 2.0 * MARGIN + f64::from(RAIL_GND_RIGHT - RAIL_VPLUS_LEFT) * CELL;
    let height = 2.0 * MARGIN + f64::from(rows - 1) * CELL;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);

    // Trough and gap columns: dashed rectangles spanning the board height.
    for (lo, hi) in [
        (TROUGH_LO, TROUGH_HI),
        (LEFT_GAP[0], LEFT_GAP[1]),
        (RIGHT_GAP[0], RIGHT_GAP[1]),
    ] {
        let _ = writeln!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#999" stroke-dasharray="4 3"/>"##,
            x(lo) - CELL / 2.0,
            y(0) - CELL / 2.0,
            f64::from(hi - lo + 1) * CELL,
            f64::from(rows) * CELL,
        );
    }

    // Rail columns: outlined rectangles labeled with their polarity.
    for (col, label) in [
        (RAIL_VPLUS_LEFT, "V+"),
        (RAIL_GND_LEFT, "GND"),
        (RAIL_VPLUS_RIGHT, "V+"),
        (RAIL_GND_RIGHT, "GND"),
    ] {
        let _ = writeln!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#555"/>"##,
            x(col) - CELL / 2.0,
            y(0) - CELL / 2.0,
            CELL,
            f64::from(rows) * CELL,
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="middle">{label}</text>"#,
            x(col),
            y(0) - CELL,
        );
    }

    // Every real hole as an outlined dot, row-major.
    for row in 0..rows {
        for col in [RAIL_VPLUS_LEFT, RAIL_GND_LEFT]
            .into_iter()
            .chain(board_cols())
            .chain([RAIL_VPLUS_RIGHT, RAIL_GND_RIGHT])
        {
            let _ = writeln!(
                out,
                r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="none" stroke="#777"/>"##,
                x(col),
                y(row),
            );
        }
    }

    // Component bodies: translucent rectangles with the name at the centroid.
    for (name, comp) in &solution.components {
        let (min, max) = bounds(&comp.body);
        let _ = writeln!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="#4f81bd" fill-opacity="0.45"/>"##,
            x(min.col) - CELL * 0.4,
            y(min.row) - CELL * 0.4,
            f64::from(max.col - min.col) * CELL + CELL * 0.8,
            f64::from(max.row - min.row) * CELL + CELL * 0.8,
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{name}</text>"#,
            (x(min.col) + x(max.col)) / 2.0,
            (y(min.row) + y(max.row)) / 2.0 + 4.0,
        );
    }

    // Wires: a line between the endpoints with highlighted end dots.
    for wire in &solution.wires {
        let (Some(&a), Some(&b)) = (wire.holes.first(), wire.holes.last()) else {
            continue;
        };
        let _ = writeln!(
            out,
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#c0392b" stroke-width="2"/>"##,
            x(a.col),
            y(a.row),
            x(b.col),
            y(b.row),
        );
        for h in [a, b] {
            let _ = writeln!(
                out,
                r##"<circle cx="{:.1}" cy="{:.1}" r="3.5" fill="#c0392b"/>"##,
                x(h.col),
                y(h.row),
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

/// The SVG document base64-encoded for consumers that expect an embedded
/// image payload.
#[must_use]
pub fn render_svg_base64(solution: &Solution, rows: i32) -> String {
    STANDARD.encode(render_svg(solution, rows))
}

fn bounds(holes: &[Hole]) -> (Hole, Hole) {
    let mut min = Hole::new(i32::MAX, i32::MAX);
    let mut max = Hole::new(i32::MIN, i32::MIN);
    for h in holes {
        min.row = min.row.min(h.row);
        min.col = min.col.min(h.col);
        max.row = max.row.max(h.row);
        max.col = max.col.max(h.col);
    }
    (min, max)
}
