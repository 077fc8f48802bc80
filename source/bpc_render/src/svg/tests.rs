// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{render_svg, render_svg_base64};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bpc_board::Hole;
use bpc_pnr::{Solution, SolvedComponent, SolvedWire};
use std::collections::BTreeMap;

fn sample_solution() -> Solution {
    let mut components = BTreeMap::new();
    components.insert(
        "R1".to_string(),
        SolvedComponent {
            anchor: Hole::new(1, 0),
            body: vec![Hole::new(1, 0), Hole::new(2, 0), Hole::new(3, 0)],
            pins: vec![Hole::new(1, 0), Hole::new(3, 0)],
            nets: ("V+".to_string(), "GND".to_string()),
        },
    );
    Solution {
        components,
        wires: vec![SolvedWire {
            net: "GND".to_string(),
            holes: vec![Hole::new(4, -3), Hole::new(4, 0), Hole::new(4, 1), Hole::new(4, 2)],
        }],
        ok: true,
    }
}

#[test]
fn document_structure() {
    let svg = render_svg(&sample_solution(), 6);
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>\n"));
    // Rails are labeled, the trough and gaps are dashed.
    assert_eq!(svg.matches(">V+</text>").count(), 2);
    assert_eq!(svg.matches(">GND</text>").count(), 2);
    assert_eq!(svg.matches("stroke-dasharray").count(), 3);
    // 6 rows of 14 real holes each, drawn as outlined dots.
    assert_eq!(svg.matches(r#"r="3" fill="none""#).count(), 84);
}

#[test]
fn components_and_wires_appear() {
    let svg = render_svg(&sample_solution(), 6);
    assert!(svg.contains(">R1</text>"));
    assert!(svg.contains("fill-opacity=\"0.45\""));
    // One wire line with two highlighted end dots.
    assert_eq!(svg.matches("<line ").count(), 1);
    assert_eq!(svg.matches(r#"r="3.5""#).count(), 2);
}

#[test]
fn render_is_deterministic_and_base64_round_trips() {
    let solution = sample_solution();
    let svg = render_svg(&solution, 6);
    assert_eq!(svg, render_svg(&solution, 6));
    let encoded = render_svg_base64(&solution, 6);
    let decoded = STANDARD.decode(encoded).expect("valid base64");
    assert_eq!(decoded, svg.as_bytes());
}
