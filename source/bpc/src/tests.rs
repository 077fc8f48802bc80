// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use indoc::indoc;

const LED_DRIVER: &str = indoc! {"
    V1 VCC 0 DC 5
    R1 VCC N1 330
    D1 N1 0 DLED
    .model DLED D ( IS=1e-14 )
    .end
"};

#[test]
fn end_to_end_gcode_emission() {
    let solved = solve(LED_DRIVER, &SolveConfig::default()).expect("solves");
    assert!(solved.solution.ok);

    let mut emitter = GcodeEmitter::new(MachineConfig::default(), TrayLayout::default());
    let program = emitter.emit(&solved.solution);
    assert!(program.skipped.is_empty(), "skipped: {:?}", program.skipped);
    assert!(program.gcode.starts_with("G0 Z45\n"));
    assert!(program.gcode.ends_with('\n'));
    assert_eq!(
        program.gcode.matches("VACUUM_ON").count(),
        program.gcode.matches("VACUUM_OFF").count()
    );
    // One pickup per component and per wire.
    let cycles = solved.solution.components.len() + solved.solution.wires.len();
    assert_eq!(program.gcode.matches("VACUUM_ON").count(), cycles);

    // Byte-for-byte determinism across full pipeline runs.
    let again = solve(LED_DRIVER, &SolveConfig::default()).expect("solves");
    let mut emitter = GcodeEmitter::new(MachineConfig::default(), TrayLayout::default());
    assert_eq!(emitter.emit(&again.solution).gcode, program.gcode);
}

#[test]
fn end_to_end_renders() {
    let solved = solve(LED_DRIVER, &SolveConfig::default()).expect("solves");
    let svg = render_svg(&solved.solution, solved.board.rows());
    assert!(svg.contains(">R1</text>"));
    assert!(svg.contains(">LED</text>"));

    let diagram = BoardDiagram::new(&solved.solution, solved.board.rows()).to_string();
    assert!(diagram.contains("R = R1 (V+, N1)"));
    assert!(diagram.contains("L = LED (N1, GND)"));
}

#[test]
fn layout_serializes_and_round_trips() {
    let solved = solve(LED_DRIVER, &SolveConfig::default()).expect("solves");
    let json = serde_json::to_string_pretty(&solved.solution).expect("serializes");
    let back: Solution = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back.to_string(), solved.solution.to_string());
}

#[test]
fn parse_failures_surface_as_netlist_errors() {
    let err = solve("R1 N1\n.end\n", &SolveConfig::default()).expect_err("malformed");
    assert!(matches!(err, Error::Netlist(_)));
}

#[test]
fn unsolvable_inputs_surface_as_solve_errors() {
    let config = SolveConfig {
        board: BoardConfig {
            rows: 6,
            wire_lengths: vec![1],
        },
        ..SolveConfig::default()
    };
    let err = solve("V1 VCC 0 DC 5\nR1 VCC 0 1k\n.end\n", &config).expect_err("unsolvable");
    assert!(matches!(
        err,
        Error::Solve(bpc_pnr::Error::PlacementExhausted)
    ));
}
