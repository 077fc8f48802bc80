// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::BoardDiagram;
use bpc_board::Hole;
use bpc_pnr::{Solution, SolvedComponent, SolvedWire};
use expect_test::expect;
use std::collections::BTreeMap;

fn empty_solution() -> Solution {
    Solution {
        components: BTreeMap::new(),
        wires: Vec::new(),
        ok: true,
    }
}

#[test]
fn empty_board_shows_rails_and_holes() {
    let solution = empty_solution();
    let expected = concat!(
        "     VG               VG\n",
        "  0  ||  .....  .....  ||\n",
        "  1  ||  .....  .....  ||\n",
        "  2  ||  .....  .....  ||\n",
    );
    assert_eq!(BoardDiagram::new(&solution, 3).to_string(), expected);
}

#[test]
fn components_and_wires_are_drawn() {
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
    let solution = Solution {
        components,
        wires: vec![SolvedWire {
            net: "GND".to_string(),
            holes: vec![
                Hole::new(4, -3),
                Hole::new(4, 0),
                Hole::new(4, 1),
                Hole::new(4, 2),
            ],
        }],
        ok: true,
    };
    expect![[r#"
             VG               VG
          0  ||  .....  .....  ||
          1  ||  R....  .....  ||
          2  ||  r....  .....  ||
          3  ||  R....  .....  ||
          4  |*  ~~*..  .....  ||
          5  ||  .....  .....  ||

        R = R1 (V+, GND)
        wire GND: (4, -3) -> (4, 2)
    "#]]
    .assert_eq(&BoardDiagram::new(&solution, 6).to_string());
}
