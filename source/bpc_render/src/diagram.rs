// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Plain-text rendering of a solved board, for logs and tests. One character
//! per hole: rails are `|`, empty board holes `.`, component pins the
//! upper-case initial of their part (body holes lower-case), wire endpoints
//! `*` and wire interiors `~`. A legend follows the grid.

#[cfg(test)]
mod tests;

use bpc_board::Hole;
use bpc_board::board::{
    LEFT_COL_HI, LEFT_COL_LO, RAIL_GND_LEFT, RAIL_GND_RIGHT, RAIL_VPLUS_LEFT, RAIL_VPLUS_RIGHT,
    RIGHT_COL_HI, RIGHT_COL_LO,
};
use bpc_pnr::Solution;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display, Formatter};

pub struct BoardDiagram<'a> {
    solution: &'a Solution,
    rows: i32,
}

impl<'a> BoardDiagram<'a> {
    #[must_use]
    pub fn new(solution: &'a Solution, rows: i32) -> Self {
        Self { solution, rows }
    }

    fn cells(&self) -> FxHashMap<Hole, char> {
        let mut cells = FxHashMap::default();
        for (name, comp) in &self.solution.components {
            let initial = name.chars().next().unwrap_or('?');
            for &h in &comp.body {
                cells.insert(h, initial.to_ascii_lowercase());
            }
            for &h in &comp.pins {
                cells.insert(h, initial.to_ascii_uppercase());
            }
        }
        for wire in &self.solution.wires {
            let last = wire.holes.len().saturating_sub(1);
            for (i, &h) in wire.holes.iter().enumerate() {
                let c = if i == 0 || i == last { '*' } else { '~' };
                cells.entry(h).or_insert(c);
            }
        }
        cells
    }
}

impl Display for BoardDiagram<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        let cell = |row: i32, col: i32, empty: char| -> char {
            *cells.get(&Hole::new(row, col)).unwrap_or(&empty)
        };

        writeln!(f, "     VG               VG")?;
        for row in 0..self.rows {
            let mut line = format!("{row:>3}  ");
            line.push(cell(row, RAIL_VPLUS_LEFT, '|'));
            line.push(cell(row, RAIL_GND_LEFT, '|'));
            line.push_str("  ");
            for col in LEFT_COL_LO..=LEFT_COL_HI {
                line.push(cell(row, col, '.'));
            }
            line.push_str("  ");
            for col in RIGHT_COL_LO..=RIGHT_COL_HI {
                line.push(cell(row, col, '.'));
            }
            line.push_str("  ");
            line.push(cell(row, RAIL_VPLUS_RIGHT, '|'));
            line.push(cell(row, RAIL_GND_RIGHT, '|'));
            writeln!(f, "{}", line.trim_end())?;
        }

        if !self.solution.components.is_empty() || !self.solution.wires.is_empty() {
            writeln!(f)?;
        }
        for (name, comp) in &self.solution.components {
            writeln!(
                f,
                "{} = {name} ({}, {})",
                name.chars().next().unwrap_or('?').to_ascii_uppercase(),
                comp.nets.0,
                comp.nets.1
            )?;
        }
        for wire in &self.solution.wires {
            let (a, b) = match (wire.holes.first(), wire.holes.last()) {
                (Some(a), Some(b)) => (*a, *b),
                _ => continue,
            };
            writeln!(f, "wire {}: {a} -> {b}", wire.net)?;
        }
        Ok(())
    }
}
