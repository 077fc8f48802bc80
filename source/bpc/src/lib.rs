// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Breadboard placement compiler: parses a SPICE netlist, places its
//! passives on a solderless breadboard, routes every net with straight
//! jumpers, and hands the solved layout to the G-code and render backends.

#[cfg(test)]
mod tests;

use log::info;
use miette::Diagnostic;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

pub use bpc_board::{Breadboard, Config as BoardConfig, Net};
pub use bpc_gcode::{EmittedProgram, GcodeEmitter, MachineConfig, TrayLayout};
pub use bpc_netlist::{FamilyDefaults, Netlist, parse, translate, translate_with};
pub use bpc_pnr::{SearchConfig, Solution};
pub use bpc_render::{BoardDiagram, render_svg, render_svg_base64};

/// Everything a solve invocation can be tuned with. Machine calibration and
/// tray layout live in [`MachineConfig`]/[`TrayLayout`] and only matter at
/// emission time.
#[derive(Clone, Debug, Default)]
pub struct SolveConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub families: FamilyDefaults,
}

/// A successful solve: the serializable solution plus the final board and
/// net state for rendering and inspection.
#[derive(Debug)]
pub struct Solved {
    pub solution: Solution,
    pub nets: BTreeMap<String, Net>,
    pub board: Breadboard,
}

#[derive(Clone, Debug, Diagnostic, ThisError)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Netlist(#[from] bpc_netlist::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Solve(#[from] bpc_pnr::Error),
}

/// Compiles a netlist into a solved breadboard layout.
pub fn solve(source: &str, config: &SolveConfig) -> Result<Solved, Error> {
    solve_with_cancel(source, config, None)
}

/// As [`solve`], with a cooperative cancellation predicate polled between
/// placement decisions.
pub fn solve_with_cancel(
    source: &str,
    config: &SolveConfig,
    cancel: Option<&dyn Fn() -> bool>,
) -> Result<Solved, Error> {
    let netlist = bpc_netlist::parse(source)?;
    let translation = bpc_netlist::translate_with(&netlist, &config.families)?;
    info!(
        "translated {} components over {} internal nets",
        translation.components.len(),
        translation.nets.len()
    );

    let mut board = Breadboard::new(&config.board);
    let mut nets = translation.nets;
    let mut components = translation.components;
    let solution = bpc_pnr::place_and_route(
        &mut board,
        &mut nets,
        &mut components,
        &config.search,
        cancel,
    )?;
    info!(
        "placed {} components, routed {} wires",
        solution.components.len(),
        solution.wires.len()
    );
    Ok(Solved {
        solution,
        nets,
        board,
    })
}
