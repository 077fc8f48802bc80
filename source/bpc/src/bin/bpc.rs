// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bpc::{BoardDiagram, GcodeEmitter, MachineConfig, SolveConfig, TrayLayout};
use clap::{Parser, ValueEnum};
use log::info;
use miette::{Context, IntoDiagnostic};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Compile a SPICE netlist into a breadboard layout and a pick-and-place program"
)]
struct Cli {
    /// Netlist file to compile, or `-` to read from stdin.
    netlist: PathBuf,

    /// Board row count.
    #[arg(long)]
    rows: Option<i32>,

    /// Emit the solved layout in the specified format.
    #[arg(long, value_enum)]
    emit: Vec<Emit>,

    /// Write output to compiler-chosen filenames in <dir>.
    #[arg(long = "outdir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Emit {
    Gcode,
    Layout,
    Svg,
    Diagram,
}

fn main() -> miette::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let source = read_source(&cli.netlist)?;
    let mut config = SolveConfig::default();
    if let Some(rows) = cli.rows {
        config.board = bpc::BoardConfig::new(rows, config.board.wire_lengths.clone())
            .map_err(miette::Report::new)?;
    }

    let solved = match bpc::solve(&source, &config) {
        Ok(solved) => solved,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error).with_source_code(source));
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.verbose {
        println!("{}", BoardDiagram::new(&solved.solution, solved.board.rows()));
    }

    let out_dir = cli.out_dir.as_ref().map_or(".".as_ref(), PathBuf::as_path);
    for emit in &cli.emit {
        match emit {
            Emit::Gcode => {
                let mut emitter = GcodeEmitter::new(MachineConfig::default(), TrayLayout::default());
                let program = emitter.emit(&solved.solution);
                for part in &program.skipped {
                    eprintln!("warning: no pickup tray for {part}; skipped");
                }
                emit_file(out_dir, "program.gcode", &program.gcode)?;
            }
            Emit::Layout => {
                let json = serde_json::to_string_pretty(&solved.solution)
                    .into_diagnostic()
                    .context("could not serialize the layout")?;
                emit_file(out_dir, "layout.json", &json)?;
            }
            Emit::Svg => {
                let svg = bpc::render_svg(&solved.solution, solved.board.rows());
                emit_file(out_dir, "board.svg", &svg)?;
            }
            Emit::Diagram => {
                let diagram =
                    BoardDiagram::new(&solved.solution, solved.board.rows()).to_string();
                emit_file(out_dir, "board.txt", &diagram)?;
            }
        }
    }

    if cli.emit.is_empty() && !cli.verbose {
        print!("{}", solved.solution);
    }
    Ok(ExitCode::SUCCESS)
}

fn read_source(path: &Path) -> miette::Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .into_diagnostic()
            .context("could not read standard input")?;
        Ok(input)
    } else {
        fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("could not read netlist file `{}`", path.display()))
    }
}

fn emit_file(dir: &Path, name: &str, contents: &str) -> miette::Result<()> {
    let path = dir.join(name);
    info!("writing {}", path.display());
    fs::write(&path, contents)
        .into_diagnostic()
        .with_context(|| format!("could not write `{}`", path.display()))
}
