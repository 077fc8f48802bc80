// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bpc_board::InvariantViolation;
use miette::Diagnostic;
use thiserror::Error;

/// A routing failure for one net. The placement search consumes these to
/// trigger backtracking; they only escape through [`Error::PlacementExhausted`]
/// when the search root runs dry.
#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum RouteError {
    #[error("net `{0}` could not be wired with the current placements")]
    #[diagnostic(code("bpc.route.exhausted"))]
    Exhausted(String),

    #[error("nets `{0}` and `{1}` are shorted")]
    #[diagnostic(code("bpc.route.short"))]
    ShortDetected(String, String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Failures that escape a solve invocation.
#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum Error {
    #[error("placement search exhausted all candidates without routing the netlist")]
    #[diagnostic(
        code("bpc.place.exhausted"),
        help("try a taller board, longer wire lengths, or a larger candidate fan-out")
    )]
    PlacementExhausted,

    #[error("placement search was interrupted by the caller")]
    #[diagnostic(code("bpc.place.interrupted"))]
    Interrupted,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invariant(#[from] InvariantViolation),
}
