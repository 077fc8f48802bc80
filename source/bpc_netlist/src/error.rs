// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use miette::Diagnostic;
use thiserror::Error;

/// A byte range over the netlist source, for diagnostic labels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Span {
    pub lo: u32,
    pub hi: u32,
}

impl Span {
    #[must_use]
    pub fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.lo as usize, (span.hi.saturating_sub(span.lo)) as usize).into()
    }
}

#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum Error {
    #[error("netlist contains no cards")]
    #[diagnostic(code("bpc.netlist.empty"))]
    EmptyNetlist,

    #[error("unrecognized card `{0}`")]
    #[diagnostic(
        code("bpc.netlist.unknown_card"),
        help("component references must begin with R, C, L, D, V, or I")
    )]
    UnknownCard(String, #[label] Span),

    #[error("component `{0}` must name two nodes")]
    #[diagnostic(code("bpc.netlist.malformed_component"))]
    MalformedComponent(String, #[label] Span),

    #[error("`.model` card must name a model and a device type")]
    #[diagnostic(code("bpc.netlist.malformed_model"))]
    MalformedModel(#[label] Span),

    #[error("netlist references V+ but defines no supply with a grounded negative terminal")]
    #[diagnostic(code("bpc.netlist.missing_supply"))]
    MissingSupply,
}
