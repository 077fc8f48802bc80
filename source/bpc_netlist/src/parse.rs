// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Line-oriented parser for the SPICE subset the pipeline consumes.
//!
//! Recognized cards: `*` comments, `.model NAME KIND ( ... )`, `.end`, and
//! element cards `<ref> <node+> <node-> [more nodes...] <value/model>`.
//! Other dot-directives (`.tran`, `.op`, ...) are analysis instructions the
//! surrounding pipeline appends before simulation; they are skipped here.
//! Tokens never escape as substrings: each card records its byte span back
//! into the input for diagnostics.


use crate::error::{Error, Span};
use enum_iterator::Sequence;
use std::fmt::{self, Display, Formatter};

/// Device family, keyed by the first letter of an element reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
pub enum Family {
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    VoltageSource,
    CurrentSource,
}

impl Family {
    #[must_use]
    pub fn of_ref(ref_name: &str) -> Option<Self> {
        match ref_name.chars().next()?.to_ascii_uppercase() {
            'R' => Some(Family::Resistor),
            'C' => Some(Family::Capacitor),
            'L' => Some(Family::Inductor),
            'D' => Some(Family::Diode),
            'V' => Some(Family::VoltageSource),
            'I' => Some(Family::CurrentSource),
            _ => None,
        }
    }

    /// Sources deliver power; everything else is a placeable passive.
    #[must_use]
    pub fn is_source(self) -> bool {
        matches!(self, Family::VoltageSource | Family::CurrentSource)
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Family::Resistor => 'R',
            Family::Capacitor => 'C',
            Family::Inductor => 'L',
            Family::Diode => 'D',
            Family::VoltageSource => 'V',
            Family::CurrentSource => 'I',
        }
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One element card. Only the first two nodes participate in placement; any
/// further tokens (values, model references, source parameters) are kept as
/// the tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub ref_name: String,
    pub family: Family,
    pub nodes: [String; 2],
    pub tail: Vec<String>,
    pub span: Span,
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} {}",
            self.ref_name, self.family, self.nodes[0], self.nodes[1]
        )?;
        for t in &self.tail {
            write!(f, " {t}")?;
        }
        Ok(())
    }
}

/// One `.model` card; only the model name and the device-type letter matter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Model {
    pub name: String,
    pub kind: String,
    pub span: Span,
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ".model {} {}", self.name, self.kind)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Netlist {
    pub elements: Vec<Element>,
    pub models: Vec<Model>,
}

impl Display for Netlist {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for e in &self.elements {
            writeln!(f, "{e}")?;
        }
        for m in &self.models {
            writeln!(f, "{m}")?;
        }
        Ok(())
    }
}

/// Parses a netlist, stopping at `.end` or end of input. The first offending
/// card aborts the parse.
pub fn parse(source: &str) -> Result<Netlist, Error> {
    let mut netlist = Netlist::default();
    let mut offset = 0u32;
    for raw in source.split_inclusive('\n') {
        let line_start = offset;
        offset += u32::try_from(raw.len()).unwrap_or(0);

        let line = raw.trim();
        if line.is_empty() || line.starts_with('*') {
            continue;
        }
        let leading = u32::try_from(raw.len() - raw.trim_start().len()).unwrap_or(0);
        let span = Span::new(
            line_start + leading,
            line_start + leading + u32::try_from(line.len()).unwrap_or(0),
        );

        if let Some(directive) = line.strip_prefix('.') {
            let lower = directive.to_ascii_lowercase();
            if lower == "end" || lower.starts_with("end ") {
                break;
            }
            if lower.starts_with("model") {
                netlist.models.push(parse_model(line, span)?);
            }
            // Any other directive is an analysis card; skip it.
            continue;
        }

        netlist.elements.push(parse_element(line, span)?);
    }

    if netlist.elements.is_empty() && netlist.models.is_empty() {
        return Err(Error::EmptyNetlist);
    }
    Ok(netlist)
}

fn parse_model(line: &str, span: Span) -> Result<Model, Error> {
    let mut tokens = line.split_whitespace();
    tokens.next(); // ".model"
    let (Some(name), Some(kind)) = (tokens.next(), tokens.next()) else {
        return Err(Error::MalformedModel(span));
    };
    Ok(Model {
        name: name.to_string(),
        kind: kind.to_string(),
        span,
    })
}

fn parse_element(line: &str, span: Span) -> Result<Element, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let ref_name = tokens[0].to_string();
    let Some(family) = Family::of_ref(&ref_name) else {
        return Err(Error::UnknownCard(ref_name, span));
    };
    if tokens.len() < 3 {
        return Err(Error::MalformedComponent(ref_name, span));
    }
    Ok(Element {
        ref_name,
        family,
        nodes: [tokens[1].to_string(), tokens[2].to_string()],
        tail: tokens[3..].iter().map(ToString::to_string).collect(),
        span,
    })
}
