// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod error;
pub mod parse;
pub mod translate;

pub use error::{Error, Span};
pub use parse::{Element, Family, Model, Netlist, parse};
pub use translate::{FamilyDefaults, Translation, translate, translate_with};
