// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod diagram;
pub mod svg;

pub use diagram::BoardDiagram;
pub use svg::{render_svg, render_svg_base64};
