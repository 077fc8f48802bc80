// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod error;
pub mod place;
pub mod route;
pub mod solution;

pub use error::{Error, RouteError};
pub use place::{SearchConfig, place_and_route};
pub use solution::{Solution, SolvedComponent, SolvedWire};
