// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod board;
pub mod config;
pub mod net;
pub mod passive;
pub mod union_find;

pub use board::{Breadboard, CompId, Hole, InvariantViolation, Occupancy, SegId};
pub use config::{Config, ConfigError};
pub use net::{Net, NetKind, Polarity, WireSeg};
pub use passive::{Orientation, Passive, Placement};
pub use union_find::UnionFind;
