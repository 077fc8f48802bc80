// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

pub mod emitter;
pub mod machine;

pub use emitter::{EmittedProgram, GcodeEmitter, TrayLayout, TraySlot};
pub use machine::{ColumnSpan, MachineConfig};
