// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Code generation - lowers the node tree to OpenSCAD source

mod compiler;
pub mod emit;
mod operations;
mod primitives;
mod properties;
mod site;

pub use compiler::{CompileOptions, Compiler};
pub use operations::operation_header;
pub use primitives::{apply_centering, centering_offset, lower as lower_primitive};
pub use properties::properties;
