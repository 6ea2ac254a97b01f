// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Input tree model
//!
//! Defines the parametric CSG nodes consumed by the compiler

mod node;
mod value;

pub use node::{Category, Node, OperationKind, Parameters, PrimitiveKind, Properties, Rotation};
pub use value::{format_float, AutoResize, Flag, Number};
