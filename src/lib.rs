// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! textcad
//!
//! Compiles parametric CSG trees into OpenSCAD scripts. Trees are made of
//! elements (primitives such as cubes and cylinders) and operations
//! (booleans and affine transforms); names the compiler does not know fall
//! back to the node's `construction` sub-tree.

pub mod ast;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod io;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use ast::{Category, Node, Number, OperationKind, PrimitiveKind};
pub use codegen::{CompileOptions, Compiler};
pub use config::Config;
pub use error::{CompileError, ErrorKind, NodePath};
pub use io::{export_scad, import_pcsg_file, parse_pcsg};

use anyhow::Result;
use std::path::Path;

/// Compile a decoded tree with the given indentation width
pub fn compile(node: &Node, indent_width: usize) -> Result<String, CompileError> {
    Compiler::new(indent_width).compile(node)
}

/// Decode and compile a JSON tree
pub fn compile_json(source: &str, indent_width: usize) -> Result<String> {
    let node = parse_pcsg(source)?;
    Ok(compile(&node, indent_width)?)
}

/// Decode and compile a JSON tree file
pub fn compile_file(path: impl AsRef<Path>, options: CompileOptions) -> Result<String> {
    let node = import_pcsg_file(path)?;
    Ok(Compiler::with_options(options).compile(&node)?)
}
