// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen

use crate::codegen::{CompileOptions, Compiler};
use crate::io;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCompiler {
    inner: Compiler,
}

#[wasm_bindgen]
impl WasmCompiler {
    #[wasm_bindgen(constructor)]
    pub fn new(indent_width: usize, max_construction_depth: usize) -> WasmCompiler {
        WasmCompiler {
            inner: Compiler::with_options(CompileOptions {
                indent_width,
                max_construction_depth,
                ..CompileOptions::default()
            }),
        }
    }

    /// Compile a JSON tree to script text
    pub fn compile(&self, source: &str) -> Result<String, JsValue> {
        compile_with(&self.inner, source)
    }
}

/// Compile a JSON tree with the given indentation width
#[wasm_bindgen]
pub fn compile_pcsg(source: &str, indent_width: usize) -> Result<String, JsValue> {
    compile_with(&Compiler::new(indent_width), source)
}

/// Decode a JSON tree and return it normalized
#[wasm_bindgen]
pub fn normalize_pcsg(source: &str) -> Result<String, JsValue> {
    let tree = io::parse_pcsg(source).map_err(|e| JsValue::from_str(&format!("Parse error: {:#}", e)))?;

    serde_json::to_string_pretty(&tree)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn compile_with(compiler: &Compiler, source: &str) -> Result<String, JsValue> {
    let tree = io::parse_pcsg(source).map_err(|e| JsValue::from_str(&format!("Parse error: {:#}", e)))?;

    compiler
        .compile(&tree)
        .map_err(|e| JsValue::from_str(&format!("Compile error at {}: {}", e.path(), e)))
}
