// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! PCSG tree importer

use crate::ast::Node;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Decode a JSON tree
pub fn parse_pcsg(source: &str) -> Result<Node> {
    serde_json::from_str(source).context("Failed to decode PCSG tree")
}

/// Decode a JSON tree from any reader (e.g. stdin)
pub fn read_pcsg(mut reader: impl Read) -> Result<Node> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .context("Failed to read PCSG input")?;
    parse_pcsg(&source)
}

/// Import a .json file and decode it into a tree
pub fn import_pcsg_file(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    info!("Reading {}", path.display());

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read PCSG file: {}", path.display()))?;

    parse_pcsg(&source).with_context(|| format!("Failed to parse PCSG file: {}", path.display()))
}
