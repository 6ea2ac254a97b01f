// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration system

use crate::codegen::CompileOptions;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "textcad.toml";

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per nesting level
    pub indent: usize,
    /// Construction links followed before reporting a cycle
    pub max_construction_depth: usize,
    /// Nesting levels followed before giving up
    pub max_nesting_depth: usize,
    /// Output file, stdout when unset
    pub output: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        let options = CompileOptions::default();
        Self {
            indent: options.indent_width,
            max_construction_depth: options.max_construction_depth,
            max_nesting_depth: options.max_nesting_depth,
            output: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `textcad.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `TEXTCAD_*` overrides from a variable lookup
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(indent) = var("TEXTCAD_INDENT") {
            self.indent = indent
                .trim()
                .parse()
                .with_context(|| format!("Invalid TEXTCAD_INDENT: {:?}", indent))?;
        }

        if let Some(depth) = var("TEXTCAD_MAX_CONSTRUCTION_DEPTH") {
            self.max_construction_depth = depth
                .trim()
                .parse()
                .with_context(|| format!("Invalid TEXTCAD_MAX_CONSTRUCTION_DEPTH: {:?}", depth))?;
        }

        if let Some(depth) = var("TEXTCAD_MAX_NESTING_DEPTH") {
            self.max_nesting_depth = depth
                .trim()
                .parse()
                .with_context(|| format!("Invalid TEXTCAD_MAX_NESTING_DEPTH: {:?}", depth))?;
        }

        if let Some(output) = var("TEXTCAD_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }

        if let Some(verbose) = var("TEXTCAD_VERBOSE") {
            self.verbose = parse_flag(&verbose)
                .with_context(|| format!("Invalid TEXTCAD_VERBOSE: {:?}", verbose))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            indent_width: self.indent,
            max_construction_depth: self.max_construction_depth,
            max_nesting_depth: self.max_nesting_depth,
        }
    }
}

/// Boolean env value: true/false, 1/0, yes/no, on/off
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, found {:?}", other),
    }
}
