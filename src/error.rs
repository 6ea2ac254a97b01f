// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Compile errors

use std::fmt;
use thiserror::Error;

/// Location of a node in the input tree, as a JSON pointer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th child in `elements`
    pub fn child(&self, index: usize) -> Self {
        self.join(["elements".to_string(), index.to_string()])
    }

    /// Path of the `construction` sub-tree
    pub fn construction(&self) -> Self {
        self.join(["construction".to_string()])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    fn join<const N: usize>(&self, segments: [String; N]) -> Self {
        let mut path = self.0.clone();
        path.extend(segments);
        Self(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Error kinds, without node details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCategory,
    UnknownCategory,
    MissingConstruction,
    MissingField,
    InvalidField,
    CyclicConstruction,
    NestingTooDeep,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingCategory => "MissingCategory",
            ErrorKind::UnknownCategory => "UnknownCategory",
            ErrorKind::MissingConstruction => "MissingConstruction",
            ErrorKind::MissingField => "MissingField",
            ErrorKind::InvalidField => "InvalidField",
            ErrorKind::CyclicConstruction => "CyclicConstruction",
            ErrorKind::NestingTooDeep => "NestingTooDeep",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while compiling a tree; the whole compile is aborted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("node at {path} has no category")]
    MissingCategory { path: NodePath, name: String },

    #[error("node `{name}` at {path} has unknown category `{category}`")]
    UnknownCategory {
        path: NodePath,
        name: String,
        category: String,
    },

    #[error("`{name}` at {path} is not a known {category} and has no construction")]
    MissingConstruction {
        path: NodePath,
        name: String,
        category: &'static str,
    },

    #[error("`{name}` at {path} is missing required field `{field}`")]
    MissingField {
        path: NodePath,
        name: String,
        field: &'static str,
    },

    #[error("`{name}` at {path} has invalid `{field}`: {reason}")]
    InvalidField {
        path: NodePath,
        name: String,
        field: &'static str,
        reason: String,
    },

    #[error("construction chain at {path} (`{name}`) exceeds {limit} levels")]
    CyclicConstruction {
        path: NodePath,
        name: String,
        limit: usize,
    },

    #[error("`{name}` at {path} is nested deeper than {limit} levels")]
    NestingTooDeep {
        path: NodePath,
        name: String,
        limit: usize,
    },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::MissingCategory { .. } => ErrorKind::MissingCategory,
            CompileError::UnknownCategory { .. } => ErrorKind::UnknownCategory,
            CompileError::MissingConstruction { .. } => ErrorKind::MissingConstruction,
            CompileError::MissingField { .. } => ErrorKind::MissingField,
            CompileError::InvalidField { .. } => ErrorKind::InvalidField,
            CompileError::CyclicConstruction { .. } => ErrorKind::CyclicConstruction,
            CompileError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    /// Path of the offending node
    pub fn path(&self) -> &NodePath {
        match self {
            CompileError::MissingCategory { path, .. }
            | CompileError::UnknownCategory { path, .. }
            | CompileError::MissingConstruction { path, .. }
            | CompileError::MissingField { path, .. }
            | CompileError::InvalidField { path, .. }
            | CompileError::CyclicConstruction { path, .. }
            | CompileError::NestingTooDeep { path, .. } => path,
        }
    }

    /// Name of the offending node, empty when the node had none
    pub fn node_name(&self) -> &str {
        match self {
            CompileError::MissingCategory { name, .. }
            | CompileError::UnknownCategory { name, .. }
            | CompileError::MissingConstruction { name, .. }
            | CompileError::MissingField { name, .. }
            | CompileError::InvalidField { name, .. }
            | CompileError::CyclicConstruction { name, .. }
            | CompileError::NestingTooDeep { name, .. } => name,
        }
    }
}
