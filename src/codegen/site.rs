// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Field access with node-located errors

use crate::ast::{Flag, Node, Number};
use crate::error::{CompileError, NodePath};

/// A node together with its position in the tree
#[derive(Clone, Copy)]
pub(crate) struct Site<'a> {
    pub node: &'a Node,
    pub path: &'a NodePath,
}

impl<'a> Site<'a> {
    pub fn new(node: &'a Node, path: &'a NodePath) -> Self {
        Self { node, path }
    }

    pub fn missing(&self, field: &'static str) -> CompileError {
        CompileError::MissingField {
            path: self.path.clone(),
            name: self.node.name.clone(),
            field,
        }
    }

    pub fn invalid(&self, field: &'static str, reason: impl Into<String>) -> CompileError {
        CompileError::InvalidField {
            path: self.path.clone(),
            name: self.node.name.clone(),
            field,
            reason: reason.into(),
        }
    }

    pub fn require<T>(&self, value: Option<&'a T>, field: &'static str) -> Result<&'a T, CompileError> {
        value.ok_or_else(|| self.missing(field))
    }

    pub fn number(&self, value: Option<Number>, field: &'static str) -> Result<Number, CompileError> {
        value.ok_or_else(|| self.missing(field))
    }

    pub fn vec3(&self, value: Option<&'a Vec<Number>>, field: &'static str) -> Result<[Number; 3], CompileError> {
        let values = self.require(value, field)?;
        match values.as_slice() {
            [x, y, z] => Ok([*x, *y, *z]),
            other => Err(self.invalid(field, format!("expected 3 components, found {}", other.len()))),
        }
    }

    /// Per-axis centering flags
    pub fn center(&self) -> Result<[bool; 3], CompileError> {
        let flags: &Vec<Flag> = self.require(self.node.params.center.as_ref(), "center")?;
        match flags.as_slice() {
            [x, y, z] => Ok([x.is_set(), y.is_set(), z.is_set()]),
            other => Err(self.invalid("center", format!("expected 3 flags, found {}", other.len()))),
        }
    }
}
