// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operation lowerer

use super::emit;
use super::site::Site;
use crate::ast::{Node, OperationKind};
use crate::error::{CompileError, NodePath};

/// Render the call header of an operation node, without properties or brace
pub fn operation_header(kind: OperationKind, node: &Node, path: &NodePath) -> Result<String, CompileError> {
    header(kind, Site::new(node, path))
}

pub(crate) fn header(kind: OperationKind, site: Site<'_>) -> Result<String, CompileError> {
    let node = site.node;
    let header = match kind {
        OperationKind::Union => emit::union().to_string(),
        OperationKind::Difference => emit::difference().to_string(),
        OperationKind::Intersection => emit::intersection().to_string(),
        OperationKind::Hull => emit::hull().to_string(),
        OperationKind::Minkowski => emit::minkowski().to_string(),
        OperationKind::Translate => {
            let location = site.require(node.properties.location.as_ref(), "location")?;
            emit::translate(location)
        }
        OperationKind::Rotate => {
            let rotation = site.require(node.properties.rotation.as_ref(), "rotation")?;
            emit::rotate(rotation)
        }
        OperationKind::Mirror => {
            let axis = site.require(node.params.axis.as_ref(), "axis")?;
            emit::mirror(axis)
        }
        OperationKind::Scale => {
            let multiplier = site.require(node.params.multiplier.as_ref(), "multiplier")?;
            emit::scale(multiplier)
        }
        OperationKind::Resize => {
            let newsize = site.require(node.params.newsize.as_ref(), "newsize")?;
            let auto = site.require(node.params.auto.as_ref(), "auto")?;
            emit::resize(newsize, auto)
        }
        OperationKind::Multmatrix => {
            let matrix = site.require(node.params.matrix.as_ref(), "matrix")?;
            emit::multmatrix(matrix)
        }
    };
    Ok(header)
}
