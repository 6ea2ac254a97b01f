// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Traversal driver - lowers a node tree to an OpenSCAD script

use super::operations;
use super::primitives;
use super::properties::properties;
use super::site::Site;
use crate::ast::{Category, Node, OperationKind, PrimitiveKind};
use crate::error::{CompileError, NodePath};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Options consumed by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Construction links followed along one path before giving up
    pub max_construction_depth: usize,
    /// Nesting levels (children plus construction links) before giving up
    pub max_nesting_depth: usize,
}

impl CompileOptions {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            ..Self::default()
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            max_construction_depth: 64,
            max_nesting_depth: 256,
        }
    }
}

/// Per-call traversal state, rebuilt for every child
#[derive(Debug, Clone)]
struct Traversal {
    depth: usize,
    path: NodePath,
    constructions: usize,
}

impl Traversal {
    fn root() -> Self {
        Self {
            depth: 0,
            path: NodePath::root(),
            constructions: 0,
        }
    }

    fn child(&self, index: usize) -> Self {
        Self {
            depth: self.depth + 1,
            path: self.path.child(index),
            constructions: self.constructions,
        }
    }

    /// Constructions replace their node in place, so depth is unchanged
    fn construction(&self) -> Self {
        Self {
            depth: self.depth,
            path: self.path.construction(),
            constructions: self.constructions + 1,
        }
    }
}

/// Tree-to-script compiler
///
/// Holds only configuration; every call to [`Compiler::compile`] starts
/// from depth 0, so one compiler can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(indent_width: usize) -> Self {
        Self::with_options(CompileOptions::new(indent_width))
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a whole tree. Any error aborts the compile with no output.
    pub fn compile(&self, root: &Node) -> Result<String, CompileError> {
        let mut out = String::new();
        self.compile_node(root, &Traversal::root(), &mut out)?;
        Ok(out)
    }

    fn compile_node(&self, node: &Node, at: &Traversal, out: &mut String) -> Result<(), CompileError> {
        trace!(path = %at.path, name = %node.name, depth = at.depth, "compiling node");

        if at.depth + at.constructions > self.options.max_nesting_depth {
            return Err(CompileError::NestingTooDeep {
                path: at.path.clone(),
                name: node.name.clone(),
                limit: self.options.max_nesting_depth,
            });
        }

        match &node.category {
            Some(Category::Operation) => self.compile_operation(node, at, out),
            Some(Category::Element) => self.compile_element(node, at, out),
            Some(Category::Unknown(text)) if !text.is_empty() => Err(CompileError::UnknownCategory {
                path: at.path.clone(),
                name: node.name.clone(),
                category: text.clone(),
            }),
            _ => Err(CompileError::MissingCategory {
                path: at.path.clone(),
                name: node.name.clone(),
            }),
        }
    }

    fn compile_operation(&self, node: &Node, at: &Traversal, out: &mut String) -> Result<(), CompileError> {
        let Some(kind) = OperationKind::from_name(&node.name) else {
            out.push_str(&format!("echo({});", node.name));
            return self.compile_construction(node, at, "operation", out);
        };

        let site = Site::new(node, &at.path);
        let children = site.require(node.elements.as_ref(), "elements")?;

        self.indent(at, out);
        out.push_str(&properties(&node.properties));
        out.push_str(&operations::header(kind, site)?);
        out.push_str("{\n");

        for (index, child) in children.iter().enumerate() {
            self.compile_node(child, &at.child(index), out)?;
            out.push('\n');
        }

        self.indent(at, out);
        out.push_str("}\n");
        Ok(())
    }

    fn compile_element(&self, node: &Node, at: &Traversal, out: &mut String) -> Result<(), CompileError> {
        self.indent(at, out);
        out.push_str(&properties(&node.properties));

        match PrimitiveKind::from_name(&node.name) {
            Some(kind) => {
                out.push_str(&primitives::lower_at(kind, Site::new(node, &at.path))?);
                Ok(())
            }
            // The properties already written are kept ahead of the construction
            None => self.compile_construction(node, at, "element", out),
        }
    }

    fn compile_construction(
        &self,
        node: &Node,
        at: &Traversal,
        category: &'static str,
        out: &mut String,
    ) -> Result<(), CompileError> {
        let construction = node
            .construction
            .as_deref()
            .ok_or_else(|| CompileError::MissingConstruction {
                path: at.path.clone(),
                name: node.name.clone(),
                category,
            })?;

        if at.constructions >= self.options.max_construction_depth {
            return Err(CompileError::CyclicConstruction {
                path: at.path.clone(),
                name: node.name.clone(),
                limit: self.options.max_construction_depth,
            });
        }

        debug!(
            name = %node.name,
            path = %at.path,
            depth = at.depth,
            "{} `{}` is not built in, traversing to construction",
            category,
            node.name
        );
        self.compile_node(construction, &at.construction(), out)
    }

    fn indent(&self, at: &Traversal, out: &mut String) {
        out.push_str(&" ".repeat(self.options.indent_width * at.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Flag, Number, Parameters, Properties};
    use crate::error::ErrorKind;

    fn cube(size: [i64; 3]) -> Node {
        Node::element("cube").with_params(Parameters {
            center: Some(vec![Flag::Bool(false); 3]),
            size: Some(size.iter().copied().map(Number::Int).collect()),
            ..Parameters::default()
        })
    }

    #[test]
    fn test_single_element() {
        let out = Compiler::new(4).compile(&cube([1, 2, 3])).unwrap();
        assert_eq!(out, "cube(size=[1,2,3]);");
    }

    #[test]
    fn test_operation_block_layout() {
        let tree = Node::operation("union", vec![cube([1, 1, 1]), cube([2, 2, 2])]);
        let out = Compiler::new(2).compile(&tree).unwrap();
        assert_eq!(out, "union(){\n  cube(size=[1,1,1]);\n  cube(size=[2,2,2]);\n}\n");
    }

    #[test]
    fn test_nested_operations_indent_by_depth() {
        let inner = Node::operation("hull", vec![cube([1, 1, 1])]);
        let tree = Node::operation("difference", vec![inner]);
        let out = Compiler::new(4).compile(&tree).unwrap();
        assert_eq!(
            out,
            "difference(){\n    hull(){\n        cube(size=[1,1,1]);\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_empty_operation_yields_empty_block() {
        let out = Compiler::new(4).compile(&Node::operation("union", vec![])).unwrap();
        assert_eq!(out, "union(){\n}\n");
    }

    #[test]
    fn test_operation_properties_precede_header() {
        let tree = Node::operation("union", vec![cube([1, 1, 1])]).with_properties(Properties {
            highlight: true,
            ..Properties::default()
        });
        let out = Compiler::new(0).compile(&tree).unwrap();
        assert_eq!(out, "#union(){\ncube(size=[1,1,1]);\n}\n");
    }

    #[test]
    fn test_missing_category() {
        let node = Node {
            name: "cube".into(),
            ..Node::default()
        };
        let err = Compiler::default().compile(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCategory);

        let node = Node {
            category: Some(Category::Unknown(String::new())),
            ..Node::default()
        };
        let err = Compiler::default().compile(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCategory);
    }

    #[test]
    fn test_unknown_category_reports_path() {
        let bad = Node {
            category: Some(Category::Unknown("widget".into())),
            name: "gear".into(),
            ..Node::default()
        };
        let tree = Node::operation("union", vec![cube([1, 1, 1]), bad]);
        let err = Compiler::default().compile(&tree).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCategory);
        assert_eq!(err.path().to_string(), "/elements/1");
        assert_eq!(err.node_name(), "gear");
    }

    #[test]
    fn test_operation_requires_elements() {
        let node = Node {
            category: Some(Category::Operation),
            name: "union".into(),
            ..Node::default()
        };
        let err = Compiler::default().compile(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_construction_depth_is_bounded() {
        let mut node = cube([1, 1, 1]);
        for _ in 0..10 {
            node = Node::element("wrapper").with_construction(node);
        }
        let options = CompileOptions {
            max_construction_depth: 5,
            ..CompileOptions::default()
        };
        let err = Compiler::with_options(options).compile(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicConstruction);

        let options = CompileOptions {
            max_construction_depth: 10,
            ..CompileOptions::default()
        };
        assert_eq!(
            Compiler::with_options(options).compile(&node).unwrap(),
            "cube(size=[1,1,1]);"
        );
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let mut tree = cube([1, 1, 1]);
        for _ in 0..2000 {
            tree = Node::operation("union", vec![tree]);
        }
        let err = Compiler::default().compile(&tree).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
        assert_eq!(err.path().segments().len(), 2 * 257);
    }

    #[test]
    fn test_nesting_bound_covers_long_construction_chains() {
        let mut node = cube([1, 1, 1]);
        for _ in 0..50 {
            node = Node::element("wrapper").with_construction(node);
        }
        let options = CompileOptions {
            max_construction_depth: 1000,
            max_nesting_depth: 20,
            ..CompileOptions::default()
        };
        let err = Compiler::with_options(options).compile(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
        assert_eq!(err.path().segments().len(), 21);
    }
}
