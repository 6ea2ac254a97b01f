// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tree node definitions

use super::value::{AutoResize, Flag, Number};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single entry of the parametric CSG tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub properties: Properties,
    #[serde(flatten)]
    pub params: Parameters,
    /// Children of an operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Node>>,
    /// Substitute sub-tree for names the compiler does not know
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction: Option<Box<Node>>,
}

impl Node {
    pub fn operation(name: impl Into<String>, elements: Vec<Node>) -> Self {
        Self {
            category: Some(Category::Operation),
            name: name.into(),
            elements: Some(elements),
            ..Self::default()
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self {
            category: Some(Category::Element),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_construction(mut self, construction: Node) -> Self {
        self.construction = Some(Box::new(construction));
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// Child nodes of an operation, empty for elements
    pub fn children(&self) -> &[Node] {
        self.elements.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including constructions
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
            + self.construction.as_ref().map_or(0, |c| c.count())
    }
}

/// Node category tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Operation,
    Element,
    /// Anything else, kept verbatim so the compiler can report it
    Unknown(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Operation => "operation",
            Category::Element => "element",
            Category::Unknown(text) => text,
        }
    }
}

impl From<String> for Category {
    fn from(text: String) -> Self {
        if text.eq_ignore_ascii_case("operation") {
            Category::Operation
        } else if text.eq_ignore_ascii_case("element") {
            Category::Element
        } else {
            Category::Unknown(text)
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes shared by elements and operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(
        default,
        deserialize_with = "deserialize_presence",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub highlight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec<Number>>,
}

/// Any value marks the flag as present
fn deserialize_presence<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

/// Rotation by `angle` degrees around `axis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angle: Number,
    pub axis: Vec<Flag>,
}

/// Kind-specific parameters; which ones are required depends on `name`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<Flag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_radius: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_radius: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apothem: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sides: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Vec<Flag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsize: Option<Vec<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<AutoResize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<Number>>>,
}

/// Operations the compiler lowers natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Union,
    Difference,
    Intersection,
    Hull,
    Minkowski,
    Translate,
    Rotate,
    Mirror,
    Scale,
    Resize,
    Multmatrix,
}

impl OperationKind {
    pub const ALL: [OperationKind; 11] = [
        OperationKind::Union,
        OperationKind::Difference,
        OperationKind::Intersection,
        OperationKind::Hull,
        OperationKind::Minkowski,
        OperationKind::Translate,
        OperationKind::Rotate,
        OperationKind::Mirror,
        OperationKind::Scale,
        OperationKind::Resize,
        OperationKind::Multmatrix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Union => "union",
            OperationKind::Difference => "difference",
            OperationKind::Intersection => "intersection",
            OperationKind::Hull => "hull",
            OperationKind::Minkowski => "minkowski",
            OperationKind::Translate => "translate",
            OperationKind::Rotate => "rotate",
            OperationKind::Mirror => "mirror",
            OperationKind::Scale => "scale",
            OperationKind::Resize => "resize",
            OperationKind::Multmatrix => "multmatrix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Primitives the compiler lowers natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Ntube,
    Hole,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Ntube,
        PrimitiveKind::Hole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "cube",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Ntube => "ntube",
            PrimitiveKind::Hole => "hole",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Per-axis natural centering of the primitive in the target language
    pub fn default_centering(&self) -> [bool; 3] {
        match self {
            PrimitiveKind::Cube => [false, false, false],
            PrimitiveKind::Sphere => [true, true, true],
            PrimitiveKind::Cylinder
            | PrimitiveKind::Cone
            | PrimitiveKind::Ntube
            | PrimitiveKind::Hole => [true, true, false],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_element() {
        let json = r#"{
            "category": "element",
            "name": "cone",
            "topRadius": 2,
            "bottomRadius": 4.5,
            "height": 10,
            "center": [true, true, false],
            "color": [1, 0, 0]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.category, Some(Category::Element));
        assert_eq!(node.params.top_radius, Some(Number::Int(2)));
        assert_eq!(node.params.bottom_radius, Some(Number::Float(4.5)));
        assert_eq!(node.properties.color.as_ref().map(Vec::len), Some(3));
        assert!(!node.properties.highlight);
    }

    #[test]
    fn test_decode_operation_with_children() {
        let json = r#"{
            "category": "Operation",
            "name": "union",
            "elements": [
                {"category": "element", "name": "sphere", "radius": 1, "center": [true, true, true]}
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.category, Some(Category::Operation));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.count(), 2);
    }

    #[test]
    fn test_highlight_is_presence() {
        let node: Node =
            serde_json::from_str(r#"{"category": "element", "highlight": false}"#).unwrap();
        assert!(node.properties.highlight);
    }

    #[test]
    fn test_unknown_category_kept() {
        let node: Node = serde_json::from_str(r#"{"category": "widget"}"#).unwrap();
        assert_eq!(node.category, Some(Category::Unknown("widget".into())));
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(OperationKind::from_name("minkowski"), Some(OperationKind::Minkowski));
        assert_eq!(OperationKind::from_name("Union"), None);
        assert_eq!(PrimitiveKind::from_name("ntube"), Some(PrimitiveKind::Ntube));
        assert_eq!(PrimitiveKind::from_name("bracket"), None);
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let node = Node::element("sphere").with_params(Parameters {
            radius: Some(Number::Int(3)),
            ..Parameters::default()
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"category": "element", "name": "sphere", "radius": 3})
        );
    }
}
