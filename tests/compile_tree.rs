// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Whole-tree behavior - construction fallback, error paths, reentrancy

use rayon::prelude::*;
use serde_json::json;
use textcad::ast::{Flag, Number, Parameters};
use textcad::{compile, compile_json, parse_pcsg, CompileError, CompileOptions, Compiler, ErrorKind, Node};

fn cube(size: i64) -> Node {
    Node::element("cube").with_params(Parameters {
        center: Some(vec![Flag::Bool(false); 3]),
        size: Some(vec![Number::Int(size); 3]),
        ..Parameters::default()
    })
}

fn sample_tree() -> Node {
    let bracket = Node::element("bracket").with_construction(Node::operation(
        "difference",
        vec![cube(4), cube(2)],
    ));
    Node::operation("union", vec![cube(1), bracket, Node::operation("hull", vec![cube(3)])])
}

#[test]
fn compiling_twice_is_byte_identical() {
    let tree = sample_tree();
    let compiler = Compiler::new(3);
    let first = compiler.compile(&tree).unwrap();
    let second = compiler.compile(&tree).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn parallel_compiles_do_not_interfere() {
    let tree = sample_tree();
    let expected = compile(&tree, 2).unwrap();
    let compiler = Compiler::new(2);

    let outputs: Vec<String> = (0..64)
        .into_par_iter()
        .map(|_| compiler.compile(&tree).unwrap())
        .collect();

    assert!(outputs.iter().all(|out| *out == expected));
}

#[test]
fn unknown_element_compiles_to_its_construction() {
    let construction = Node::operation("difference", vec![cube(4), cube(2)]);
    let bracket = Node::element("bracket").with_construction(construction.clone());

    assert_eq!(compile(&bracket, 4).unwrap(), compile(&construction, 4).unwrap());
}

#[test]
fn unknown_operation_prepends_echo() {
    let construction = Node::operation("union", vec![cube(1)]);
    let gear = Node {
        elements: Some(vec![cube(9)]),
        ..Node::operation("gear", vec![])
    }
    .with_construction(construction.clone());

    let expected = format!("echo(gear);{}", compile(&construction, 4).unwrap());
    assert_eq!(compile(&gear, 4).unwrap(), expected);
}

#[test]
fn unknown_element_keeps_indent_and_properties() {
    let tree = json!({
        "category": "operation",
        "name": "union",
        "elements": [{
            "category": "element",
            "name": "bolt",
            "highlight": true,
            "construction": {"category": "element", "name": "cube", "size": [1, 1, 1], "center": [false, false, false]}
        }]
    });
    assert_eq!(
        compile_json(&tree.to_string(), 2).unwrap(),
        "union(){\n  #  cube(size=[1,1,1]);\n}\n"
    );
}

#[test]
fn unknown_name_without_construction_fails() {
    let err = compile(&Node::element("bracket"), 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingConstruction);

    let err = compile(&Node::operation("gear", vec![]), 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingConstruction);
}

#[test]
fn long_construction_chain_is_reported_as_cycle() {
    let mut node = cube(1);
    for _ in 0..200 {
        node = Node::element("wrapper").with_construction(node);
    }

    let err = compile(&node, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicConstruction);
    assert_eq!(err.path().segments().len(), CompileOptions::default().max_construction_depth);
    assert!(err.path().segments().iter().all(|s| s == "construction"));
}

#[test]
fn construction_limit_is_configurable() {
    let mut node = cube(1);
    for _ in 0..3 {
        node = Node::element("wrapper").with_construction(node);
    }

    let tight = CompileOptions {
        max_construction_depth: 2,
        ..CompileOptions::default()
    };
    assert_eq!(
        Compiler::with_options(tight).compile(&node).unwrap_err().kind(),
        ErrorKind::CyclicConstruction
    );
    assert_eq!(compile(&node, 4).unwrap(), "cube(size=[1,1,1]);");
}

#[test]
fn errors_carry_the_node_path() {
    let tree = json!({
        "category": "operation",
        "name": "union",
        "elements": [
            {"category": "element", "name": "cube", "size": [1, 1, 1], "center": [false, false, false]},
            {
                "category": "element",
                "name": "widget",
                "construction": {"category": "element", "name": "sphere", "radius": 1}
            }
        ]
    });

    let err = compile_json(&tree.to_string(), 4).unwrap_err();
    let err = err.downcast_ref::<CompileError>().unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(err.path().to_string(), "/elements/1/construction");
    assert_eq!(err.node_name(), "sphere");
}

#[test]
fn failures_produce_no_partial_output() {
    let tree = Node::operation("union", vec![cube(1), Node::element("mystery")]);
    assert!(compile(&tree, 4).is_err());
}

#[test]
fn missing_and_unknown_categories() {
    let err = compile_json(r#"{"name": "cube"}"#, 4).unwrap_err();
    assert_eq!(err.downcast_ref::<CompileError>().unwrap().kind(), ErrorKind::MissingCategory);

    let err = compile_json(r#"{"category": "widget", "name": "cube"}"#, 4).unwrap_err();
    assert_eq!(err.downcast_ref::<CompileError>().unwrap().kind(), ErrorKind::UnknownCategory);
}

#[test]
fn malformed_json_is_a_decode_error() {
    let err = compile_json("{\"category\": ", 4).unwrap_err();
    assert!(err.downcast_ref::<CompileError>().is_none());
}

#[test]
fn decoded_tree_serializes_back() {
    let source = json!({
        "category": "operation",
        "name": "union",
        "color": [0, 0.5, 1],
        "elements": [{"category": "element", "name": "cone", "topRadius": 1, "bottomRadius": 2, "height": 3, "center": [1, 1, 0]}]
    });
    let tree = parse_pcsg(&source.to_string()).unwrap();
    let reparsed = parse_pcsg(&serde_json::to_string(&tree).unwrap()).unwrap();

    assert_eq!(tree, reparsed);
    assert_eq!(tree.count(), 2);
    assert_eq!(compile(&tree, 4).unwrap(), compile(&reparsed, 4).unwrap());
}

#[test]
fn deeply_nested_tree_is_rejected_without_overflow() {
    let mut tree = cube(1);
    for _ in 0..2000 {
        tree = Node::operation("union", vec![tree]);
    }

    let err = compile(&tree, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    assert!(err.to_string().contains("256"));
}
