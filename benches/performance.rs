// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use textcad::ast::{Flag, Number, Parameters, Properties, Rotation};
use textcad::{parse_pcsg, Compiler, Node};

fn cube(size: i64) -> Node {
    Node::element("cube").with_params(Parameters {
        center: Some(vec![Flag::Bool(true); 3]),
        size: Some(vec![Number::Int(size); 3]),
        ..Parameters::default()
    })
}

fn cylinder(radius: f64, height: f64) -> Node {
    Node::element("cylinder")
        .with_params(Parameters {
            center: Some(vec![Flag::Bool(true), Flag::Bool(true), Flag::Bool(false)]),
            radius: Some(Number::Float(radius)),
            height: Some(Number::Float(height)),
            ..Parameters::default()
        })
        .with_properties(Properties {
            location: Some(vec![Number::Int(1), Number::Int(2), Number::Int(3)]),
            rotation: Some(Rotation {
                angle: Number::Int(45),
                axis: vec![Flag::Bool(false), Flag::Bool(false), Flag::Bool(true)],
            }),
            ..Properties::default()
        })
}

/// A union with `width` leaves
fn wide_tree(width: usize) -> Node {
    let elements = (0..width)
        .map(|i| if i % 2 == 0 { cube(i as i64 + 1) } else { cylinder(i as f64 * 0.5, 10.0) })
        .collect();
    Node::operation("union", elements)
}

/// Alternating difference/union nesting `depth` levels deep
fn deep_tree(depth: usize) -> Node {
    let mut node = cube(1);
    for level in 0..depth {
        let name = if level % 2 == 0 { "difference" } else { "union" };
        node = Node::operation(name, vec![node, cylinder(level as f64 + 1.0, 2.0)]);
    }
    node
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let compiler = Compiler::new(4);

    for width in [10, 100, 1000] {
        let tree = wide_tree(width);
        group.bench_with_input(BenchmarkId::new("wide", width), &tree, |b, tree| {
            b.iter(|| compiler.compile(black_box(tree)).unwrap());
        });
    }

    for depth in [8, 32, 128] {
        let tree = deep_tree(depth);
        group.bench_with_input(BenchmarkId::new("deep", depth), &tree, |b, tree| {
            b.iter(|| compiler.compile(black_box(tree)).unwrap());
        });
    }

    group.finish();
}

fn bench_constructions(c: &mut Criterion) {
    let mut node = cube(5);
    for _ in 0..32 {
        node = Node::element("bracket").with_construction(node);
    }

    c.bench_function("construction_chain_32", |b| {
        let compiler = Compiler::new(4);
        b.iter(|| compiler.compile(black_box(&node)).unwrap());
    });
}

fn bench_parse(c: &mut Criterion) {
    let json = serde_json::to_string(&wide_tree(500)).unwrap();

    c.bench_function("parse_wide_500", |b| {
        b.iter(|| parse_pcsg(black_box(&json)).unwrap());
    });
}

criterion_group!(benches, bench_compile, bench_constructions, bench_parse);
criterion_main!(benches);
