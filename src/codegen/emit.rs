// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OpenSCAD call templates
//!
//! Each function renders one call header without a trailing statement
//! terminator. Transforms that would be an identity render as an empty
//! string so they can be concatenated unconditionally.

use crate::ast::{AutoResize, Flag, Number, Rotation};
use std::fmt::Display;

/// Render a list as `[a,b,c]`
pub fn list<T: Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(","))
}

/// Render a matrix as nested lists
pub fn matrix(rows: &[Vec<Number>]) -> String {
    let rows: Vec<String> = rows.iter().map(|row| list(row)).collect();
    format!("[{}]", rows.join(","))
}

pub fn is_all_zeros(values: &[Number]) -> bool {
    values.iter().all(|v| v.is_zero())
}

/// Coerce flags to integers (`true` → 1, `false` → 0)
pub fn binary_list(flags: &[Flag]) -> Vec<i64> {
    flags.iter().map(|f| f.to_int()).collect()
}

/// Lowercase boolean literal(s) for `auto`
pub fn bool_literal(auto: &AutoResize) -> String {
    match auto {
        AutoResize::All(b) => b.to_string(),
        AutoResize::PerAxis(flags) => list(flags),
    }
}

pub fn highlight() -> &'static str {
    "#"
}

pub fn color(channels: &[Number]) -> String {
    if channels.is_empty() {
        String::new()
    } else {
        format!("color({})", list(channels))
    }
}

pub fn translate(location: &[Number]) -> String {
    if is_all_zeros(location) {
        String::new()
    } else {
        format!("translate(v={})", list(location))
    }
}

pub fn rotate(rotation: &Rotation) -> String {
    let axis = binary_list(&rotation.axis);
    if axis.iter().all(|v| *v == 0) {
        String::new()
    } else {
        format!("rotate(a={}, v={})", rotation.angle, list(&axis))
    }
}

pub fn scale(multiplier: &[Number]) -> String {
    if multiplier.is_empty() {
        String::new()
    } else {
        format!("scale(v={})", list(multiplier))
    }
}

pub fn mirror(axis: &[Flag]) -> String {
    if axis.is_empty() {
        String::new()
    } else {
        format!("mirror({})", list(&binary_list(axis)))
    }
}

pub fn resize(newsize: &[Number], auto: &AutoResize) -> String {
    format!("resize(newsize={}, auto={})", list(newsize), bool_literal(auto))
}

pub fn multmatrix(rows: &[Vec<Number>]) -> String {
    if rows.is_empty() {
        String::new()
    } else {
        format!("multmatrix(m={})", matrix(rows))
    }
}

pub fn union() -> &'static str {
    "union()"
}

pub fn difference() -> &'static str {
    "difference()"
}

pub fn intersection() -> &'static str {
    "intersection()"
}

pub fn hull() -> &'static str {
    "hull()"
}

pub fn minkowski() -> &'static str {
    "minkowski()"
}
