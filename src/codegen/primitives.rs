// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Primitive lowerer
//!
//! Every primitive shares one centering rule, parameterized by the
//! placement the target language gives it natively: cubes are anchored at
//! a corner, spheres at their center, and the cylinder family is centered
//! in x/y but sits on its base in z.

use super::emit;
use super::site::Site;
use crate::ast::{Node, Number, PrimitiveKind};
use crate::error::{CompileError, NodePath};
use crate::utils::math::{hole_sides, radius_from_apothem};

/// Segments per unit of radius for round primitives
const RESOLUTION_PER_RADIUS: i64 = 20;

/// Offset that moves a primitive from its native placement to `centering`
pub fn centering_offset(centering: [bool; 3], extrema: [Number; 3], default: [bool; 3]) -> [Number; 3] {
    let half = Number::Int(2);
    let mut offset = [Number::Int(0); 3];
    for axis in 0..3 {
        if centering[axis] && !default[axis] {
            offset[axis] = -extrema[axis] / half;
        } else if !centering[axis] && default[axis] {
            offset[axis] = extrema[axis] / half;
        }
    }
    offset
}

/// Translate call applying the centering offset, empty when nothing moves
pub fn apply_centering(centering: [bool; 3], extrema: [Number; 3], default: [bool; 3]) -> String {
    emit::translate(&centering_offset(centering, extrema, default))
}

/// Lower a primitive node to its OpenSCAD statement
pub fn lower(kind: PrimitiveKind, node: &Node, path: &NodePath) -> Result<String, CompileError> {
    lower_at(kind, Site::new(node, path))
}

pub(crate) fn lower_at(kind: PrimitiveKind, site: Site<'_>) -> Result<String, CompileError> {
    match kind {
        PrimitiveKind::Cube => cube(site),
        PrimitiveKind::Sphere => sphere(site),
        PrimitiveKind::Cylinder => cylinder(site),
        PrimitiveKind::Cone => cone(site),
        PrimitiveKind::Ntube => ntube(site),
        PrimitiveKind::Hole => hole(site),
    }
}

fn resolution(radius: Number) -> Number {
    radius * Number::Int(RESOLUTION_PER_RADIUS)
}

fn cube(site: Site<'_>) -> Result<String, CompileError> {
    let center = site.center()?;
    let size = site.vec3(site.node.params.size.as_ref(), "size")?;
    Ok(format!(
        "{}cube(size={});",
        apply_centering(center, size, PrimitiveKind::Cube.default_centering()),
        emit::list(&size)
    ))
}

fn sphere(site: Site<'_>) -> Result<String, CompileError> {
    let radius = site.number(site.node.params.radius, "radius")?;
    let center = site.center()?;
    Ok(format!(
        "{}sphere(r={}, resolution={});",
        apply_centering(center, [radius; 3], PrimitiveKind::Sphere.default_centering()),
        radius,
        resolution(radius)
    ))
}

fn cylinder(site: Site<'_>) -> Result<String, CompileError> {
    let radius = site.number(site.node.params.radius, "radius")?;
    let height = site.number(site.node.params.height, "height")?;
    let center = site.center()?;
    Ok(format!(
        "{}cylinder(r={}, h={}, resolution={});",
        apply_centering(
            center,
            [radius, radius, height],
            PrimitiveKind::Cylinder.default_centering()
        ),
        radius,
        height,
        resolution(radius)
    ))
}

fn cone(site: Site<'_>) -> Result<String, CompileError> {
    let top = site.number(site.node.params.top_radius, "topRadius")?;
    let bottom = site.number(site.node.params.bottom_radius, "bottomRadius")?;
    let height = site.number(site.node.params.height, "height")?;
    let center = site.center()?;
    let max_radius = top.max(bottom);
    Ok(format!(
        "{}cylinder(r1={}, r2={}, h={}, resolution={});",
        apply_centering(
            center,
            [max_radius, max_radius, height],
            PrimitiveKind::Cone.default_centering()
        ),
        bottom,
        top,
        height,
        resolution(max_radius)
    ))
}

fn ntube(site: Site<'_>) -> Result<String, CompileError> {
    let apothem = site.number(site.node.params.apothem, "apothem")?;
    let sides = site.number(site.node.params.sides, "sides")?;
    let height = site.number(site.node.params.height, "height")?;
    let center = site.center()?;
    if sides.is_zero() {
        return Err(site.invalid("sides", "a polygon needs at least one side"));
    }
    let radius = Number::Float(radius_from_apothem(apothem.as_f64(), sides.as_f64()));
    Ok(format!(
        "{}cylinder(r={}, h={}, resolution={});",
        apply_centering(
            center,
            [radius, radius, height],
            PrimitiveKind::Ntube.default_centering()
        ),
        radius,
        height,
        sides
    ))
}

fn hole(site: Site<'_>) -> Result<String, CompileError> {
    let nominal = site.number(site.node.params.radius, "radius")?;
    let height = site.number(site.node.params.height, "height")?;
    let center = site.center()?;
    let sides = hole_sides(nominal.as_f64());
    let mut radius = Number::Float(radius_from_apothem(nominal.as_f64(), sides as f64));
    if let Some(tolerance) = site.node.params.tolerance {
        radius = radius + tolerance;
    }
    Ok(format!(
        "{}cylinder(r={}, h={}, resolution={});",
        apply_centering(
            center,
            [radius, radius, height],
            PrimitiveKind::Hole.default_centering()
        ),
        radius,
        height,
        sides
    ))
}
