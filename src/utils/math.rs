// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Regular polygon math

use std::f64::consts::PI;

/// Circumscribed radius of a regular polygon with the given apothem
pub fn radius_from_apothem(apothem: f64, sides: f64) -> f64 {
    apothem / (PI / sides).cos()
}

/// Apothem of a regular polygon with the given circumscribed radius
pub fn apothem_from_radius(radius: f64, sides: f64) -> f64 {
    radius * (PI / sides).cos()
}

/// Side count used to approximate a hole of the given radius
pub fn hole_sides(radius: f64) -> i64 {
    ((4.0 * radius).floor() as i64).max(3)
}
