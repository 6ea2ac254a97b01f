// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Property emitter
//!
//! Renders the attributes shared by elements and operations. The order is
//! fixed: highlight, color, translate, rotate, scale. It decides the
//! nesting of the generated calls and therefore the transform order.

use super::emit;
use crate::ast::Properties;

/// Render the property prefix of a node
pub fn properties(props: &Properties) -> String {
    let mut out = String::new();

    if props.highlight {
        out.push_str(emit::highlight());
    }
    if let Some(color) = &props.color {
        out.push_str(&emit::color(color));
    }
    if let Some(location) = &props.location {
        out.push_str(&emit::translate(location));
    }
    if let Some(rotation) = &props.rotation {
        out.push_str(&emit::rotate(rotation));
    }
    if let Some(scale) = &props.scale {
        out.push_str(&emit::scale(scale));
    }

    out
}
