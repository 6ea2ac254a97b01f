// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - reading trees and writing scripts

mod exporter;
mod importer;

pub use exporter::{export_scad, write_scad};
pub use importer::{import_pcsg_file, parse_pcsg, read_pcsg};
