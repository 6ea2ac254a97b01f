// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OpenSCAD script exporter

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write a script verbatim to a file, creating parent directories
pub fn export_scad(script: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, script)
        .with_context(|| format!("Failed to write SCAD file: {}", path.display()))?;

    info!("Wrote {} bytes to {}", script.len(), path.display());
    Ok(())
}

/// Write a script verbatim to any writer (e.g. stdout)
pub fn write_scad(script: &str, mut writer: impl Write) -> Result<()> {
    writer
        .write_all(script.as_bytes())
        .context("Failed to write SCAD output")?;
    writer.flush().context("Failed to flush SCAD output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_creates_parent_dirs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/out/model.scad");

        export_scad("cube(size=[1,1,1]);", &path)?;

        assert_eq!(fs::read_to_string(&path)?, "cube(size=[1,1,1]);");
        Ok(())
    }

    #[test]
    fn test_write_to_buffer() -> Result<()> {
        let mut buffer = Vec::new();
        write_scad("union(){\n}\n", &mut buffer)?;
        assert_eq!(buffer, b"union(){\n}\n");
        Ok(())
    }
}
