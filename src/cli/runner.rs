// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Compile runner for single files and batches

use crate::codegen::{CompileOptions, Compiler};
use crate::io;
use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// One input tree and where its script goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Result of compiling one tree
#[derive(Debug, Clone)]
pub struct CompileResult {
    pub script: String,
    pub nodes: usize,
    pub duration: Duration,
}

/// Runner for compile jobs
pub struct Runner {
    compiler: Compiler,
}

impl Runner {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            compiler: Compiler::with_options(options),
        }
    }

    /// Compile a tree file and return the script with timing
    pub fn compile_file(&self, input: &Path) -> Result<CompileResult> {
        let start = Instant::now();

        let tree = io::import_pcsg_file(input)?;
        let script = self
            .compiler
            .compile(&tree)
            .with_context(|| format!("Failed to compile {}", input.display()))?;

        Ok(CompileResult {
            script,
            nodes: tree.count(),
            duration: start.elapsed(),
        })
    }

    /// Compile one job and write its script
    pub fn run_job(&self, job: &BatchJob) -> Result<CompileResult> {
        let result = self.compile_file(&job.input)?;
        io::export_scad(&result.script, &job.output)?;
        Ok(result)
    }

    /// Compile all jobs in parallel; results keep the job order
    pub fn run_batch(
        &self,
        jobs: &[BatchJob],
        progress: Option<&ProgressBar>,
    ) -> Vec<(BatchJob, Result<CompileResult>)> {
        jobs.par_iter()
            .map(|job| {
                let result = self.run_job(job);
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                (job.clone(), result)
            })
            .collect()
    }

    /// Plan jobs for files and directories; directories are searched for `*.json`
    pub fn plan(inputs: &[PathBuf], out_dir: &Path) -> Result<Vec<BatchJob>> {
        let mut jobs = Vec::new();

        for input in inputs {
            if input.is_dir() {
                let mut found: Vec<PathBuf> = WalkDir::new(input)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path())
                    .filter(|p| p.extension().map(|s| s == "json").unwrap_or(false))
                    .collect();
                found.sort();

                for path in found {
                    let relative = path.strip_prefix(input).unwrap_or(&path);
                    jobs.push(BatchJob {
                        output: out_dir.join(relative).with_extension("scad"),
                        input: path,
                    });
                }
            } else if input.is_file() {
                let name = input
                    .file_name()
                    .with_context(|| format!("Not a file path: {}", input.display()))?;
                jobs.push(BatchJob {
                    input: input.clone(),
                    output: out_dir.join(name).with_extension("scad"),
                });
            } else {
                bail!("Input not found: {}", input.display());
            }
        }

        Ok(jobs)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
