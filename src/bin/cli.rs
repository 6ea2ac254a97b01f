// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! textcad CLI

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use textcad::cli::{Reporter, Runner};
use textcad::{io, CompileOptions, Compiler, Config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "textcad")]
#[command(about = "textcad - compile parametric CSG trees to OpenSCAD", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input tree (JSON), stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Spaces per indentation level (default: 4)
    #[arg(short, long)]
    indent: Option<usize>,

    /// Configuration file (default: ./textcad.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output while traversing the tree
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a tree to an OpenSCAD script
    Compile {
        /// Input tree (JSON), stdin when omitted
        input: Option<PathBuf>,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces per indentation level
        #[arg(short, long)]
        indent: Option<usize>,
    },

    /// Compile many trees in parallel
    Batch {
        /// Tree files or directories searched for *.json
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory for .scad files
        #[arg(short, long, default_value = "scad")]
        out: PathBuf,

        /// Spaces per indentation level
        #[arg(short, long)]
        indent: Option<usize>,
    },

    /// Decode a tree and print it back as JSON
    Tree {
        /// Input tree (JSON), stdin when omitted
        input: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        Reporter::report_failure(&err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    config.verbose |= cli.verbose;
    init_tracing(config.verbose);

    match cli.command {
        Some(Commands::Compile { input, output, indent }) => {
            apply_overrides(&mut config, output, indent);
            compile_command(input.as_deref(), &config)
        }
        Some(Commands::Batch { inputs, out, indent }) => {
            apply_overrides(&mut config, None, indent);
            batch_command(&inputs, &out, &config)
        }
        Some(Commands::Tree { input }) => tree_command(input.as_deref()),
        Some(Commands::Version) => {
            println!("textcad v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            // Nothing to read: show usage instead of waiting on a terminal
            if cli.input.is_none() && std::io::stdin().is_terminal() {
                Cli::command().print_help()?;
                return Ok(());
            }
            apply_overrides(&mut config, cli.output, cli.indent);
            compile_command(cli.input.as_deref(), &config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok())?;
            Ok(config)
        }
        None => Config::load(),
    }
}

fn apply_overrides(config: &mut Config, output: Option<PathBuf>, indent: Option<usize>) {
    if output.is_some() {
        config.output = output;
    }
    if let Some(indent) = indent {
        config.indent = indent;
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the script, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn read_tree(input: Option<&Path>) -> Result<textcad::Node> {
    match input {
        Some(path) => io::import_pcsg_file(path),
        None => io::read_pcsg(std::io::stdin().lock()),
    }
}

fn compile_command(input: Option<&Path>, config: &Config) -> Result<()> {
    let start = Instant::now();

    let tree = read_tree(input)?;
    let script = Compiler::with_options(config.compile_options()).compile(&tree)?;

    match &config.output {
        Some(path) => io::export_scad(&script, path)?,
        None => io::write_scad(&script, std::io::stdout().lock())?,
    }

    if config.verbose {
        let input_name = input.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
        let output_name = config
            .output
            .as_ref()
            .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
        Reporter::report_compile(&input_name, &output_name, tree.count(), script.len(), start.elapsed());
    }

    Ok(())
}

fn batch_command(inputs: &[PathBuf], out: &Path, config: &Config) -> Result<()> {
    let start = Instant::now();
    let options: CompileOptions = config.compile_options();

    let jobs = Runner::plan(inputs, out)?;
    if jobs.is_empty() {
        Reporter::report_warning("No trees found in the given inputs");
        return Ok(());
    }

    if config.verbose {
        Reporter::report_info(&format!("Compiling {} trees into {}", jobs.len(), out.display()));
    }

    let progress = if config.verbose {
        let pb = ProgressBar::new(jobs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let results = Runner::new(options).run_batch(&jobs, progress.as_ref());

    if let Some(pb) = progress {
        pb.finish_with_message("Batch complete");
    }

    let mut failed = 0;
    for (job, result) in &results {
        if let Err(err) = result {
            failed += 1;
            Reporter::report_error(&format!("{}: {:#}", job.input.display(), err));
        }
    }

    Reporter::report_batch(results.len(), failed, start.elapsed());

    if failed > 0 {
        std::process::exit(1);
    }

    Reporter::success(&format!("Wrote {} scripts to {}", results.len(), out.display()));
    Ok(())
}

fn tree_command(input: Option<&Path>) -> Result<()> {
    let tree = read_tree(input)?;
    let json = serde_json::to_string_pretty(&tree)?;
    println!("{}", json);
    Ok(())
}
