// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting
//!
//! Everything goes to stderr; stdout is reserved for generated scripts.

use crate::error::CompileError;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a finished compile
    pub fn report_compile(file: &str, output: &str, nodes: usize, bytes: usize, duration: Duration) {
        eprintln!("\n{}", "━".repeat(80).bright_black());
        eprintln!("{} {} {} {}", "Compiled:".bold(), file.cyan(), "→".bright_black(), output.cyan());
        eprintln!("{}", "━".repeat(80).bright_black());
        eprintln!("  {} {}", "Nodes:".bright_black(), nodes.to_string().cyan());
        eprintln!("  {} {}", "Bytes:".bright_black(), bytes.to_string().cyan());
        eprintln!("  {} {}", "Time:".bright_black(), Self::format_duration(duration).yellow());
        eprintln!("{}", "━".repeat(80).bright_black());
    }

    /// Report the totals of a batch
    pub fn report_batch(total: usize, failed: usize, duration: Duration) {
        eprintln!("\n{}", "═".repeat(80).bright_black());
        eprintln!("{}", "Batch Summary".bold());
        eprintln!("{}", "═".repeat(80).bright_black());
        eprintln!("  {} {}", "Total Trees:".bright_black(), total.to_string().cyan());
        eprintln!("  {} {}", "Compiled:".bright_black(), (total - failed).to_string().green());
        eprintln!(
            "  {} {}",
            "Failed:".bright_black(),
            if failed > 0 { failed.to_string().red() } else { failed.to_string().green() }
        );
        eprintln!("  {} {}", "Time:".bright_black(), Self::format_duration(duration).yellow());
        eprintln!("{}", "═".repeat(80).bright_black());
    }

    /// Report an error, naming the node when it is a compile error
    pub fn report_failure(err: &anyhow::Error) {
        match err.downcast_ref::<CompileError>() {
            Some(compile_err) => Self::report_compile_error(compile_err),
            None => Self::report_error(&format!("{:#}", err)),
        }
    }

    /// Report a compile error with its kind and node path
    pub fn report_compile_error(err: &CompileError) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), err.kind().to_string().red());
        eprintln!("  {} {}", "Node:".bright_black(), err.path().to_string().cyan());
        if !err.node_name().is_empty() {
            eprintln!("  {} {}", "Name:".bright_black(), err.node_name().cyan());
        }
        eprintln!("  {}", err.to_string().bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        eprintln!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✅".green(), message.green());
    }
}
