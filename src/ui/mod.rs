//! User interface module - console output of resolution results.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing results to stdout

use std::io::{self, Write};

use anyhow::Result;

use crate::engine::RenderedOutput;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_diagnostic, display_error, display_resolution_summary, display_status, format_json,
    format_outputs,
};

/// Writes the selected outputs to stdout, one per line or as JSON.
///
/// # Arguments
/// * `outputs` - Outputs to print, in the order to print them
/// * `json` - Emit a JSON object instead of lines
/// * `explicit` - Outputs were picked with `--output`
pub fn print_outputs(outputs: &[&RenderedOutput], json: bool, explicit: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        writeln!(handle, "{}", format_json(outputs)?)?;
    } else {
        for line in format_outputs(outputs, explicit) {
            writeln!(handle, "{}", line)?;
        }
    }

    handle.flush()?;
    Ok(())
}
