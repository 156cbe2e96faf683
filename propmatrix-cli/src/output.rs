//! Text/JSON output for every subcommand
//!
//! Handlers build a report struct and hand it to [`OutputWriter`]; the
//! `--output` flag decides whether it is printed through [`Render`] or as
//! pretty JSON. Status colouring shared by several reports lives here too.

use std::io::Write;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use propmatrix_core::types::{StatusCounts, SupportStatus};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Prints report payloads in the format chosen on the command line.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print `payload` to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        self.write_to(payload, &mut stdout.lock())
    }

    /// Print `payload` to `w`. JSON output always ends with a newline so
    /// consecutive documents stay line-separated.
    pub fn write_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Human-readable rendering of a report.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

/// Coloured status word as it appears in the result file.
pub fn status_label(status: SupportStatus) -> ColoredString {
    match status {
        SupportStatus::Supported => status.as_str().green(),
        SupportStatus::Unsupported => status.as_str().red(),
        SupportStatus::Unknown => status.as_str().dimmed(),
    }
}

/// One summary line: `<label>: <total> (supported:.. unsupported:.. unknown:.. manual:..)`.
pub fn write_counts(w: &mut dyn Write, label: &str, counts: &StatusCounts) -> std::io::Result<()> {
    writeln!(
        w,
        "{label}: {} (supported:{} unsupported:{} unknown:{} manual:{})",
        counts.total(),
        counts.supported.to_string().green(),
        counts.unsupported.to_string().red(),
        counts.unknown.to_string().dimmed(),
        counts.manual.to_string().cyan(),
    )
}
