//! `propmatrix scan` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use propmatrix_core::store::PriorState;
use propmatrix_core::types::StatusCounts;
use propmatrix_scanner::{PropertySource, ScanReport};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render, write_counts};

/// Execute the `scan` command.
pub fn execute(args: ScanArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let config = super::load_config(config_path)?;
    let scanner = super::build_scanner(&config, config.scanner.mine_docs && !args.no_docs)?;

    info!(
        sdk = %scanner.config().sdk_path.display(),
        output = %scanner.store().path().display(),
        dry_run = args.dry_run,
        "starting scan"
    );

    let report = if args.dry_run {
        scanner.scan_once()?
    } else {
        scanner.run()?
    };

    writer.render(&ScanSummary::from(report))?;
    Ok(())
}

/// Scan result summary.
#[derive(Serialize)]
pub struct ScanSummary {
    pub output_path: String,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
    pub prior_state: PriorState,
    pub property_source: PropertySource,
    pub components: usize,
    pub properties: usize,
    pub counts: StatusCounts,
    pub evidence_components: usize,
    pub evidence_entries: usize,
    pub docs_scanned: usize,
    pub elapsed_ms: u64,
}

impl From<ScanReport> for ScanSummary {
    fn from(report: ScanReport) -> Self {
        Self {
            output_path: report.output_path,
            persisted: report.persisted,
            backup_path: report.backup_path,
            prior_state: report.prior_state,
            property_source: report.property_source,
            components: report.components,
            properties: report.properties,
            counts: report.counts,
            evidence_components: report.evidence_components,
            evidence_entries: report.evidence_entries,
            docs_scanned: report.docs_scanned,
            elapsed_ms: report.elapsed_ms,
        }
    }
}

impl Render for ScanSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.persisted {
            writeln!(w, "Scan complete: {}", self.output_path.bold())?;
        } else {
            writeln!(
                w,
                "Scan complete (dry run, {} not written)",
                self.output_path.bold()
            )?;
        }

        let prior = match self.prior_state {
            PriorState::Absent => "none (cold start)".normal(),
            PriorState::Loaded => "loaded".green(),
            PriorState::Recovered => "partially readable, bad records skipped".yellow(),
            PriorState::Malformed => "malformed, ignored".yellow(),
        };
        writeln!(w, "Previous matrix: {prior}")?;
        if let Some(backup) = &self.backup_path {
            writeln!(w, "Previous file saved as: {backup}")?;
        }
        writeln!(w, "Components: {}", self.components)?;

        let source = match self.property_source {
            PropertySource::Extracted => "extracted".normal(),
            PropertySource::Fallback => "built-in list".yellow(),
        };
        writeln!(w, "Common properties: {} ({source})", self.properties)?;
        writeln!(w)?;

        write_counts(w, "Records", &self.counts)?;
        writeln!(
            w,
            "Doc evidence: {} entries for {} components ({} files)",
            self.evidence_entries, self.evidence_components, self.docs_scanned
        )?;
        writeln!(w, "Elapsed: {} ms", self.elapsed_ms)?;

        Ok(())
    }
}
