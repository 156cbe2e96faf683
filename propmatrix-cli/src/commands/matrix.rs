//! `propmatrix matrix` command handler
//!
//! Reads and edits the result file outside of a scan. Every write goes
//! through [`MatrixStore`], so it takes the same lock as a running scan.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use propmatrix_core::error::StoreError;
use propmatrix_core::store::{MatrixStore, PropertyOverride};
use propmatrix_core::types::{
    ComponentInfo, PropertySupport, StatusCounts, SupportMatrix, SupportStatus,
};

use crate::cli::{MatrixAction, MatrixArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render, status_label, write_counts};

/// Execute the `matrix` command.
pub fn execute(args: MatrixArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let config = super::load_config(config_path)?;
    let store = MatrixStore::new(config.paths.output());

    match args.action {
        MatrixAction::Show { component } => execute_show(&store, component, writer),
        MatrixAction::Import { file } => execute_import(&store, &file, writer),
        MatrixAction::Set {
            component,
            property,
            status,
            owner,
            notes,
        } => {
            let status = SupportStatus::from_str_loose(&status).ok_or_else(|| {
                CliError::Command(format!(
                    "invalid status: {} (expected: supported, unsupported, unknown)",
                    status
                ))
            })?;
            let mut update = PropertyOverride::new(status);
            if let Some(owner) = owner {
                update = update.owner(owner);
            }
            if let Some(notes) = notes {
                update = update.notes(notes);
            }
            execute_set(&store, &component, &property, update, writer)
        }
        MatrixAction::Owner { component, owner } => {
            execute_owner(&store, &component, &owner, writer)
        }
    }
}

/// Show the per-component summary, or one component's records.
///
/// # Errors
///
/// Returns `CliError::Store` if the file is malformed or the component is unknown.
fn execute_show(
    store: &MatrixStore,
    component: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let source = store.path().display().to_string();
    let matrix = store.load()?.unwrap_or_else(SupportMatrix::empty);

    match component {
        Some(name) => {
            let info = matrix
                .components
                .get(&name)
                .ok_or(StoreError::ComponentNotFound { component: name })?;
            writer.render(&ComponentReport::new(source, info))?;
        }
        None => writer.render(&MatrixSummaryReport::new(source, &matrix))?,
    }

    Ok(())
}

/// Replace the whole result file with a validated document.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be read and `CliError::Store`
/// if the document is rejected.
fn execute_import(
    store: &MatrixStore,
    file: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(file = %file.display(), "importing matrix document");

    let document = std::fs::read_to_string(file)?;
    let matrix = store.replace_raw(&document)?;

    writer.render(&ImportReport {
        file: file.to_path_buf(),
        output_path: store.path().display().to_string(),
        components: matrix.components.len(),
        counts: matrix.status_counts(),
    })?;
    Ok(())
}

fn execute_set(
    store: &MatrixStore,
    component: &str,
    property: &str,
    update: PropertyOverride,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let record = store.set_property(component, property, update)?;

    writer.render(&SetReport {
        component: component.to_owned(),
        property: property.to_owned(),
        record,
    })?;
    Ok(())
}

fn execute_owner(
    store: &MatrixStore,
    component: &str,
    owner: &str,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let updated = store.set_owner(component, owner)?;

    writer.render(&OwnerReport {
        component: component.to_owned(),
        owner: owner.to_owned(),
        updated,
    })?;
    Ok(())
}

/// Per-component status summary.
#[derive(Serialize)]
pub struct MatrixSummaryReport {
    pub source: String,
    pub last_scanned: Option<String>,
    pub common_properties: usize,
    pub totals: StatusCounts,
    pub components: Vec<ComponentSummary>,
}

#[derive(Serialize)]
pub struct ComponentSummary {
    pub name: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

impl MatrixSummaryReport {
    fn new(source: String, matrix: &SupportMatrix) -> Self {
        let components = matrix
            .components
            .values()
            .map(|info| ComponentSummary {
                name: info.name.clone(),
                counts: info.status_counts(),
            })
            .collect();

        Self {
            source,
            last_scanned: matrix.last_scanned.clone(),
            common_properties: matrix.common_properties.len(),
            totals: matrix.status_counts(),
            components,
        }
    }
}

impl Render for MatrixSummaryReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Support Matrix: {}", self.source.bold())?;
        match self.last_scanned {
            Some(ref at) => writeln!(w, "Last scanned: {}", at)?,
            None => writeln!(w, "Last scanned: {}", "never".dimmed())?,
        }
        writeln!(
            w,
            "Components: {}  Common properties: {}",
            self.components.len(),
            self.common_properties
        )?;
        writeln!(w)?;

        if self.components.is_empty() {
            writeln!(w, "No components recorded. Run `propmatrix scan` first.")?;
            return Ok(());
        }

        writeln!(
            w,
            "{:<28} {:>9} {:>11} {:>7} {:>6}",
            "Component", "Supported", "Unsupported", "Unknown", "Manual"
        )?;
        writeln!(w, "{}", "-".repeat(65))?;
        for row in &self.components {
            writeln!(
                w,
                "{:<28} {:>9} {:>11} {:>7} {:>6}",
                row.name,
                row.counts.supported,
                row.counts.unsupported,
                row.counts.unknown,
                row.counts.manual
            )?;
        }
        writeln!(w)?;
        write_counts(w, "Total", &self.totals)
    }
}

/// All records of one component.
#[derive(Serialize)]
pub struct ComponentReport {
    pub source: String,
    pub component: String,
    pub counts: StatusCounts,
    pub properties: Vec<PropertyRow>,
}

#[derive(Serialize)]
pub struct PropertyRow {
    pub property: String,
    #[serde(flatten)]
    pub record: PropertySupport,
}

impl ComponentReport {
    fn new(source: String, info: &ComponentInfo) -> Self {
        Self {
            source,
            component: info.name.clone(),
            counts: info.status_counts(),
            properties: info
                .properties
                .iter()
                .map(|(property, record)| PropertyRow {
                    property: property.clone(),
                    record: record.clone(),
                })
                .collect(),
        }
    }
}

impl Render for ComponentReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Component: {} ({})",
            self.component.bold(),
            self.source
        )?;
        writeln!(w)?;

        writeln!(
            w,
            "{:<24} {:<12} {:<7} {:<16} Notes",
            "Property", "Status", "Source", "Owner"
        )?;
        writeln!(w, "{}", "-".repeat(80))?;
        for row in &self.properties {
            let status = status_label(row.record.is_supported);
            let source = row
                .record
                .source
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_owned());
            writeln!(
                w,
                "{:<24} {:<12} {:<7} {:<16} {}",
                row.property,
                status,
                source,
                row.record.owner.as_deref().unwrap_or("-"),
                row.record.notes.as_deref().unwrap_or("")
            )?;
        }

        Ok(())
    }
}

/// Result of `matrix import`.
#[derive(Serialize)]
pub struct ImportReport {
    pub file: PathBuf,
    pub output_path: String,
    pub components: usize,
    pub counts: StatusCounts,
}

impl Render for ImportReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Imported {} into {}",
            self.file.display(),
            self.output_path.bold()
        )?;
        writeln!(
            w,
            "  {} components, {} records ({} manual)",
            self.components,
            self.counts.total(),
            self.counts.manual
        )?;
        Ok(())
    }
}

/// Result of `matrix set`.
#[derive(Serialize)]
pub struct SetReport {
    pub component: String,
    pub property: String,
    pub record: PropertySupport,
}

impl Render for SetReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{}.{} set to {} ({})",
            self.component.bold(),
            self.property.bold(),
            status_label(self.record.is_supported),
            "manual".cyan()
        )?;
        if let Some(ref owner) = self.record.owner {
            writeln!(w, "  Owner: {}", owner)?;
        }
        if let Some(ref notes) = self.record.notes {
            writeln!(w, "  Notes: {}", notes)?;
        }
        Ok(())
    }
}

/// Result of `matrix owner`.
#[derive(Serialize)]
pub struct OwnerReport {
    pub component: String,
    pub owner: String,
    pub updated: usize,
}

impl Render for OwnerReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Owner of {} set to {} ({} records)",
            self.component.bold(),
            self.owner.bold(),
            self.updated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propmatrix_core::types::RecordSource;

    fn sample_matrix() -> SupportMatrix {
        let mut matrix = SupportMatrix::empty();
        matrix.last_scanned = Some("2026-10-18T00:00:00.000Z".to_owned());
        matrix.common_properties = vec!["opacity".to_owned(), "width".to_owned()];

        let mut button = ComponentInfo::new("Button");
        button.properties.insert(
            "width".to_owned(),
            PropertySupport::auto(SupportStatus::Supported, "inherited from common base"),
        );
        let mut manual = PropertySupport::auto(SupportStatus::Unsupported, "checked by hand");
        manual.source = Some(RecordSource::Manual);
        manual.owner = Some("alice".to_owned());
        button.properties.insert("opacity".to_owned(), manual);
        matrix.components.insert("Button".to_owned(), button);

        let mut text = ComponentInfo::new("Text");
        text.properties.insert(
            "width".to_owned(),
            PropertySupport::auto(SupportStatus::Unknown, "not explicitly declared"),
        );
        matrix.components.insert("Text".to_owned(), text);

        matrix
    }

    #[test]
    fn test_summary_counts_per_component() {
        let report = MatrixSummaryReport::new("m.json".to_owned(), &sample_matrix());

        assert_eq!(report.components.len(), 2);
        assert_eq!(report.components[0].name, "Button");
        assert_eq!(report.components[0].counts.supported, 1);
        assert_eq!(report.components[0].counts.unsupported, 1);
        assert_eq!(report.components[0].counts.manual, 1);
        assert_eq!(report.components[1].counts.unknown, 1);
        assert_eq!(report.totals.total(), 3);
    }

    #[test]
    fn test_summary_render_text() {
        let report = MatrixSummaryReport::new("m.json".to_owned(), &sample_matrix());

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Button"));
        assert!(output.contains("Text"));
        assert!(output.contains("Common properties: 2"));
        assert!(output.contains("Total: 3"));
    }

    #[test]
    fn test_summary_render_empty_matrix() {
        let report = MatrixSummaryReport::new("m.json".to_owned(), &SupportMatrix::empty());

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("No components recorded"));
    }

    #[test]
    fn test_summary_json_flattens_counts() {
        let report = MatrixSummaryReport::new("m.json".to_owned(), &sample_matrix());
        let json = serde_json::to_value(&report).expect("JSON serialization should succeed");

        assert_eq!(json["components"][0]["name"].as_str(), Some("Button"));
        assert_eq!(json["components"][0]["supported"].as_u64(), Some(1));
        assert_eq!(json["totals"]["manual"].as_u64(), Some(1));
    }

    #[test]
    fn test_component_report_rows_follow_property_order() {
        let matrix = sample_matrix();
        let report = ComponentReport::new("m.json".to_owned(), &matrix.components["Button"]);

        let names: Vec<&str> = report.properties.iter().map(|r| r.property.as_str()).collect();
        assert_eq!(names, vec!["opacity", "width"]);

        let json = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(json["properties"][0]["isSupported"].as_str(), Some("unsupported"));
        assert_eq!(json["properties"][0]["owner"].as_str(), Some("alice"));
        assert_eq!(json["properties"][0]["source"].as_str(), Some("manual"));
    }

    #[test]
    fn test_component_report_render_text() {
        let matrix = sample_matrix();
        let report = ComponentReport::new("m.json".to_owned(), &matrix.components["Button"]);

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Button"));
        assert!(output.contains("alice"));
        assert!(output.contains("inherited from common base"));
    }

    #[test]
    fn test_show_unknown_component_is_store_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = MatrixStore::new(dir.path().join("m.json"));
        store.save(&sample_matrix()).expect("save should succeed");

        let writer = OutputWriter::new(crate::cli::OutputFormat::Json);
        let err = execute_show(&store, Some("Ghost".to_owned()), &writer).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = MatrixStore::new(dir.path().join("m.json"));

        let writer = OutputWriter::new(crate::cli::OutputFormat::Json);
        let err = execute_import(&store, &dir.path().join("absent.json"), &writer).unwrap_err();

        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_set_report_render_text() {
        let mut record = PropertySupport::auto(SupportStatus::Unsupported, "verified on device");
        record.source = Some(RecordSource::Manual);
        record.owner = Some("bob".to_owned());
        let report = SetReport {
            component: "Button".to_owned(),
            property: "width".to_owned(),
            record,
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("unsupported"));
        assert!(output.contains("bob"));
        assert!(output.contains("verified on device"));
    }
}
