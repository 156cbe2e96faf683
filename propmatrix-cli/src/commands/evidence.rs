//! `propmatrix evidence` command handler
//!
//! Mines the documentation tree and prints the negative-evidence index
//! without touching the result file.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use propmatrix_scanner::EvidenceIndex;

use crate::cli::EvidenceArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `evidence` command.
pub fn execute(
    args: EvidenceArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_config(config_path)?;
    let scanner = super::build_scanner(&config, true)?;
    let docs_path = scanner.config().docs_ui_dir().display().to_string();

    info!(docs = %docs_path, "mining documentation evidence");
    let index = scanner.mine_evidence();

    let report = EvidenceReport::new(docs_path, &index, args.component.as_deref())?;
    writer.render(&report)?;
    Ok(())
}

/// Negative-evidence report.
#[derive(Serialize)]
pub struct EvidenceReport {
    pub docs_path: String,
    pub files_scanned: usize,
    pub components: Vec<EvidenceEntry>,
}

#[derive(Serialize)]
pub struct EvidenceEntry {
    pub component: String,
    pub properties: Vec<String>,
}

impl EvidenceReport {
    /// Build the report, optionally narrowed to one component.
    ///
    /// The filter uses the index's component lookup, so `textinput`
    /// finds `TextInput`.
    fn new(docs_path: String, index: &EvidenceIndex, component: Option<&str>) -> Result<Self, CliError> {
        let components = match component {
            Some(name) => {
                let key = index.find_component_key(name).ok_or_else(|| {
                    CliError::Command(format!("no documentation evidence for component: {}", name))
                })?;
                let properties = index
                    .unsupported_properties(key)
                    .map(|props| props.iter().cloned().collect())
                    .unwrap_or_default();
                vec![EvidenceEntry {
                    component: key.to_owned(),
                    properties,
                }]
            }
            None => index
                .iter()
                .map(|(component, props)| EvidenceEntry {
                    component: component.to_owned(),
                    properties: props.iter().cloned().collect(),
                })
                .collect(),
        };

        Ok(Self {
            docs_path,
            files_scanned: index.files_scanned(),
            components,
        })
    }
}

impl Render for EvidenceReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Documentation evidence: {}", self.docs_path.bold())?;
        writeln!(w, "Files scanned: {}", self.files_scanned)?;
        writeln!(w)?;

        if self.components.is_empty() {
            writeln!(w, "No unsupported-property claims found.")?;
            return Ok(());
        }

        for entry in &self.components {
            writeln!(
                w,
                "{} ({})",
                entry.component.bold(),
                entry.properties.len()
            )?;
            for property in &entry.properties {
                writeln!(w, "  - {}", property.red())?;
            }
        }

        Ok(())
    }
}
