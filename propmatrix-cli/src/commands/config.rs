//! `propmatrix config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use propmatrix_core::config::PropmatrixConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
const SECTIONS: [&str; 3] = ["general", "paths", "scanner"];

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer),
        ConfigAction::Show { section } => execute_show(config_path, section, writer),
    }
}

/// Execute the config validate subcommand.
///
/// A missing file is valid: defaults plus `PROPMATRIX_*` overrides apply.
///
/// # Errors
///
/// Returns `CliError::Config` if parsing or validation fails.
fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let file_found = config_path.exists();
    let report = match PropmatrixConfig::load_or_default(config_path) {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            file_found,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            file_found,
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// Displays the effective configuration (file + env overrides + defaults),
/// optionally narrowed to one section.
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if the
/// section name is unknown.
fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = PropmatrixConfig::load_or_default(config_path)?;

    let config_toml = match section.as_deref() {
        None => toml::to_string_pretty(&config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("paths") => toml::to_string_pretty(&config.paths),
        Some("scanner") => toml::to_string_pretty(&config.scanner),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    }
    .unwrap_or_else(|e| format!("(serialization error: {})", e));

    let report = ConfigReport {
        source: config_path.display().to_string(),
        section,
        config_toml,
    };

    writer.render(&report)?;

    Ok(())
}

/// Configuration display report.
///
/// The `config_toml` field is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the file exists (defaults are used otherwise)
    pub file_found: bool,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;
        if !self.file_found {
            writeln!(w, "  Note: {}", "file not found, defaults applied".yellow())?;
        }

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_report_render_text_full_config() {
        let report = ConfigReport {
            source: "test.toml".to_owned(),
            section: None,
            config_toml: "[general]\nlog_level = \"info\"".to_owned(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Configuration"), "should contain header");
        assert!(output.contains("test.toml"), "should contain source filename");
        assert!(output.contains("log_level"), "should contain config content");
    }

    #[test]
    fn test_config_report_render_text_specific_section() {
        let report = ConfigReport {
            source: "propmatrix.toml".to_owned(),
            section: Some("paths".to_owned()),
            config_toml: "sdk_path = \"api/@internal\"".to_owned(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("[paths]"), "should show section name");
        assert!(output.contains("sdk_path"), "should show config content");
    }

    #[test]
    fn test_config_report_json_skips_toml_body() {
        let report = ConfigReport {
            source: "test.toml".to_owned(),
            section: Some("scanner".to_owned()),
            config_toml: "mine_docs = true".to_owned(),
        };

        let parsed = serde_json::to_value(&report).expect("JSON serialization should succeed");

        assert_eq!(parsed["source"].as_str(), Some("test.toml"));
        assert_eq!(parsed["section"].as_str(), Some("scanner"));
        assert!(
            parsed.get("config_toml").is_none(),
            "config_toml should be skipped"
        );
    }

    #[test]
    fn test_config_validation_report_valid() {
        let report = ConfigValidationReport {
            source: "propmatrix.toml".to_owned(),
            file_found: true,
            valid: true,
            errors: Vec::new(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("VALID"));
        assert!(!output.contains("Error:"));
        assert!(!output.contains("defaults applied"));
    }

    #[test]
    fn test_config_validation_report_invalid_lists_errors() {
        let report = ConfigValidationReport {
            source: "missing.toml".to_owned(),
            file_found: false,
            valid: false,
            errors: vec!["invalid value for general.log_level".to_owned()],
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("INVALID"));
        assert!(output.contains("general.log_level"));
        assert!(output.contains("defaults applied"));
    }

    #[test]
    fn test_show_rejects_unknown_section() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("propmatrix.toml");
        let writer = OutputWriter::new(crate::cli::OutputFormat::Json);

        let err = execute_show(&path, Some("ebpf".to_owned()), &writer).unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("general, paths, scanner"));
    }
}
