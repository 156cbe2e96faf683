//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// propmatrix -- UI component x common property support matrix.
///
/// Use `propmatrix <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "propmatrix", version, about, long_about = None)]
pub struct Cli {
    /// Path to the propmatrix.toml configuration file (optional).
    #[arg(short, long, default_value = "propmatrix.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the SDK definitions and rebuild the support matrix.
    Scan(ScanArgs),

    /// Inspect or edit the stored support matrix.
    Matrix(MatrixArgs),

    /// Show negative evidence mined from the documentation tree.
    Evidence(EvidenceArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- scan ----

/// Run a full scan.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Compute the matrix without writing the result file.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip documentation mining for this run.
    #[arg(long)]
    pub no_docs: bool,
}

// ---- matrix ----

/// Inspect or edit the stored matrix.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(subcommand)]
    pub action: MatrixAction,
}

#[derive(Subcommand, Debug)]
pub enum MatrixAction {
    /// Show a per-component summary, or every record of one component.
    Show {
        /// Show the records of a single component.
        #[arg(long)]
        component: Option<String>,
    },
    /// Replace the whole result file with a JSON document.
    Import {
        /// JSON document containing `components` and `commonProperties`.
        file: PathBuf,
    },
    /// Record a manual status for one component/property pair.
    Set {
        /// Component name (e.g. Button).
        component: String,
        /// Property name (e.g. width).
        property: String,
        /// Status: supported, unsupported, unknown.
        #[arg(long)]
        status: String,
        /// Owner to record (kept unchanged when omitted).
        #[arg(long)]
        owner: Option<String>,
        /// Notes to record (kept unchanged when omitted).
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set the owner of every property of a component.
    Owner {
        /// Component name.
        component: String,
        /// Owner name.
        owner: String,
    },
}

// ---- evidence ----

/// Mine the documentation tree and print the evidence index.
#[derive(Args, Debug)]
pub struct EvidenceArgs {
    /// Show only one component.
    #[arg(long)]
    pub component: Option<String>,
}

// ---- config ----

/// Manage propmatrix configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, paths, scanner).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_scan_defaults() {
        let cli = Cli::try_parse_from(["propmatrix", "scan"]).expect("parse succeeded");
        match cli.command {
            Commands::Scan(args) => {
                assert!(!args.dry_run, "dry_run should default to false");
                assert!(!args.no_docs, "no_docs should default to false");
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_scan_dry_run() {
        let cli =
            Cli::try_parse_from(["propmatrix", "scan", "--dry-run", "--no-docs"]).expect("parse");
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.dry_run);
                assert!(args.no_docs);
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn test_cli_parse_matrix_show() {
        let cli = Cli::try_parse_from(["propmatrix", "matrix", "show"]).expect("parse");
        match cli.command {
            Commands::Matrix(args) => match args.action {
                MatrixAction::Show { component } => assert!(component.is_none()),
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_cli_parse_matrix_show_component() {
        let cli = Cli::try_parse_from(["propmatrix", "matrix", "show", "--component", "Button"])
            .expect("parse");
        match cli.command {
            Commands::Matrix(args) => match args.action {
                MatrixAction::Show { component } => {
                    assert_eq!(component, Some("Button".to_owned()));
                }
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_cli_parse_matrix_import() {
        let cli = Cli::try_parse_from(["propmatrix", "matrix", "import", "/tmp/m.json"])
            .expect("parse");
        match cli.command {
            Commands::Matrix(args) => match args.action {
                MatrixAction::Import { file } => {
                    assert_eq!(file, PathBuf::from("/tmp/m.json"));
                }
                _ => panic!("expected Import action"),
            },
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_cli_parse_matrix_set_full() {
        let cli = Cli::try_parse_from([
            "propmatrix",
            "matrix",
            "set",
            "Button",
            "width",
            "--status",
            "unsupported",
            "--owner",
            "lee",
            "--notes",
            "verified on device",
        ])
        .expect("parse");
        match cli.command {
            Commands::Matrix(args) => match args.action {
                MatrixAction::Set {
                    component,
                    property,
                    status,
                    owner,
                    notes,
                } => {
                    assert_eq!(component, "Button");
                    assert_eq!(property, "width");
                    assert_eq!(status, "unsupported");
                    assert_eq!(owner.as_deref(), Some("lee"));
                    assert_eq!(notes.as_deref(), Some("verified on device"));
                }
                _ => panic!("expected Set action"),
            },
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_cli_parse_matrix_set_requires_status() {
        let result = Cli::try_parse_from(["propmatrix", "matrix", "set", "Button", "width"]);
        assert!(result.is_err(), "--status is required");
    }

    #[test]
    fn test_cli_parse_matrix_owner() {
        let cli = Cli::try_parse_from(["propmatrix", "matrix", "owner", "Button", "kim"])
            .expect("parse");
        match cli.command {
            Commands::Matrix(args) => match args.action {
                MatrixAction::Owner { component, owner } => {
                    assert_eq!(component, "Button");
                    assert_eq!(owner, "kim");
                }
                _ => panic!("expected Owner action"),
            },
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_cli_parse_evidence_component() {
        let cli = Cli::try_parse_from(["propmatrix", "evidence", "--component", "Text"])
            .expect("parse");
        match cli.command {
            Commands::Evidence(args) => assert_eq!(args.component, Some("Text".to_owned())),
            _ => panic!("expected Evidence command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["propmatrix", "config", "show", "--section", "paths"])
            .expect("parse");
        match cli.command {
            Commands::Config(args) => match args.action {
                ConfigAction::Show { section } => assert_eq!(section, Some("paths".to_owned())),
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "propmatrix",
            "-c",
            "/etc/propmatrix.toml",
            "matrix",
            "show",
            "--output",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("parse");
        assert_eq!(cli.config, PathBuf::from("/etc/propmatrix.toml"));
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["propmatrix", "config", "validate"]).expect("parse");
        assert_eq!(cli.config, PathBuf::from("propmatrix.toml"));
        assert!(matches!(cli.output, OutputFormat::Text));
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_cli_parse_invalid_output_format() {
        let result = Cli::try_parse_from(["propmatrix", "--output", "yaml", "scan"]);
        assert!(result.is_err(), "yaml is not a supported output format");
    }

    #[test]
    fn test_cli_parse_no_subcommand() {
        assert!(Cli::try_parse_from(["propmatrix"]).is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
