//! Command handlers -- one module per subcommand

pub mod config;
pub mod evidence;
pub mod matrix;
pub mod scan;

use std::path::Path;

use propmatrix_core::config::PropmatrixConfig;
use propmatrix_scanner::{MatrixScanner, ScannerConfigBuilder};

use crate::error::CliError;

/// Load the effective configuration (file if present + env overrides + defaults).
pub(crate) fn load_config(config_path: &Path) -> Result<PropmatrixConfig, CliError> {
    Ok(PropmatrixConfig::load_or_default(config_path)?)
}

/// Build a scanner from the effective configuration.
pub(crate) fn build_scanner(
    config: &PropmatrixConfig,
    mine_docs: bool,
) -> Result<MatrixScanner, CliError> {
    let scanner_config = ScannerConfigBuilder::from_core(config)
        .mine_docs(mine_docs)
        .build()?;
    Ok(MatrixScanner::builder().config(scanner_config).build()?)
}
