#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ScannerError`)
//! - [`config`]: Scanner configuration (`ScannerConfig`, builder)
//! - [`catalog`]: Component catalog built from definition file names (`ComponentCatalog`)
//! - [`property`]: Common property catalog with built-in fallback (`PropertyCatalog`)
//! - [`evidence`]: Documentation negative-evidence mining (`EvidenceMiner`, `EvidenceIndex`, rule table)
//! - [`resolver`]: Per-pair support status resolution (`StatusResolver`)
//! - [`scanner`]: Main orchestrator (`MatrixScanner`, `MatrixScannerBuilder`, `ScanReport`)
//!
//! # Architecture
//!
//! ```text
//! <sdk>/component/ets --> ComponentCatalog --+
//!                     --> PropertyCatalog  --+--> StatusResolver --> SupportMatrix
//! <docs>/zh-cn/...    --> EvidenceMiner ------+            ^
//!                                                         |
//!                              MatrixStore (prior) -------+
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod evidence;
pub mod property;
pub mod resolver;
pub mod scanner;

mod source;

// --- Public API Re-exports ---

// Scanner (main orchestrator)
pub use scanner::{MatrixScanner, MatrixScannerBuilder, ScanReport};

// Configuration
pub use config::{ScannerConfig, ScannerConfigBuilder};

// Error
pub use error::ScannerError;

// Catalogs
pub use catalog::ComponentCatalog;
pub use property::{PropertyCatalog, PropertyExtraction, PropertySource};

// Evidence
pub use evidence::{
    EvidenceIndex, EvidenceMatch, EvidenceMiner, HEURISTIC_RULES, HeuristicFamily, HeuristicRule,
};

// Resolver
pub use resolver::StatusResolver;
