#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ScannerError`)
//! - [`config`]: Scanner configuration (`ScannerConfig`, builder)
//! - [`types`]: Document graph (`Document`, `Package`, `File`, `Relationship`)
//! - [`hash`]: SHA-1 / SHA-256 file digests
//! - [`license`]: License tag detection, expression splitting, package aggregation
//! - [`verification`]: Package verification code
//! - [`scanner`]: Package scan orchestrator (`PackageScanner`)
//! - [`assembler`]: Two-package document assembly
//! - [`sbom`]: SPDX 2.2 JSON projection and writer
//!
//! # Architecture
//!
//! ```text
//! sources.txt --> PackageScanner --> Package(sources) --+
//!                                                       +--> assemble_document --> Document
//! builds.txt  --> PackageScanner --> Package(builds)  --+                             |
//!                                                                                write_spdx
//!                                                                                     |
//!                                                                              doc.spdx.json
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod hash;
pub mod license;
pub mod sbom;
pub mod scanner;
pub mod types;
pub mod verification;

// --- Public API Re-exports ---

// Scanner (main orchestrator)
pub use scanner::PackageScanner;

// Assembly
pub use assembler::{PackageMetadata, PackageRole, assemble_document, document_config};

// Configuration
pub use config::{ScannerConfig, ScannerConfigBuilder};

// Error
pub use error::ScannerError;

// Types
pub use types::{
    Document, DocumentConfig, File, NOASSERTION, NONE, Package, PackageConfig, Relationship,
    RelationshipType, Supplier,
};

// SBOM output
pub use sbom::{SpdxDocument, WrittenDocument, make_document, to_json, write_spdx};

// Verification
pub use verification::calculate_verification_code;
