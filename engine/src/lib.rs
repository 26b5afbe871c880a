//! Finds tabular data in arbitrary HTML, whether or not it is marked up as a
//! table.
//!
//! A set of independent detectors each scans the parsed [Document] and
//! proposes [TableCandidate]s. The [Engine] runs them in a fixed order,
//! records a diagnostic score after each one, and drops candidates too small
//! to be tables.

pub mod aggregate;
pub mod candidate;
pub mod config;
pub mod detectors;
pub mod document;
mod error;
pub mod grouping;
pub mod guided;
pub mod signature;
pub mod table;
pub mod textutil;

pub use aggregate::{DetectorScore, Engine, Extraction};
pub use candidate::{Provenance, TableCandidate};
pub use config::EngineConfig;
pub use detectors::{Detector, DetectorKind};
pub use document::Document;
pub use error::{Error, Result};
pub use guided::{GuidedExtraction, extract_by_examples};
