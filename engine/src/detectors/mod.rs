//! The heuristic detectors. Each one is a stateless strategy over the
//! [Document], proposing zero or more [TableCandidate]s.

pub mod blocks;
pub mod cards;
pub mod html_table;
pub mod patterns;
pub mod positional;
pub mod repeated;

use serde_derive::Deserialize;

use crate::{EngineConfig, TableCandidate, document::Document};

/// Names of the detectors, in the order the aggregator runs them.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DetectorKind {
    /// Genuine `<table>` markup. Only runs when enabled in the config.
    HtmlTable,
    RepeatedStructure,
    VisualBlocks,
    ClassBlocks,
    DenseBlocks,
    SemanticBlocks,
    Patterns,
    TextNumeric,
    Cards,
    /// Example-guided extraction. Never part of an aggregated run.
    Guided,
}

/// A single table-finding heuristic.
///
/// Implementations must be pure functions of the document and configuration:
/// no state carried between calls, no failure for locally malformed input.
pub trait Detector: Send + Sync {
    fn kind(&self) -> DetectorKind;

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate>;
}
