//! Tunable thresholds of the engine.

use serde_derive::Deserialize;

use crate::detectors::DetectorKind;

/// Thresholds and switches for a detection run. Every field has a default,
/// so a configuration file only needs to name what it changes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Minimum group size for every sibling, class and signature grouping.
    pub min_repeats: usize,
    /// Minimum text fragments for an element to become a row.
    pub min_text_fragments: usize,
    /// Minimum text fragments for a dense block.
    pub min_dense_fragments: usize,
    /// Minimum total text length, in characters, of a positional container.
    pub min_container_text_len: usize,
    /// Share of values that must be numeric for a numeric column.
    pub numeric_column_ratio: f64,
    /// Share of values that must be non-numeric text for a textual column.
    pub text_column_ratio: f64,
    /// Depth bound of the deep structural signature.
    pub deep_signature_depth: usize,
    /// Unique matches a pattern category needs to become a table.
    pub min_pattern_matches: usize,
    /// Pairs needed before key/value structuring emits a table.
    pub min_key_value_pairs: usize,
    /// Minimum cells per row in the positional detector.
    pub min_columns: usize,
    /// Longest text still considered a label by key/value structuring.
    pub max_label_len: usize,
    /// Also harvest genuine `<table>` markup, ahead of the heuristics.
    pub html_tables: bool,
    /// Detectors to skip entirely.
    pub disabled_detectors: Vec<DetectorKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_repeats: 3,
            min_text_fragments: 3,
            min_dense_fragments: 5,
            min_container_text_len: 100,
            numeric_column_ratio: 0.7,
            text_column_ratio: 0.5,
            deep_signature_depth: 3,
            min_pattern_matches: 3,
            min_key_value_pairs: 2,
            min_columns: 2,
            max_label_len: 50,
            html_tables: false,
            disabled_detectors: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Whether `kind` takes part in a run with this configuration.
    pub fn is_enabled(&self, kind: DetectorKind) -> bool {
        if kind == DetectorKind::HtmlTable && !self.html_tables {
            return false;
        }
        !self.disabled_detectors.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[gtest]
    fn partial_yaml_keeps_other_defaults() -> googletest::Result<()> {
        let cfg: EngineConfig = serde_yaml_ng::from_str(
            r#"
min_repeats: 4
disabled_detectors: [text_numeric, cards]
"#,
        )?;
        expect_that!(cfg.min_repeats, eq(4));
        expect_that!(cfg.min_dense_fragments, eq(5));
        expect_that!(cfg.is_enabled(DetectorKind::Cards), eq(false));
        expect_that!(cfg.is_enabled(DetectorKind::TextNumeric), eq(false));
        expect_that!(cfg.is_enabled(DetectorKind::Patterns), eq(true));
        expect_that!(cfg.is_enabled(DetectorKind::HtmlTable), eq(false));
        Ok(())
    }

    #[gtest]
    fn rejects_unknown_fields() {
        let got: std::result::Result<EngineConfig, _> = serde_yaml_ng::from_str("min_repeat: 4");
        expect_that!(got.is_err(), eq(true));
    }
}
