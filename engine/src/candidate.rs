//! The common output unit of every detector.

use crate::detectors::DetectorKind;
use crate::table::{Row, Table};

/// Which detector proposed a candidate, and what set it apart from the other
/// candidates of that detector (a shared class name, a pattern category, ...).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Provenance {
    pub detector: DetectorKind,
    pub discriminator: Option<String>,
}

impl Provenance {
    pub fn new(detector: DetectorKind) -> Self {
        Self {
            detector,
            discriminator: None,
        }
    }

    pub fn with_discriminator<S: Into<String>>(mut self, discriminator: S) -> Self {
        self.discriminator = Some(discriminator.into());
        self
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.discriminator {
            Some(discriminator) => write!(f, "{} ({discriminator})", self.detector),
            None => write!(f, "{}", self.detector),
        }
    }
}

/// A rectangular grid of cells proposed as possibly-tabular data.
///
/// Every row has the same length, and when column labels are present there is
/// exactly one per column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableCandidate {
    rows: Table,
    columns: Option<Vec<String>>,
    provenance: Provenance,
}

impl TableCandidate {
    /// Builds a candidate, right-padding short rows (and a short label list)
    /// to the widest of them. Returns `None` when there are no rows at all.
    pub fn new<T>(rows: T, columns: Option<Vec<String>>, provenance: Provenance) -> Option<Self>
    where
        T: Into<Table>,
    {
        let mut rows: Table = rows.into();
        if rows.is_empty() {
            return None;
        }

        let width = rows
            .width()
            .max(columns.as_ref().map_or(0, |labels| labels.len()));
        rows.pad_to(width);
        let columns = columns.map(|mut labels| {
            for idx in labels.len()..width {
                labels.push(idx.to_string());
            }
            labels
        });

        Some(Self {
            rows,
            columns,
            provenance,
        })
    }

    pub fn rows(&self) -> &Table {
        &self.rows
    }

    /// Inferred column labels, if the detector produced any.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.width())
    }

    /// Labels for display: the inferred ones, otherwise positional indices.
    pub fn column_labels(&self) -> Vec<String> {
        match &self.columns {
            Some(labels) => labels.clone(),
            None => (0..self.width()).map(|idx| idx.to_string()).collect(),
        }
    }

    /// Up to the first `n` rows.
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Values of the column at `index`, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(String::as_str))
    }

    /// Index of the column labelled `label`.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.as_ref()?.iter().position(|l| l == label)
    }

    /// A table with at most one row or at most one column carries no
    /// tabular information.
    pub fn is_degenerate(&self) -> bool {
        let (rows, cols) = self.shape();
        rows <= 1 || cols <= 1
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn provenance() -> Provenance {
        Provenance::new(DetectorKind::VisualBlocks)
    }

    #[gtest]
    fn rejects_empty_rows() {
        expect_that!(
            TableCandidate::new(Vec::<Vec<String>>::new(), None, provenance()),
            none()
        );
    }

    #[gtest]
    fn pads_rows_and_labels_to_common_width() {
        let cand = TableCandidate::new(
            [vec!["a", "b", "c"], vec!["d"]],
            Some(vec!["x".to_string()]),
            provenance(),
        )
        .expect("non-empty");
        expect_that!(cand.shape(), eq((2, 3)));
        expect_that!(cand.rows()[1], eq(&Row::from(["d", "", ""])));
        expect_that!(cand.column_labels(), elements_are![eq("x"), eq("1"), eq("2")]);
    }

    #[gtest]
    fn labels_wider_than_rows_widen_rows() {
        let cand = TableCandidate::new(
            [vec!["a"]],
            Some(vec!["k".to_string(), "v".to_string()]),
            provenance(),
        )
        .expect("non-empty");
        expect_that!(cand.rows()[0], eq(&Row::from(["a", ""])));
    }

    #[gtest]
    fn positional_labels_without_columns() {
        let cand = TableCandidate::new([vec!["a", "b"]], None, provenance()).expect("non-empty");
        expect_that!(cand.columns(), none());
        expect_that!(cand.column_labels(), elements_are![eq("0"), eq("1")]);
    }

    #[gtest]
    fn degenerate_shapes() {
        let one_row = TableCandidate::new([vec!["a", "b"]], None, provenance()).expect("non-empty");
        let one_col = TableCandidate::new([vec!["a"], vec!["b"]], None, provenance()).expect("non-empty");
        let fine = TableCandidate::new([vec!["a", "b"], vec!["c", "d"]], None, provenance())
            .expect("non-empty");
        expect_that!(one_row.is_degenerate(), eq(true));
        expect_that!(one_col.is_degenerate(), eq(true));
        expect_that!(fine.is_degenerate(), eq(false));
    }

    #[gtest]
    fn provenance_display() {
        expect_that!(provenance().to_string(), eq("visual_blocks"));
        expect_that!(
            Provenance::new(DetectorKind::ClassBlocks)
                .with_discriminator("card")
                .to_string(),
            eq("class_blocks (card)")
        );
    }
}
