//! Tables recognised by the kinds of values they hold: at least one column
//! of numbers next to at least one column of words.
//!
//! Two independent passes feed the detector:
//! - the container pass reads rows from the dominant child tag of large
//!   containers;
//! - the scatter pass lines text nodes up by synthetic coordinates derived
//!   from sibling counts. The coordinates only approximate a rendered
//!   layout; they say nothing about real geometry.

use scraper::{ElementRef, Node};

use super::{Detector, DetectorKind};
use crate::{
    EngineConfig, Provenance, TableCandidate,
    document::{Document, child_elements, raw_text, stripped_text, tag_name},
    grouping::{FirstSeenGroups, most_common},
    table::Table,
    textutil::{char_len, is_numeric_token, meets_ratio},
};

const CONTAINERS: &[&str] = &["div", "ul", "section", "article"];
const CONTAINER_DISCRIMINATOR: &str = "text_numeric_detection";
const SCATTER_DISCRIMINATOR: &str = "aligned_text_detection";
/// Weight of one preceding sibling at any ancestor level in the column
/// coordinate.
const COLUMN_WEIGHT: usize = 10;

pub struct TextNumeric;

impl Detector for TextNumeric {
    fn kind(&self) -> DetectorKind {
        DetectorKind::TextNumeric
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let mut candidates: Vec<TableCandidate> = doc
            .elements_named(CONTAINERS)
            .filter_map(|container| self.container_candidate(container, cfg))
            .collect();
        candidates.extend(self.scatter_candidate(doc, cfg));
        candidates
    }
}

impl TextNumeric {
    fn container_candidate(
        &self,
        container: ElementRef<'_>,
        cfg: &EngineConfig,
    ) -> Option<TableCandidate> {
        if char_len(&raw_text(container)) < cfg.min_container_text_len {
            return None;
        }

        let tags: Vec<&str> = child_elements(container).map(tag_name).collect();
        let (row_tag, count) = most_common(tags.iter().copied())?;
        if count == 1 || count < cfg.min_repeats {
            return None;
        }

        let rows: Vec<Vec<String>> = child_elements(container)
            .filter(|child| tag_name(*child) == row_tag)
            .filter_map(|row| cells_of(row, cfg.min_columns))
            .collect();
        if rows.len() < cfg.min_repeats {
            return None;
        }

        let promote_header = first_row_is_header(&rows);
        let mut table = Table::from(rows);
        table.pad_to(table.width());
        if !has_mixed_columns(&table.columns(), cfg) {
            return None;
        }

        let provenance =
            Provenance::new(self.kind()).with_discriminator(CONTAINER_DISCRIMINATOR);
        if promote_header {
            let header = table.remove(0);
            TableCandidate::new(table, Some(header.0), provenance)
        } else {
            TableCandidate::new(table, None, provenance)
        }
    }

    fn scatter_candidate(&self, doc: &Document, cfg: &EngineConfig) -> Option<TableCandidate> {
        let groups: FirstSeenGroups<usize, (usize, &str)> = doc
            .text_nodes()
            .map(|node| {
                let (row, column) = coordinates(node.parent);
                (row, (column, node.text))
            })
            .collect();

        let mut rows: Vec<Vec<(usize, &str)>> = groups
            .into_groups_of_at_least(cfg.min_columns)
            .map(|(_, members)| members)
            .collect();
        if rows.len() < cfg.min_repeats {
            return None;
        }
        for row in &mut rows {
            row.sort_by_key(|(column, _)| *column);
        }

        let table = Table::from(
            rows.into_iter()
                .map(|row| row.into_iter().map(|(_, text)| text).collect::<Vec<_>>()),
        );
        // Rows stay ragged here: a column only holds the rows reaching it.
        if !has_mixed_columns(&table.columns(), cfg) {
            return None;
        }

        TableCandidate::new(
            table,
            None,
            Provenance::new(self.kind()).with_discriminator(SCATTER_DISCRIMINATOR),
        )
    }
}

/// Cell texts of a row element: its direct children, or failing that, the
/// lines of its text. `None` when neither yields `min_columns` cells.
fn cells_of(row: ElementRef<'_>, min_columns: usize) -> Option<Vec<String>> {
    let children: Vec<ElementRef> = child_elements(row).collect();
    let cells: Vec<String> = if children.len() >= min_columns {
        children.into_iter().map(stripped_text).collect()
    } else {
        raw_text(row)
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };
    (cells.len() >= min_columns).then_some(cells)
}

fn count_numeric<'a>(cells: impl IntoIterator<Item = &'a String>) -> usize {
    cells
        .into_iter()
        .filter(|cell| !cell.is_empty() && is_numeric_token(cell))
        .count()
}

/// A first row without numbers above later rows with some reads as labels.
fn first_row_is_header(rows: &[Vec<String>]) -> bool {
    match rows.split_first() {
        Some((first, rest)) if !rest.is_empty() => {
            count_numeric(first) == 0 && count_numeric(rest.iter().flatten()) > 0
        }
        _ => false,
    }
}

/// Whether at least one column is numeric and another textual. A column that
/// qualifies as numeric is not tested for text.
fn has_mixed_columns(columns: &[Vec<&str>], cfg: &EngineConfig) -> bool {
    let mut numeric = false;
    let mut textual = false;
    for column in columns {
        let numbers = column
            .iter()
            .filter(|v| !v.is_empty() && is_numeric_token(v))
            .count();
        if meets_ratio(numbers, column.len(), cfg.numeric_column_ratio) {
            numeric = true;
            continue;
        }
        let words = column
            .iter()
            .filter(|v| char_len(v) > 1 && !is_numeric_token(v))
            .count();
        if meets_ratio(words, column.len(), cfg.text_column_ratio) {
            textual = true;
        }
    }
    numeric && textual
}

/// Synthetic `(row, column)` coordinates of the text held by `parent`. The
/// row is the number of nodes preceding `parent`; the column sums, up every
/// ancestor level, the nodes preceding that ancestor.
fn coordinates(parent: ElementRef<'_>) -> (usize, usize) {
    let row = parent.prev_siblings().count();
    let column = std::iter::once(*parent)
        .chain(parent.ancestors())
        .take_while(|node| !matches!(node.value(), Node::Document))
        .map(|node| node.prev_siblings().count() * COLUMN_WEIGHT)
        .sum();
    (row, column)
}
