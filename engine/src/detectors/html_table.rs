//! Genuine `<table>` markup.

use scraper::ElementRef;

use super::{Detector, DetectorKind};
use crate::{
    EngineConfig, Provenance, TableCandidate,
    document::{Document, child_elements, class_value, stripped_text, tag_name},
};

const MAX_COLSPAN: usize = 1000;

/// One candidate per `<table>` element. Rows of a nested table belong to the
/// nested table only.
pub struct HtmlTable;

impl Detector for HtmlTable {
    fn kind(&self) -> DetectorKind {
        DetectorKind::HtmlTable
    }

    fn detect(&self, doc: &Document, _cfg: &EngineConfig) -> Vec<TableCandidate> {
        doc.elements_named(&["table"])
            .filter_map(|table| self.table_candidate(table))
            .collect()
    }
}

impl HtmlTable {
    fn table_candidate(&self, table: ElementRef<'_>) -> Option<TableCandidate> {
        let mut rows: Vec<(bool, Vec<String>)> = own_rows(table)
            .map(|tr| {
                let mut header_only = true;
                let mut cells = Vec::new();
                for cell in child_elements(tr) {
                    let name = tag_name(cell);
                    if name != "th" && name != "td" {
                        continue;
                    }
                    header_only &= name == "th";
                    let text = stripped_text(cell);
                    for _ in 0..colspan(cell) {
                        cells.push(text.clone());
                    }
                }
                (header_only && !cells.is_empty(), cells)
            })
            .filter(|(_, cells)| !cells.is_empty())
            .collect();

        let columns = if rows.first().is_some_and(|(header, _)| *header) {
            Some(rows.remove(0).1)
        } else {
            None
        };
        let rows: Vec<Vec<String>> = rows.into_iter().map(|(_, cells)| cells).collect();

        let mut provenance = Provenance::new(self.kind());
        if let Some(id) = table.value().attr("id").filter(|id| !id.trim().is_empty()) {
            provenance = provenance.with_discriminator(id.trim());
        } else if let Some(class) = class_value(table) {
            provenance = provenance.with_discriminator(class);
        }
        TableCandidate::new(rows, columns, provenance)
    }
}

/// `tr` elements whose nearest enclosing table is `table`.
fn own_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    table
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| tag_name(*el) == "tr")
        .filter(move |tr| {
            tr.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| tag_name(*el) == "table")
                .is_some_and(|nearest| nearest.id() == table.id())
        })
}

fn colspan(cell: ElementRef<'_>) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|span| span.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_COLSPAN)
}
