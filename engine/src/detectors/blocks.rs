//! Detectors that turn text-dense blocks into rows of positional cells: each
//! block's stripped text fragments, in order, become one row.
//!
//! They differ only in how blocks are grouped into a table:
//! - [VisualBlocks]: same-tag siblings under one parent.
//! - [ClassBlocks]: elements anywhere sharing a class attribute value.
//! - [DenseBlocks]: `div`s with the same (high) number of fragments.
//! - [SemanticBlocks]: `div`s with the same [crate::signature::DeepSignature].

use scraper::ElementRef;

use super::{Detector, DetectorKind};
use crate::{
    EngineConfig, Provenance, TableCandidate,
    document::{Document, child_elements, class_value, fragments, tag_name},
    grouping::FirstSeenGroups,
    signature::deep_signature,
};

const DIV: &[&str] = &["div"];

/// Repeated same-tag siblings with similar content density.
pub struct VisualBlocks;

impl Detector for VisualBlocks {
    fn kind(&self) -> DetectorKind {
        DetectorKind::VisualBlocks
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let mut candidates = Vec::new();
        for parent in doc.elements() {
            let children: Vec<ElementRef> = child_elements(parent).collect();
            if children.len() < cfg.min_repeats || !same_tag(&children) {
                continue;
            }

            let rows = rows_with_at_least(children, cfg.min_text_fragments);
            if rows.len() >= cfg.min_repeats {
                candidates.extend(TableCandidate::new(rows, None, Provenance::new(self.kind())));
            }
        }
        candidates
    }
}

fn same_tag(elements: &[ElementRef<'_>]) -> bool {
    match elements.split_first() {
        Some((first, rest)) => rest.iter().all(|el| tag_name(*el) == tag_name(*first)),
        None => true,
    }
}

/// Elements repeated across the whole document under one class value, such
/// as listing cards.
pub struct ClassBlocks;

impl Detector for ClassBlocks {
    fn kind(&self) -> DetectorKind {
        DetectorKind::ClassBlocks
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let groups: FirstSeenGroups<String, ElementRef> = doc
            .elements()
            .filter_map(|el| class_value(el).map(|class| (class, el)))
            .collect();

        let mut candidates = Vec::new();
        for (class, members) in groups.into_groups_of_at_least(cfg.min_repeats) {
            let rows = rows_with_at_least(members, cfg.min_text_fragments);
            if rows.len() >= cfg.min_repeats {
                candidates.extend(TableCandidate::new(
                    rows,
                    None,
                    Provenance::new(self.kind()).with_discriminator(class),
                ));
            }
        }
        candidates
    }
}

/// Standalone `div`s with dense content, grouped by their exact number of
/// fragments even when they are neither siblings nor share classes.
pub struct DenseBlocks;

impl Detector for DenseBlocks {
    fn kind(&self) -> DetectorKind {
        DetectorKind::DenseBlocks
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let groups: FirstSeenGroups<usize, Vec<String>> = doc
            .elements_named(DIV)
            .map(fragments)
            .filter(|row| row.len() >= cfg.min_dense_fragments)
            .map(|row| (row.len(), row))
            .collect();

        groups
            .into_groups_of_at_least(cfg.min_repeats)
            .filter_map(|(_, rows)| TableCandidate::new(rows, None, Provenance::new(self.kind())))
            .collect()
    }
}

/// `div`s sharing their tag tree to a bounded depth.
pub struct SemanticBlocks;

impl Detector for SemanticBlocks {
    fn kind(&self) -> DetectorKind {
        DetectorKind::SemanticBlocks
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let groups: FirstSeenGroups<_, Vec<String>> = doc
            .elements_named(DIV)
            .filter_map(|div| {
                let row = fragments(div);
                if row.len() < cfg.min_text_fragments {
                    return None;
                }
                Some((deep_signature(div, cfg.deep_signature_depth), row))
            })
            .collect();

        groups
            .into_groups_of_at_least(cfg.min_repeats)
            .filter_map(|(_, rows)| TableCandidate::new(rows, None, Provenance::new(self.kind())))
            .collect()
    }
}

fn rows_with_at_least(elements: Vec<ElementRef<'_>>, min_fragments: usize) -> Vec<Vec<String>> {
    elements
        .into_iter()
        .map(fragments)
        .filter(|row| row.len() >= min_fragments)
        .collect()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use testutils::{grid, page, repeat_html};

    use super::*;
    use crate::table::Table;

    fn detect(detector: &dyn Detector, html: &str) -> Vec<TableCandidate> {
        let doc = Document::parse(html).expect("parses");
        detector.detect(&doc, &EngineConfig::default())
    }

    mod visual_blocks {
        use super::*;

        #[gtest]
        fn keeps_dense_same_tag_children_and_pads() {
            let html = page(
                "<section>\
                 <article><h2>A</h2><p>1</p><p>2</p></article>\
                 <article><h2>B</h2><p>3</p><p>4</p><p>5</p></article>\
                 <article><h2>sparse</h2></article>\
                 <article><h2>C</h2><p>6</p><p>7</p></article>\
                 </section>",
            );
            let got = detect(&VisualBlocks, &html);
            assert_that!(got, len(eq(1)));
            expect_that!(got[0].columns(), none());
            expect_that!(
                got[0].rows(),
                eq(&Table::from(grid(&[
                    &["A", "1", "2", ""],
                    &["B", "3", "4", "5"],
                    &["C", "6", "7", ""],
                ])))
            );
        }

        #[gtest]
        fn rejects_mixed_tags() {
            let html = page(
                "<div>\
                 <p><b>a</b><b>b</b><b>c</b></p>\
                 <span><b>a</b><b>b</b><b>c</b></span>\
                 <p><b>a</b><b>b</b><b>c</b></p>\
                 </div>",
            );
            expect_that!(detect(&VisualBlocks, &html), is_empty());
        }
    }

    mod class_blocks {
        use super::*;

        #[gtest]
        fn groups_by_class_anywhere_in_document() {
            let cards = repeat_html(3, |i| {
                format!(r#"<div><span class="card big">T{i}</span></div><p class="card big">loc {i}<br>{i} rooms<br>{i}00 kr</p>"#)
            });
            let got = detect(&ClassBlocks, &page(&cards));
            assert_that!(got, len(eq(1)));
            expect_that!(
                got[0].provenance(),
                eq(&Provenance::new(DetectorKind::ClassBlocks).with_discriminator("card big"))
            );
            // The single-fragment spans are dropped, the paragraphs kept.
            expect_that!(got[0].shape(), eq((3, 3)));
        }

        #[gtest]
        fn needs_enough_dense_members() {
            let html = page(
                r#"<p class="x">a<br>b<br>c</p><p class="x">a<br>b<br>c</p><p class="x">a</p>"#,
            );
            expect_that!(detect(&ClassBlocks, &html), is_empty());
        }
    }

    mod dense_blocks {
        use super::*;

        #[gtest]
        fn groups_by_fragment_count() {
            let five = repeat_html(3, |i| {
                format!("<div><b>{i}</b> a <i>b</i> c <u>d</u></div>")
            });
            let six = repeat_html(2, |i| {
                format!("<div><b>{i}</b> a <i>b</i> c <u>d</u> e</div>")
            });
            let got = detect(&DenseBlocks, &page(&format!("{five}{six}")));
            assert_that!(got, len(eq(1)));
            expect_that!(got[0].shape(), eq((3, 5)));
            expect_that!(
                got[0].rows()[2],
                eq(&crate::table::Row::from(["2", "a", "b", "c", "d"]))
            );
        }

        #[gtest]
        fn ignores_sparse_divs() {
            let html = page(&repeat_html(4, |_| "<div>a<br>b<br>c<br>d</div>".to_string()));
            expect_that!(detect(&DenseBlocks, &html), is_empty());
        }
    }

    mod semantic_blocks {
        use super::*;

        #[gtest]
        fn groups_divs_by_subtree_shape() {
            let same = repeat_html(3, |i| {
                format!("<div><h3>item {i}</h3><p><b>{i}</b> units</p></div>")
            });
            let other = "<div><ul><li>x</li><li>y</li><li>z</li></ul></div>";
            let got = detect(&SemanticBlocks, &page(&format!("{same}{other}")));
            assert_that!(got, len(eq(1)));
            expect_that!(
                got[0].rows(),
                eq(&Table::from(grid(&[
                    &["item 0", "0", "units"],
                    &["item 1", "1", "units"],
                    &["item 2", "2", "units"],
                ])))
            );
        }
    }
}
