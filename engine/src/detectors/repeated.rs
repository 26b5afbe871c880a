//! Sibling elements sharing the same child tag sequence.

use scraper::ElementRef;

use super::{Detector, DetectorKind};
use crate::{
    EngineConfig, Provenance, TableCandidate,
    document::{Document, child_elements, find_descendant, stripped_text},
    grouping::FirstSeenGroups,
    signature::{ShallowSignature, shallow_signature},
};

/// For every element, groups its children by their [ShallowSignature]. A
/// signature shared by enough children becomes a table: its tags are the
/// columns, and each child contributes the text of its first descendant
/// carrying each tag.
pub struct RepeatedStructure;

impl Detector for RepeatedStructure {
    fn kind(&self) -> DetectorKind {
        DetectorKind::RepeatedStructure
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let mut candidates = Vec::new();
        for parent in doc.elements() {
            let groups: FirstSeenGroups<ShallowSignature, ElementRef> = child_elements(parent)
                .map(|child| (shallow_signature(child), child))
                .collect();

            for (signature, members) in groups.into_groups_of_at_least(cfg.min_repeats) {
                if signature.is_empty() {
                    continue;
                }
                let rows: Vec<Vec<String>> = members
                    .into_iter()
                    .map(|member| row_for(member, &signature))
                    .collect();
                let columns = signature.0.iter().map(|tag| tag.to_string()).collect();
                candidates.extend(TableCandidate::new(
                    rows,
                    Some(columns),
                    Provenance::new(self.kind()),
                ));
            }
        }
        candidates
    }
}

fn row_for(member: ElementRef<'_>, signature: &ShallowSignature<'_>) -> Vec<String> {
    signature
        .0
        .iter()
        .map(|tag| {
            find_descendant(member, tag)
                .map(stripped_text)
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use testutils::{page, repeat_html};

    use super::*;
    use crate::table::Table;

    fn detect(html: &str) -> Vec<TableCandidate> {
        let doc = Document::parse(html).expect("parses");
        RepeatedStructure.detect(&doc, &EngineConfig::default())
    }

    #[gtest]
    fn one_table_per_repeated_list() {
        let items = repeat_html(4, |i| format!("<li><span>name {i}</span><b>{i}0</b></li>"));
        let got = detect(&page(&format!("<ul>{items}</ul>")));

        assert_that!(got, len(eq(1)));
        let cand = &got[0];
        expect_that!(cand.shape(), eq((4, 2)));
        expect_that!(cand.columns(), some(elements_are![eq("span"), eq("b")]));
        expect_that!(
            cand.rows(),
            eq(&Table::from([
                ["name 0", "00"],
                ["name 1", "10"],
                ["name 2", "20"],
                ["name 3", "30"],
            ]))
        );
    }

    #[gtest]
    fn takes_first_descendant_in_document_order() {
        let html = page(
            "<div>\
             <p><i><a>x1</a></i><a>ignored</a></p>\
             <p><i>no link</i><a>x2</a></p>\
             <p><i></i><a>x3</a></p>\
             </div>",
        );
        let got = detect(&html);
        assert_that!(got, len(eq(1)));
        expect_that!(
            got[0].rows(),
            eq(&Table::from([
                ["x1", "x1"],
                ["no link", "x2"],
                ["", "x3"],
            ]))
        );
    }

    #[gtest]
    fn ignores_too_few_repeats_and_leaf_children() {
        let html = page(
            "<ul><li><span>a</span></li><li><span>b</span></li></ul>\
             <div><span>1</span><span>2</span><span>3</span></div>",
        );
        expect_that!(detect(&html), is_empty());
    }
}
