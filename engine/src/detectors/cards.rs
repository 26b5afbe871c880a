//! Listing cards: repeated blocks whose lines read as a location, a title and
//! a price.

use lazy_regex::regex_is_match;
use scraper::ElementRef;

use super::{Detector, DetectorKind, patterns::catalog::mentions_currency};
use crate::{
    EngineConfig, Provenance, TableCandidate,
    document::{Document, child_elements, joined_text, stripped_text, tag_name},
    grouping::most_common,
};

const CONTAINERS: &[&str] = &["div", "section"];
const PRICE: &str = "price";

/// Labels the lines of each card and lines the cards up by label. Containers
/// without a single priced card are left alone.
pub struct Cards;

impl Detector for Cards {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Cards
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        doc.elements_named(CONTAINERS)
            .filter_map(|container| self.container_candidate(container, cfg))
            .collect()
    }
}

impl Cards {
    fn container_candidate(
        &self,
        container: ElementRef<'_>,
        cfg: &EngineConfig,
    ) -> Option<TableCandidate> {
        let children: Vec<ElementRef> = child_elements(container).collect();
        if children.len() < cfg.min_repeats {
            return None;
        }
        let (card_tag, count) = most_common(children.iter().map(|child| tag_name(*child)))?;
        if count < cfg.min_repeats {
            return None;
        }

        let cards: Vec<Vec<(String, String)>> = children
            .into_iter()
            .filter(|child| tag_name(*child) == card_tag && !stripped_text(*child).is_empty())
            .map(card_fields)
            .collect();
        if !cards.iter().flatten().any(|(label, _)| label == PRICE) {
            return None;
        }

        let mut labels: Vec<String> = Vec::new();
        for (label, _) in cards.iter().flatten() {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        let rows: Vec<Vec<String>> = cards
            .iter()
            .map(|fields| {
                labels
                    .iter()
                    .map(|label| {
                        fields
                            .iter()
                            .find(|(l, _)| l == label)
                            .map(|(_, value)| value.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        TableCandidate::new(rows, Some(labels), Provenance::new(self.kind()))
    }
}

/// Labelled lines of one card. A later line with the same label replaces the
/// earlier value in place.
fn card_fields(card: ElementRef<'_>) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let text = joined_text(card, "\n");
    for (idx, line) in text.split('\n').enumerate() {
        let label = if mentions_currency(line) {
            if regex_is_match!(r"(?i)total", line) {
                "total_price".to_string()
            } else {
                PRICE.to_string()
            }
        } else {
            match idx {
                0 => "location".to_string(),
                1 => "title".to_string(),
                _ => format!("text_{idx}"),
            }
        };
        match fields.iter_mut().find(|(l, _)| *l == label) {
            Some((_, value)) => *value = line.to_string(),
            None => fields.push((label, line.to_string())),
        }
    }
    fields
}
