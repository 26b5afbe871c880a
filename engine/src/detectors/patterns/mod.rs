//! Tables built from what the text says rather than how it is laid out:
//! typed values found by regular expressions, and key/value pairs.

pub mod catalog;
mod keyvalue;

use hashbrown::HashSet;
use log::warn;

pub use catalog::{PatternCatalog, PatternCategory};
pub use keyvalue::{KeyValue, find_pairs};

use super::{Detector, DetectorKind};
use crate::{EngineConfig, Provenance, Result, TableCandidate, document::Document};

const MATCH_COLUMNS: [&str; 3] = ["value", "context", "parent_tag"];
const CONTEXT_WORDS_BEFORE: usize = 5;
const CONTEXT_WORDS_AFTER: usize = 3;
const KEY_VALUE_DISCRIMINATOR: &str = "key_value_pairs";

/// One typed value found in a text node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatternMatch {
    pub value: String,
    /// A few words around the value, split by `|`.
    pub context: String,
    /// Tag of the element holding the text node.
    pub parent_tag: String,
}

impl From<PatternMatch> for Vec<String> {
    fn from(m: PatternMatch) -> Self {
        vec![m.value, m.context, m.parent_tag]
    }
}

/// Emits one table per pattern category with enough unique matches, then one
/// table of key/value pairs.
#[derive(Debug)]
pub struct Patterns {
    catalog: PatternCatalog,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog: PatternCatalog::compile()?,
        })
    }

    /// Unique matches of one category, in document order.
    pub fn matches(&self, doc: &Document, category: PatternCategory) -> Vec<PatternMatch> {
        let Some(family) = self
            .catalog
            .families()
            .iter()
            .find(|family| family.category == category)
        else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for node in doc.text_nodes() {
            for regex in &family.patterns {
                for caps in regex.captures_iter(node.text) {
                    let caps = match caps {
                        Ok(caps) => caps,
                        Err(err) => {
                            warn!("{category} pattern {:?} failed: {err}", regex.as_str());
                            break;
                        }
                    };
                    let groups: Vec<&str> = caps
                        .iter()
                        .skip(1)
                        .map(|group| group.map_or("", |m| m.as_str()))
                        .collect();
                    let (matched, context) = match groups.as_slice() {
                        [] => {
                            let whole = caps.get(0).map_or("", |m| m.as_str());
                            (whole.to_string(), context_of(node.text, whole))
                        }
                        [single] => (single.to_string(), context_of(node.text, single)),
                        [low, high, ..] if category == PatternCategory::Prices => {
                            let range = format!("{low} - {high}");
                            let context = context_of(node.text, &range);
                            (range, context)
                        }
                        [first, ..] => (first.to_string(), context_of(node.text, first)),
                    };
                    if groups.len() <= 1 && is_single_digit(&matched) {
                        continue;
                    }
                    found.push(PatternMatch {
                        value: matched.trim().to_string(),
                        context,
                        parent_tag: node.parent.value().name().to_string(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        found.retain(|m| seen.insert(m.value.clone()));
        found
    }
}

fn is_single_digit(s: &str) -> bool {
    let s = s.trim();
    s.len() == 1 && s.chars().all(|c| c.is_ascii_digit())
}

/// Words around the first occurrence of `needle` in `text`, or nothing when
/// `needle` does not occur verbatim.
fn context_of(text: &str, needle: &str) -> String {
    let Some(pos) = text.find(needle) else {
        return String::new();
    };
    let before: Vec<&str> = text[..pos].split_whitespace().collect();
    let before = &before[before.len().saturating_sub(CONTEXT_WORDS_BEFORE)..];
    let after = text[pos + needle.len()..]
        .split_whitespace()
        .take(CONTEXT_WORDS_AFTER);

    before
        .iter()
        .copied()
        .chain(std::iter::once("|"))
        .chain(after)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Detector for Patterns {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Patterns
    }

    fn detect(&self, doc: &Document, cfg: &EngineConfig) -> Vec<TableCandidate> {
        let columns = || Some(MATCH_COLUMNS.map(String::from).to_vec());

        let mut candidates: Vec<TableCandidate> = self
            .catalog
            .families()
            .iter()
            .filter_map(|family| {
                let matches = self.matches(doc, family.category);
                if matches.len() < cfg.min_pattern_matches {
                    return None;
                }
                let rows: Vec<Vec<String>> = matches.into_iter().map(Vec::from).collect();
                TableCandidate::new(
                    rows,
                    columns(),
                    Provenance::new(self.kind()).with_discriminator(family.category.to_string()),
                )
            })
            .collect();

        let pairs = find_pairs(doc, cfg);
        if pairs.len() >= cfg.min_key_value_pairs {
            let rows: Vec<Vec<String>> = pairs
                .into_iter()
                .map(|KeyValue { key, value }| vec![key, value])
                .collect();
            candidates.extend(TableCandidate::new(
                rows,
                Some(vec!["key".to_string(), "value".to_string()]),
                Provenance::new(self.kind()).with_discriminator(KEY_VALUE_DISCRIMINATOR),
            ));
        }
        candidates
    }
}
