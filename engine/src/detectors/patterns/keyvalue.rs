//! Key/value pairs, regardless of the markup used to present them.

use hashbrown::HashSet;
use lazy_regex::{regex_captures, regex_is_match};
use scraper::{ElementRef, Node};

use crate::{
    EngineConfig,
    document::{Document, find_descendants, stripped_text},
    textutil::char_len,
};

/// Elements that commonly carry a "Label:" text.
const LABEL_ELEMENTS: &[&str] = &["strong", "b", "span", "label", "dt", "th"];
/// Elements whose whole text may read "Key: Value" or "Key - Value".
const LINE_ELEMENTS: &[&str] = &["p", "div", "li", "span"];
const MIN_LINE_LEN: usize = 4;
const MAX_LINE_LEN: usize = 200;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Collects unique pairs in the order they are first found. Each source of
/// pairs is scanned in turn:
/// 1. definition lists, `dt` and `dd` paired by position;
/// 2. table rows with at least two cells;
/// 3. short elements ending in `:` or `=` and the text that follows them;
/// 4. `div`s with exactly two children, one of which looks like a label;
/// 5. single-line "Key: Value" and "Key - Value" texts.
pub fn find_pairs(doc: &Document, cfg: &EngineConfig) -> Vec<KeyValue> {
    let mut pairs = Vec::new();
    definition_lists(doc, &mut pairs);
    table_rows(doc, &mut pairs);
    labelled_elements(doc, cfg, &mut pairs);
    two_child_divs(doc, cfg, &mut pairs);
    labelled_lines(doc, cfg, &mut pairs);

    let mut seen = HashSet::new();
    pairs.retain(|pair| seen.insert(pair.clone()));
    pairs
}

fn push_pair(pairs: &mut Vec<KeyValue>, key: &str, value: &str) {
    pairs.push(KeyValue {
        key: key.to_string(),
        value: value.to_string(),
    });
}

fn definition_lists(doc: &Document, pairs: &mut Vec<KeyValue>) {
    for dl in doc.elements_named(&["dl"]) {
        let dds: Vec<ElementRef> = find_descendants(dl, &["dd"]).collect();
        for (dt, dd) in find_descendants(dl, &["dt"]).zip(dds) {
            let key = stripped_text(dt);
            let value = stripped_text(dd);
            if !key.is_empty() && !value.is_empty() {
                push_pair(pairs, &key, &value);
            }
        }
    }
}

fn table_rows(doc: &Document, pairs: &mut Vec<KeyValue>) {
    for table in doc.elements_named(&["table"]) {
        for tr in find_descendants(table, &["tr"]) {
            let mut cells = find_descendants(tr, &["th", "td"]);
            let (Some(first), Some(second)) = (cells.next(), cells.next()) else {
                continue;
            };
            let key = stripped_text(first);
            let value = stripped_text(second);
            if !key.is_empty() && !value.is_empty() {
                push_pair(pairs, &key, &value);
            }
        }
    }
}

fn is_label(text: &str) -> bool {
    text.ends_with(':') || text.ends_with('=')
}

fn labelled_elements(doc: &Document, cfg: &EngineConfig, pairs: &mut Vec<KeyValue>) {
    for &name in LABEL_ELEMENTS {
        for tag in doc.elements_named(&[name]) {
            let text = stripped_text(tag);
            if text.is_empty() || char_len(&text) > cfg.max_label_len || !is_label(&text) {
                continue;
            }
            let key = text.trim_end_matches([':', '=']);

            if let Some(sibling) = tag.next_siblings().find_map(ElementRef::wrap) {
                let value = stripped_text(sibling);
                if !value.is_empty() && !is_label(&value) {
                    push_pair(pairs, key, &value);
                }
            } else if let Some(Node::Text(next)) = tag.next_sibling().map(|n| n.value()) {
                let value = next.trim();
                if !value.is_empty() {
                    push_pair(pairs, key, value);
                }
            } else if let Some(after_parent) = tag.parent().and_then(|p| p.next_sibling()) {
                let value = match after_parent.value() {
                    Node::Text(text) => text.trim().to_string(),
                    Node::Element(_) => ElementRef::wrap(after_parent)
                        .map(stripped_text)
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                if !value.is_empty() && !is_label(&value) {
                    push_pair(pairs, key, &value);
                }
            }
        }
    }
}

/// Text of a child node, or `None` for nodes that carry no text of their own
/// (comments, blank text).
fn child_text(node: &Node, el: Option<ElementRef<'_>>) -> Option<String> {
    match node {
        Node::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Node::Element(_) => el.map(stripped_text),
        _ => None,
    }
}

fn two_child_divs(doc: &Document, cfg: &EngineConfig, pairs: &mut Vec<KeyValue>) {
    for div in doc.elements_named(&["div"]) {
        let texts: Vec<String> = div
            .children()
            .filter_map(|child| child_text(child.value(), ElementRef::wrap(child)))
            .collect();
        let [first, second] = texts.as_slice() else {
            continue;
        };
        if first.is_empty() || second.is_empty() {
            continue;
        }

        if char_len(first) < cfg.max_label_len && first.ends_with(':') {
            push_pair(pairs, first.trim_end_matches(':'), second);
        } else if regex_is_match!(r"\d", second) || regex_is_match!(r"(kr|m²|kvm|sqft|\$|€)", second)
        {
            push_pair(pairs, first, second);
        }
    }
}

fn labelled_lines(doc: &Document, cfg: &EngineConfig, pairs: &mut Vec<KeyValue>) {
    for el in doc.elements_named(LINE_ELEMENTS) {
        let text = stripped_text(el);
        let len = char_len(&text);
        if !(MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len) {
            continue;
        }

        let colon = regex_captures!(r"^([^:]+):\s*(.*?)(?:\s*\||$)", &text);
        let dash = regex_captures!(r"^([^-]+)\s*-\s*(.*?)(?:\s*\||$)", &text);
        for (_, key, value) in [colon, dash].into_iter().flatten() {
            let key = key.trim();
            let value = value.trim();
            if !key.is_empty() && !value.is_empty() && char_len(key) < cfg.max_label_len {
                push_pair(pairs, key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use testutils::page;

    use super::*;

    fn pairs(body: &str) -> Vec<(String, String)> {
        let doc = Document::parse(&page(body)).expect("parses");
        find_pairs(&doc, &EngineConfig::default())
            .into_iter()
            .map(|kv| (kv.key, kv.value))
            .collect()
    }

    fn kv(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[gtest]
    fn definition_list_pairs_by_position() {
        let got = pairs(
            "<dl><dt>Boligtype</dt><dd>Leilighet</dd><dt>Rom</dt><dd>3</dd><dt>Orphan</dt></dl>",
        );
        expect_that!(
            got,
            elements_are![eq(&kv("Boligtype", "Leilighet")), eq(&kv("Rom", "3"))]
        );
    }

    #[gtest]
    fn two_cell_table_rows() {
        let got = pairs(
            "<table><tr><th>Areal</th><td>54 m²</td></tr><tr><td>lonely</td></tr></table>",
        );
        expect_that!(got, elements_are![eq(&kv("Areal", "54 m²"))]);
    }

    #[gtest]
    fn label_followed_by_sibling_or_text() {
        let got = pairs(
            "<section><strong>Byggeår:</strong><em>1999</em></section>\
             <section><label>Etasje=</label> 4 </section>",
        );
        expect_that!(
            got,
            elements_are![eq(&kv("Byggeår", "1999")), eq(&kv("Etasje", "4"))]
        );
    }

    #[gtest]
    fn label_value_after_parent() {
        let got = pairs("<section><h4><b>Eierform:</b></h4><i>Selveier</i></section>");
        expect_that!(got, elements_are![eq(&kv("Eierform", "Selveier"))]);
    }

    #[gtest]
    fn label_followed_by_another_label_is_skipped() {
        let got = pairs("<section><b>First:</b><i>Second:</i></section>");
        expect_that!(got, is_empty());
    }

    #[gtest]
    fn two_child_div_with_label_or_numeric_value() {
        let got = pairs(
            "<div><em>Tomt:</em><em>Eiet</em></div>\
             <div><em>Soverom</em><em>2</em></div>\
             <div><em>Plain</em><em>words</em></div>",
        );
        expect_that!(
            got,
            elements_are![eq(&kv("Tomt", "Eiet")), eq(&kv("Soverom", "2"))]
        );
    }

    #[gtest]
    fn single_line_patterns_and_dedup() {
        let got = pairs("<p>Energimerking: C | oppvarming</p><p>Energimerking: C</p><li>Tomt - Eiet</li>");
        expect_that!(
            got,
            elements_are![eq(&kv("Energimerking", "C")), eq(&kv("Tomt", "Eiet"))]
        );
    }
}
