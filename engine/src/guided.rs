//! Extraction guided by example values the caller wants to find, such as a
//! few prices copied from the rendered page.

use fancy_regex::Regex;
use log::{debug, warn};
use scraper::ElementRef;

use crate::{
    DetectorKind, Error, Provenance, Result, TableCandidate,
    document::{Document, TextNode, joined_text, tag_name},
    textutil::digits_only,
};

/// Suggested pattern for prices like "3 700 000 kr", with regular or
/// non-breaking spaces.
pub const PRICE_REGEX: &str = r"\d+[\s\xa0]*\d{3}[\s\xa0]*\d{3}[\s\xa0]*kr";

const ROW_CONTAINERS: &[&str] = &["article", "div", "li"];
const MAX_CLIMB: usize = 5;
const NBSP: char = '\u{a0}';
const DISCRIMINATOR: &str = "examples";

#[derive(Debug)]
pub struct GuidedExtraction {
    /// One row per matched text node, one column per example. `None` when no
    /// example was found in the document.
    pub candidate: Option<TableCandidate>,
    /// A pattern that finds values shaped like the examples.
    pub suggested_regex: String,
}

/// Finds the text nodes holding each example and reports, for the block
/// around each of them, which examples it contains.
///
/// Examples may be written with `&nbsp;` entities in place of spaces.
pub fn extract_by_examples<S: AsRef<str>>(
    doc: &Document,
    examples: &[S],
) -> Result<GuidedExtraction> {
    if examples.is_empty() {
        return Err(Error::NoExamples);
    }
    let examples: Vec<Example> = examples.iter().map(|e| Example::new(e.as_ref())).collect();

    let mut matches: Vec<TextNode> = Vec::new();
    for example in &examples {
        matches.extend(example.find_in(doc));
    }
    if matches.is_empty() {
        debug!("no example found verbatim, comparing digits only");
        for example in &examples {
            matches.extend(
                doc.text_nodes()
                    .filter(|node| digits_only(node.text) == example.digits),
            );
        }
    }

    let rows: Vec<Vec<String>> = matches
        .iter()
        .filter_map(|node| row_container(node.parent))
        .map(|container| {
            let context = joined_text(container, " ").replace(NBSP, " ");
            let context_digits = digits_only(&context);
            examples
                .iter()
                .map(|example| {
                    if context.contains(&example.clean) || context_digits.contains(&example.digits)
                    {
                        example.clean.clone()
                    } else {
                        String::new()
                    }
                })
                .collect()
        })
        .collect();

    let columns = examples.iter().map(|e| e.raw.clone()).collect();
    Ok(GuidedExtraction {
        candidate: TableCandidate::new(
            rows,
            Some(columns),
            Provenance::new(DetectorKind::Guided).with_discriminator(DISCRIMINATOR),
        ),
        suggested_regex: PRICE_REGEX.to_string(),
    })
}

struct Example {
    raw: String,
    clean: String,
    digits: String,
    /// Matches `clean` with any run of spaces standing for any whitespace.
    spaced: Option<Regex>,
}

impl Example {
    fn new(raw: &str) -> Self {
        let clean = raw.replace("&nbsp;", " ");
        let pattern = clean
            .split(' ')
            .map(fancy_regex::escape)
            .collect::<Vec<_>>()
            .join(r"[\s\xa0]+");
        let spaced = Regex::new(&pattern)
            .inspect_err(|err| warn!("example {raw:?} has no whitespace-tolerant form: {err}"))
            .ok();
        Self {
            raw: raw.to_string(),
            digits: digits_only(&clean),
            clean,
            spaced,
        }
    }

    /// Text nodes containing the example verbatim, or failing that, up to
    /// whitespace.
    fn find_in<'a>(&self, doc: &'a Document) -> Vec<TextNode<'a>> {
        let verbatim: Vec<TextNode> = doc
            .text_nodes()
            .filter(|node| node.text.replace(NBSP, " ").contains(&self.clean))
            .collect();
        if !verbatim.is_empty() {
            return verbatim;
        }
        let Some(spaced) = &self.spaced else {
            return Vec::new();
        };
        doc.text_nodes()
            .filter(|node| {
                spaced
                    .is_match(&node.text.replace(NBSP, " "))
                    .unwrap_or_else(|err| {
                        warn!("matching example {:?}: {err}", self.raw);
                        false
                    })
            })
            .collect()
    }
}

/// The nearest row-like block within a few levels above `parent`, else the
/// highest element reached.
fn row_container(parent: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let climbed: Vec<ElementRef> = std::iter::once(parent)
        .chain(parent.ancestors().filter_map(ElementRef::wrap))
        .take(MAX_CLIMB)
        .collect();
    climbed
        .iter()
        .find(|el| ROW_CONTAINERS.contains(&tag_name(**el)))
        .or(climbed.last())
        .copied()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use testutils::{page, repeat_html};

    use super::*;
    use crate::table::Row;

    fn listing() -> Document {
        let items = repeat_html(3, |i| {
            format!("<li><h3>Flat {i}</h3><p><span>{i}&nbsp;700&nbsp;000&nbsp;kr</span></p></li>")
        });
        Document::parse(&page(&format!("<ul>{items}</ul>"))).expect("parses")
    }

    #[gtest]
    fn no_examples_is_an_error() {
        let got = extract_by_examples::<&str>(&listing(), &[]);
        expect_that!(matches!(got, Err(Error::NoExamples)), eq(true));
    }

    #[gtest]
    fn finds_examples_written_with_entities() -> googletest::Result<()> {
        let got = extract_by_examples(
            &listing(),
            &["1&nbsp;700&nbsp;000&nbsp;kr", "2&nbsp;700&nbsp;000&nbsp;kr"],
        )?;
        expect_that!(got.suggested_regex, eq(PRICE_REGEX));

        let cand = got.candidate.expect("examples found");
        expect_that!(
            cand.provenance(),
            eq(&Provenance::new(DetectorKind::Guided).with_discriminator("examples"))
        );
        expect_that!(
            cand.columns(),
            some(elements_are![
                eq("1&nbsp;700&nbsp;000&nbsp;kr"),
                eq("2&nbsp;700&nbsp;000&nbsp;kr"),
            ])
        );
        expect_that!(cand.shape(), eq((2, 2)));
        expect_that!(cand.rows()[0], eq(&Row::from(["1 700 000 kr", ""])));
        expect_that!(cand.rows()[1], eq(&Row::from(["", "2 700 000 kr"])));
        Ok(())
    }

    #[gtest]
    fn falls_back_to_digits() -> googletest::Result<()> {
        let got = extract_by_examples(&listing(), &["0.700.000 NOK"])?;
        let cand = got.candidate.expect("digits found");
        expect_that!(cand.shape(), eq((1, 1)));
        expect_that!(cand.rows()[0], eq(&Row::from(["0.700.000 NOK"])));
        Ok(())
    }

    #[gtest]
    fn whitespace_tolerant_match() -> googletest::Result<()> {
        let doc = Document::parse(&page("<div><b>Pris</b><i>3  700\t000 kr</i></div>"))?;
        let got = extract_by_examples(&doc, &["3 700 000 kr"])?;
        let cand = got.candidate.expect("found up to whitespace");
        expect_that!(cand.rows()[0], eq(&Row::from(["3 700 000 kr"])));
        Ok(())
    }

    #[gtest]
    fn nothing_found_gives_no_candidate() -> googletest::Result<()> {
        let got = extract_by_examples(&listing(), &["9 999 kr"])?;
        expect_that!(got.candidate, none());
        Ok(())
    }
}
