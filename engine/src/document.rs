//! Read-only view over a parsed HTML document.
//!
//! Wraps a [scraper::Html] tree and exposes the handful of accessors the
//! detectors need: document-order element iteration, direct element children,
//! and the text fragments beneath an element. Nothing here mutates the tree.

use scraper::{ElementRef, Html};

use crate::{Error, Result};

/// Elements whose text content is never treated as page text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// A fully materialised HTML document.
pub struct Document {
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements().count())
            .finish()
    }
}

impl Document {
    /// Parses `source` as an HTML document. Whitespace-only input is rejected
    /// as there is no document to mine.
    pub fn parse(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Err(Error::EmptyDocument);
        }
        Ok(Self {
            html: Html::parse_document(source),
        })
    }

    /// All elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    /// All elements whose tag name is one of `names`, in document order.
    pub fn elements_named<'a>(
        &'a self,
        names: &'a [&'a str],
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements()
            .filter(move |el| names.contains(&el.value().name()))
    }

    /// Every non-blank text node in the document, in document order.
    pub fn text_nodes(&self) -> impl Iterator<Item = TextNode<'_>> {
        self.html.tree.root().descendants().filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent().and_then(ElementRef::wrap)?;
            if is_raw_text(parent) {
                return None;
            }
            let text: &str = text;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(TextNode {
                text: trimmed,
                parent,
            })
        })
    }
}

/// A non-blank text node together with the element that contains it.
#[derive(Clone, Copy, Debug)]
pub struct TextNode<'a> {
    /// Text with surrounding whitespace removed.
    pub text: &'a str,
    pub parent: ElementRef<'a>,
}

pub fn tag_name<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// Direct children that are elements.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// First descendant element (excluding `el` itself) named `name`.
pub fn find_descendant<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|d| d.value().name() == name)
}

/// All descendant elements (excluding `el` itself) named one of `names`.
pub fn find_descendants<'a>(
    el: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |d| names.contains(&d.value().name()))
}

/// Raw text fragments beneath `el`, including whitespace-only ones.
pub fn strings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    el.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let parent = node.parent().and_then(ElementRef::wrap)?;
        if is_raw_text(parent) {
            return None;
        }
        let text: &'a str = text;
        Some(text)
    })
}

/// Trimmed, non-empty text fragments beneath `el`.
pub fn stripped_strings<'a>(el: ElementRef<'a>) -> Vec<&'a str> {
    strings(el)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Owned variant of [stripped_strings], convenient for building rows.
pub fn fragments(el: ElementRef<'_>) -> Vec<String> {
    strings(el)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Concatenation of all text beneath `el`, untouched.
pub fn raw_text(el: ElementRef<'_>) -> String {
    strings(el).collect()
}

/// Trimmed fragments beneath `el` joined with `sep`.
pub fn joined_text(el: ElementRef<'_>, sep: &str) -> String {
    stripped_strings(el).join(sep)
}

/// Trimmed fragments beneath `el` joined without separator.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    joined_text(el, "")
}

/// The class attribute's tokens joined by single spaces, if there are any.
pub fn class_value(el: ElementRef<'_>) -> Option<String> {
    let tokens: Vec<&str> = el.value().attr("class")?.split_whitespace().collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

fn is_raw_text(el: ElementRef<'_>) -> bool {
    RAW_TEXT_ELEMENTS.contains(&el.value().name())
}
