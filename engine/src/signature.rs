//! Structural signatures: keys summarising an element's shape, independent of
//! its text, used to group "same-shaped" elements.

use scraper::ElementRef;

use crate::document::{child_elements, tag_name};

/// Ordered tag names of an element's direct element children.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ShallowSignature<'a>(pub Vec<&'a str>);

impl ShallowSignature<'_> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn shallow_signature(el: ElementRef<'_>) -> ShallowSignature<'_> {
    ShallowSignature(child_elements(el).map(tag_name).collect())
}

/// Digest of the pre-order tag names of an element's subtree, visited to a
/// bounded depth.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DeepSignature(pub [u8; 16]);

impl std::fmt::Display for DeepSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Computes the [DeepSignature] of `el`. `max_depth` counts `el` itself as
/// the first level; a depth of zero hashes an empty sequence.
pub fn deep_signature(el: ElementRef<'_>, max_depth: usize) -> DeepSignature {
    let mut names: Vec<&str> = Vec::new();
    collect_names(el, max_depth, &mut names);
    DeepSignature(md5::compute(names.join(">")).0)
}

fn collect_names<'a>(el: ElementRef<'a>, depth: usize, names: &mut Vec<&'a str>) {
    if depth == 0 {
        return;
    }
    names.push(tag_name(el));
    for child in child_elements(el) {
        collect_names(child, depth - 1, names);
    }
}
