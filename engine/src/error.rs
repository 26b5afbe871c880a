use crate::detectors::patterns::PatternCategory;

/// Errors reported to callers of the engine. Detectors themselves never fail;
/// these cover unusable input and broken construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("document is empty")]
    EmptyDocument,
    #[error("compiling {category} pattern {pattern:?}")]
    Pattern {
        category: PatternCategory,
        pattern: &'static str,
        #[source]
        source: fancy_regex::Error,
    },
    #[error("no examples given to guide extraction")]
    NoExamples,
}

pub type Result<T> = std::result::Result<T, Error>;
