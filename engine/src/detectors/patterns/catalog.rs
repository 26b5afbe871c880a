//! The fixed catalog of typed value patterns.
//!
//! Several patterns rely on look-around, so the catalog is compiled with
//! [fancy_regex] once, when the detector is built, and only read afterwards.

use fancy_regex::Regex;

use crate::{Error, Result};

/// Category of a typed value pattern. Its name doubles as the candidate
/// discriminator.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum PatternCategory {
    Prices,
    Areas,
    Dates,
    PhoneNumbers,
    PostalCodes,
}

const PRICES: &[&str] = &[
    // Amount, then currency.
    r"(\d[\d\s]*[.,]?\d*)\s*(?:kr|€|£|\$|USD|EUR|NOK|SEK|DKK)",
    // Currency, then amount.
    r"(?:kr|€|£|\$|USD|EUR|NOK|SEK|DKK)\s*(\d[\d\s]*[.,]?\d*)",
    // Labelled.
    r"(?:pris|price|cost|total)(?:\w*)\s*(?:\:|\-|\.|\s)\s*(\d[\d\s]*[.,]?\d*)",
    r"(?:Prisantydning|Totalpris|Fellesutgifter|Fellesutg\.|Omkostninger|Omkost\.)\s*(?:\:|\-|\.|\s)?\s*(\d[\d\s]*[.,]?\d*)",
    // Ranges.
    r"(\d[\d\s]*[.,]?\d*)\s*(?:-|–|to|til)\s*(\d[\d\s]*[.,]?\d*)\s*(?:kr|€|£|\$|USD|EUR|NOK|SEK|DKK)",
    // Large grouped numbers: space, comma and dot separated.
    r"(?<!\w)(\d{1,3}(?:\s*\d{3})+)(?!\w)",
    r"(?<!\w)(\d{1,3}(?:,\d{3})+)(?!\w)",
    r"(?<!\w)(\d{1,3}(?:\.\d{3})+)(?:,\d+)?(?!\w)",
];

const AREAS: &[&str] = &[
    r"(\d+[\d\s]*[.,]?\d*)\s*(?:m²|kvm|m2|sq\.ft|sqft)",
    r"(\d+[\d\s]*[.,]?\d*)\s*(?:kvadratmeter|square\s+meters?)",
    r"(?:areal|area|størrelse|size)\s*(?:\:|\-|\.|\s)?\s*(\d+[\d\s]*[.,]?\d*)\s*(?:m²|kvm|m2)",
];

const DATES: &[&str] = &[
    r"\d{1,2}\.\d{1,2}\.\d{2,4}",
    r"\d{1,2}/\d{1,2}/\d{2,4}",
    r"\d{4}-\d{1,2}-\d{1,2}",
    r"(?:mandag|tirsdag|onsdag|torsdag|fredag|lørdag|søndag)\s+\d{1,2}\.\s+\w+",
];

const PHONE_NUMBERS: &[&str] = &[
    r"(?:\+\d{1,3}\s?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}",
    // Norwegian, 8 digits.
    r"(?:\+\d{1,3}\s?)?\d{8}",
];

const POSTAL_CODES: &[&str] = &[r"\b\d{4,5}\b\s+\w+", r"\b\w+\s+\d{4,5}\b"];

impl PatternCategory {
    /// Pattern sources of this category, in matching order.
    pub fn sources(self) -> &'static [&'static str] {
        use PatternCategory::*;
        match self {
            Prices => PRICES,
            Areas => AREAS,
            Dates => DATES,
            PhoneNumbers => PHONE_NUMBERS,
            PostalCodes => POSTAL_CODES,
        }
    }
}

/// Whether `s` mentions a currency the price patterns know.
pub fn mentions_currency(s: &str) -> bool {
    lazy_regex::regex_is_match!(r"(?i)(?:kr|€|£|\$|usd|eur|nok|sek|dkk)", s)
}

/// One category's compiled patterns.
#[derive(Debug)]
pub struct PatternFamily {
    pub category: PatternCategory,
    pub patterns: Vec<Regex>,
}

/// All categories, compiled, in catalog order.
#[derive(Debug)]
pub struct PatternCatalog {
    families: Vec<PatternFamily>,
}

impl PatternCatalog {
    pub fn compile() -> Result<Self> {
        use strum::IntoEnumIterator;

        let families = PatternCategory::iter()
            .map(|category| {
                let patterns = category
                    .sources()
                    .iter()
                    .map(|&pattern| {
                        Regex::new(pattern).map_err(|source| Error::Pattern {
                            category,
                            pattern,
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(PatternFamily { category, patterns })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { families })
    }

    pub fn families(&self) -> &[PatternFamily] {
        &self.families
    }
}
