//! Small text predicates shared by the detectors.

use lazy_regex::regex_is_match;

/// Whether `s` looks like a number: optional sign, digits with optional
/// grouping separators, optional trailing `%`.
pub fn is_numeric_token(s: &str) -> bool {
    regex_is_match!(r"^\s*[+-]?\d+[\d.,\s]*\s*%?\s*$", s)
}

/// Only the digits of `s`.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Whether every cell converts to a number. Blank cells count as missing
/// values rather than failures.
pub fn is_numeric_convertible<'a, I>(cells: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().all(|cell| {
        let cell = cell.trim();
        cell.is_empty() || cell.parse::<f64>().is_ok()
    })
}

/// Whether `count` out of `total` reaches `ratio`. An empty population never
/// does.
pub fn meets_ratio(count: usize, total: usize, ratio: f64) -> bool {
    total > 0 && count as f64 >= ratio * total as f64
}

/// Number of characters, as opposed to bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
