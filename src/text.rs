//! Free-text normalization shared by the classifiers.

use itertools::Itertools;

/// Replaces every occurrence of each listed character with `with`.
pub fn replace_chars(text: &str, chars: &[String], with: &str) -> String {
    chars
        .iter()
        .fold(text.to_string(), |acc, c| acc.replace(c.as_str(), with))
}

/// Maps every character outside `[A-Za-z0-9]` to a single space.
pub fn alphanumeric_only(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Lowercases and blanks out boilerplate phrases. Longer phrases must precede their
/// prefixes in `phrases`.
pub fn remove_fluff(text: &str, phrases: &[String]) -> String {
    phrases
        .iter()
        .fold(text.to_lowercase(), |acc, p| acc.replace(p.as_str(), " "))
}

/// Drops whole-word stopwords and collapses whitespace.
pub fn remove_stopwords(text: &str, stopwords: &[String]) -> String {
    text.split_whitespace()
        .filter(|w| !stopwords.iter().any(|s| s == w))
        .join(" ")
}

/// Lowercase ASCII words without stopwords, single-spaced. Stage-one descriptions are
/// stored in this form, so keyword lists are compared in it too.
pub fn comparable_form(text: &str, stopwords: &[String]) -> String {
    remove_stopwords(&alphanumeric_only(&text.to_lowercase()), stopwords)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
