use crate::lexicon::Lexicon;
use crate::text::{alphanumeric_only, replace_chars};

/// Strips special characters; a blank result is missing.
pub fn clean_industries(raw: Option<&str>, lexicon: &Lexicon) -> Option<String> {
    let cleaned = replace_chars(raw?, &lexicon.special_chars, "");
    if cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Leftmost category mentioned in the industries text.
pub fn industry_category(industries: &str, lexicon: &Lexicon) -> Option<String> {
    lexicon
        .industry_re
        .find(industries)
        .map(|m| m.as_str().to_string())
}

pub fn normalize_industries(industries: &str) -> String {
    alphanumeric_only(industries)
}
