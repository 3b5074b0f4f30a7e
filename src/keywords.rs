//! Keyword-presence extractors. Each one scans text against a small dictionary from
//! the lexicon and returns the best match or every match. Text and keywords are both
//! compared in [`comparable_form`], so raw postings and stored stage-one descriptions
//! give the same answer.

use itertools::Itertools;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::lexicon::{KeywordGroup, Lexicon};
use crate::region::REMOTE;
use crate::text::comparable_form;

pub const NOT_SPECIFIED: &str = "Not Specified";
pub const UNKNOWN_SIZE: &str = "Unknown";

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

/// Label of the first group with a keyword present.
pub fn first_matching_label<'a>(text: &str, groups: &'a [KeywordGroup]) -> Option<&'a str> {
    groups
        .iter()
        .find(|g| contains_any(text, &g.keywords))
        .map(|g| g.label.as_str())
}

/// Comma-joined labels of every group with a keyword present.
pub fn matching_labels(text: &str, groups: &[KeywordGroup]) -> Option<String> {
    let labels = groups
        .iter()
        .filter(|g| contains_any(text, &g.keywords))
        .map(|g| g.label.as_str())
        .join(", ");
    if labels.is_empty() {
        None
    } else {
        Some(labels)
    }
}

pub fn extract_job_type<'a>(description: Option<&str>, lexicon: &'a Lexicon) -> Option<&'a str> {
    let text = comparable_form(description?, &lexicon.stopwords);
    Some(first_matching_label(&text, &lexicon.job_types).unwrap_or(NOT_SPECIFIED))
}

pub fn extract_company_size<'a>(description: Option<&str>, lexicon: &'a Lexicon) -> Option<&'a str> {
    let text = comparable_form(description?, &lexicon.stopwords);
    Some(first_matching_label(&text, &lexicon.company_sizes).unwrap_or(UNKNOWN_SIZE))
}

pub fn extract_benefits(description: Option<&str>, lexicon: &Lexicon) -> Option<String> {
    matching_labels(&comparable_form(description?, &lexicon.stopwords), &lexicon.benefits)
}

pub fn extract_language_requirements(description: Option<&str>, lexicon: &Lexicon) -> Option<String> {
    matching_labels(&comparable_form(description?, &lexicon.stopwords), &lexicon.languages)
}

pub fn extract_skills(description: &str, lexicon: &Lexicon) -> Option<String> {
    let text = description.to_lowercase();
    let skills = lexicon
        .skills
        .iter()
        .filter(|s| text.contains(s.as_str()))
        .join(", ");
    if skills.is_empty() {
        None
    } else {
        Some(skills)
    }
}

/// First amount followed by a currency or salary word, e.g. `"15000 sar"`.
pub fn extract_salary(description: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\d+[,\d]*\s*(?:sar|riyal|sr|salary|k|thousand)\b").unwrap()
    });
    re.find(&description.to_lowercase())
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkModel {
    Remote,
    Hybrid,
    OnSite,
}

impl WorkModel {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkModel::Remote => "Remote",
            WorkModel::Hybrid => "Hybrid",
            WorkModel::OnSite => "On-site",
        }
    }
}

impl fmt::Display for WorkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote region overrides whatever the description says.
pub fn extract_work_model(description: Option<&str>, regions: Option<&str>, lexicon: &Lexicon) -> WorkModel {
    if regions.is_some_and(|r| r.contains(REMOTE)) {
        return WorkModel::Remote;
    }
    let Some(description) = description else {
        return WorkModel::OnSite;
    };
    let text = comparable_form(description, &lexicon.stopwords);
    if contains_any(&text, &lexicon.work_models.remote) {
        WorkModel::Remote
    } else if contains_any(&text, &lexicon.work_models.hybrid) {
        WorkModel::Hybrid
    } else {
        WorkModel::OnSite
    }
}
