//! Keyword and category lists consumed by the classifiers.
//!
//! The built-in lexicon is compiled into the binary from `lexicon.json`; a replacement
//! file can be supplied through `JOBS_LEXICON_PATH`. Alternation patterns are compiled
//! once at load time, and the description keyword groups are rewritten into
//! [`comparable_form`] so they match stage-one descriptions.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;

use crate::degree::DegreeLevel;
use crate::error::{ProcessingError, Result};
use crate::text::comparable_form;

const LEXICON_JSON: &str = include_str!("../lexicon.json");

#[derive(Debug, Clone, Deserialize)]
pub struct RegionRule {
    pub region: String,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DegreeRule {
    pub keyword: String,
    pub level: DegreeLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordGroup {
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkModelKeywords {
    pub remote: Vec<String>,
    pub hybrid: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeniorityKeywords {
    pub entry: Vec<String>,
    pub senior: Vec<String>,
    pub management: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LexiconFile {
    special_chars: Vec<String>,
    regions: Vec<RegionRule>,
    industry_categories: Vec<String>,
    fluff_phrases: Vec<String>,
    stopwords: Vec<String>,
    degrees: Vec<DegreeRule>,
    skills: Vec<String>,
    job_types: Vec<KeywordGroup>,
    company_sizes: Vec<KeywordGroup>,
    benefits: Vec<KeywordGroup>,
    languages: Vec<KeywordGroup>,
    work_models: WorkModelKeywords,
    seniority: SeniorityKeywords,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    pub special_chars: Vec<String>,
    pub regions: Vec<RegionRule>,
    pub fluff_phrases: Vec<String>,
    pub stopwords: Vec<String>,
    pub degrees: Vec<DegreeRule>,
    pub skills: Vec<String>,
    pub job_types: Vec<KeywordGroup>,
    pub company_sizes: Vec<KeywordGroup>,
    pub benefits: Vec<KeywordGroup>,
    pub languages: Vec<KeywordGroup>,
    pub work_models: WorkModelKeywords,
    pub seniority: SeniorityKeywords,
    pub industry_re: Regex,
    pub degree_re: Regex,
}

impl Lexicon {
    pub fn embedded() -> Result<Self> {
        Self::from_json(LEXICON_JSON)
    }

    /// Loads `path` when given, the embedded lexicon otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let raw = fs::read_to_string(p).map_err(|source| ProcessingError::Io {
                    path: p.to_path_buf(),
                    source,
                })?;
                Self::from_json(&raw)
            }
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        let industry_re = alternation(&file.industry_categories)?;
        let degree_keywords: Vec<String> = file.degrees.iter().map(|d| d.keyword.clone()).collect();
        let degree_re = alternation(&degree_keywords)?;
        let stopwords = &file.stopwords;
        let work_models = WorkModelKeywords {
            remote: comparable_keywords(&file.work_models.remote, stopwords),
            hybrid: comparable_keywords(&file.work_models.hybrid, stopwords),
        };
        let job_types = comparable_groups(file.job_types, stopwords);
        let company_sizes = comparable_groups(file.company_sizes, stopwords);
        let benefits = comparable_groups(file.benefits, stopwords);
        let languages = comparable_groups(file.languages, stopwords);

        Ok(Lexicon {
            special_chars: file.special_chars,
            regions: file.regions,
            fluff_phrases: file.fluff_phrases,
            stopwords: file.stopwords,
            degrees: file.degrees,
            skills: file.skills,
            job_types,
            company_sizes,
            benefits,
            languages,
            work_models,
            seniority: file.seniority,
            industry_re,
            degree_re,
        })
    }
}

fn comparable_keywords(keywords: &[String], stopwords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| comparable_form(k, stopwords))
        .filter(|k| !k.is_empty())
        .unique()
        .collect()
}

fn comparable_groups(groups: Vec<KeywordGroup>, stopwords: &[String]) -> Vec<KeywordGroup> {
    groups
        .into_iter()
        .map(|g| {
            let keywords = comparable_keywords(&g.keywords, stopwords);
            KeywordGroup {
                label: g.label,
                keywords,
            }
        })
        .collect()
}

/// Leftmost-first alternation over literal keywords, in list order.
fn alternation(keywords: &[String]) -> Result<Regex> {
    let pattern = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Regex::new(&pattern)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lexicon_loads() {
        let lexicon = Lexicon::embedded().unwrap();
        assert_eq!(lexicon.regions.first().map(|r| r.region.as_str()), Some("Remote"));
        assert_eq!(lexicon.stopwords.len(), 10);
        assert!(lexicon.industry_re.is_match("Oil Energy"));
        assert_eq!(lexicon.degrees[0].level, DegreeLevel::Student);
    }

    #[test]
    fn description_keywords_are_stored_comparable() {
        let lexicon = Lexicon::embedded().unwrap();
        assert_eq!(lexicon.job_types[0].keywords, vec!["full time", "permanent"]);
        assert!(lexicon.work_models.remote.contains(&"work home".to_string()));
        let large = lexicon.company_sizes.iter().find(|g| g.label == "Large").unwrap();
        assert!(large.keywords.contains(&"1000 employees".to_string()));
    }

    #[test]
    fn malformed_lexicon_is_rejected() {
        assert!(matches!(
            Lexicon::from_json("{\"regions\": []}"),
            Err(ProcessingError::Lexicon(_))
        ));
    }
}
