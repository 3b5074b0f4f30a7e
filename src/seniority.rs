use std::fmt;

use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
    Management,
}

impl Seniority {
    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Entry => "Entry Level",
            Seniority::Mid => "Mid Level",
            Seniority::Senior => "Senior Level",
            Seniority::Management => "Management",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level keywords take precedence; otherwise years of experience decide.
pub fn categorize_seniority(level: Option<&str>, years: Option<f64>, lexicon: &Lexicon) -> Seniority {
    let level = level.unwrap_or_default().to_lowercase();
    let keywords = &lexicon.seniority;
    let mentions = |words: &[String]| words.iter().any(|w| level.contains(w.as_str()));

    if mentions(&keywords.entry) {
        return Seniority::Entry;
    }
    if mentions(&keywords.senior) {
        return Seniority::Senior;
    }
    if mentions(&keywords.management) {
        return Seniority::Management;
    }
    match years {
        Some(y) if y <= 2.0 => Seniority::Entry,
        Some(y) if y <= 5.0 => Seniority::Mid,
        Some(y) if y > 5.0 => Seniority::Senior,
        // NaN or unknown
        _ => Seniority::Mid,
    }
}
