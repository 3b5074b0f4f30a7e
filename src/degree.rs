use serde::Deserialize;

use crate::lexicon::Lexicon;

/// Ordinal education category. The ordering is the one used for group-mean fill-in,
/// not an academic ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    HigherVocationalEducation,
    #[default]
    Bachelor,
    Diploma,
    Master,
    Student,
    Doctorate,
}

pub const DEFAULT_DEGREE: DegreeLevel = DegreeLevel::Bachelor;

impl DegreeLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            DegreeLevel::HigherVocationalEducation => 1,
            DegreeLevel::Bachelor => 2,
            DegreeLevel::Diploma => 3,
            DegreeLevel::Master => 4,
            DegreeLevel::Student => 5,
            DegreeLevel::Doctorate => 6,
        }
    }

    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(DegreeLevel::HigherVocationalEducation),
            2 => Some(DegreeLevel::Bachelor),
            3 => Some(DegreeLevel::Diploma),
            4 => Some(DegreeLevel::Master),
            5 => Some(DegreeLevel::Student),
            6 => Some(DegreeLevel::Doctorate),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DegreeLevel::HigherVocationalEducation => "Higher Vocational Education",
            DegreeLevel::Bachelor => "bachelor",
            DegreeLevel::Diploma => "diploma",
            DegreeLevel::Master => "master",
            DegreeLevel::Student => "student",
            DegreeLevel::Doctorate => "Doctorate",
        }
    }
}

/// Leftmost degree keyword in the text, resolved through the lexicon's rule list.
pub fn extract_degree(text: &str, lexicon: &Lexicon) -> Option<DegreeLevel> {
    // padded so " ms "-style keywords match at either end
    let padded = format!(" {} ", text.to_lowercase());
    let found = lexicon.degree_re.find(&padded)?;
    lexicon
        .degrees
        .iter()
        .find(|rule| rule.keyword == found.as_str())
        .map(|rule| rule.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degree(text: &str) -> Option<DegreeLevel> {
        extract_degree(text, &Lexicon::embedded().unwrap())
    }

    #[test]
    fn spelled_out_degrees() {
        assert_eq!(degree("bachelor degree in engineering"), Some(DegreeLevel::Bachelor));
        assert_eq!(degree("Masters in finance preferred"), Some(DegreeLevel::Master));
        assert_eq!(degree("technical degree or diploma"), Some(DegreeLevel::Diploma));
    }

    #[test]
    fn abbreviations_need_word_padding() {
        assert_eq!(degree("phd in physics"), Some(DegreeLevel::Doctorate));
        assert_eq!(degree("ms computer science"), Some(DegreeLevel::Master));
        assert_eq!(degree("hve certificate"), Some(DegreeLevel::HigherVocationalEducation));
        assert_eq!(degree("systems engineer"), None);
    }

    #[test]
    fn undergraduate_is_not_graduate() {
        assert_eq!(degree("undergraduate students welcome"), Some(DegreeLevel::Student));
        assert_eq!(degree("graduate of a recognised university"), Some(DegreeLevel::Bachelor));
    }

    #[test]
    fn ordinals_round_trip_through_labels() {
        for n in 1..=6 {
            let level = DegreeLevel::from_ordinal(n).unwrap();
            assert_eq!(level.ordinal(), n);
        }
        assert_eq!(DegreeLevel::from_ordinal(0), None);
        assert_eq!(DEFAULT_DEGREE.label(), "bachelor");
    }
}
