use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

const INPUT_CANDIDATES: [&str; 2] = [
    "linkedin_jobs_saudi_2020.csv",
    "data/linkedin_jobs_saudi_2020.csv",
];

/// Runtime settings for both stages, read from `JOBS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input_path: PathBuf,
    pub intermediate_path: PathBuf,
    pub output_path: PathBuf,
    /// Descriptions with this many words or fewer are dropped.
    pub min_word_count: usize,
    /// Descriptions longer than this earn an attractiveness point.
    pub long_description_chars: usize,
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("input_path", default_input_path().to_string_lossy().into_owned())?
            .set_default("intermediate_path", "data_jobs.csv")?
            .set_default("output_path", "data_jobs_enhanced.csv")?
            .set_default("min_word_count", 20_i64)?
            .set_default("long_description_chars", 500_i64)?
            .add_source(Environment::with_prefix("JOBS").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_path: default_input_path(),
            intermediate_path: PathBuf::from("data_jobs.csv"),
            output_path: PathBuf::from("data_jobs_enhanced.csv"),
            min_word_count: 20,
            long_description_chars: 500,
            lexicon_path: None,
        }
    }
}

fn default_input_path() -> PathBuf {
    INPUT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(INPUT_CANDIDATES[0]))
}
