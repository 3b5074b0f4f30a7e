use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid lexicon: {0}")]
    Lexicon(#[from] serde_json::Error),

    #[error("invalid lexicon pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("missing required column `{0}`")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
