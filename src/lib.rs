//! Cleaning and enrichment of LinkedIn job postings for Saudi Arabia.
//!
//! Stage one ([`processing`]) normalizes raw postings and extracts location, industry,
//! experience, degree and keyword features. Stage two ([`enhancement`]) adds categorical
//! features and an attractiveness score on top of the stage-one table.

pub mod dates;
pub mod degree;
pub mod enhancement;
pub mod error;
pub mod experience;
pub mod filter;
pub mod groups;
pub mod industry;
pub mod keywords;
pub mod lexicon;
pub mod metrics;
pub mod processing;
pub mod region;
pub mod report;
pub mod score;
pub mod seniority;
pub mod settings;
pub mod table;
pub mod text;

pub use enhancement::{enhance_dataset, enhance_record, EnhancementReport};
pub use error::{ProcessingError, Result};
pub use lexicon::Lexicon;
pub use metrics::{new_run_id, PassTracker};
pub use processing::{process_dataset, ProcessingOutcome, ProcessingReport};
pub use settings::Settings;
pub use table::Table;
