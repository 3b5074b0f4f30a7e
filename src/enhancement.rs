//! Stage two: secondary categorical features and the attractiveness score.
//!
//! Enhancement reads only stage-one columns and never its own output, so running it
//! again over an enhanced table rewrites every derived column with the same value.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::Result;
use crate::keywords::{
    extract_benefits, extract_company_size, extract_job_type, extract_language_requirements,
    extract_work_model, WorkModel,
};
use crate::lexicon::Lexicon;
use crate::report::value_counts;
use crate::score::{calculate_job_attractiveness_score, AttractivenessSignals};
use crate::seniority::{categorize_seniority, Seniority};
use crate::settings::Settings;
use crate::table::Table;

pub const ENHANCED_COLUMNS: [&str; 7] = [
    "job_type",
    "company_size",
    "benefits",
    "seniority_level",
    "work_model",
    "language_requirements",
    "job_attractiveness_score",
];

/// The stage-one fields enhancement depends on, borrowed from one row.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancementInput<'a> {
    pub description: Option<&'a str>,
    pub level: Option<&'a str>,
    pub year_of_ex: Option<f64>,
    pub regions: Option<&'a str>,
    pub salary_mentioned: Option<&'a str>,
    pub skills: Option<&'a str>,
    pub description_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enhancement {
    pub job_type: Option<String>,
    pub company_size: Option<String>,
    pub benefits: Option<String>,
    pub seniority_level: Seniority,
    pub work_model: WorkModel,
    pub language_requirements: Option<String>,
    pub job_attractiveness_score: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementReport {
    pub rows: usize,
    pub total_columns: usize,
    pub new_columns: Vec<String>,
    pub job_types: Vec<(String, usize)>,
    pub work_models: Vec<(String, usize)>,
    pub seniority_levels: Vec<(String, usize)>,
    pub scores: Vec<(u8, usize)>,
}

pub fn enhance_record(
    input: &EnhancementInput<'_>,
    lexicon: &Lexicon,
    long_description_chars: usize,
) -> Enhancement {
    let benefits = extract_benefits(input.description, lexicon);
    let work_model = extract_work_model(input.description, input.regions, lexicon);
    let signals = AttractivenessSignals {
        salary_mentioned: input.salary_mentioned.is_some(),
        has_skills: input.skills.is_some(),
        has_benefits: benefits.is_some(),
        is_remote: work_model == WorkModel::Remote,
        long_description: input
            .description_length
            .is_some_and(|len| len > long_description_chars),
    };

    Enhancement {
        job_type: extract_job_type(input.description, lexicon).map(str::to_string),
        company_size: extract_company_size(input.description, lexicon).map(str::to_string),
        benefits,
        seniority_level: categorize_seniority(input.level, input.year_of_ex, lexicon),
        work_model,
        language_requirements: extract_language_requirements(input.description, lexicon),
        job_attractiveness_score: calculate_job_attractiveness_score(&signals),
    }
}

#[cfg(feature = "rayon")]
fn enhance_all(inputs: &[EnhancementInput<'_>], lexicon: &Lexicon, long: usize) -> Vec<Enhancement> {
    inputs
        .par_iter()
        .map(|input| enhance_record(input, lexicon, long))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn enhance_all(inputs: &[EnhancementInput<'_>], lexicon: &Lexicon, long: usize) -> Vec<Enhancement> {
    inputs
        .iter()
        .map(|input| enhance_record(input, lexicon, long))
        .collect()
}

fn read_inputs(table: &Table) -> Result<Vec<EnhancementInput<'_>>> {
    let descriptions = table.column("description")?;
    let regions = table.column("Regions")?;
    let levels = table.column_or_missing("level");
    // a table without the column reads as zero years; an empty cell stays unknown
    let years: Vec<Option<f64>> = if table.has_column("year_of_ex") {
        table
            .column_or_missing("year_of_ex")
            .into_iter()
            .map(|y| y.and_then(|y| y.trim().parse().ok()))
            .collect()
    } else {
        vec![Some(0.0); table.len()]
    };
    let salaries = table.column_or_missing("salary_mentioned");
    let skills = table.column_or_missing("skills");
    let lengths = table.column_or_missing("description_length");

    Ok((0..table.len())
        .map(|i| EnhancementInput {
            description: descriptions[i],
            level: levels[i],
            year_of_ex: years[i],
            regions: regions[i],
            salary_mentioned: salaries[i],
            skills: skills[i],
            description_length: lengths[i].and_then(|l| l.trim().parse().ok()),
        })
        .collect())
}

/// Derives every enhanced column, overwriting existing ones in place.
pub fn enhance_dataset(table: &mut Table, lexicon: &Lexicon, settings: &Settings) -> Result<EnhancementReport> {
    let new_columns: Vec<String> = ENHANCED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    let inputs = read_inputs(table)?;
    let enhancements = enhance_all(&inputs, lexicon, settings.long_description_chars);
    drop(inputs);

    let report = EnhancementReport {
        rows: enhancements.len(),
        total_columns: table.headers().len() + new_columns.len(),
        new_columns,
        job_types: value_counts(enhancements.iter().filter_map(|e| e.job_type.clone())),
        work_models: value_counts(enhancements.iter().map(|e| e.work_model.to_string())),
        seniority_levels: value_counts(enhancements.iter().map(|e| e.seniority_level.to_string())),
        scores: value_counts(enhancements.iter().map(|e| e.job_attractiveness_score)),
    };

    let mut columns: [Vec<Option<String>>; 7] = Default::default();
    for e in enhancements {
        let values = [
            e.job_type,
            e.company_size,
            e.benefits,
            Some(e.seniority_level.to_string()),
            Some(e.work_model.to_string()),
            e.language_requirements,
            Some(e.job_attractiveness_score.to_string()),
        ];
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }
    for (name, values) in ENHANCED_COLUMNS.iter().zip(columns) {
        table.set_column(name, values);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{new_run_id, PassTracker};
    use crate::processing::process_dataset;
    use std::path::Path;

    fn lexicon() -> Lexicon {
        Lexicon::embedded().unwrap()
    }

    const STAGE_ONE: &str = "\
title,level,description,Regions,year_of_ex,salary_mentioned,skills,description_length
Analyst,Mid-Senior level,full time role with medical insurance and annual bonus fluent english required,Riyadh,5,,python,640
Developer,Associate,contract backend role work from home,Remote,1,15000 sar,docker,120
Clerk,,,Makkah,,,,
";

    fn stage_one() -> Table {
        Table::from_reader(STAGE_ONE.as_bytes()).unwrap()
    }

    #[test]
    fn record_level_features() {
        let input = EnhancementInput {
            description: Some("full time role with medical insurance and annual bonus"),
            level: Some("Mid-Senior level"),
            year_of_ex: Some(5.0),
            regions: Some("Riyadh"),
            salary_mentioned: None,
            skills: Some("python"),
            description_length: Some(640),
        };
        let e = enhance_record(&input, &lexicon(), 500);
        assert_eq!(e.job_type.as_deref(), Some("Full-time"));
        assert_eq!(e.company_size.as_deref(), Some("Unknown"));
        assert_eq!(e.benefits.as_deref(), Some("health_insurance, bonus"));
        assert_eq!(e.seniority_level, Seniority::Senior);
        assert_eq!(e.work_model, WorkModel::OnSite);
        assert_eq!(e.language_requirements, None);
        // skills + benefits + length
        assert_eq!(e.job_attractiveness_score, 3);
    }

    #[test]
    fn missing_description_yields_absent_features() {
        let e = enhance_record(&EnhancementInput::default(), &lexicon(), 500);
        assert_eq!(e.job_type, None);
        assert_eq!(e.company_size, None);
        assert_eq!(e.benefits, None);
        assert_eq!(e.language_requirements, None);
        assert_eq!(e.work_model, WorkModel::OnSite);
        assert_eq!(e.seniority_level, Seniority::Mid);
        assert_eq!(e.job_attractiveness_score, 0);
    }

    #[test]
    fn appends_columns_and_reports() {
        let mut table = stage_one();
        let report = enhance_dataset(&mut table, &lexicon(), &Settings::default()).unwrap();

        assert_eq!(report.new_columns, ENHANCED_COLUMNS);
        assert_eq!(report.total_columns, 15);
        assert_eq!(table.headers().len(), 15);
        assert_eq!(
            table.column("job_type").unwrap(),
            vec![Some("Full-time"), Some("Contract"), None]
        );
        assert_eq!(
            table.column("work_model").unwrap(),
            vec![Some("On-site"), Some("Remote"), Some("On-site")]
        );
        assert_eq!(
            table.column("seniority_level").unwrap(),
            vec![Some("Senior Level"), Some("Entry Level"), Some("Mid Level")]
        );
        assert_eq!(
            table.column("language_requirements").unwrap(),
            vec![Some("english"), None, None]
        );
        // 1 + 1 + 1 ; 2 + 1 + 1 ; 0
        assert_eq!(
            table.column("job_attractiveness_score").unwrap(),
            vec![Some("3"), Some("4"), Some("0")]
        );
        assert_eq!(report.scores, vec![(0, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn rerunning_on_enhanced_output_changes_nothing() {
        let lex = lexicon();
        let settings = Settings::default();
        let mut once = stage_one();
        enhance_dataset(&mut once, &lex, &settings).unwrap();

        let mut twice = once.clone();
        let report = enhance_dataset(&mut twice, &lex, &settings).unwrap();
        assert!(report.new_columns.is_empty());
        assert_eq!(twice, once);
    }

    #[test]
    fn requires_stage_one_columns() {
        let mut table = Table::from_reader("description,level\ntext,Associate\n".as_bytes()).unwrap();
        assert!(enhance_dataset(&mut table, &lexicon(), &Settings::default()).is_err());
    }

    #[test]
    fn level_and_experience_columns_are_optional() {
        let mut table = Table::from_reader("description,Regions\nsupport role,Riyadh\n".as_bytes()).unwrap();
        enhance_dataset(&mut table, &lexicon(), &Settings::default()).unwrap();
        // no year_of_ex column counts as zero years
        assert_eq!(table.column("seniority_level").unwrap(), vec![Some("Entry Level")]);

        let mut table =
            Table::from_reader("description,Regions,year_of_ex\nsupport role,Riyadh,\n".as_bytes()).unwrap();
        enhance_dataset(&mut table, &lexicon(), &Settings::default()).unwrap();
        assert_eq!(table.column("seniority_level").unwrap(), vec![Some("Mid Level")]);
    }

    #[test]
    fn fixture_through_both_stages() {
        let lex = lexicon();
        let settings = Settings::default();
        let raw = Table::read_csv(Path::new("tests/fixtures/raw_jobs.csv")).unwrap();
        let mut tracker = PassTracker::new(new_run_id());
        let mut table = process_dataset(raw, &lex, &settings, &mut tracker).unwrap().table;
        enhance_dataset(&mut table, &lex, &settings).unwrap();

        assert_eq!(
            table.column("title").unwrap().last().copied().flatten(),
            Some("Field Engineer")
        );
        assert_eq!(
            table.column("job_type").unwrap(),
            vec![
                Some("Not Specified"),
                Some("Full-time"),
                Some("Not Specified"),
                Some("Not Specified"),
                Some("Contract"),
            ]
        );
        // the field engineer is in Dhahran but says "work from home"
        assert_eq!(
            table.column("work_model").unwrap(),
            vec![Some("On-site"), Some("On-site"), Some("Remote"), Some("On-site"), Some("Remote")]
        );
        assert_eq!(
            table.column("company_size").unwrap(),
            vec![Some("Unknown"), Some("Unknown"), Some("Unknown"), Some("Unknown"), Some("Large")]
        );
        assert_eq!(
            table.column("seniority_level").unwrap().last().copied().flatten(),
            Some("Management")
        );
    }
}
