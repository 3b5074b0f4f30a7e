//! Stage one: normalize the raw postings table and extract base features.
//!
//! Passes run in order over owned work items:
//!   1. location → city, region; date → day, month, quarter
//!   2. industries cleaned, rows without a recognised category dropped
//!   3. descriptions normalized, rows at or below the word minimum dropped
//!   4. description features (experience, degree, salary, skills), stopwords removed
//!   5. missing experience/degree filled from the mean of their `level` group

use itertools::Itertools;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::dates::{date_parts, DateParts};
use crate::degree::{extract_degree, DegreeLevel, DEFAULT_DEGREE};
use crate::error::Result;
use crate::experience::{extract_experience, leading_digit};
use crate::filter::{is_long_enough, WordCountStats};
use crate::groups::fill_by_group_mean;
use crate::industry::{clean_industries, industry_category, normalize_industries};
use crate::keywords::{extract_salary, extract_skills};
use crate::lexicon::Lexicon;
use crate::metrics::PassTracker;
use crate::report::value_counts;
use crate::region::{city_from_location, classify_region, clean_location, is_remote};
use crate::settings::Settings;
use crate::table::{cell, Table};
use crate::text::{alphanumeric_only, remove_fluff, remove_stopwords, word_count};

/// Columns appended (or overwritten) by this stage, in output order.
pub const DERIVED_COLUMNS: [&str; 12] = [
    "day",
    "month",
    "quarter",
    "city",
    "Regions",
    "industry_cat",
    "year_of_ex",
    "degree_int",
    "salary_mentioned",
    "skills",
    "description_length",
    "is_remote",
];

/// Features read off one normalized description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionFeatures {
    /// Matched experience span, e.g. `"5 years"` or `"junior"`.
    pub experience: Option<String>,
    pub experience_years: Option<u32>,
    pub degree: Option<DegreeLevel>,
    pub salary_mentioned: Option<String>,
    pub skills: Option<String>,
    /// Lowercased, fluff and stopwords removed. This is what gets written back.
    pub description: String,
    pub description_length: usize,
}

/// Extracts every description-level feature from alphanumeric-only text.
pub fn describe(normalized: &str, lexicon: &Lexicon) -> DescriptionFeatures {
    let text = remove_fluff(normalized, &lexicon.fluff_phrases);
    let experience = extract_experience(&text);
    let experience_years = experience.as_deref().and_then(leading_digit);
    let description = remove_stopwords(&text, &lexicon.stopwords);
    let description_length = description.chars().count();

    DescriptionFeatures {
        experience,
        experience_years,
        degree: extract_degree(&text, lexicon),
        salary_mentioned: extract_salary(&text),
        skills: extract_skills(&text, lexicon),
        description,
        description_length,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    /// Distinct raw `location` values before cleaning.
    pub unique_locations: usize,
    pub unique_cities: usize,
    pub unique_regions: usize,
    pub unique_industries: usize,
    pub industry_counts: Vec<(String, usize)>,
    pub word_stats: Option<WordCountStats>,
    pub min_word_count: usize,
    pub missing_experience: usize,
    pub missing_degree: usize,
    pub null_counts: Vec<(String, usize)>,
    pub total_jobs: usize,
    pub with_salary: usize,
    pub with_skills: usize,
    pub remote_jobs: usize,
}

#[derive(Debug)]
pub struct ProcessingOutcome {
    pub table: Table,
    pub report: ProcessingReport,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    location: usize,
    industries: usize,
    description: usize,
    level: Option<usize>,
    date: Option<usize>,
}

impl Columns {
    fn locate(table: &Table) -> Result<Self> {
        Ok(Columns {
            location: table.column_index("location")?,
            industries: table.column_index("industries")?,
            description: table.column_index("description")?,
            level: table.column_index("level").ok(),
            date: table.column_index("date").ok(),
        })
    }
}

#[derive(Debug, Clone, Default)]
struct WorkItem {
    row: Vec<String>,
    location: Option<String>,
    level: Option<String>,
    date: Option<DateParts>,
    city: String,
    region: String,
    industries: Option<String>,
    industry_cat: Option<String>,
    normalized: String,
    features: DescriptionFeatures,
    year_of_ex: u32,
    degree: DegreeLevel,
}

impl WorkItem {
    fn from_row(row: Vec<String>, columns: &Columns) -> Self {
        let get = |idx: usize| cell(&row[idx]).map(str::to_string);
        let location = get(columns.location);
        let industries = get(columns.industries);
        let normalized = get(columns.description).unwrap_or_default();
        let level = columns.level.and_then(get);
        let date = columns.date.and_then(|idx| date_parts(cell(&row[idx])));
        WorkItem {
            row,
            location,
            level,
            date,
            industries,
            normalized,
            ..WorkItem::default()
        }
    }
}

pub fn process_dataset(
    table: Table,
    lexicon: &Lexicon,
    settings: &Settings,
    tracker: &mut PassTracker,
) -> Result<ProcessingOutcome> {
    let columns = Columns::locate(&table)?;
    let (headers, rows) = table.into_parts();
    let mut items: Vec<WorkItem> = rows
        .into_iter()
        .map(|row| WorkItem::from_row(row, &columns))
        .collect();
    info!(rows = items.len(), "loaded raw postings");

    let (unique_locations, unique_cities, unique_regions) =
        pass_location_and_region(&mut items, lexicon, tracker);
    let (unique_industries, industry_counts) = pass_industries(&mut items, lexicon, tracker);
    let word_stats = pass_word_count(&mut items, settings.min_word_count, tracker);
    pass_description_features(&mut items, lexicon, tracker);
    let (missing_experience, missing_degree) = pass_group_fill(&mut items, tracker);

    let with_salary = items.iter().filter(|i| i.features.salary_mentioned.is_some()).count();
    let with_skills = items.iter().filter(|i| i.features.skills.is_some()).count();
    let remote_jobs = items.iter().filter(|i| is_remote(Some(i.region.as_str()))).count();

    let table = into_table(headers, &columns, items);
    let report = ProcessingReport {
        unique_locations,
        unique_cities,
        unique_regions,
        unique_industries,
        industry_counts,
        word_stats,
        min_word_count: settings.min_word_count,
        missing_experience,
        missing_degree,
        null_counts: table.null_counts(),
        total_jobs: table.len(),
        with_salary,
        with_skills,
        remote_jobs,
    };
    Ok(ProcessingOutcome { table, report })
}

fn pass_location_and_region(
    items: &mut [WorkItem],
    lexicon: &Lexicon,
    tracker: &mut PassTracker,
) -> (usize, usize, usize) {
    let unique_locations = items.iter().filter_map(|i| i.location.as_deref()).unique().count();
    for item in items.iter_mut() {
        item.location = item.location.as_deref().map(|l| clean_location(l, lexicon));
        item.city = city_from_location(item.location.as_deref());
        item.region = classify_region(&item.city, &lexicon.regions).to_string();
    }
    let unique_cities = items.iter().map(|i| i.city.as_str()).unique().count();
    let unique_regions = items.iter().map(|i| i.region.as_str()).unique().count();
    debug!(unique_locations, unique_cities, unique_regions, "classified locations");
    tracker.record("pass1_location_region", items.len(), items.len());
    (unique_locations, unique_cities, unique_regions)
}

fn pass_industries(
    items: &mut Vec<WorkItem>,
    lexicon: &Lexicon,
    tracker: &mut PassTracker,
) -> (usize, Vec<(String, usize)>) {
    let before = items.len();
    for item in items.iter_mut() {
        item.industries = clean_industries(item.industries.as_deref(), lexicon);
    }
    items.retain(|i| i.industries.is_some());
    let unique_industries = items
        .iter()
        .filter_map(|i| i.industries.as_deref())
        .unique()
        .count();
    tracker.record("pass2_industries_present", before, items.len());

    let before = items.len();
    for item in items.iter_mut() {
        if let Some(industries) = item.industries.take() {
            item.industry_cat = industry_category(&industries, lexicon);
            item.industries = Some(normalize_industries(&industries));
        }
    }
    items.retain(|i| i.industry_cat.is_some());
    tracker.record("pass2_industry_category", before, items.len());

    let industry_counts = value_counts(items.iter().filter_map(|i| i.industry_cat.clone()));
    (unique_industries, industry_counts)
}

fn pass_word_count(
    items: &mut Vec<WorkItem>,
    min_word_count: usize,
    tracker: &mut PassTracker,
) -> Option<WordCountStats> {
    let before = items.len();
    for item in items.iter_mut() {
        item.normalized = alphanumeric_only(&item.normalized);
    }

    let counts: Vec<usize> = items.iter().map(|i| word_count(&i.normalized)).collect();
    let stats = WordCountStats::from_counts(&counts);
    if let Some(s) = stats {
        // The statistical cut-off is reported but the fixed minimum decides.
        info!(
            mean = s.mean,
            std_dev = s.std_dev,
            statistical_threshold = s.statistical_threshold(),
            min_word_count,
            "description word counts"
        );
    }

    items.retain(|i| is_long_enough(&i.normalized, min_word_count));
    tracker.record("pass3_word_count", before, items.len());
    stats
}

#[cfg(feature = "rayon")]
fn describe_all(items: &mut [WorkItem], lexicon: &Lexicon) {
    items
        .par_iter_mut()
        .for_each(|item| item.features = describe(&item.normalized, lexicon));
}

#[cfg(not(feature = "rayon"))]
fn describe_all(items: &mut [WorkItem], lexicon: &Lexicon) {
    items
        .iter_mut()
        .for_each(|item| item.features = describe(&item.normalized, lexicon));
}

fn pass_description_features(items: &mut [WorkItem], lexicon: &Lexicon, tracker: &mut PassTracker) {
    describe_all(items, lexicon);
    tracker.record("pass4_description_features", items.len(), items.len());
}

/// Returns how many rows lacked experience and degree before filling.
fn pass_group_fill(items: &mut [WorkItem], tracker: &mut PassTracker) -> (usize, usize) {
    let years: Vec<Option<f64>> = items
        .iter()
        .map(|i| i.features.experience_years.map(f64::from))
        .collect();
    let degrees: Vec<Option<f64>> = items
        .iter()
        .map(|i| i.features.degree.map(|d| f64::from(d.ordinal())))
        .collect();
    let missing_experience = years.iter().filter(|y| y.is_none()).count();
    let missing_degree = degrees.iter().filter(|d| d.is_none()).count();

    let keys: Vec<Option<&str>> = items.iter().map(|i| i.level.as_deref()).collect();
    let years = fill_by_group_mean(&years, &keys);
    let degrees = fill_by_group_mean(&degrees, &keys);

    for (item, (year, degree)) in items.iter_mut().zip(years.into_iter().zip(degrees)) {
        // float-to-int casts truncate, matching an integer cast of the group mean
        item.year_of_ex = year.unwrap_or(0.0) as u32;
        item.degree = degree
            .and_then(|d| DegreeLevel::from_ordinal(d as u8))
            .unwrap_or(DEFAULT_DEGREE);
    }
    debug!(missing_experience, missing_degree, "filled from level groups");
    tracker.record("pass5_group_fill", items.len(), items.len());
    (missing_experience, missing_degree)
}

fn into_table(headers: Vec<String>, columns: &Columns, items: Vec<WorkItem>) -> Table {
    let mut derived: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(items.len()); DERIVED_COLUMNS.len()];
    let mut rows = Vec::with_capacity(items.len());

    for item in items {
        let WorkItem {
            mut row,
            location,
            date,
            city,
            region,
            industries,
            industry_cat,
            features,
            year_of_ex,
            degree,
            ..
        } = item;

        row[columns.location] = location.unwrap_or_default();
        row[columns.industries] = industries.unwrap_or_default();
        row[columns.description] = features.description;

        let remote = if is_remote(Some(region.as_str())) { "1" } else { "0" };
        let values = [
            date.map(|d| d.day.to_string()),
            date.map(|d| d.month.to_string()),
            date.map(|d| d.quarter.to_string()),
            Some(city),
            Some(region),
            industry_cat,
            Some(year_of_ex.to_string()),
            Some(degree.label().to_string()),
            features.salary_mentioned,
            features.skills,
            Some(features.description_length.to_string()),
            Some(remote.to_string()),
        ];
        for (column, value) in derived.iter_mut().zip(values) {
            column.push(value);
        }
        rows.push(row);
    }

    let mut table = Table::new(headers, rows);
    for (name, values) in DERIVED_COLUMNS.iter().zip(derived) {
        table.set_column(name, values);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::new_run_id;

    fn lexicon() -> Lexicon {
        Lexicon::embedded().unwrap()
    }

    fn run(table: Table) -> ProcessingOutcome {
        let mut tracker = PassTracker::new(new_run_id());
        process_dataset(table, &lexicon(), &Settings::default(), &mut tracker).unwrap()
    }

    fn fixture() -> Table {
        Table::read_csv(std::path::Path::new("tests/fixtures/raw_jobs.csv")).unwrap()
    }

    #[test]
    fn describe_reads_features_before_stripping_stopwords() {
        let features = describe(
            "Job Description  Bachelor in Computer Science and 3 years of experience with Python and SQL  salary 9000 SAR",
            &lexicon(),
        );
        assert_eq!(features.experience.as_deref(), Some("3 years"));
        assert_eq!(features.experience_years, Some(3));
        assert_eq!(features.degree, Some(DegreeLevel::Bachelor));
        assert_eq!(features.salary_mentioned.as_deref(), Some("9000 sar"));
        assert_eq!(features.skills.as_deref(), Some("python, sql"));
        assert_eq!(
            features.description,
            "bachelor computer science 3 years experience python sql salary 9000 sar"
        );
        assert_eq!(features.description_length, features.description.len());
    }

    #[test]
    fn drops_malformed_rows() {
        let outcome = run(fixture());
        // no industries, unknown industry, and a 20-word description are dropped
        assert_eq!(outcome.table.len(), 5);
        let titles = outcome.table.column("title").unwrap();
        assert_eq!(
            titles,
            vec![
                Some("Data Analyst"),
                Some("Sales Engineer"),
                Some("Remote Developer"),
                Some("Junior Accountant"),
                Some("Field Engineer"),
            ]
        );
    }

    #[test]
    fn derives_location_columns() {
        let outcome = run(fixture());
        let table = &outcome.table;
        assert_eq!(
            table.column("city").unwrap(),
            vec![Some("Riyadh"), Some("Dammam"), Some("Remote"), Some("Jeddah"), Some("Dhahran")]
        );
        assert_eq!(
            table.column("Regions").unwrap(),
            vec![Some("Riyadh"), Some("Eastern"), Some("Remote"), Some("Makkah"), Some("Eastern")]
        );
        assert_eq!(
            table.column("is_remote").unwrap(),
            vec![Some("0"), Some("0"), Some("1"), Some("0"), Some("0")]
        );
        assert_eq!(
            table.column("quarter").unwrap(),
            vec![Some("1"), Some("2"), Some("4"), None, Some("3")]
        );
    }

    #[test]
    fn fills_experience_and_degree_from_level_groups() {
        let outcome = run(fixture());
        let table = &outcome.table;
        // rows 1 and 2 share "Mid-Senior level" with 5 and 2 years: the gap takes 3
        assert_eq!(
            table.column("year_of_ex").unwrap(),
            vec![Some("5"), Some("2"), Some("3"), Some("0"), Some("7")]
        );
        assert_eq!(
            table.column("degree_int").unwrap(),
            vec![
                Some("master"),
                Some("diploma"),
                Some("diploma"),
                Some("bachelor"),
                Some("bachelor")
            ]
        );
        assert_eq!(outcome.report.missing_experience, 2);
        assert_eq!(outcome.report.missing_degree, 2);
    }

    #[test]
    fn derived_columns_follow_the_input_ones() {
        let outcome = run(fixture());
        let headers = outcome.table.headers();
        let tail: Vec<&str> = headers[headers.len() - DERIVED_COLUMNS.len()..]
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(tail, DERIVED_COLUMNS);
        assert_eq!(
            outcome.table.column("industry_cat").unwrap(),
            vec![
                Some("Information Technology and Services"),
                Some("Oil"),
                Some("Computer"),
                Some("Accounting"),
                Some("Oil")
            ]
        );
    }

    #[test]
    fn report_summarises_the_run() {
        let report = run(fixture()).report;
        assert_eq!(report.total_jobs, 5);
        assert_eq!(report.with_salary, 1);
        assert_eq!(report.with_skills, 2);
        assert_eq!(report.remote_jobs, 1);
        assert_eq!(report.min_word_count, 20);
        assert_eq!(report.unique_locations, 7);
        assert_eq!(report.unique_cities, 7);
    }

    #[test]
    fn missing_required_column_fails() {
        let table = Table::from_reader("location,description\nRiyadh,text\n".as_bytes()).unwrap();
        let mut tracker = PassTracker::new(new_run_id());
        let err = process_dataset(table, &lexicon(), &Settings::default(), &mut tracker).unwrap_err();
        assert!(err.to_string().contains("industries"));
    }
}
