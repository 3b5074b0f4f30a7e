//! Markdown summaries printed at the end of each stage.

use itertools::Itertools;
use std::fmt::Write as _;
use std::hash::Hash;

use crate::enhancement::EnhancementReport;
use crate::metrics::PassMetric;
use crate::processing::ProcessingReport;

/// Occurrences per value, most frequent first, ties by value.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Ord,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}

pub fn render_processing(report: &ProcessingReport, passes: &[PassMetric]) -> String {
    let mut out = String::new();
    out.push_str("## Text Processing\n");
    let _ = writeln!(
        out,
        "- Unique cities: {} raw locations -> {} cities",
        report.unique_locations, report.unique_cities
    );
    let _ = writeln!(out, "- Unique regions: {}", report.unique_regions);
    let _ = writeln!(out, "- Unique industries: {}", report.unique_industries);
    if let Some(stats) = report.word_stats {
        let _ = writeln!(
            out,
            "- Mean word count per post: {:.0} (std {:.0}, statistical cut-off {:.0}, applied minimum {})",
            stats.mean,
            stats.std_dev,
            stats.statistical_threshold(),
            report.min_word_count
        );
    }
    let _ = writeln!(
        out,
        "- Missing before group fill: experience {}, degree {}",
        report.missing_experience, report.missing_degree
    );

    out.push_str("\n### Passes\n");
    for pass in passes {
        let _ = writeln!(
            out,
            "- {}: {} -> {} rows (dropped {})",
            pass.pass_name,
            pass.before,
            pass.after,
            pass.dropped()
        );
    }

    out.push_str("\n### Industry categories\n");
    for (category, count) in &report.industry_counts {
        let _ = writeln!(out, "- {}: {}", category, count);
    }

    out.push_str("\n### Null values\n");
    for (column, nulls) in report.null_counts.iter().filter(|(_, n)| *n > 0) {
        let _ = writeln!(out, "- {}: {}", column, nulls);
    }

    out.push_str("\n### Data summary\n");
    let _ = writeln!(out, "- Total jobs: {}", report.total_jobs);
    let _ = writeln!(out, "- Jobs with salary info: {}", report.with_salary);
    let _ = writeln!(out, "- Jobs with skills: {}", report.with_skills);
    let _ = writeln!(out, "- Remote jobs: {}", report.remote_jobs);
    out
}

pub fn render_enhancement(report: &EnhancementReport) -> String {
    let mut out = String::new();
    out.push_str("## Feature Enhancement\n");
    let _ = writeln!(out, "- Rows: {}", report.rows);
    let _ = writeln!(out, "- Columns: {}", report.total_columns);
    let _ = writeln!(
        out,
        "- New columns: {}",
        if report.new_columns.is_empty() {
            "none".to_string()
        } else {
            report.new_columns.join(", ")
        }
    );

    let sections: [(&str, &[(String, usize)]); 3] = [
        ("Job types", report.job_types.as_slice()),
        ("Work models", report.work_models.as_slice()),
        ("Seniority levels", report.seniority_levels.as_slice()),
    ];
    for (title, counts) in sections {
        let _ = writeln!(out, "\n### {}", title);
        for (label, count) in counts {
            let _ = writeln!(out, "- {}: {}", label, count);
        }
    }

    out.push_str("\n### Attractiveness scores\n");
    for (score, count) in &report.scores {
        let _ = writeln!(out, "- {}: {}", score, count);
    }
    out
}
