use anyhow::{Context, Result};
use jobs_pipeline::{new_run_id, process_dataset, report, Lexicon, PassTracker, Settings, Table};
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Settings::load().context("loading JOBS_* settings")?;
    info!(settings = ?settings, msg = "Starting text processing");

    println!("Saudi Jobs Text Processing");
    println!("==========================\n");

    let lexicon = Lexicon::load(settings.lexicon_path.as_deref())?;
    println!("Input: {:?}", settings.input_path);
    let table = Table::read_csv(&settings.input_path)
        .with_context(|| format!("reading {}", settings.input_path.display()))?;
    println!("Loaded {} postings\n", table.len());
    if table.is_empty() {
        return Ok(());
    }

    let mut tracker = PassTracker::new(new_run_id());
    let outcome = process_dataset(table, &lexicon, &settings, &mut tracker)?;
    for (n, pass) in tracker.metrics().iter().enumerate() {
        println!("Pass {}: {}", n + 1, pass.pass_name);
        println!("  -> {} rows\n", pass.after);
    }

    outcome
        .table
        .write_csv(&settings.intermediate_path)
        .with_context(|| format!("writing {}", settings.intermediate_path.display()))?;
    println!("Saved {} rows to {:?}\n", outcome.table.len(), settings.intermediate_path);

    println!("{}", report::render_processing(&outcome.report, tracker.metrics()));
    println!("Done.");
    Ok(())
}
