use anyhow::{Context, Result};
use jobs_pipeline::{enhance_dataset, report, Lexicon, Settings, Table};
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Settings::load().context("loading JOBS_* settings")?;
    info!(settings = ?settings, msg = "Starting feature enhancement");

    println!("Saudi Jobs Feature Enhancement");
    println!("==============================\n");

    let lexicon = Lexicon::load(settings.lexicon_path.as_deref())?;
    let mut table = Table::read_csv(&settings.intermediate_path).with_context(|| {
        format!(
            "reading {} (run text_processing first)",
            settings.intermediate_path.display()
        )
    })?;
    println!("Loaded {} processed postings\n", table.len());

    println!("Pass 1: categorical features + attractiveness score");
    let summary = enhance_dataset(&mut table, &lexicon, &settings)?;
    println!("  -> {} rows\n", summary.rows);

    table
        .write_csv(&settings.output_path)
        .with_context(|| format!("writing {}", settings.output_path.display()))?;
    println!("Saved {} rows to {:?}\n", table.len(), settings.output_path);

    println!("{}", report::render_enhancement(&summary));
    println!("Done.");
    Ok(())
}
