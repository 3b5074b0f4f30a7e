use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

/// Row counts before and after each pass of a stage.
pub struct PassTracker {
    run_id: String,
    metrics: Vec<PassMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassMetric {
    pub pass_name: String,
    pub before: usize,
    pub after: usize,
}

impl PassMetric {
    pub fn dropped(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

impl PassTracker {
    pub fn new(run_id: String) -> Self {
        PassTracker {
            run_id,
            metrics: Vec::new(),
        }
    }

    pub fn record(&mut self, pass_name: &str, before: usize, after: usize) {
        let metric = PassMetric {
            pass_name: pass_name.to_string(),
            before,
            after,
        };
        info!(
            run_id = %self.run_id,
            pass = pass_name,
            before,
            after,
            dropped = metric.dropped(),
            "pass complete"
        );
        self.metrics.push(metric);
    }

    pub fn metrics(&self) -> &[PassMetric] {
        &self.metrics
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

pub fn new_run_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("run-{}", now)
}
