use crate::text::word_count;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordCountStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std_dev: f64,
}

impl WordCountStats {
    pub fn from_counts(counts: &[usize]) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        let n = counts.len() as f64;
        let mean = counts.iter().sum::<usize>() as f64 / n;
        let std_dev = if counts.len() < 2 {
            0.0
        } else {
            let sq: f64 = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum();
            (sq / (n - 1.0)).sqrt()
        };
        Some(WordCountStats { mean, std_dev })
    }

    /// `mean - 1.5 * std_dev`. Reported only; rows are cut at the fixed minimum.
    pub fn statistical_threshold(&self) -> f64 {
        self.mean - 1.5 * self.std_dev
    }
}

/// Keeps descriptions with strictly more than `min_word_count` words.
pub fn is_long_enough(description: &str, min_word_count: usize) -> bool {
    word_count(description) > min_word_count
}
