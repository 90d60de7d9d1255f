use std::time::{Duration, Instant};

use itertools::Itertools;
use tracing::info;

use crate::vectorizer::Model;

/// Logs each pipeline stage with the time since the run started and since
/// the previous stage.
pub struct Timeline {
    started: Instant,
    last: Instant,
    stages: Vec<(String, Duration)>,
}

impl Timeline {
    pub fn start() -> Self {
        let now = Instant::now();
        Timeline {
            started: now,
            last: now,
            stages: Vec::new(),
        }
    }

    pub fn milestone(&mut self, stage: &str) {
        let now = Instant::now();
        let took = now - self.last;
        self.last = now;
        self.stages.push((stage.to_string(), took));
        info!(
            stage,
            took = %format_duration(took),
            total = %format_duration(now - self.started),
            "stage finished"
        );
    }

    #[cfg(test)]
    pub fn stages(&self) -> &[(String, Duration)] {
        &self.stages
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

pub fn log_corpus(articles: usize, raw_chars: usize, cleaned_chars: usize) {
    info!(
        articles,
        raw_chars,
        cleaned_chars,
        removed = raw_chars.saturating_sub(cleaned_chars),
        "corpus cleaned"
    );
}

pub fn log_model(model: &Model, top_terms: usize) {
    info!(
        features = model.feature_names.len(),
        nnz = model.matrix.nnz(),
        density = model.matrix.density(),
        "model ready"
    );
    if let Some(common) = most_common_terms(model, top_terms) {
        info!("most common terms: {}", common.iter().join(", "));
    }
}

/// The `n` terms with the lowest IDF, ordered by `(idf, term)`. `None` when
/// the model carries no IDF weights.
pub fn most_common_terms(model: &Model, n: usize) -> Option<Vec<&str>> {
    let idf = model.idf.as_ref()?;
    let terms = idf
        .iter()
        .zip(&model.feature_names)
        .sorted_by(|a, b| a.0.total_cmp(b.0).then_with(|| a.1.cmp(b.1)))
        .take(n)
        .map(|(_, term)| term.as_str())
        .collect();
    Some(terms)
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
