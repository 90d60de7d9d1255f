use anyhow::{Context, Result};
use tracing::info;

use crate::artifact;
use crate::clean::{self, total_chars};
use crate::db;
use crate::report::{self, format_duration, Timeline};
use crate::settings::Settings;
use crate::vectorizer::Vectorizer;

#[derive(Debug)]
pub struct RunSummary {
    pub articles: usize,
    pub features: usize,
    pub nnz: usize,
}

/// load → clean → vectorize → report → persist.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let mut timeline = Timeline::start();

    info!(db = ?settings.db_path, "Loading articles");
    let conn = db::connect(&settings.db_path)?;
    let articles = db::fetch_articles(&conn)?;
    drop(conn);
    info!(articles = articles.len(), "Articles loaded");
    timeline.milestone("load");

    let cleaned = clean::clean_corpus(&articles, settings.clean_options());
    let raw_chars: usize = articles.iter().map(|a| a.text.chars().count()).sum();
    report::log_corpus(articles.len(), raw_chars, total_chars(&cleaned));
    let titles: Vec<String> = articles.into_iter().map(|a| a.title).collect();
    timeline.milestone("clean");

    info!(
        analyzer = ?settings.analyzer,
        weighting = ?settings.weighting,
        min_df = settings.min_df,
        max_features = ?settings.max_features,
        "Building model"
    );
    let vectorizer = Vectorizer::new(settings.vectorizer_options())?;
    let model = vectorizer
        .fit_transform(&cleaned)
        .context("Failed to build model")?;
    drop(cleaned);
    timeline.milestone("vectorize");
    report::log_model(&model, settings.top_terms);

    artifact::save(&settings.output_path, &titles, &model.matrix)?;
    timeline.milestone("save");
    info!(
        output = ?settings.output_path,
        elapsed = %format_duration(timeline.elapsed()),
        "Model saved"
    );

    Ok(RunSummary {
        articles: titles.len(),
        features: model.feature_names.len(),
        nnz: model.matrix.nnz(),
    })
}
