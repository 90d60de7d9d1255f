mod artifact;
mod clean;
mod db;
mod error;
mod markup;
mod matrix;
mod pipeline;
mod report;
mod settings;
mod stopwords;
mod vectorizer;

use anyhow::Result;
use settings::Settings;
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Settings::load()?;
    info!(settings = ?settings, "Starting TF-IDF baseline");

    let summary = pipeline::run(&settings)?;
    info!(
        articles = summary.articles,
        features = summary.features,
        nnz = summary.nnz,
        "Done"
    );
    Ok(())
}
