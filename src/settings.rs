use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::clean::CleanOptions;
use crate::stopwords;
use crate::vectorizer::{Analyzer, Norm, VectorizerOptions, Weighting};

const CONFIG_FILE: &str = "wiki_tfidf.toml";
const ENV_PREFIX: &str = "WIKI_TFIDF";

/// Run settings. Defaults reproduce the baseline exercise: word unigrams,
/// TF-IDF weighting, `min_df = 3`, no stop words, digits and template
/// parameters dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub db_path: PathBuf,
    pub output_path: PathBuf,
    pub keep_template_params: bool,
    pub keep_numbers: bool,
    pub analyzer: Analyzer,
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub min_df: usize,
    pub max_df: f64,
    pub max_features: Option<usize>,
    pub stop_words: bool,
    pub weighting: Weighting,
    pub norm: Norm,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
    pub top_terms: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            db_path: PathBuf::from("artykuly.sqlite3"),
            output_path: PathBuf::from("baseline.bin"),
            keep_template_params: false,
            keep_numbers: false,
            analyzer: Analyzer::Word,
            ngram_min: 1,
            ngram_max: 1,
            min_df: 3,
            max_df: 1.0,
            max_features: None,
            stop_words: false,
            weighting: Weighting::TfIdf,
            norm: Norm::L2,
            smooth_idf: true,
            sublinear_tf: false,
            top_terms: 20,
        }
    }
}

impl Settings {
    /// Loads `wiki_tfidf.toml` from the working directory (if present) and
    /// `WIKI_TFIDF_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(file: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read settings from {:?}", file))?;
        let settings: Settings = settings
            .try_deserialize()
            .context("Failed to parse settings")?;
        Ok(settings)
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            keep_template_params: self.keep_template_params,
            keep_numbers: self.keep_numbers,
        }
    }

    pub fn vectorizer_options(&self) -> VectorizerOptions {
        VectorizerOptions {
            analyzer: self.analyzer,
            ngram_range: (self.ngram_min, self.ngram_max),
            min_df: self.min_df,
            max_df: self.max_df,
            max_features: self.max_features,
            stop_words: if self.stop_words {
                stopwords::polish()
            } else {
                Default::default()
            },
            weighting: self.weighting,
            norm: self.norm,
            smooth_idf: self.smooth_idf,
            sublinear_tf: self.sublinear_tf,
        }
    }
}
