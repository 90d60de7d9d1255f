use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::VectorizeError;
use crate::matrix::CsrMatrix;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    /// Word n-grams over `\w\w+` tokens.
    Word,
    /// Character n-grams over the whole text.
    Char,
    /// Character n-grams inside space-padded word boundaries.
    CharWb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    Count,
    #[serde(rename = "tfidf")]
    TfIdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    L2,
    None,
}

#[derive(Debug, Clone)]
pub struct VectorizerOptions {
    pub analyzer: Analyzer,
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must occur in.
    pub min_df: usize,
    /// Maximum proportion of documents a term may occur in.
    pub max_df: f64,
    pub max_features: Option<usize>,
    pub stop_words: HashSet<String>,
    pub weighting: Weighting,
    pub norm: Norm,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        VectorizerOptions {
            analyzer: Analyzer::Word,
            ngram_range: (1, 1),
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            stop_words: HashSet::new(),
            weighting: Weighting::TfIdf,
            norm: Norm::L2,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

/// Fitted vocabulary, IDF weights and document-term matrix.
#[derive(Debug, Clone)]
pub struct Model {
    /// Terms in code point order; term `j` is matrix column `j`.
    pub feature_names: Vec<String>,
    /// Present only for TF-IDF weighting.
    pub idf: Option<Vec<f64>>,
    pub matrix: CsrMatrix,
}

pub struct Vectorizer {
    options: VectorizerOptions,
}

impl Vectorizer {
    pub fn new(options: VectorizerOptions) -> Result<Self, VectorizeError> {
        let (min_n, max_n) = options.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(VectorizeError::InvalidConfig(format!(
                "ngram_range ({}, {}) must satisfy 1 <= min <= max",
                min_n, max_n
            )));
        }
        if !(options.max_df > 0.0 && options.max_df <= 1.0) {
            return Err(VectorizeError::InvalidConfig(format!(
                "max_df {} must be in (0, 1]",
                options.max_df
            )));
        }
        Ok(Vectorizer { options })
    }

    /// Splits a document into the terms counted for it.
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let doc = doc.to_lowercase();
        let (min_n, max_n) = self.options.ngram_range;
        match self.options.analyzer {
            Analyzer::Word => {
                let tokens: Vec<&str> = TOKEN_RE
                    .find_iter(&doc)
                    .map(|m| m.as_str())
                    .filter(|t| !self.options.stop_words.contains(*t))
                    .collect();
                word_ngrams(&tokens, min_n, max_n)
            }
            Analyzer::Char => {
                let doc = WHITESPACE_RUN_RE.replace_all(&doc, " ");
                char_ngrams(&doc, min_n, max_n)
            }
            Analyzer::CharWb => {
                let doc = WHITESPACE_RUN_RE.replace_all(&doc, " ");
                char_wb_ngrams(&doc, min_n, max_n)
            }
        }
    }

    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<Model, VectorizeError> {
        // Provisional ids in first-seen order; remapped to sorted columns below.
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut terms: Vec<String> = Vec::new();
        let mut doc_counts: Vec<Vec<(usize, usize)>> = Vec::with_capacity(docs.len());

        for doc in docs {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for term in self.analyze(doc.as_ref()) {
                let id = match ids.get(&term) {
                    Some(id) => *id,
                    None => {
                        let id = terms.len();
                        ids.insert(term.clone(), id);
                        terms.push(term);
                        id
                    }
                };
                *counts.entry(id).or_insert(0) += 1;
            }
            doc_counts.push(counts.into_iter().collect());
        }
        drop(ids);

        if terms.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n_docs = docs.len();
        let max_doc_count = (self.options.max_df * n_docs as f64).floor() as usize;
        if max_doc_count < self.options.min_df {
            return Err(VectorizeError::InvalidConfig(format!(
                "max_df {} allows {} documents, fewer than min_df {}",
                self.options.max_df, max_doc_count, self.options.min_df
            )));
        }

        let mut df = vec![0usize; terms.len()];
        let mut tf = vec![0usize; terms.len()];
        for counts in &doc_counts {
            for &(id, count) in counts {
                df[id] += 1;
                tf[id] += count;
            }
        }

        let mut kept: Vec<usize> = (0..terms.len())
            .filter(|&id| df[id] >= self.options.min_df && df[id] <= max_doc_count)
            .collect();
        kept.sort_by(|&a, &b| terms[a].cmp(&terms[b]));
        debug!(candidates = terms.len(), kept = kept.len(), "document frequency pruning");

        if let Some(limit) = self.options.max_features {
            if kept.len() > limit {
                // Stable sort keeps term order among equal frequencies.
                kept.sort_by(|&a, &b| tf[b].cmp(&tf[a]));
                kept.truncate(limit);
                kept.sort_by(|&a, &b| terms[a].cmp(&terms[b]));
            }
        }

        if kept.is_empty() {
            return Err(VectorizeError::NoTermsRemain);
        }

        let mut column: Vec<Option<usize>> = vec![None; terms.len()];
        for (col, &id) in kept.iter().enumerate() {
            column[id] = Some(col);
        }

        let mut matrix = CsrMatrix::new(kept.len());
        let mut row: Vec<(usize, f64)> = Vec::new();
        for counts in &doc_counts {
            row.clear();
            row.extend(
                counts
                    .iter()
                    .filter_map(|&(id, count)| column[id].map(|col| (col, count as f64))),
            );
            row.sort_by_key(|&(col, _)| col);
            matrix.push_row(&row);
        }

        let kept_df: Vec<usize> = kept.iter().map(|&id| df[id]).collect();
        let feature_names: Vec<String> = kept
            .into_iter()
            .map(|id| std::mem::take(&mut terms[id]))
            .collect();

        let idf = match self.options.weighting {
            Weighting::Count => None,
            Weighting::TfIdf => {
                let idf = idf_weights(&kept_df, n_docs, self.options.smooth_idf);
                if self.options.sublinear_tf {
                    matrix.map_values(|v| v.ln() + 1.0);
                }
                matrix.scale_columns(&idf);
                if self.options.norm == Norm::L2 {
                    matrix.normalize_rows_l2();
                }
                Some(idf)
            }
        };

        Ok(Model {
            feature_names,
            idf,
            matrix,
        })
    }
}

fn idf_weights(df: &[usize], n_docs: usize, smooth: bool) -> Vec<f64> {
    let offset = if smooth { 1.0 } else { 0.0 };
    df.iter()
        .map(|&d| ((n_docs as f64 + offset) / (d as f64 + offset)).ln() + 1.0)
        .collect()
}

fn word_ngrams(tokens: &[&str], min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams: Vec<String> = Vec::new();
    for n in min_n..=max_n.min(tokens.len()) {
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

fn char_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut grams: Vec<String> = Vec::new();
    for n in min_n..=max_n.min(chars.len()) {
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}

fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        let len = padded.len();
        for n in min_n..=max_n {
            let mut offset = 0;
            grams.push(padded[..n.min(len)].iter().collect());
            while offset + n < len {
                offset += 1;
                grams.push(padded[offset..offset + n].iter().collect());
            }
            // A padded word no longer than `n` yields itself once.
            if offset == 0 {
                break;
            }
        }
    }
    grams
}
