use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorizeError {
    #[error("Empty vocabulary: the documents contain no tokens or only stop words")]
    EmptyVocabulary,

    #[error("No terms remain after pruning; try a lower min_df or a higher max_df")]
    NoTermsRemain,

    #[error("Invalid vectorizer configuration: {0}")]
    InvalidConfig(String),
}
