use thiserror::Error;

/// Recoverable conditions reported to the immediate caller. None of these
/// leave the collection or its derived structures in a partial state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("document id must not be empty")]
    EmptyId,

    #[error("document `{0}` is already in the collection")]
    DuplicateDocument(String),

    #[error("document `{0}` produced no terms after processing")]
    EmptyDocument(String),

    #[error("document `{0}` is not in the collection")]
    DocumentNotFound(String),

    #[error("query produced no terms present in the vocabulary")]
    NoUsableTerms,

    #[error("unknown boolean operator `{0}` (expected AND, OR or NOT)")]
    InvalidOperator(String),

    #[error("malformed corpus: {0}")]
    Corpus(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
