use std::io;
use thiserror::Error;

/// Failures of the second read path into the corpus.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("document `{0}` is not in the index")]
    UnknownDocument(String),
    #[error("term `{term}` does not occur in `{document}`")]
    TermNotInDocument { term: String, document: String },
    #[error("failed to re-open document `{document}`")]
    Io {
        document: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("context window must be an even number of at least 2 tokens, got {0}")]
    InvalidWindow(usize),
}
