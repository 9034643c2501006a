//! Positional inverted index with TF-IDF scoring, conjunctive queries and
//! context snippets over a directory of plain-text documents.

pub mod config;
pub mod corpus;
pub mod error;
mod index;
pub mod persist;
pub mod query;
mod scoring;
pub mod snippet;
pub mod tokenizer;

pub use config::EngineConfig;
pub use error::{ConfigError, SnippetError};
pub use index::{DocId, DocMeta, IndexBuilder, InvertedIndex, Posting, TermId};
pub use query::{evaluate, QueryOutcome, RankedHit, TermHit, TermReport};
pub use scoring::{idf_from_counts, tf_from_count};
pub use snippet::{DocumentSource, SnippetExtractor};
pub use tokenizer::Stoplist;
