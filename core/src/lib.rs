//! In-memory text collection with TF-IDF weights, a positional inverted
//! index, and boolean, phrase and cosine-similarity queries. Derived
//! structures are rebuilt wholesale after every committed mutation.

pub mod collection;
pub mod document;
pub mod error;
pub mod index;
pub mod ingest;
pub mod query;
pub mod tokenizer;
pub mod weights;

pub use collection::Collection;
pub use document::Document;
pub use error::{Error, Result};
pub use index::PositionalIndex;
pub use ingest::{load_corpus, parse_corpus, SourceRecord};
pub use query::BooleanOp;
pub use tokenizer::{PortugueseProcessor, TermProcessor};
pub use weights::TfIdfMatrix;
