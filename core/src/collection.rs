use crate::document::Document;
use crate::error::{Error, Result};
use crate::index::PositionalIndex;
use crate::ingest::SourceRecord;
use crate::query::{self, BooleanOp};
use crate::tokenizer::{PortugueseProcessor, TermProcessor};
use crate::weights::TfIdfMatrix;
use std::collections::{BTreeMap, BTreeSet};

/// The mutable document collection and its derived structures.
///
/// Owns the document store; every committed mutation recomputes the weight
/// matrix and the positional index wholesale from the current documents —
/// O(total term occurrences), not incremental. Both replacements are built
/// completely before either is swapped in, so queries only ever see a pair
/// derived from the same document set.
pub struct Collection {
    processor: Box<dyn TermProcessor>,
    documents: BTreeMap<String, Document>,
    weights: TfIdfMatrix,
    index: PositionalIndex,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    pub fn new() -> Self {
        Self::with_processor(Box::new(PortugueseProcessor::new()))
    }

    pub fn with_processor(processor: Box<dyn TermProcessor>) -> Self {
        Self {
            processor,
            documents: BTreeMap::new(),
            weights: TfIdfMatrix::default(),
            index: PositionalIndex::default(),
        }
    }

    /// Processes and stores one document, then rebuilds the derived
    /// structures. Refused (collection unchanged) when the id is empty or
    /// already present, or when processing yields no terms.
    pub fn insert(&mut self, id: &str, text: &str) -> Result<()> {
        self.stage(id, text)?;
        self.rebuild();
        Ok(())
    }

    /// Applies [`Collection::insert`] semantics to every record, deferring
    /// the rebuild until the whole batch is staged: one reconstruction per
    /// batch instead of one per document. Invalid or duplicate records are
    /// skipped with a warning. Returns the number of documents added.
    pub fn insert_batch(&mut self, records: &[SourceRecord]) -> usize {
        let mut added = 0;
        for record in records {
            match self.stage(&record.id, &record.text) {
                Ok(()) => added += 1,
                Err(err) => tracing::warn!(id = %record.id, %err, "skipping record"),
            }
        }
        if added > 0 {
            self.rebuild();
        }
        added
    }

    /// Removes a document and rebuilds. Unknown ids are an error and leave
    /// the collection untouched.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if self.documents.remove(id).is_none() {
            return Err(Error::DocumentNotFound(id.to_string()));
        }
        self.rebuild();
        Ok(())
    }

    fn stage(&mut self, id: &str, text: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::EmptyId);
        }
        if self.documents.contains_key(id) {
            return Err(Error::DuplicateDocument(id.to_string()));
        }
        let terms = self.processor.process(text);
        if terms.is_empty() {
            return Err(Error::EmptyDocument(id.to_string()));
        }
        self.documents.insert(id.to_string(), Document::new(id, text, terms));
        Ok(())
    }

    fn rebuild(&mut self) {
        let weights = TfIdfMatrix::build(&self.documents);
        let index = PositionalIndex::build(&self.documents);
        self.weights = weights;
        self.index = index;
        tracing::debug!(
            documents = self.documents.len(),
            terms = self.weights.vocabulary().len(),
            "derived structures rebuilt"
        );
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Sorted vocabulary of the current document set.
    pub fn vocabulary(&self) -> &[String] {
        self.weights.vocabulary()
    }

    pub fn weights(&self) -> &TfIdfMatrix {
        &self.weights
    }

    pub fn index(&self) -> &PositionalIndex {
        &self.index
    }

    /// Boolean AND/OR/NOT query over the processed query text.
    pub fn boolean_query(&self, text: &str, op: BooleanOp) -> Result<BTreeSet<String>> {
        let terms = self.processor.process(text);
        query::boolean_query(&self.weights, &terms, op)
    }

    /// Cosine-similarity ranking for the processed query text, descending
    /// by score with ascending-id tie-break.
    pub fn similarity_query(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let terms = self.processor.process(text);
        query::similarity_query(&self.weights, &self.index, &terms)
    }

    /// Exact-phrase query over the processed query text. Text that
    /// processes to nothing matches nothing.
    pub fn phrase_query(&self, text: &str) -> BTreeSet<String> {
        let terms = self.processor.process(text);
        self.index.phrase_query(&terms)
    }
}
