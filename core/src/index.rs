use crate::document::Document;
use std::collections::{BTreeMap, BTreeSet};

/// Positional inverted index: term -> document id -> ascending, zero-based
/// positions of the term in that document's processed term sequence.
///
/// Rebuilt in lockstep with [`crate::weights::TfIdfMatrix`]; both are
/// derived from the same document set and agree on which (term, doc)
/// pairs exist. Documents and positions are walked in deterministic order,
/// so position lists come out ascending with no sort step.
#[derive(Debug, Default, Clone)]
pub struct PositionalIndex {
    postings: BTreeMap<String, BTreeMap<String, Vec<u32>>>,
}

impl PositionalIndex {
    pub fn build(documents: &BTreeMap<String, Document>) -> Self {
        let mut postings: BTreeMap<String, BTreeMap<String, Vec<u32>>> = BTreeMap::new();
        for (doc_id, doc) in documents {
            for (pos, term) in doc.terms().iter().enumerate() {
                postings
                    .entry(term.clone())
                    .or_default()
                    .entry(doc_id.clone())
                    .or_default()
                    .push(pos as u32);
            }
        }
        Self { postings }
    }

    /// Number of distinct indexed terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Terms with their posting maps, in ascending term order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<u32>>)> {
        self.postings.iter().map(|(term, docs)| (term.as_str(), docs))
    }

    /// Posting map for one term: document id -> ascending positions.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<String, Vec<u32>>> {
        self.postings.get(term)
    }

    /// Ids of the documents containing the term.
    pub fn documents_with(&self, term: &str) -> impl Iterator<Item = &str> {
        self.postings
            .get(term)
            .into_iter()
            .flat_map(|docs| docs.keys().map(String::as_str))
    }

    /// Documents containing the exact, contiguous, in-order term sequence.
    ///
    /// The empty phrase matches nothing. A document matches if any
    /// occurrence of the first term starts a run where term `i` of the
    /// phrase occurs at exactly `start + i`; the scan of a document stops
    /// at its first match, since only existence is reported.
    pub fn phrase_query(&self, phrase: &[String]) -> BTreeSet<String> {
        let mut matches = BTreeSet::new();
        let Some(first) = phrase.first() else {
            return matches;
        };
        let Some(first_docs) = self.postings.get(first) else {
            return matches;
        };

        for (doc_id, starts) in first_docs {
            'starts: for &start in starts {
                for (offset, term) in phrase.iter().enumerate().skip(1) {
                    let expected = start + offset as u32;
                    let at_expected = self
                        .postings
                        .get(term)
                        .and_then(|docs| docs.get(doc_id))
                        .is_some_and(|positions| positions.binary_search(&expected).is_ok());
                    if !at_expected {
                        continue 'starts;
                    }
                }
                matches.insert(doc_id.clone());
                break;
            }
        }
        matches
    }
}
