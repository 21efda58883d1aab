use crate::document::Document;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Vocabulary plus the TF, IDF and TF-IDF matrices and per-document norms
/// derived from the current document set.
///
/// Rows are vocabulary terms in ascending order, columns are documents in
/// ascending id order; the dense buffers are row-major. The whole structure
/// is rebuilt from scratch on every collection mutation and replaced
/// atomically with the positional index, so readers never observe a row or
/// column set that disagrees with the collection.
#[derive(Debug, Default, Clone)]
pub struct TfIdfMatrix {
    vocabulary: Vec<String>,
    term_rows: HashMap<String, usize>,
    doc_ids: Vec<String>,
    doc_cols: HashMap<String, usize>,
    tf: Vec<f64>,
    idf: Vec<f64>,
    tfidf: Vec<f64>,
    norms: Vec<f64>,
}

impl TfIdfMatrix {
    /// Derives all weight structures from the document set. An empty set
    /// yields the empty matrix (all structures reset, no error).
    pub fn build(documents: &BTreeMap<String, Document>) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        let mut terms: BTreeSet<&str> = BTreeSet::new();
        for doc in documents.values() {
            for term in doc.terms() {
                terms.insert(term);
            }
        }
        let vocabulary: Vec<String> = terms.into_iter().map(str::to_string).collect();
        let term_rows: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(row, term)| (term.clone(), row))
            .collect();
        let doc_ids: Vec<String> = documents.keys().cloned().collect();
        let doc_cols: HashMap<String, usize> = doc_ids
            .iter()
            .enumerate()
            .map(|(col, id)| (id.clone(), col))
            .collect();

        let rows = vocabulary.len();
        let cols = doc_ids.len();

        // TF: 1 + log2(count) where the raw count is positive, exactly 0 otherwise.
        let mut tf = vec![0.0; rows * cols];
        for (col, doc) in documents.values().enumerate() {
            let mut counts: HashMap<&str, u64> = HashMap::new();
            for term in doc.terms() {
                *counts.entry(term).or_insert(0) += 1;
            }
            for (term, count) in counts {
                let row = term_rows[term];
                tf[row * cols + col] = 1.0 + (count as f64).log2();
            }
        }

        // IDF: log2(N / df). df cannot be 0 for a vocabulary term, but the
        // guard keeps a broken caller from dividing by zero.
        let mut idf = vec![0.0; rows];
        for (row, slot) in idf.iter_mut().enumerate() {
            let df = (0..cols).filter(|col| tf[row * cols + col] > 0.0).count();
            *slot = if df == 0 { 0.0 } else { (cols as f64 / df as f64).log2() };
        }

        let mut tfidf = vec![0.0; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                tfidf[row * cols + col] = tf[row * cols + col] * idf[row];
            }
        }

        let mut norms = vec![0.0; cols];
        for col in 0..cols {
            let sum_sq: f64 = (0..rows).map(|row| tfidf[row * cols + col].powi(2)).sum();
            norms[col] = sum_sq.sqrt();
        }

        Self { vocabulary, term_rows, doc_ids, doc_cols, tf, idf, tfidf, norms }
    }

    /// Sorted set of all distinct terms across the document set.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Document ids in column order (ascending).
    pub fn document_ids(&self) -> &[String] {
        &self.doc_ids
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.term_rows.contains_key(term)
    }

    /// True when the term occurs in the document (raw count > 0).
    pub fn contains(&self, term: &str, doc_id: &str) -> bool {
        self.tf(term, doc_id) > 0.0
    }

    pub fn tf(&self, term: &str, doc_id: &str) -> f64 {
        self.cell(&self.tf, term, doc_id)
    }

    /// IDF for a term; 0 for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f64 {
        self.term_rows.get(term).map_or(0.0, |&row| self.idf[row])
    }

    pub fn tf_idf(&self, term: &str, doc_id: &str) -> f64 {
        self.cell(&self.tfidf, term, doc_id)
    }

    /// Euclidean norm of the document's TF-IDF column; 0 for unknown ids.
    pub fn norm(&self, doc_id: &str) -> f64 {
        self.doc_cols.get(doc_id).map_or(0.0, |&col| self.norms[col])
    }

    fn cell(&self, matrix: &[f64], term: &str, doc_id: &str) -> f64 {
        match (self.term_rows.get(term), self.doc_cols.get(doc_id)) {
            (Some(&row), Some(&col)) => matrix[row * self.doc_ids.len() + col],
            _ => 0.0,
        }
    }
}
