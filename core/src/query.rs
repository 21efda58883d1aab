use crate::error::{Error, Result};
use crate::index::PositionalIndex;
use crate::weights::TfIdfMatrix;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Boolean query operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
    Not,
}

impl FromStr for BooleanOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(BooleanOp::And),
            "OR" => Ok(BooleanOp::Or),
            "NOT" => Ok(BooleanOp::Not),
            other => Err(Error::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOp::And => write!(f, "AND"),
            BooleanOp::Or => write!(f, "OR"),
            BooleanOp::Not => write!(f, "NOT"),
        }
    }
}

/// Boolean query over already-processed terms. Terms outside the vocabulary
/// are dropped; if none survive the query has no usable terms and that is
/// reported distinctly from an empty match set.
///
/// AND keeps documents containing every surviving term, OR those containing
/// at least one, NOT those containing none (the complement of OR within the
/// full document set).
pub fn boolean_query(
    weights: &TfIdfMatrix,
    terms: &[String],
    op: BooleanOp,
) -> Result<BTreeSet<String>> {
    let surviving: BTreeSet<&str> = terms
        .iter()
        .map(String::as_str)
        .filter(|t| weights.has_term(t))
        .collect();
    if surviving.is_empty() {
        return Err(Error::NoUsableTerms);
    }

    let mut matches = BTreeSet::new();
    for doc_id in weights.document_ids() {
        let present = surviving.iter().filter(|t| weights.contains(t, doc_id)).count();
        let keep = match op {
            BooleanOp::And => present == surviving.len(),
            BooleanOp::Or => present > 0,
            BooleanOp::Not => present == 0,
        };
        if keep {
            matches.insert(doc_id.clone());
        }
    }
    Ok(matches)
}

/// Cosine-similarity ranking of documents against an already-processed
/// query, descending by score; ties break by ascending document id.
///
/// The query vector uses the same `1 + log2(count)` TF transform over the
/// collection's vocabulary and the corpus IDF vector. Candidates come from
/// the union of the index postings of the query terms; documents sharing no
/// query term can only score 0 and are never visited. A zero query norm
/// means there is no signal to rank on and yields an empty result; zero
/// scores and zero-norm documents are excluded.
pub fn similarity_query(
    weights: &TfIdfMatrix,
    index: &PositionalIndex,
    terms: &[String],
) -> Result<Vec<(String, f64)>> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for term in terms {
        if weights.has_term(term) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return Err(Error::NoUsableTerms);
    }

    let mut query_weights: HashMap<&str, f64> = HashMap::new();
    let mut norm_sq = 0.0;
    for (term, count) in &counts {
        let tf = 1.0 + (*count as f64).log2();
        let weight = tf * weights.idf(term);
        if weight != 0.0 {
            norm_sq += weight * weight;
            query_weights.insert(*term, weight);
        }
    }
    if norm_sq == 0.0 {
        return Ok(Vec::new());
    }
    let query_norm = norm_sq.sqrt();

    let mut candidates: BTreeSet<&str> = BTreeSet::new();
    for term in counts.keys() {
        candidates.extend(index.documents_with(term));
    }

    let mut ranked = Vec::new();
    for doc_id in candidates {
        let doc_norm = weights.norm(doc_id);
        if doc_norm == 0.0 {
            continue;
        }
        let dot: f64 = query_weights
            .iter()
            .map(|(term, w)| w * weights.tf_idf(term, doc_id))
            .sum();
        let score = dot / (query_norm * doc_norm);
        if score != 0.0 {
            ranked.push((doc_id.to_string(), score));
        }
    }

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_parses_case_insensitively() {
        assert_eq!("and".parse::<BooleanOp>().unwrap(), BooleanOp::And);
        assert_eq!(" OR ".parse::<BooleanOp>().unwrap(), BooleanOp::Or);
        assert_eq!("Not".parse::<BooleanOp>().unwrap(), BooleanOp::Not);
    }

    #[test]
    fn unknown_operator_is_invalid_input() {
        assert!(matches!(
            "XOR".parse::<BooleanOp>(),
            Err(Error::InvalidOperator(op)) if op == "XOR"
        ));
    }
}
