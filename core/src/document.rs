/// A stored document: identifier, original text, and the processed term
/// sequence. Immutable once stored; the update path is remove + re-insert.
#[derive(Debug, Clone)]
pub struct Document {
    id: String,
    text: String,
    terms: Vec<String>,
}

impl Document {
    pub(crate) fn new(id: impl Into<String>, text: impl Into<String>, terms: Vec<String>) -> Self {
        Self { id: id.into(), text: text.into(), terms }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw text as ingested. Opaque to the index and query layers.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ordered term sequence; indices into this slice are the positions
    /// recorded by the positional inverted index.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
