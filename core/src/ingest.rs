use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// The one internal record shape. External corpus records are normalized
/// into this at the boundary; nothing past this point branches on field
/// spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "id")]
    name: Option<String>,
    #[serde(alias = "text")]
    content: Option<String>,
}

/// Reads and parses a corpus file. See [`parse_corpus`].
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<SourceRecord>> {
    let raw = std::fs::read_to_string(path)?;
    parse_corpus(&raw)
}

/// Parses a JSON corpus in either accepted external shape: a list of
/// objects carrying `name`/`id` and `content`/`text` fields, or a map of
/// `name -> content`. Malformed records (missing identifier or body, or
/// non-string values) are skipped with a warning, never fatal; a corpus
/// that is not valid JSON at all is an error.
pub fn parse_corpus(raw: &str) -> Result<Vec<SourceRecord>> {
    let value: Value = serde_json::from_str(raw)?;
    let records = match value {
        Value::Array(items) => items.into_iter().filter_map(record_from_value).collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(name, body)| match body {
                Value::String(text) => Some(SourceRecord { id: name, text }),
                _ => {
                    tracing::warn!(%name, "skipping corpus entry with non-string body");
                    None
                }
            })
            .collect(),
        _ => {
            tracing::warn!("corpus is neither a list of records nor a name/content map");
            Vec::new()
        }
    };
    Ok(records)
}

fn record_from_value(value: Value) -> Option<SourceRecord> {
    match serde_json::from_value::<RawRecord>(value) {
        Ok(RawRecord { name: Some(id), content: Some(text) }) => Some(SourceRecord { id, text }),
        Ok(_) => {
            tracing::warn!("skipping corpus record missing identifier or body");
            None
        }
        Err(err) => {
            tracing::warn!(%err, "skipping malformed corpus record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_list_with_name_and_content() {
        let records = parse_corpus(r#"[{"name": "D1", "content": "o sol"}]"#).unwrap();
        assert_eq!(records, [SourceRecord { id: "D1".into(), text: "o sol".into() }]);
    }

    #[test]
    fn accepts_id_and_text_spellings() {
        let records = parse_corpus(r#"[{"id": "D2", "text": "o vento"}]"#).unwrap();
        assert_eq!(records, [SourceRecord { id: "D2".into(), text: "o vento".into() }]);
    }

    #[test]
    fn parses_map_of_name_to_content() {
        let records = parse_corpus(r#"{"D1": "o sol", "D2": "o vento"}"#).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.contains(&SourceRecord { id: "D1".into(), text: "o sol".into() }));
    }

    #[test]
    fn skips_records_missing_identifier_or_body() {
        let records = parse_corpus(
            r#"[{"content": "sem nome"}, {"name": "D3"}, {"name": "D4", "content": "ok"}, 7]"#,
        )
        .unwrap();
        assert_eq!(records, [SourceRecord { id: "D4".into(), text: "ok".into() }]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_corpus("not json").is_err());
    }

    #[test]
    fn loads_corpus_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "D1", "content": "o sol"}}]"#).unwrap();
        let records = load_corpus(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "D1");
    }
}
