//! Shared wire envelope and translation helpers.

use crate::{KnowledgeError, KnowledgeResult, TableKind};
use assist_types::{Keyword, NonEmptyText};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Envelope shared by every table file.
///
/// ```yaml
/// table: symptoms
/// entries:
///   - ...
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableWire<E> {
    table: String,
    #[serde(default = "Vec::new")]
    entries: Vec<E>,
}

/// Parse a table file and return its raw wire entries.
///
/// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `entries[2].keywords`)
/// to the failing field when the YAML does not match the wire schema.
pub(crate) fn parse_table<E: DeserializeOwned>(
    kind: TableKind,
    yaml_text: &str,
) -> KnowledgeResult<Vec<E>> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    let wire = match serde_path_to_error::deserialize::<_, TableWire<E>>(deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            return Err(KnowledgeError::Translation(format!(
                "{} table schema mismatch at {path}: {source}",
                kind.wire_name()
            )));
        }
    };

    if wire.table != kind.wire_name() {
        return Err(KnowledgeError::TableMismatch {
            expected: kind.wire_name(),
            found: wire.table,
        });
    }

    Ok(wire.entries)
}

/// Validate a required label field.
pub(crate) fn required_text(
    context: &str,
    field: &str,
    value: String,
) -> KnowledgeResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| KnowledgeError::Validation(format!("{context}: {field} cannot be empty")))
}

/// Validate and normalise a keyword list. At least one keyword is required.
pub(crate) fn keywords(context: &str, raw: Vec<String>) -> KnowledgeResult<Vec<Keyword>> {
    if raw.is_empty() {
        return Err(KnowledgeError::Validation(format!(
            "{context}: at least one keyword is required"
        )));
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, kw)| {
            Keyword::new(kw).map_err(|_| {
                KnowledgeError::Validation(format!("{context}: keyword {i} cannot be empty"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Row {
        name: String,
    }

    #[test]
    fn missing_entries_parse_as_empty_table() {
        let rows = parse_table::<Row>(TableKind::Samples, "table: samples\n").expect("parse");
        assert!(rows.is_empty());
    }

    #[test]
    fn entries_are_returned_in_order() {
        let yaml = "table: clinical\nentries:\n  - name: a\n  - name: b\n";
        let rows = parse_table::<Row>(TableKind::Clinical, yaml).expect("parse");
        assert_eq!(
            rows,
            vec![Row { name: "a".into() }, Row { name: "b".into() }]
        );
    }

    #[test]
    fn unknown_envelope_key_reports_root_path() {
        let err = parse_table::<Row>(TableKind::Research, "table: research\nversion: 2\n")
            .expect_err("unknown key");
        match err {
            KnowledgeError::Translation(msg) => {
                assert!(msg.starts_with("research table schema mismatch at"), "{msg}")
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_header_is_a_table_mismatch() {
        let err = parse_table::<Row>(TableKind::Symptoms, "table: samples\nentries: []\n")
            .expect_err("mismatch");
        assert!(matches!(
            err,
            KnowledgeError::TableMismatch { expected: "symptoms", .. }
        ));
    }
}
