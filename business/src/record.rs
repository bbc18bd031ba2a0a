//! Records and column inference.
//!
//! A record is one JSON object out of the array served at `/csv-data`; it
//! represents one table row. No schema is enforced on the client side: the
//! server decides which fields exist, and the column set is inferred from
//! the shape of the response.

use serde_json::Value;
use std::borrow::Cow;

/// One fetched row: a mapping from field name to scalar value.
///
/// `serde_json` is built with `preserve_order`, so iterating a record
/// yields keys in the order the server serialized them.
pub type Record = serde_json::Map<String, Value>;

/// Tells the table widget how to render one column: `title` is the header
/// label, `data` the field name used to look the cell up in each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub title: String,
    pub data: String,
}

impl ColumnDescriptor {
    fn from_key(key: &str) -> Self {
        Self {
            title: key.to_owned(),
            data: key.to_owned(),
        }
    }
}

/// Derive column descriptors from the key set of the *first* record.
///
/// Keys that only appear in later records are not picked up; records
/// missing a derived key render that cell empty. An empty slice derives
/// zero columns.
pub fn derive_columns(records: &[Record]) -> Vec<ColumnDescriptor> {
    records
        .first()
        .map(|first| first.keys().map(|k| ColumnDescriptor::from_key(k)).collect())
        .unwrap_or_default()
}

/// Parse a `/csv-data` response body as an ordered sequence of records.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Render a cell value as display text. Null renders empty, like a missing
/// cell does.
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        // The server only emits scalars; anything else falls back to JSON.
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn columns_come_from_first_record_in_insertion_order() {
        let records = vec![
            record(json!({"time": "2026-08-07 10:00:00", "label": "buoy", "conf": 0.92})),
            record(json!({"time": "2026-08-07 09:59:00", "label": "ship", "conf": 0.4})),
        ];

        let columns = derive_columns(&records);
        let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["time", "label", "conf"]);
        // The key doubles as the accessor.
        assert!(columns.iter().all(|c| c.title == c.data));
    }

    #[test]
    fn empty_input_derives_zero_columns() {
        assert!(derive_columns(&[]).is_empty());
    }

    #[test]
    fn keys_absent_from_first_record_are_omitted() {
        // Regression test: later records may carry extra keys; the column
        // set still only reflects the first record.
        let records = vec![
            record(json!({"a": 1})),
            record(json!({"a": 2, "b": 3, "c": 4})),
        ];

        let columns = derive_columns(&records);
        let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["a"]);
    }

    #[test]
    fn parse_records_accepts_empty_array() {
        let records = parse_records(b"[]").expect("empty array should parse");
        assert!(records.is_empty());
    }

    #[test]
    fn parse_records_rejects_non_array_body() {
        assert!(parse_records(b"{\"a\": 1}").is_err());
        assert!(parse_records(b"not json").is_err());
    }

    #[test]
    fn cell_text_renders_scalars() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("ship")), "ship");
        assert_eq!(cell_text(&json!(3.25)), "3.25");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(true)), "true");
    }
}
