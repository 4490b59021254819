//! Dataset names, shape contracts, and record lookup.
//!
//! Each [`DatasetName`] has exactly one [`Shape`] and one [`Identifier`]
//! strategy. Documents are normalized into a [`Dataset`] once, at load time,
//! so callers never branch on the JSON type of a document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::slug::title_to_slug;

/// One entry of a dataset: an arbitrary JSON object.
pub type Record = serde_json::Map<String, Value>;

/// Logical dataset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetName {
    /// Projects, keyed by id.
    Projects,
    /// Portfolio entries, addressed by title slug.
    Portfolio,
    /// Academic classes, addressed by position.
    Academics,
}

/// Top-level layout of a dataset document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Object mapping identifier → record.
    Keyed,
    /// Array of records, or an object holding that array under `field`.
    Sequence {
        /// Name of the wrapping field.
        field: &'static str,
    },
}

/// How records are identified in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier {
    /// Raw mapping key.
    Key,
    /// Slug derived from the record's `title`.
    Slug,
    /// Zero-based position in the sequence.
    Index,
}

impl DatasetName {
    /// All dataset names.
    pub const ALL: [Self; 3] = [Self::Projects, Self::Portfolio, Self::Academics];

    /// Name used in logs and errors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Portfolio => "portfolio",
            Self::Academics => "academics",
        }
    }

    /// Shape contract for this dataset.
    #[must_use]
    pub fn shape(self) -> Shape {
        match self {
            Self::Projects => Shape::Keyed,
            Self::Portfolio => Shape::Sequence { field: "entries" },
            Self::Academics => Shape::Sequence { field: "classes" },
        }
    }

    /// Identifier strategy for this dataset.
    #[must_use]
    pub fn identifier(self) -> Identifier {
        match self {
            Self::Projects => Identifier::Key,
            Self::Portfolio => Identifier::Slug,
            Self::Academics => Identifier::Index,
        }
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown dataset '{s}'"))
    }
}

/// Sequence documents come in two layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum SequenceDocument {
    Bare(Vec<Record>),
    Wrapped(Record),
}

/// Records, stored by how they are addressed.
#[derive(Debug, Clone, PartialEq)]
enum Records {
    Keyed(Vec<(String, Record)>),
    Slugged(Vec<Record>),
    Indexed(Vec<Record>),
}

impl Records {
    /// Wrap sequence records for the given identifier strategy.
    fn sequence(identifier: Identifier, records: Vec<Record>) -> Self {
        match identifier {
            Identifier::Slug => Self::Slugged(records),
            Identifier::Index => Self::Indexed(records),
            // sequences carry no keys, so a key lookup reads the title slug
            Identifier::Key => Self::Slugged(records),
        }
    }
}

/// A decoded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: DatasetName,
    records: Records,
}

/// A record paired with its identifier.
#[derive(Debug, Serialize, PartialEq)]
pub struct Entry<'a> {
    /// URL identifier, `None` when the record cannot be addressed
    /// (a slug-identified record without a string `title`).
    pub id: Option<String>,
    /// The record, unchanged.
    pub record: &'a Record,
}

impl Dataset {
    /// Empty dataset of the given name.
    #[must_use]
    pub fn empty(name: DatasetName) -> Self {
        let records = match name.shape() {
            Shape::Keyed => Records::Keyed(Vec::new()),
            Shape::Sequence { .. } => Records::sequence(name.identifier(), Vec::new()),
        };
        Self { name, records }
    }

    /// Decode a parsed document against the dataset's shape contract.
    ///
    /// # Errors
    ///
    /// Returns a description of the mismatch if the document has the wrong
    /// top-level type, lacks its wrapping field, or holds non-object records.
    pub fn decode(name: DatasetName, document: Value) -> Result<Self, String> {
        let records = match name.shape() {
            Shape::Keyed => Records::Keyed(decode_keyed(document)?),
            Shape::Sequence { field } => {
                Records::sequence(name.identifier(), decode_sequence(document, field)?)
            }
        };
        Ok(Self { name, records })
    }

    /// Dataset name.
    #[must_use]
    pub fn name(&self) -> DatasetName {
        self.name
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.records {
            Records::Keyed(records) => records.len(),
            Records::Slugged(records) | Records::Indexed(records) => records.len(),
        }
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in document order, paired with their identifiers.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'_>> {
        match &self.records {
            Records::Keyed(records) => records
                .iter()
                .map(|(key, record)| Entry {
                    id: Some(key.clone()),
                    record,
                })
                .collect(),
            Records::Slugged(records) => records
                .iter()
                .map(|record| Entry {
                    id: record_slug(record),
                    record,
                })
                .collect(),
            Records::Indexed(records) => records
                .iter()
                .enumerate()
                .map(|(index, record)| Entry {
                    id: Some(index.to_string()),
                    record,
                })
                .collect(),
        }
    }

    /// Look up a record by identifier.
    ///
    /// Index identifiers must be plain decimal digits; anything else,
    /// including negative numbers, never matches.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Record> {
        match &self.records {
            Records::Keyed(records) => records
                .iter()
                .find(|(key, _)| key == id)
                .map(|(_, record)| record),
            Records::Slugged(records) => records
                .iter()
                .find(|record| record_slug(record).is_some_and(|slug| slug == id)),
            Records::Indexed(records) => parse_index(id).and_then(|index| records.get(index)),
        }
    }

    /// The dataset as JSON: a mapping for keyed datasets, an array otherwise.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match &self.records {
            Records::Keyed(records) => Value::Object(
                records
                    .iter()
                    .map(|(key, record)| (key.clone(), Value::Object(record.clone())))
                    .collect(),
            ),
            Records::Slugged(records) | Records::Indexed(records) => {
                Value::Array(records.iter().cloned().map(Value::Object).collect())
            }
        }
    }
}

fn decode_keyed(document: Value) -> Result<Vec<(String, Record)>, String> {
    let map = match document {
        Value::Object(map) => map,
        other => return Err(format!("expected an object, found {}", type_name(&other))),
    };

    map.into_iter()
        .map(|(key, value)| match value {
            Value::Object(record) => Ok((key, record)),
            other => Err(format!(
                "entry '{key}' should be an object, found {}",
                type_name(&other)
            )),
        })
        .collect()
}

fn decode_sequence(document: Value, field: &str) -> Result<Vec<Record>, String> {
    let found = type_name(&document);
    let document: SequenceDocument = serde_json::from_value(document).map_err(|_| {
        format!("expected an array of objects or an object with '{field}', found {found}")
    })?;

    match document {
        SequenceDocument::Bare(records) => Ok(records),
        SequenceDocument::Wrapped(mut wrapper) => {
            let inner = wrapper
                .remove(field)
                .ok_or_else(|| format!("missing '{field}' field"))?;
            serde_json::from_value(inner)
                .map_err(|e| format!("'{field}' should be an array of objects: {e}"))
        }
    }
}

fn record_slug(record: &Record) -> Option<String> {
    record
        .get("title")
        .and_then(Value::as_str)
        .map(title_to_slug)
}

fn parse_index(id: &str) -> Option<usize> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn decode(name: DatasetName, document: Value) -> Dataset {
        Dataset::decode(name, document).unwrap()
    }

    #[test]
    fn test_dataset_name_round_trips_through_str() {
        for name in DatasetName::ALL {
            assert_eq!(name.as_str().parse::<DatasetName>().unwrap(), name);
        }
        assert!("quizzes".parse::<DatasetName>().is_err());
    }

    #[test]
    fn test_bare_and_wrapped_sequences_decode_identically() {
        let bare = decode(
            DatasetName::Academics,
            json!([{"name": "Data Structures"}, {"name": "Compilers"}]),
        );
        let wrapped = decode(
            DatasetName::Academics,
            json!({"classes": [{"name": "Data Structures"}, {"name": "Compilers"}]}),
        );

        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 2);
    }

    #[test]
    fn test_wrapped_sequence_uses_dataset_field() {
        let dataset = decode(
            DatasetName::Portfolio,
            json!({"entries": [{"title": "Orbit"}], "classes": [{"title": "Ignored"}]}),
        );

        assert_eq!(dataset.len(), 1);
        assert!(dataset.find("orbit").is_some());
    }

    #[test]
    fn test_wrapped_sequence_without_field_is_rejected() {
        let err = Dataset::decode(DatasetName::Portfolio, json!({"items": []})).unwrap_err();

        assert_eq!(err, "missing 'entries' field");
    }

    #[test]
    fn test_sequence_rejects_scalars() {
        let err = Dataset::decode(DatasetName::Academics, json!(42)).unwrap_err();

        assert!(err.contains("found a number"), "{err}");
    }

    #[test]
    fn test_sequence_rejects_non_object_records() {
        assert!(Dataset::decode(DatasetName::Academics, json!(["a", "b"])).is_err());
        assert!(Dataset::decode(DatasetName::Academics, json!({"classes": [1]})).is_err());
    }

    #[test]
    fn test_keyed_rejects_arrays() {
        let err = Dataset::decode(DatasetName::Projects, json!([{"title": "x"}])).unwrap_err();

        assert_eq!(err, "expected an object, found an array");
    }

    #[test]
    fn test_keyed_rejects_non_object_entries() {
        let err = Dataset::decode(DatasetName::Projects, json!({"alpha": "text"})).unwrap_err();

        assert!(err.contains("'alpha'"), "{err}");
    }

    #[test]
    fn test_keyed_lookup_by_key() {
        let dataset = decode(
            DatasetName::Projects,
            json!({"alpha": {"title": "Alpha"}, "beta": {"title": "Beta"}}),
        );

        assert_eq!(dataset.find("beta").unwrap()["title"], "Beta");
        assert!(dataset.find("Beta").is_none());
        assert!(dataset.find("0").is_none());
    }

    #[test]
    fn test_slug_lookup() {
        let dataset = decode(
            DatasetName::Portfolio,
            json!([{"title": "Space & Time"}, {"title": "Rocket Telemetry"}]),
        );

        assert_eq!(
            dataset.find("space-and-time").unwrap()["title"],
            "Space & Time"
        );
        assert!(dataset.find("Space & Time").is_none());
        assert!(dataset.find("1").is_none());
    }

    #[test]
    fn test_index_lookup_bounds() {
        let dataset = decode(
            DatasetName::Academics,
            json!([{"name": "First"}, {"name": "Second"}]),
        );

        assert_eq!(dataset.find("0").unwrap()["name"], "First");
        assert_eq!(dataset.find("1").unwrap()["name"], "Second");
        assert!(dataset.find("2").is_none());
        assert!(dataset.find("-1").is_none());
        assert!(dataset.find("+1").is_none());
        assert!(dataset.find("").is_none());
        assert!(dataset.find("99999999999999999999999").is_none());
    }

    #[test]
    fn test_sequence_lookup_follows_identifier() {
        let records = json!([{"title": "Compilers"}, {"title": "0"}]);

        let academics = decode(DatasetName::Academics, records.clone());
        assert!(academics.find("compilers").is_none());
        assert_eq!(academics.find("1").unwrap()["title"], "0");

        let portfolio = decode(DatasetName::Portfolio, records);
        assert_eq!(portfolio.find("compilers").unwrap()["title"], "Compilers");
        assert_eq!(portfolio.find("0").unwrap()["title"], "0");
        assert!(portfolio.find("1").is_none());
    }

    #[test]
    fn test_entries_use_dataset_identifier() {
        let portfolio = decode(
            DatasetName::Portfolio,
            json!([{"title": "Orbit Lab"}, {"summary": "untitled"}]),
        );
        let ids: Vec<_> = portfolio.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Some("orbit-lab".to_owned()), None]);

        let academics = decode(DatasetName::Academics, json!([{}, {}]));
        let ids: Vec<_> = academics.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Some("0".to_owned()), Some("1".to_owned())]);
    }

    #[test]
    fn test_keyed_preserves_document_order() {
        let dataset = decode(
            DatasetName::Projects,
            serde_json::from_str(r#"{"zeta": {}, "alpha": {}, "mid": {}}"#).unwrap(),
        );
        let ids: Vec<_> = dataset.entries().into_iter().filter_map(|e| e.id).collect();

        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&dataset.to_value()).unwrap(),
            r#"{"zeta":{},"alpha":{},"mid":{}}"#
        );
    }

    #[test]
    fn test_empty_matches_shape() {
        assert_eq!(Dataset::empty(DatasetName::Projects).to_value(), json!({}));
        assert_eq!(Dataset::empty(DatasetName::Academics).to_value(), json!([]));
        assert!(Dataset::empty(DatasetName::Portfolio).is_empty());
    }

    #[test]
    fn test_entry_serialization() {
        let dataset = decode(DatasetName::Portfolio, json!([{"title": "Orbit", "year": 2024}]));
        let json = serde_json::to_value(dataset.entries()).unwrap();

        assert_eq!(
            json,
            json!([{"id": "orbit", "record": {"title": "Orbit", "year": 2024}}])
        );
    }
}
