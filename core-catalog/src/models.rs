//! Domain models for the catalog browser
//!
//! Records arrive as the JSON the server embeds in each listing page (songs,
//! artists and units all share one list component), so a [`Record`] is a thin
//! wrapper over `serde_json::Value` rather than one struct per entity.

use crate::error::{CatalogError, Result};
use crate::field;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Records
// =============================================================================

/// One searchable/filterable catalog entry (song, artist or unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw JSON value of the record
    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Resolve a dotted path on this record.
    pub fn get(&self, path: &str) -> Option<&Value> {
        field::resolve(&self.0, path)
    }

    /// Resolve the record identifier from a prioritized list of field names.
    ///
    /// The first candidate holding a non-empty value wins (see
    /// [`is_empty_value`]).
    pub fn id(&self, candidates: &[String]) -> Option<String> {
        field::first_present(&self.0, candidates).and_then(canonical_string)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Category shown in the category dropdown.
///
/// Accepts both the server's model shape (`{"CategoryID": 5, "Name": "..."}`)
/// and the client shape (`{"id": "5", "displayName": "..."}`). The id is kept
/// in canonical string form so numeric and string ids compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "CategoryID", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "displayName", alias = "Name")]
    pub display_name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    canonical_string(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a scalar id, found {}", value)))
}

// =============================================================================
// Value helpers
// =============================================================================

/// Whether a value counts as "not set" for id/category lookups.
///
/// Mirrors how the listing pages treat missing data: `null`, `""`, `0` and
/// `false` are all considered absent.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Canonical string form of a scalar value.
///
/// Integral floats drop their fraction so `5`, `5.0` and `"5"` all map to
/// `"5"`. Arrays, objects and `null` have no canonical form.
pub fn canonical_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f.abs() < 1e15 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// =============================================================================
// Payload parsing
// =============================================================================

/// Parse the record list a listing page embeds as JSON.
///
/// The payload must be an array of objects.
pub fn records_from_json(payload: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Array(items) = value else {
        return Err(CatalogError::InvalidInput {
            field: "data".to_string(),
            message: "expected a JSON array of records".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if item.is_object() {
                Ok(Record::new(item))
            } else {
                Err(CatalogError::InvalidInput {
                    field: "data".to_string(),
                    message: format!("record {} is not an object", index),
                })
            }
        })
        .collect()
}

/// Parse the category list a listing page embeds as JSON.
pub fn categories_from_json(payload: &str) -> Result<Vec<Category>> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id_fields() -> Vec<String> {
        ["SongID", "ArtistID", "UnitID", "CategoryID", "id"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_record_id_priority() {
        let record = Record::new(json!({"ArtistID": 7, "id": "fallback"}));
        assert_eq!(record.id(&id_fields()), Some("7".to_string()));
    }

    #[test]
    fn test_record_id_skips_empty_candidates() {
        let record = Record::new(json!({"SongID": 0, "ArtistID": "", "UnitID": null, "id": 3}));
        assert_eq!(record.id(&id_fields()), Some("3".to_string()));
    }

    #[test]
    fn test_record_id_missing() {
        let record = Record::new(json!({"NameOriginal": "Aqours"}));
        assert_eq!(record.id(&id_fields()), None);
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(canonical_string(&json!(5)), Some("5".to_string()));
        assert_eq!(canonical_string(&json!(5.0)), Some("5".to_string()));
        assert_eq!(canonical_string(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(canonical_string(&json!("5")), Some("5".to_string()));
        assert_eq!(canonical_string(&json!(null)), None);
        assert_eq!(canonical_string(&json!([1])), None);
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!(0)));
        assert!(is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!("0")));
        assert!(!is_empty_value(&json!([])));
    }

    #[test]
    fn test_category_from_server_shape() {
        let categories =
            categories_from_json(r#"[{"CategoryID": 5, "Name": "Love Live! Sunshine!!"}]"#).unwrap();
        assert_eq!(categories, vec![Category::new("5", "Love Live! Sunshine!!")]);
    }

    #[test]
    fn test_category_from_client_shape() {
        let categories = categories_from_json(r#"[{"id": "12", "displayName": "Nijigasaki"}]"#).unwrap();
        assert_eq!(categories[0].id, "12");
        assert_eq!(categories[0].display_name, "Nijigasaki");
    }

    #[test]
    fn test_category_rejects_object_id() {
        let result = categories_from_json(r#"[{"id": {"nested": 1}, "displayName": "x"}]"#);
        assert!(matches!(result, Err(CatalogError::InvalidJson(_))));
    }

    #[test]
    fn test_records_from_json() {
        let records = records_from_json(r#"[{"SongID": 1}, {"SongID": 2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("SongID"), Some(&json!(2)));
    }

    #[test]
    fn test_records_from_json_rejects_non_array() {
        let result = records_from_json(r#"{"SongID": 1}"#);
        assert!(matches!(result, Err(CatalogError::InvalidInput { .. })));
    }

    #[test]
    fn test_records_from_json_rejects_scalar_element() {
        let err = records_from_json(r#"[{"SongID": 1}, 2]"#).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_records_from_json_rejects_malformed() {
        assert!(matches!(
            records_from_json("[{"),
            Err(CatalogError::InvalidJson(_))
        ));
    }
}
