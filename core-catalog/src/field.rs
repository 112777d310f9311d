//! Dotted-path field resolution
//!
//! Search fields are configured as dotted paths (`"Category.Name"`,
//! `"Artists.0.NameOriginal"`); a path ending on an array (`"Artists"`)
//! searches every element. Resolution never fails: a missing segment simply
//! yields nothing, which the search predicate treats as "no match".

use crate::matcher::Matcher;
use crate::models::is_empty_value;
use serde_json::Value;
use std::borrow::Cow;

/// Keys holding the original-language name of a nested entity.
pub const NAME_ORIGINAL_KEYS: &[&str] = &["NameOriginal", "nameOriginal"];

/// Keys holding the English name of a nested entity.
pub const NAME_ENGLISH_KEYS: &[&str] = &["NameEnglish", "nameEnglish"];

/// Walk `path` through nested objects.
///
/// Numeric segments index into arrays. Returns `None` as soon as a segment is
/// missing or `null`.
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| {
        let next = match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        next.filter(|v| !v.is_null())
    })
}

/// First path in `paths` resolving to a non-empty value.
pub fn first_present<'a, S: AsRef<str>>(value: &'a Value, paths: &[S]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| resolve(value, path.as_ref()))
        .find(|v| !is_empty_value(v))
}

/// A searchable piece of text found at a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Plain text (or a number rendered as text)
    Scalar(Cow<'a, str>),
    /// Nested entity with localized names (an artist or unit inside a song)
    LocalizedName {
        original: Option<&'a str>,
        english: Option<&'a str>,
    },
}

impl<'a> FieldValue<'a> {
    /// Whether any text carried by this value matches `term`.
    pub fn matches(&self, term: &str, matcher: &dyn Matcher) -> bool {
        match self {
            FieldValue::Scalar(text) => !text.is_empty() && matcher.is_match(text, term),
            FieldValue::LocalizedName { original, english } => [original, english]
                .into_iter()
                .flatten()
                .any(|name| !name.is_empty() && matcher.is_match(name, term)),
        }
    }

    fn localized(map: &'a serde_json::Map<String, Value>) -> Self {
        let pick = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).and_then(Value::as_str));
        FieldValue::LocalizedName {
            original: pick(NAME_ORIGINAL_KEYS),
            english: pick(NAME_ENGLISH_KEYS),
        }
    }
}

/// Searchable values found at `path`.
///
/// - a string yields one `Scalar`
/// - a number yields one `Scalar` in its JSON text form
/// - an object yields one `LocalizedName`
/// - an array yields one value per string or object element; other elements
///   are skipped
/// - anything else (missing, `null`, booleans) yields nothing
pub fn field_values<'a>(record: &'a Value, path: &str) -> Vec<FieldValue<'a>> {
    let Some(value) = resolve(record, path) else {
        return Vec::new();
    };

    match value {
        Value::String(text) => vec![FieldValue::Scalar(Cow::Borrowed(text.as_str()))],
        Value::Number(n) => vec![FieldValue::Scalar(Cow::Owned(n.to_string()))],
        Value::Object(map) => vec![FieldValue::localized(map)],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(FieldValue::Scalar(Cow::Borrowed(text.as_str()))),
                Value::Object(map) => Some(FieldValue::localized(map)),
                _ => None,
            })
            .collect(),
        Value::Null | Value::Bool(_) => Vec::new(),
    }
}
