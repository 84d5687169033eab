use crate::model::media::split_media_list;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the column holding the unique identifier of a record.
pub const ID_FIELD: &str = "id";

/// The three Likert-style ratings a café can receive.
pub const RATING_FIELDS: [&str; 3] = ["food_quality", "ambiance", "want_return"];

/// One row of an entity store, keyed by column name.
///
/// Every value is kept as text, whatever its meaning: flags are the literal
/// strings `"True"`/`"False"`, ratings are digits and media lists are a single
/// comma-joined string. Columns the record does not carry read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Builds a record from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn id(&self) -> &str {
        self.get(ID_FIELD)
    }

    /// Value of `field`, or the empty string when the column is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Inserts `field` with `value` only if the column is missing.
    pub fn ensure_field(&mut self, field: &str, value: &str) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| value.to_string());
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn media_files(&self) -> Vec<String> {
        split_media_list(self.get("media_files"))
    }

    /// Mean of the three ratings, used by the "rating" sort.
    ///
    /// Empty ratings count as zero. A single unparsable rating makes the whole
    /// average zero.
    pub fn rating_average(&self) -> f64 {
        let mut total = 0i64;
        for field in RATING_FIELDS {
            let raw = self.get(field).trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<i64>() {
                Ok(v) => total += v,
                Err(_) => return 0.0,
            }
        }
        total as f64 / RATING_FIELDS.len() as f64
    }
}
