use crate::model::record::Record;
use serde::{Deserialize, Serialize};

/// How a listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// File order.
    #[default]
    Default,
    /// Highest average rating first.
    Rating,
}

impl SortMode {
    /// Unknown values fall back to file order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("rating") => SortMode::Rating,
            _ => SortMode::Default,
        }
    }
}

/// Query string of the listing endpoints (`?sort=rating`).
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn mode(&self) -> SortMode {
        SortMode::parse(self.sort.as_deref())
    }
}

/// Body returned by the listing endpoints.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<Record>,
    pub current_sort: SortMode,
}

/// Likert evaluation submitted from a café detail page.
#[derive(Debug, Default, Deserialize)]
pub struct EvaluationForm {
    pub food_quality: Option<String>,
    pub ambiance: Option<String>,
    pub want_return: Option<String>,
}

impl EvaluationForm {
    /// `(column, value)` pairs to write, with missing ratings cleared.
    pub fn into_updates(self) -> Vec<(String, String)> {
        vec![
            ("food_quality".to_string(), self.food_quality.unwrap_or_default()),
            ("ambiance".to_string(), self.ambiance.unwrap_or_default()),
            ("want_return".to_string(), self.want_return.unwrap_or_default()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GooglePhotosForm {
    pub google_photos_link: Option<String>,
}
