use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::scholarships::model::{Scholarship, ScholarshipFilters};
use crate::utils::pagination::PaginationMeta;

/// Which catalogs the unified search fans out to. Jobs are a documented
/// placeholder: the branch exists but always contributes zero results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Scholarships,
    Jobs,
}

impl SearchType {
    pub fn includes_scholarships(&self) -> bool {
        matches!(self, SearchType::All | SearchType::Scholarships)
    }
}

/// Unified search query. Accepts the same scholarship filters as the public
/// listing, plus `q` and `type`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub search_type: SearchType,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub level: Vec<String>,
    #[serde(default)]
    pub field_of_study: Vec<String>,
    pub scholarship_type: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub verified: Option<bool>,
    pub premium: Option<bool>,
}

impl SearchQuery {
    /// Search only ever sees published records.
    pub fn scholarship_filters(&self) -> ScholarshipFilters {
        ScholarshipFilters {
            countries: self.country.clone(),
            levels: self.level.clone(),
            fields_of_study: self.field_of_study.clone(),
            scholarship_type: self.scholarship_type.clone(),
            organizer: None,
            amount_min: self.amount_min,
            amount_max: self.amount_max,
            published: Some(true),
            verified: self.verified,
            premium: self.premium,
            search: self.q.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub scholarships: Vec<Scholarship>,
    pub jobs: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub results: SearchResults,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_type_parses_lowercase() {
        assert_eq!(
            serde_json::from_str::<SearchType>(r#""scholarships""#).unwrap(),
            SearchType::Scholarships
        );
        assert_eq!(
            serde_json::from_str::<SearchType>(r#""jobs""#).unwrap(),
            SearchType::Jobs
        );
        assert!(serde_json::from_str::<SearchType>(r#""everything""#).is_err());
    }

    #[test]
    fn test_default_type_is_all() {
        assert_eq!(SearchType::default(), SearchType::All);
        assert!(SearchType::All.includes_scholarships());
        assert!(SearchType::Scholarships.includes_scholarships());
        assert!(!SearchType::Jobs.includes_scholarships());
    }

    #[test]
    fn test_filters_force_published() {
        let query = SearchQuery {
            q: Some("physics".to_string()),
            ..Default::default()
        };
        let filters = query.scholarship_filters();
        assert_eq!(filters.published, Some(true));
        assert_eq!(filters.search.as_deref(), Some("physics"));
    }
}
