use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::pagination::PaginationMeta;

/// Study levels a scholarship may target. Mirrors the CHECK constraint on
/// `scholarships.levels`.
pub const LEVELS: &[&str] = &[
    "High School",
    "Undergraduate",
    "Graduate",
    "Postgraduate",
    "PhD",
    "Any",
];

pub const GENDERS: &[&str] = &["Male", "Female", "Any"];

/// Columns of the public scholarship view. `admin_id` is excluded on every
/// public read path.
pub const PUBLIC_COLUMNS: &str = "id, title, description, organizer, countries, levels, \
     fields_of_study, scholarship_type, benefits, amount, age_min, age_max, gender, \
     nationalities, languages, financial_restriction, open_date, deadline, \
     application_procedure, required_documents, official_link, published, verified, \
     premium, last_updated_at, tags, created_at, updated_at";

/// Admin view: public columns plus the owning admin reference.
pub const ADMIN_COLUMNS: &str = "id, title, description, organizer, countries, levels, \
     fields_of_study, scholarship_type, benefits, amount, age_min, age_max, gender, \
     nationalities, languages, financial_restriction, open_date, deadline, \
     application_procedure, required_documents, official_link, published, verified, \
     premium, last_updated_at, tags, created_at, updated_at, admin_id";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub countries: Vec<String>,
    pub levels: Vec<String>,
    pub fields_of_study: Vec<String>,
    pub scholarship_type: Option<String>,
    pub benefits: Vec<String>,
    pub amount: Option<f64>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub gender: Option<String>,
    pub nationalities: Vec<String>,
    pub languages: Vec<String>,
    pub financial_restriction: Option<String>,
    pub open_date: Option<DateTime<Utc>>,
    pub deadline: DateTime<Utc>,
    pub application_procedure: Option<String>,
    pub required_documents: Vec<String>,
    pub official_link: Option<String>,
    pub published: bool,
    pub verified: bool,
    pub premium: bool,
    pub last_updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape for admin queries; carries the raw owner id before population.
#[derive(Debug, sqlx::FromRow)]
pub struct ScholarshipWithAdminId {
    #[sqlx(flatten)]
    pub scholarship: Scholarship,
    pub admin_id: Option<Uuid>,
}

/// Minimal owner projection joined onto admin scholarship views.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipOwner {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminScholarship {
    #[serde(flatten)]
    pub scholarship: Scholarship,
    pub admin: Option<ScholarshipOwner>,
}

fn validate_levels(levels: &[String]) -> Result<(), ValidationError> {
    for level in levels {
        if !LEVELS.contains(&level.as_str()) {
            return Err(ValidationError::new("levels").with_message(
                "Levels must be one of High School, Undergraduate, Graduate, Postgraduate, PhD, Any"
                    .into(),
            ));
        }
    }
    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if !GENDERS.contains(&gender) {
        return Err(
            ValidationError::new("gender").with_message("Gender must be Male, Female, or Any".into())
        );
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScholarshipRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Organizer is required"))]
    pub organizer: String,
    pub countries: Option<Vec<String>>,
    #[validate(custom(function = validate_levels))]
    pub levels: Option<Vec<String>>,
    pub fields_of_study: Option<Vec<String>>,
    pub scholarship_type: Option<String>,
    pub benefits: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: Option<f64>,
    #[validate(range(min = 0, message = "Age min must be a non-negative integer"))]
    pub age_min: Option<i32>,
    #[validate(range(min = 0, message = "Age max must be a non-negative integer"))]
    pub age_max: Option<i32>,
    #[validate(custom(function = validate_gender))]
    pub gender: Option<String>,
    pub nationalities: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub financial_restriction: Option<String>,
    pub open_date: Option<DateTime<Utc>>,
    pub deadline: DateTime<Utc>,
    pub application_procedure: Option<String>,
    pub required_documents: Option<Vec<String>>,
    pub official_link: Option<String>,
    pub published: Option<bool>,
    pub verified: Option<bool>,
    pub premium: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScholarshipRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Organizer is required"))]
    pub organizer: Option<String>,
    pub countries: Option<Vec<String>>,
    #[validate(custom(function = validate_levels))]
    pub levels: Option<Vec<String>>,
    pub fields_of_study: Option<Vec<String>>,
    pub scholarship_type: Option<String>,
    pub benefits: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: Option<f64>,
    #[validate(range(min = 0, message = "Age min must be a non-negative integer"))]
    pub age_min: Option<i32>,
    #[validate(range(min = 0, message = "Age max must be a non-negative integer"))]
    pub age_max: Option<i32>,
    #[validate(custom(function = validate_gender))]
    pub gender: Option<String>,
    pub nationalities: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub financial_restriction: Option<String>,
    pub open_date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub application_procedure: Option<String>,
    pub required_documents: Option<Vec<String>>,
    pub official_link: Option<String>,
    pub published: Option<bool>,
    pub verified: Option<bool>,
    pub premium: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Combined filter set shared by the public listing and the unified search.
/// Every field composes with every other; `search` rides the full-text index.
#[derive(Debug, Default, Clone)]
pub struct ScholarshipFilters {
    pub countries: Vec<String>,
    pub levels: Vec<String>,
    pub fields_of_study: Vec<String>,
    pub scholarship_type: Option<String>,
    pub organizer: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub published: Option<bool>,
    pub verified: Option<bool>,
    pub premium: Option<bool>,
    pub search: Option<String>,
}

/// Public listing query. Repeated keys (`country=FR&country=DE`) collect into
/// the Vec fields via `axum_extra::extract::Query`.
#[derive(Debug, Default, Deserialize)]
pub struct ListScholarshipsQuery {
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
    pub organizer: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub published: Option<bool>,
    pub verified: Option<bool>,
    pub premium: Option<bool>,
    pub search: Option<String>,
}

impl ListScholarshipsQuery {
    pub fn into_filters(self) -> ScholarshipFilters {
        ScholarshipFilters {
            countries: self.country,
            levels: self.level,
            fields_of_study: self.field_of_study,
            scholarship_type: self.scholarship_type,
            organizer: self.organizer,
            amount_min: self.amount_min,
            amount_max: self.amount_max,
            published: self.published,
            verified: self.verified,
            premium: self.premium,
            search: self.search,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminListScholarshipsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub published: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScholarshipResponse {
    pub scholarship: Scholarship,
}

#[derive(Debug, Serialize)]
pub struct ScholarshipListResponse {
    pub scholarships: Vec<Scholarship>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct AdminScholarshipResponse {
    pub scholarship: AdminScholarship,
}

#[derive(Debug, Serialize)]
pub struct AdminScholarshipListResponse {
    pub scholarships: Vec<AdminScholarship>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateScholarshipRequest {
        CreateScholarshipRequest {
            title: "Global Excellence Scholarship".to_string(),
            description: "Full funding for graduate study abroad.".to_string(),
            organizer: "Global Fund".to_string(),
            countries: Some(vec!["France".to_string()]),
            levels: Some(vec!["Graduate".to_string()]),
            fields_of_study: None,
            scholarship_type: None,
            benefits: None,
            amount: Some(20_000.0),
            age_min: None,
            age_max: None,
            gender: Some("Any".to_string()),
            nationalities: None,
            languages: None,
            financial_restriction: None,
            open_date: None,
            deadline: Utc::now(),
            application_procedure: None,
            required_documents: None,
            official_link: None,
            published: None,
            verified: None,
            premium: None,
            tags: None,
        }
    }

    #[test]
    fn test_valid_create_request_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_short_title_rejected() {
        let mut dto = valid_create();
        dto.title = "ab".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unknown_level_rejected() {
        let mut dto = valid_create();
        dto.levels = Some(vec!["Kindergarten".to_string()]);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let mut dto = valid_create();
        dto.gender = Some("Other".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut dto = valid_create();
        dto.amount = Some(-1.0);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_admin_scholarship_flattens_owner() {
        let scholarship = Scholarship {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            description: "Test scholarship".to_string(),
            organizer: "Org".to_string(),
            countries: vec![],
            levels: vec![],
            fields_of_study: vec![],
            scholarship_type: None,
            benefits: vec![],
            amount: None,
            age_min: None,
            age_max: None,
            gender: None,
            nationalities: vec![],
            languages: vec![],
            financial_restriction: None,
            open_date: None,
            deadline: Utc::now(),
            application_procedure: None,
            required_documents: vec![],
            official_link: None,
            published: true,
            verified: false,
            premium: false,
            last_updated_at: Utc::now(),
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let admin_view = AdminScholarship {
            scholarship,
            admin: None,
        };
        let serialized = serde_json::to_string(&admin_view).unwrap();
        assert!(serialized.contains(r#""title":"Test""#));
        assert!(serialized.contains(r#""admin":null"#));
        assert!(!serialized.contains("adminId"));
    }
}
