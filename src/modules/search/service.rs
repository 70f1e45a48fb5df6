use sqlx::PgPool;
use tracing::instrument;

use crate::modules::scholarships::service::ScholarshipService;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;

use super::model::{SearchQuery, SearchResponse, SearchResults};

pub struct SearchService;

impl SearchService {
    /// Fans out by `type`. The pagination totals reflect the scholarship
    /// branch only, so a jobs-only search reports zero items.
    #[instrument(skip(db))]
    pub async fn search(db: &PgPool, query: SearchQuery) -> Result<SearchResponse, AppError> {
        let pagination = PaginationParams::new(query.page, query.limit);

        let (scholarships, total) = if query.search_type.includes_scholarships() {
            let filters = query.scholarship_filters();
            ScholarshipService::list(db, &filters, pagination, query.sort.as_deref()).await?
        } else {
            (Vec::new(), 0)
        };

        Ok(SearchResponse {
            query: query.q.unwrap_or_default(),
            search_type: query.search_type,
            results: SearchResults {
                scholarships,
                jobs: Vec::new(),
            },
            pagination: pagination.meta(total),
        })
    }
}
