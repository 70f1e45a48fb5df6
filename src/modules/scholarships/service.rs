use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationParams, parse_sort};
use crate::utils::sql::escape_like;

use super::model::{
    ADMIN_COLUMNS, AdminListScholarshipsQuery, AdminScholarship, CreateScholarshipRequest,
    PUBLIC_COLUMNS, Scholarship, ScholarshipFilters, ScholarshipOwner, ScholarshipWithAdminId,
    UpdateScholarshipRequest,
};

/// Columns callers may sort listings by. Anything else falls back to
/// `created_at DESC` in [`parse_sort`].
pub const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "last_updated_at",
    "deadline",
    "amount",
    "title",
    "organizer",
];

pub struct ScholarshipService;

impl ScholarshipService {
    /// Appends every active filter as a bound predicate. Shared by the data
    /// and count queries so totals always match the window.
    fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &ScholarshipFilters) {
        query.push(" WHERE TRUE");

        if let Some(published) = filters.published {
            query.push(" AND published = ").push_bind(published);
        }
        if let Some(verified) = filters.verified {
            query.push(" AND verified = ").push_bind(verified);
        }
        if let Some(premium) = filters.premium {
            query.push(" AND premium = ").push_bind(premium);
        }
        if !filters.countries.is_empty() {
            query
                .push(" AND countries && ")
                .push_bind(filters.countries.clone());
        }
        if !filters.levels.is_empty() {
            query.push(" AND levels && ").push_bind(filters.levels.clone());
        }
        if !filters.fields_of_study.is_empty() {
            query
                .push(" AND fields_of_study && ")
                .push_bind(filters.fields_of_study.clone());
        }
        if let Some(scholarship_type) = &filters.scholarship_type {
            query
                .push(" AND scholarship_type = ")
                .push_bind(scholarship_type.clone());
        }
        if let Some(organizer) = &filters.organizer {
            query
                .push(" AND organizer ILIKE ")
                .push_bind(format!("%{}%", escape_like(organizer)));
        }
        if let Some(amount_min) = filters.amount_min {
            query.push(" AND amount >= ").push_bind(amount_min);
        }
        if let Some(amount_max) = filters.amount_max {
            query.push(" AND amount <= ").push_bind(amount_max);
        }
        if let Some(search) = &filters.search {
            query
                .push(" AND search_tsv @@ plainto_tsquery('english', ")
                .push_bind(search.clone())
                .push(")");
        }
    }

    /// Filtered, sorted, paginated listing of the public projection, with the
    /// total count taken over the same filter.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: &ScholarshipFilters,
        pagination: PaginationParams,
        sort: Option<&str>,
    ) -> Result<(Vec<Scholarship>, i64), AppError> {
        let (column, direction) = parse_sort(sort, SORTABLE_COLUMNS, "created_at");

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM scholarships");
        Self::push_filters(&mut count_query, filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let mut query = QueryBuilder::new(format!("SELECT {PUBLIC_COLUMNS} FROM scholarships"));
        Self::push_filters(&mut query, filters);
        query.push(format!(" ORDER BY {column} {direction}"));
        query.push(" LIMIT ").push_bind(pagination.limit());
        query.push(" OFFSET ").push_bind(pagination.offset());

        let scholarships = query
            .build_query_as::<Scholarship>()
            .fetch_all(db)
            .await?;

        Ok((scholarships, total))
    }

    /// Public detail view. Unpublished records are indistinguishable from
    /// missing ones unless the caller may see drafts.
    #[instrument(skip(db))]
    pub async fn get(
        db: &PgPool,
        id: Uuid,
        include_unpublished: bool,
    ) -> Result<Scholarship, AppError> {
        let sql = format!("SELECT {PUBLIC_COLUMNS} FROM scholarships WHERE id = $1");
        let scholarship = sqlx::query_as::<_, Scholarship>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Scholarship not found")))?;

        if !scholarship.published && !include_unpublished {
            return Err(AppError::not_found(anyhow::anyhow!("Scholarship not found")));
        }

        Ok(scholarship)
    }

    #[instrument(skip(db))]
    pub async fn list_admin(
        db: &PgPool,
        params: &AdminListScholarshipsQuery,
    ) -> Result<(Vec<AdminScholarship>, i64), AppError> {
        let filters = ScholarshipFilters {
            published: params.published,
            search: params.search.clone(),
            ..Default::default()
        };
        let pagination = PaginationParams::new(params.page, params.limit);
        let (column, direction) = parse_sort(params.sort.as_deref(), SORTABLE_COLUMNS, "created_at");

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM scholarships");
        Self::push_filters(&mut count_query, &filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let mut query = QueryBuilder::new(format!("SELECT {ADMIN_COLUMNS} FROM scholarships"));
        Self::push_filters(&mut query, &filters);
        query.push(format!(" ORDER BY {column} {direction}"));
        query.push(" LIMIT ").push_bind(pagination.limit());
        query.push(" OFFSET ").push_bind(pagination.offset());

        let rows = query
            .build_query_as::<ScholarshipWithAdminId>()
            .fetch_all(db)
            .await?;

        let scholarships = Self::populate_owners(db, rows).await?;

        Ok((scholarships, total))
    }

    #[instrument(skip(db))]
    pub async fn get_admin(db: &PgPool, id: Uuid) -> Result<AdminScholarship, AppError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM scholarships WHERE id = $1");
        let row = sqlx::query_as::<_, ScholarshipWithAdminId>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Scholarship not found")))?;

        let admin = Self::fetch_owner(db, row.admin_id).await?;

        Ok(AdminScholarship {
            scholarship: row.scholarship,
            admin,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        admin_id: Uuid,
        dto: CreateScholarshipRequest,
    ) -> Result<AdminScholarship, AppError> {
        let sql = format!(
            "INSERT INTO scholarships (title, description, organizer, countries, levels, \
             fields_of_study, scholarship_type, benefits, amount, age_min, age_max, gender, \
             nationalities, languages, financial_restriction, open_date, deadline, \
             application_procedure, required_documents, official_link, published, verified, \
             premium, tags, admin_id, last_updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21, $22, $23, $24, $25, now()) \
             RETURNING {ADMIN_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ScholarshipWithAdminId>(&sql)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.organizer)
            .bind(dto.countries.unwrap_or_default())
            .bind(dto.levels.unwrap_or_default())
            .bind(dto.fields_of_study.unwrap_or_default())
            .bind(&dto.scholarship_type)
            .bind(dto.benefits.unwrap_or_default())
            .bind(dto.amount)
            .bind(dto.age_min)
            .bind(dto.age_max)
            .bind(&dto.gender)
            .bind(dto.nationalities.unwrap_or_default())
            .bind(dto.languages.unwrap_or_default())
            .bind(&dto.financial_restriction)
            .bind(dto.open_date)
            .bind(dto.deadline)
            .bind(&dto.application_procedure)
            .bind(dto.required_documents.unwrap_or_default())
            .bind(&dto.official_link)
            .bind(dto.published.unwrap_or(true))
            .bind(dto.verified.unwrap_or(false))
            .bind(dto.premium.unwrap_or(false))
            .bind(dto.tags.unwrap_or_default())
            .bind(admin_id)
            .fetch_one(db)
            .await?;

        let admin = Self::fetch_owner(db, row.admin_id).await?;

        Ok(AdminScholarship {
            scholarship: row.scholarship,
            admin,
        })
    }

    /// Partial update: absent fields keep their stored value.
    /// `last_updated_at` is refreshed on every successful write.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateScholarshipRequest,
    ) -> Result<AdminScholarship, AppError> {
        let sql = format!(
            "UPDATE scholarships SET \
             title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             organizer = COALESCE($3, organizer), \
             countries = COALESCE($4, countries), \
             levels = COALESCE($5, levels), \
             fields_of_study = COALESCE($6, fields_of_study), \
             scholarship_type = COALESCE($7, scholarship_type), \
             benefits = COALESCE($8, benefits), \
             amount = COALESCE($9, amount), \
             age_min = COALESCE($10, age_min), \
             age_max = COALESCE($11, age_max), \
             gender = COALESCE($12, gender), \
             nationalities = COALESCE($13, nationalities), \
             languages = COALESCE($14, languages), \
             financial_restriction = COALESCE($15, financial_restriction), \
             open_date = COALESCE($16, open_date), \
             deadline = COALESCE($17, deadline), \
             application_procedure = COALESCE($18, application_procedure), \
             required_documents = COALESCE($19, required_documents), \
             official_link = COALESCE($20, official_link), \
             published = COALESCE($21, published), \
             verified = COALESCE($22, verified), \
             premium = COALESCE($23, premium), \
             tags = COALESCE($24, tags), \
             last_updated_at = now(), \
             updated_at = now() \
             WHERE id = $25 \
             RETURNING {ADMIN_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ScholarshipWithAdminId>(&sql)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.organizer)
            .bind(&dto.countries)
            .bind(&dto.levels)
            .bind(&dto.fields_of_study)
            .bind(&dto.scholarship_type)
            .bind(&dto.benefits)
            .bind(dto.amount)
            .bind(dto.age_min)
            .bind(dto.age_max)
            .bind(&dto.gender)
            .bind(&dto.nationalities)
            .bind(&dto.languages)
            .bind(&dto.financial_restriction)
            .bind(dto.open_date)
            .bind(dto.deadline)
            .bind(&dto.application_procedure)
            .bind(&dto.required_documents)
            .bind(&dto.official_link)
            .bind(dto.published)
            .bind(dto.verified)
            .bind(dto.premium)
            .bind(&dto.tags)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Scholarship not found")))?;

        let admin = Self::fetch_owner(db, row.admin_id).await?;

        Ok(AdminScholarship {
            scholarship: row.scholarship,
            admin,
        })
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM scholarships WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Scholarship not found")));
        }

        Ok(())
    }

    async fn fetch_owner(
        db: &PgPool,
        admin_id: Option<Uuid>,
    ) -> Result<Option<ScholarshipOwner>, AppError> {
        let Some(admin_id) = admin_id else {
            return Ok(None);
        };

        let owner = sqlx::query_as::<_, ScholarshipOwner>(
            "SELECT id, email, first_name, last_name FROM users WHERE id = $1",
        )
        .bind(admin_id)
        .fetch_optional(db)
        .await?;

        Ok(owner)
    }

    async fn populate_owners(
        db: &PgPool,
        rows: Vec<ScholarshipWithAdminId>,
    ) -> Result<Vec<AdminScholarship>, AppError> {
        let admin_ids: Vec<Uuid> = rows.iter().filter_map(|row| row.admin_id).collect();

        let owners: Vec<ScholarshipOwner> = if admin_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, ScholarshipOwner>(
                "SELECT id, email, first_name, last_name FROM users WHERE id = ANY($1)",
            )
            .bind(&admin_ids)
            .fetch_all(db)
            .await?
        };

        let by_id: HashMap<Uuid, ScholarshipOwner> =
            owners.into_iter().map(|owner| (owner.id, owner)).collect();

        Ok(rows
            .into_iter()
            .map(|row| AdminScholarship {
                admin: row.admin_id.and_then(|id| by_id.get(&id).cloned()),
                scholarship: row.scholarship,
            })
            .collect())
    }
}
