//! Daily expiration sweep: scholarships whose deadline has passed are
//! unpublished in one bulk update. The task runs once at startup and then at
//! every UTC midnight.

use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};

use crate::utils::errors::AppError;

/// The cutoff for "expired": strictly before the UTC midnight that started
/// today. A deadline falling today stays live until tomorrow's sweep.
fn utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// How long until the next UTC midnight after `now`.
pub fn delay_until_next_midnight(now: DateTime<Utc>) -> Duration {
    let next_midnight = (now.date_naive() + Days::new(1))
        .and_time(NaiveTime::MIN)
        .and_utc();
    (next_midnight - now).to_std().unwrap_or(Duration::ZERO)
}

/// Unpublishes every published scholarship whose deadline lies before today's
/// UTC midnight. Idempotent: a second run in the same day matches nothing.
/// Returns the number of rows flipped.
pub async fn mark_expired_scholarships(db: &PgPool) -> Result<u64, AppError> {
    let cutoff = utc_midnight(Utc::now());

    let result = sqlx::query(
        "UPDATE scholarships SET published = false, updated_at = now() \
         WHERE published = true AND deadline < $1",
    )
    .bind(cutoff)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

/// Spawns the sweep loop: run immediately, then once per UTC midnight. A
/// failed run is logged and retried at the next tick.
pub fn start_expiration_scheduler(db: PgPool) {
    tokio::spawn(async move {
        loop {
            match mark_expired_scholarships(&db).await {
                Ok(count) => {
                    info!(expired = count, "Scholarship expiration sweep completed");
                }
                Err(err) => {
                    error!(error = ?err.error, "Scholarship expiration sweep failed");
                }
            }

            tokio::time::sleep(delay_until_next_midnight(Utc::now())).await;
        }
    });
}
