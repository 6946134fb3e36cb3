use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::error::Error;
use crate::model::Group;

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 42)]
    pub total_students: i64,

    #[schema(example = 5)]
    pub total_groups: i64,

    /// Active groups whose schedule includes today's weekday.
    #[schema(example = 2)]
    pub classes_today: i64,
}

/// Console landing numbers
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Headline counts", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn stats(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let total_students =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE active = 1")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count students");
                Error::Transient(e)
            })?;

    let total_groups = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM groups WHERE active = 1")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count groups");
            Error::Transient(e)
        })?;

    let groups = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE active = 1")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch groups for dashboard");
            Error::Transient(e)
        })?;

    let today = Utc::now().date_naive().weekday();
    let classes_today = groups.iter().filter(|g| g.meets_on(today)).count() as i64;

    Ok(HttpResponse::Ok().json(DashboardStats {
        total_students,
        total_groups,
        classes_today,
    }))
}
