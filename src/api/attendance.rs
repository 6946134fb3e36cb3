use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::require_confirmation;
use crate::core::attendance::{self, DaySheet};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DayQuery {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct CommitDayRequest {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// student id -> present. Roster members missing from the map are
    /// saved as absent.
    #[schema(value_type = Object, example = json!({"1": true, "2": false}))]
    pub marks: HashMap<i64, bool>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DeleteDayQuery {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Must be `true`; dropping a day's marks is destructive.
    pub confirm: Option<bool>,
}

/// Load the day sheet for a group and date
///
/// Returns the roster, the persisted marks and any calendar exception.
/// While an exception is active the sheet is not editable. A day where
/// both an exception and marks exist is a defect state and reported as a
/// conflict instead of being silently repaired.
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DayQuery),
    responses(
        (status = 200, description = "Day sheet", body = DaySheet),
        (status = 409, description = "Exception and attendance coexist"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_day(
    pool: web::Data<SqlitePool>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<impl Responder> {
    let sheet = attendance::load_day(pool.get_ref(), query.group_id, query.date).await?;
    Ok(HttpResponse::Ok().json(sheet))
}

/// Save a full day of attendance
///
/// Rewrites one record per current roster member as a single batch; a
/// partial save is never left behind.
#[utoipa::path(
    put,
    path = "/api/attendance",
    request_body = CommitDayRequest,
    responses(
        (status = 200, description = "Attendance saved", body = Object, example = json!({
            "message": "Attendance saved successfully",
            "students_saved": 12
        })),
        (status = 409, description = "Day has a calendar exception"),
        (status = 500, description = "Commit failed, nothing was saved")
    ),
    tag = "Attendance"
)]
pub async fn commit_day(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CommitDayRequest>,
) -> actix_web::Result<impl Responder> {
    let written =
        attendance::commit_day(pool.get_ref(), payload.group_id, payload.date, &payload.marks)
            .await
            .inspect_err(|e| {
                error!(error = %e, group_id = payload.group_id, date = %payload.date, "Attendance commit failed");
            })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance saved successfully",
        "students_saved": written
    })))
}

/// Delete a day's attendance (exceptions untouched)
#[utoipa::path(
    delete,
    path = "/api/attendance",
    params(DeleteDayQuery),
    responses(
        (status = 200, description = "Attendance removed", body = Object, example = json!({
            "message": "Attendance removed",
            "removed": 12
        })),
        (status = 400, description = "Missing confirmation")
    ),
    tag = "Attendance"
)]
pub async fn delete_day(
    pool: web::Data<SqlitePool>,
    query: web::Query<DeleteDayQuery>,
) -> actix_web::Result<impl Responder> {
    require_confirmation(query.confirm)?;

    let removed = attendance::delete_day(pool.get_ref(), query.group_id, query.date).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance removed",
        "removed": removed
    })))
}
