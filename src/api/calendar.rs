use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::require_confirmation;
use crate::core::calendar;
use crate::model::ExceptionKind;

#[derive(Deserialize, ToSchema)]
pub struct MarkExceptionRequest {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "holiday")]
    pub kind: ExceptionKind,

    /// Must be `true`; marking an exception purges the day's attendance.
    pub confirm: Option<bool>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ClearDayQuery {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Must be `true`; clearing drops the exception and any marks.
    pub confirm: Option<bool>,
}

/// Mark a holiday or cancelled class
///
/// Writes the exception, then purges the day's attendance so the two
/// never coexist. If the purge fails after the exception was written the
/// response is a 409 and re-running the call finishes the job.
#[utoipa::path(
    put,
    path = "/api/calendar",
    request_body = MarkExceptionRequest,
    responses(
        (status = 200, description = "Exception recorded", body = crate::model::CalendarException),
        (status = 400, description = "Missing confirmation"),
        (status = 409, description = "Exception saved but purge failed; re-run to finish")
    ),
    tag = "Calendar"
)]
pub async fn mark_exception(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkExceptionRequest>,
) -> actix_web::Result<impl Responder> {
    require_confirmation(payload.confirm)?;

    let exception = calendar::mark_exception(
        pool.get_ref(),
        payload.group_id,
        payload.date,
        payload.kind,
    )
    .await
    .inspect_err(|e| {
        error!(error = %e, group_id = payload.group_id, date = %payload.date, "Failed to mark exception");
    })?;

    Ok(HttpResponse::Ok().json(exception))
}

/// Clear a day back to normal
///
/// Removes the exception (if any) and every attendance row. Idempotent:
/// clearing an already-normal empty day still succeeds.
#[utoipa::path(
    delete,
    path = "/api/calendar",
    params(ClearDayQuery),
    responses(
        (status = 200, description = "Day cleared", body = Object, example = json!({
            "message": "Day cleared"
        })),
        (status = 400, description = "Missing confirmation")
    ),
    tag = "Calendar"
)]
pub async fn clear_day(
    pool: web::Data<SqlitePool>,
    query: web::Query<ClearDayQuery>,
) -> actix_web::Result<impl Responder> {
    require_confirmation(query.confirm)?;

    calendar::clear_day(pool.get_ref(), query.group_id, query.date)
        .await
        .inspect_err(|e| {
            error!(error = %e, group_id = query.group_id, date = %query.date, "Failed to clear day");
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Day cleared"
    })))
}
