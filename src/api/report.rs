use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::core::report::{self, MonthlyIncome, StudentMonthlyReport};
use crate::error::Error;
use crate::model::PaymentRecord;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    #[schema(example = 1)]
    pub group_id: i64,

    /// `YYYY-MM` or any date inside the month.
    #[schema(example = "2024-05")]
    pub month: String,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyReportResponse {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub month: NaiveDate,

    pub data: Vec<StudentMonthlyReport>,
}

#[derive(Deserialize, ToSchema)]
pub struct TogglePaymentRequest {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = 1)]
    pub student_id: i64,

    /// `YYYY-MM` or any date inside the month.
    #[schema(example = "2024-05")]
    pub month: String,

    /// The paid state the caller currently displays; the write flips it.
    #[schema(example = false)]
    pub currently_paid: bool,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentToggleResponse {
    /// The write went through; the caller's optimistic flip stands. On
    /// any failure the caller reverts by reloading the report.
    #[schema(example = true)]
    pub applied: bool,

    /// Stored row after the write; absent when a never-paid month was
    /// toggled off.
    pub payment: Option<PaymentRecord>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct IncomeQuery {
    /// Trailing months to include, newest last. Defaults to 6.
    #[schema(example = 6)]
    pub months: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct IncomeResponse {
    pub data: Vec<MonthlyIncome>,
}

fn parse_month(raw: &str) -> Result<NaiveDate, Error> {
    let t = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return Ok(d);
    }
    NaiveDate::parse_from_str(&format!("{t}-01"), "%Y-%m-%d")
        .map_err(|_| Error::Validation("month must be YYYY-MM".to_string()))
}

/// Monthly attendance & payment report for a group
///
/// One row per roster member: classes held, present/absent tallies, the
/// rounded attendance percentage and the month's payment status. Students
/// with no recorded classes report 0%, and an empty roster is an empty
/// list, not an error.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Monthly report", body = MonthlyReportResponse),
        (status = 400, description = "Bad month format")
    ),
    tag = "Reports"
)]
pub async fn monthly_report(
    pool: web::Data<SqlitePool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let month = parse_month(&query.month)?;

    let data = report::build_report(pool.get_ref(), query.group_id, month)
        .await
        .inspect_err(|e| {
            error!(error = %e, group_id = query.group_id, "Failed to build report");
        })?;

    Ok(HttpResponse::Ok().json(MonthlyReportResponse {
        group_id: query.group_id,
        month,
        data,
    }))
}

/// Toggle a student's monthly payment
///
/// Marking paid snapshots the group's current fee onto the record;
/// unmarking keeps the record with amount 0. The caller flips its display
/// optimistically and reloads the report if this returns an error.
#[utoipa::path(
    post,
    path = "/api/payments/toggle",
    request_body = TogglePaymentRequest,
    responses(
        (status = 200, description = "Payment toggled", body = PaymentToggleResponse),
        (status = 400, description = "Bad month format"),
        (status = 404, description = "Group not found")
    ),
    tag = "Reports"
)]
pub async fn toggle_payment(
    pool: web::Data<SqlitePool>,
    payload: web::Json<TogglePaymentRequest>,
) -> actix_web::Result<impl Responder> {
    let month = parse_month(&payload.month)?;

    let payment = report::toggle_payment(
        pool.get_ref(),
        payload.group_id,
        payload.student_id,
        month,
        payload.currently_paid,
    )
    .await
    .inspect_err(|e| {
        error!(
            error = %e,
            student_id = payload.student_id,
            group_id = payload.group_id,
            "Failed to toggle payment"
        );
    })?;

    Ok(HttpResponse::Ok().json(PaymentToggleResponse {
        applied: true,
        payment,
    }))
}

/// Income summary over the trailing months
///
/// Sums the amounts stored on paid records (the fee snapshots), not the
/// groups' current fees.
#[utoipa::path(
    get,
    path = "/api/reports/income",
    params(IncomeQuery),
    responses(
        (status = 200, description = "Per-month income", body = IncomeResponse)
    ),
    tag = "Reports"
)]
pub async fn income_summary(
    pool: web::Data<SqlitePool>,
    query: web::Query<IncomeQuery>,
) -> actix_web::Result<impl Responder> {
    let data = report::monthly_income(pool.get_ref(), query.months.unwrap_or(6))
        .await
        .inspect_err(|e| {
            error!(error = %e, "Failed to build income summary");
        })?;

    Ok(HttpResponse::Ok().json(IncomeResponse { data }))
}
