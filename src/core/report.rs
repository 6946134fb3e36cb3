use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::core::roster;
use crate::error::{Error, Result};
use crate::model::PaymentRecord;

/// One roster member's month: attendance tallies plus payment status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(
    example = json!({
        "student_id": 1,
        "first_name": "Martina",
        "last_name": "Acosta",
        "classes_held": 4,
        "present": 3,
        "absent": 1,
        "attendance_percent": 75,
        "paid": true
    })
)]
pub struct StudentMonthlyReport {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,

    /// Number of attendance rows recorded for the student in the month.
    pub classes_held: i64,
    pub present: i64,
    pub absent: i64,

    /// Integer percentage in [0, 100]; 0 when no classes were held.
    pub attendance_percent: i64,

    pub paid: bool,
}

/// Income for one month: the sum of stored payment amounts (snapshots,
/// not current fees) and the count of paid rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyIncome {
    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub month: NaiveDate,
    #[schema(example = 4500.0)]
    pub income: f64,
    #[schema(example = 5)]
    pub payments: i64,
}

pub fn attendance_percent(present: i64, classes_held: i64) -> i64 {
    if classes_held <= 0 {
        return 0;
    }
    (100.0 * present as f64 / classes_held as f64).round() as i64
}

/// Closed [first day, last day] interval of the month containing `month`.
fn month_bounds(month: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = month.with_day(1).unwrap_or(month);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    (start, end)
}

/// Joins the group roster with the month's attendance history and payment
/// records. Students with no rows report zero classes and 0%, which is a
/// valid state, not an error.
pub async fn build_report(
    pool: &SqlitePool,
    group_id: i64,
    month: NaiveDate,
) -> Result<Vec<StudentMonthlyReport>> {
    let (start, end) = month_bounds(month);
    let roster = roster::resolve_roster(pool, group_id).await?;

    let marks: Vec<(i64, bool)> = sqlx::query_as(
        "SELECT student_id, present
         FROM attendance
         WHERE group_id = ? AND date >= ? AND date <= ?",
    )
    .bind(group_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let payments = sqlx::query_as::<_, PaymentRecord>(
        "SELECT student_id, month, paid, amount, paid_at
         FROM payments
         WHERE month = ?",
    )
    .bind(start)
    .fetch_all(pool)
    .await?;
    let paid_by_student: HashMap<i64, bool> =
        payments.into_iter().map(|p| (p.student_id, p.paid)).collect();

    let mut report = Vec::with_capacity(roster.len());
    for student in roster {
        let classes_held = marks.iter().filter(|(id, _)| *id == student.id).count() as i64;
        let present = marks
            .iter()
            .filter(|(id, present)| *id == student.id && *present)
            .count() as i64;

        report.push(StudentMonthlyReport {
            student_id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            classes_held,
            present,
            absent: classes_held - present,
            attendance_percent: attendance_percent(present, classes_held),
            paid: paid_by_student.get(&student.id).copied().unwrap_or(false),
        });
    }

    Ok(report)
}

/// Flips a student's payment for the month.
///
/// Marking paid snapshots the group's fee *at toggle time*; later fee
/// changes never alter an already-recorded payment. Unmarking keeps the
/// row but clears amount and timestamp, preserving month coverage
/// history. Returns the stored row after the write so callers can
/// reconcile optimistic state; on failure the caller reverts by
/// re-running [`build_report`].
pub async fn toggle_payment(
    pool: &SqlitePool,
    group_id: i64,
    student_id: i64,
    month: NaiveDate,
    currently_paid: bool,
) -> Result<Option<PaymentRecord>> {
    let month = month.with_day(1).unwrap_or(month);

    if !currently_paid {
        let fee: f64 = sqlx::query_scalar("SELECT fee FROM groups WHERE id = ?")
            .bind(group_id)
            .fetch_optional(pool)
            .await?
            .ok_or(Error::NotFound("Group"))?;

        sqlx::query(
            "INSERT INTO payments(student_id, month, paid, amount, paid_at)
             VALUES(?, ?, 1, ?, ?)
             ON CONFLICT(student_id, month) DO UPDATE SET
               paid = excluded.paid,
               amount = excluded.amount,
               paid_at = excluded.paid_at",
        )
        .bind(student_id)
        .bind(month)
        .bind(fee)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    } else {
        sqlx::query(
            "UPDATE payments
             SET paid = 0, amount = 0, paid_at = NULL
             WHERE student_id = ? AND month = ?",
        )
        .bind(student_id)
        .bind(month)
        .execute(pool)
        .await?;
    }

    let row = sqlx::query_as::<_, PaymentRecord>(
        "SELECT student_id, month, paid, amount, paid_at
         FROM payments
         WHERE student_id = ? AND month = ?",
    )
    .bind(student_id)
    .bind(month)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Income per month over the trailing `months_back` months (oldest first),
/// summing the literal amounts stored on paid rows.
pub async fn monthly_income(pool: &SqlitePool, months_back: u32) -> Result<Vec<MonthlyIncome>> {
    let months_back = months_back.clamp(1, 24);
    let today = Utc::now().date_naive();
    let current = today.with_day(1).unwrap_or(today);

    let mut months: Vec<MonthlyIncome> = (0..months_back)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|month| MonthlyIncome {
            month,
            income: 0.0,
            payments: 0,
        })
        .collect();
    let start = months.first().map(|m| m.month).unwrap_or(current);

    let rows: Vec<(NaiveDate, f64)> = sqlx::query_as(
        "SELECT month, amount
         FROM payments
         WHERE paid = 1 AND month >= ? AND month <= ?",
    )
    .bind(start)
    .bind(current)
    .fetch_all(pool)
    .await?;

    for (month, amount) in rows {
        if let Some(slot) = months.iter_mut().find(|m| m.month == month) {
            slot.income += amount;
            slot.payments += 1;
        }
    }

    Ok(months)
}
