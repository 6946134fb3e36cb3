use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::core::{calendar, roster};
use crate::error::{Error, Result};
use crate::model::{AttendanceRecord, CalendarException, Student};

/// The reconciled state of one (group, date): the current roster, the
/// persisted marks and any calendar exception. This is the explicit
/// context object edits happen against; nothing is persisted until the
/// sheet is committed.
#[derive(Debug, Serialize, ToSchema)]
pub struct DaySheet {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub roster: Vec<Student>,

    /// student id -> present. A missing entry renders (and commits) as
    /// absent; there is no separate "not yet marked" state.
    #[schema(value_type = Object)]
    pub attendance: HashMap<i64, bool>,

    pub exception: Option<CalendarException>,
}

impl DaySheet {
    pub fn is_editable(&self) -> bool {
        self.exception.is_none()
    }

    pub fn presence(&self, student_id: i64) -> bool {
        self.attendance.get(&student_id).copied().unwrap_or(false)
    }

    /// Flips a student's mark in memory. Refused while an exception is
    /// active for the day.
    pub fn toggle(&mut self, student_id: i64) -> Result<bool> {
        if !self.is_editable() {
            return Err(Error::InvariantViolation(
                "Attendance cannot be edited while a calendar exception is active for this day"
                    .to_string(),
            ));
        }
        let flipped = !self.presence(student_id);
        self.attendance.insert(student_id, flipped);
        Ok(flipped)
    }
}

/// Loads the day sheet for (group, date). Fails with
/// [`Error::InvariantViolation`] when both an exception and attendance
/// rows exist; that defect state is reported, never auto-healed.
pub async fn load_day(pool: &SqlitePool, group_id: i64, date: NaiveDate) -> Result<DaySheet> {
    let roster = roster::resolve_roster(pool, group_id).await?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT student_id, group_id, date, present
         FROM attendance
         WHERE group_id = ? AND date = ?",
    )
    .bind(group_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    let exception = calendar::get_exception(pool, group_id, date).await?;

    if exception.is_some() && !records.is_empty() {
        return Err(Error::InvariantViolation(format!(
            "Group {} has both a calendar exception and {} attendance rows on {}; clear the day or re-mark the exception to reconcile",
            group_id,
            records.len(),
            date
        )));
    }

    let attendance = records
        .into_iter()
        .map(|r| (r.student_id, r.present))
        .collect();

    Ok(DaySheet {
        group_id,
        date,
        roster,
        attendance,
        exception,
    })
}

/// Full-roster save: upserts one row per current roster member with
/// `present = marks[id]` defaulting to absent, inside one transaction.
/// Any row failure rolls the whole batch back and reports once.
///
/// Records are keyed independently of current membership, so a student
/// removed from the group keeps their historical rows untouched.
pub async fn commit_day(
    pool: &SqlitePool,
    group_id: i64,
    date: NaiveDate,
    marks: &HashMap<i64, bool>,
) -> Result<u64> {
    let roster = roster::resolve_roster(pool, group_id).await?;

    let mut tx = pool.begin().await?;

    let exception: Option<(String,)> =
        sqlx::query_as("SELECT kind FROM calendar_exceptions WHERE group_id = ? AND date = ?")
            .bind(group_id)
            .bind(date)
            .fetch_optional(&mut *tx)
            .await?;
    if exception.is_some() {
        return Err(Error::InvariantViolation(format!(
            "Group {} has a calendar exception on {}; attendance cannot be saved",
            group_id, date
        )));
    }

    let mut written = 0u64;
    for student in &roster {
        let present = marks.get(&student.id).copied().unwrap_or(false);
        sqlx::query(
            "INSERT INTO attendance(student_id, group_id, date, present)
             VALUES(?, ?, ?, ?)
             ON CONFLICT(student_id, group_id, date) DO UPDATE SET
               present = excluded.present",
        )
        .bind(student.id)
        .bind(group_id)
        .bind(date)
        .bind(present)
        .execute(&mut *tx)
        .await
        .map_err(Error::BatchFailed)?;
        written += 1;
    }

    tx.commit().await.map_err(Error::BatchFailed)?;
    Ok(written)
}

/// Removes every attendance row for (group, date) without touching any
/// calendar exception. Recovery path for a mis-marked day.
pub async fn delete_day(pool: &SqlitePool, group_id: i64, date: NaiveDate) -> Result<u64> {
    let result = sqlx::query("DELETE FROM attendance WHERE group_id = ? AND date = ?")
        .bind(group_id)
        .bind(date)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
