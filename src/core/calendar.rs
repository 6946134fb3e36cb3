use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::model::{CalendarException, ExceptionKind};

/// Marks a (group, date) as excepted. Upserts the exception row, then
/// purges every attendance row for the key so the two never coexist.
///
/// The two writes are one logical unit but not one transaction: a purge
/// failure after the upsert leaves both sides present, surfaced as
/// [`Error::PartiallyApplied`]. Re-running the call repeats the purge.
pub async fn mark_exception(
    pool: &SqlitePool,
    group_id: i64,
    date: NaiveDate,
    kind: ExceptionKind,
) -> Result<CalendarException> {
    sqlx::query(
        "INSERT INTO calendar_exceptions(group_id, date, kind, description)
         VALUES(?, ?, ?, ?)
         ON CONFLICT(group_id, date) DO UPDATE SET
           kind = excluded.kind,
           description = excluded.description",
    )
    .bind(group_id)
    .bind(date)
    .bind(kind.as_str())
    .bind(kind.description())
    .execute(pool)
    .await?;

    sqlx::query("DELETE FROM attendance WHERE group_id = ? AND date = ?")
        .bind(group_id)
        .bind(date)
        .execute(pool)
        .await
        .map_err(Error::PartiallyApplied)?;

    Ok(CalendarException {
        group_id,
        date,
        kind: kind.as_str().to_string(),
        description: kind.description().to_string(),
    })
}

/// Returns the day to `Normal`: drops attendance rows and the exception
/// row, in that order. Clearing an already-empty day is a successful no-op.
pub async fn clear_day(pool: &SqlitePool, group_id: i64, date: NaiveDate) -> Result<()> {
    // Attendance first: failing between the two deletes leaves an excepted
    // day with no rows, which still satisfies the exclusion invariant.
    sqlx::query("DELETE FROM attendance WHERE group_id = ? AND date = ?")
        .bind(group_id)
        .bind(date)
        .execute(pool)
        .await?;

    sqlx::query("DELETE FROM calendar_exceptions WHERE group_id = ? AND date = ?")
        .bind(group_id)
        .bind(date)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn get_exception(
    pool: &SqlitePool,
    group_id: i64,
    date: NaiveDate,
) -> Result<Option<CalendarException>> {
    let row = sqlx::query_as::<_, CalendarException>(
        "SELECT group_id, date, kind, description
         FROM calendar_exceptions
         WHERE group_id = ? AND date = ?",
    )
    .bind(group_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
