#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use club_console::db;

/// In-memory SQLite with the full schema. One connection so every query
/// sees the same database.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    db::init_schema(&pool).await.expect("bootstrap schema");
    pool
}

pub async fn seed_group(pool: &SqlitePool, name: &str, fee: f64) -> i64 {
    sqlx::query(
        "INSERT INTO groups(name, weekdays, start_time, end_time, capacity, fee, color, active)
         VALUES (?, '[1,3]', '18:00:00', '19:00:00', NULL, ?, '#3B82F6', 1)",
    )
    .bind(name)
    .bind(fee)
    .execute(pool)
    .await
    .expect("insert group")
    .last_insert_rowid()
}

pub async fn seed_student(pool: &SqlitePool, first: &str, last: &str, group_id: i64) -> i64 {
    let student_id = sqlx::query(
        "INSERT INTO students(first_name, last_name, enrolled_on, guardian_name, has_insurance, active)
         VALUES (?, ?, '2024-02-01', 'Guardian', 0, 1)",
    )
    .bind(first)
    .bind(last)
    .execute(pool)
    .await
    .expect("insert student")
    .last_insert_rowid();

    sqlx::query("INSERT INTO group_members(student_id, group_id) VALUES (?, ?)")
        .bind(student_id)
        .bind(group_id)
        .execute(pool)
        .await
        .expect("insert membership");

    student_id
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn attendance_rows(
    pool: &SqlitePool,
    group_id: i64,
    date: NaiveDate,
) -> Vec<(i64, bool)> {
    sqlx::query_as(
        "SELECT student_id, present FROM attendance
         WHERE group_id = ? AND date = ? ORDER BY student_id",
    )
    .bind(group_id)
    .bind(date)
    .fetch_all(pool)
    .await
    .expect("fetch attendance rows")
}

pub async fn exception_row(
    pool: &SqlitePool,
    group_id: i64,
    date: NaiveDate,
) -> Option<(String, String)> {
    sqlx::query_as(
        "SELECT kind, description FROM calendar_exceptions
         WHERE group_id = ? AND date = ?",
    )
    .bind(group_id)
    .bind(date)
    .fetch_optional(pool)
    .await
    .expect("fetch exception row")
}

pub async fn mark_present(pool: &SqlitePool, student_id: i64, group_id: i64, date: NaiveDate) {
    sqlx::query(
        "INSERT INTO attendance(student_id, group_id, date, present) VALUES (?, ?, ?, 1)
         ON CONFLICT(student_id, group_id, date) DO UPDATE SET present = excluded.present",
    )
    .bind(student_id)
    .bind(group_id)
    .bind(date)
    .execute(pool)
    .await
    .expect("seed attendance");
}
