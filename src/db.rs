use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("DATABASE_URL must be a valid sqlite URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    pool
}

/// Bootstraps every table the console needs. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS students(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT,
            enrolled_on TEXT NOT NULL,
            guardian_name TEXT NOT NULL,
            guardian_phone TEXT,
            guardian_email TEXT,
            emergency_phone TEXT,
            has_insurance INTEGER NOT NULL DEFAULT 0,
            insurance_receipt_url TEXT,
            notes TEXT,
            active INTEGER NOT NULL DEFAULT 1
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_last_name ON students(last_name)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS groups(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            weekdays TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            capacity INTEGER,
            fee REAL NOT NULL DEFAULT 0,
            color TEXT NOT NULL DEFAULT '#3B82F6',
            active INTEGER NOT NULL DEFAULT 1
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS group_members(
            student_id INTEGER NOT NULL,
            group_id INTEGER NOT NULL,
            PRIMARY KEY(student_id, group_id),
            FOREIGN KEY(student_id) REFERENCES students(id),
            FOREIGN KEY(group_id) REFERENCES groups(id)
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_group_members_group ON group_members(group_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS attendance(
            student_id INTEGER NOT NULL,
            group_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            present INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY(student_id, group_id, date),
            FOREIGN KEY(student_id) REFERENCES students(id),
            FOREIGN KEY(group_id) REFERENCES groups(id)
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_attendance_group_date ON attendance(group_id, date)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS calendar_exceptions(
            group_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            kind TEXT NOT NULL,
            description TEXT NOT NULL,
            PRIMARY KEY(group_id, date),
            FOREIGN KEY(group_id) REFERENCES groups(id)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS payments(
            student_id INTEGER NOT NULL,
            month TEXT NOT NULL,
            paid INTEGER NOT NULL DEFAULT 0,
            amount REAL NOT NULL DEFAULT 0,
            paid_at TEXT,
            PRIMARY KEY(student_id, month),
            FOREIGN KEY(student_id) REFERENCES students(id)
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_payments_month ON payments(month)")
        .execute(pool)
        .await?;

    Ok(())
}
