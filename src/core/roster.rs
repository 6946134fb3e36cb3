use sqlx::SqlitePool;

use crate::error::Result;
use crate::model::Student;

/// Active students currently linked to the group, ordered by surname.
/// An unknown group id yields an empty roster, not an error.
pub async fn resolve_roster(pool: &SqlitePool, group_id: i64) -> Result<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(
        "SELECT s.*
         FROM students s
         JOIN group_members gm ON gm.student_id = s.id
         WHERE gm.group_id = ? AND s.active = 1
         ORDER BY s.last_name, s.first_name",
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(students)
}
