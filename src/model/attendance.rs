use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One presence record, keyed by (student, group, date). At most one row
/// per key; a full-roster save rewrites every current roster member's row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub student_id: i64,

    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = true)]
    pub present: bool,
}
