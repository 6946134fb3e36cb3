use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Link between a student and one of the groups they attend. No identity
/// beyond the pair; replaced wholesale whenever a student is saved.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Membership {
    #[schema(example = 1)]
    pub student_id: i64,

    #[schema(example = 1)]
    pub group_id: i64,
}
