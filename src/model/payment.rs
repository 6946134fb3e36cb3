use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Monthly fee payment, keyed by (student, month). `amount` is snapshotted
/// from the group's fee when the payment is marked; toggling a payment off
/// clears amount and timestamp but keeps the row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "student_id": 1,
        "month": "2024-05-01",
        "paid": true,
        "amount": 1000.0,
        "paid_at": "2024-05-03T14:21:00Z"
    })
)]
pub struct PaymentRecord {
    #[schema(example = 1)]
    pub student_id: i64,

    /// First day of the covered month.
    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub month: NaiveDate,

    #[schema(example = true)]
    pub paid: bool,

    #[schema(example = 1000.0)]
    pub amount: f64,

    #[schema(example = "2024-05-03T14:21:00Z", value_type = Option<String>, format = "date-time")]
    pub paid_at: Option<DateTime<Utc>>,
}
