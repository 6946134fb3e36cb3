use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "Martina",
        "last_name": "Acosta",
        "birth_date": "2014-03-22",
        "enrolled_on": "2024-02-01",
        "guardian_name": "Laura Acosta",
        "guardian_phone": "+54911555001",
        "guardian_email": "laura@email.com",
        "emergency_phone": "+54911555002",
        "has_insurance": true,
        "insurance_receipt_url": null,
        "notes": null,
        "active": true
    })
)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Martina")]
    pub first_name: String,

    #[schema(example = "Acosta")]
    pub last_name: String,

    #[schema(example = "2014-03-22", value_type = Option<String>, format = "date")]
    pub birth_date: Option<NaiveDate>,

    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    pub enrolled_on: NaiveDate,

    #[schema(example = "Laura Acosta")]
    pub guardian_name: String,

    #[schema(example = "+54911555001", nullable = true)]
    pub guardian_phone: Option<String>,

    #[schema(example = "laura@email.com", nullable = true)]
    pub guardian_email: Option<String>,

    #[schema(example = "+54911555002", nullable = true)]
    pub emergency_phone: Option<String>,

    #[schema(example = true)]
    pub has_insurance: bool,

    /// Opaque reference to the insurance proof-of-payment (stored
    /// externally; never interpreted here).
    #[schema(nullable = true)]
    pub insurance_receipt_url: Option<String>,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(example = true)]
    pub active: bool,
}
