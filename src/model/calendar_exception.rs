use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    Holiday,
    Cancelled,
}

impl ExceptionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ExceptionKind::Holiday => "holiday",
            ExceptionKind::Cancelled => "cancelled",
        }
    }

    /// Human-readable description stored alongside the row.
    pub fn description(&self) -> &str {
        match self {
            ExceptionKind::Holiday => "Feriado Nacional / Local",
            ExceptionKind::Cancelled => "Clase Cancelada",
        }
    }
}

/// Day-level override for a group: a holiday or a cancelled class. While
/// one exists for a (group, date), no attendance rows may exist for it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "group_id": 1,
        "date": "2024-05-01",
        "kind": "holiday",
        "description": "Feriado Nacional / Local"
    })
)]
pub struct CalendarException {
    #[schema(example = 1)]
    pub group_id: i64,

    #[schema(example = "2024-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "holiday")]
    pub kind: String,

    #[schema(example = "Feriado Nacional / Local")]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!(ExceptionKind::Holiday.as_str(), "holiday");
        assert_eq!(ExceptionKind::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn descriptions_are_kind_derived() {
        assert_eq!(
            ExceptionKind::Holiday.description(),
            "Feriado Nacional / Local"
        );
        assert_eq!(ExceptionKind::Cancelled.description(), "Clase Cancelada");
    }
}
