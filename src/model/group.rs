use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Principiantes Lunes y Miércoles",
        "weekdays": [1, 3],
        "start_time": "18:00:00",
        "end_time": "19:00:00",
        "capacity": 20,
        "fee": 1000.0,
        "color": "#3B82F6",
        "active": true
    })
)]
pub struct Group {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Principiantes Lunes y Miércoles")]
    pub name: String,

    /// Weekday indices the group meets on, 0=Sunday..6=Saturday. Never
    /// empty for a saved group.
    #[schema(value_type = Vec<i32>, example = json!([1, 3]))]
    pub weekdays: Json<Vec<u8>>,

    #[schema(example = "18:00:00", value_type = String, format = "time")]
    pub start_time: NaiveTime,

    #[schema(example = "19:00:00", value_type = String, format = "time")]
    pub end_time: NaiveTime,

    #[schema(example = 20, nullable = true)]
    pub capacity: Option<i64>,

    #[schema(example = 1000.0)]
    pub fee: f64,

    #[schema(example = "#3B82F6")]
    pub color: String,

    #[schema(example = true)]
    pub active: bool,
}

impl Group {
    pub fn meets_on(&self, weekday: Weekday) -> bool {
        let idx = weekday.num_days_from_sunday() as u8;
        self.weekdays.0.contains(&idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn group_with_weekdays(weekdays: Vec<u8>) -> Group {
        Group {
            id: 1,
            name: "Test".to_string(),
            weekdays: Json(weekdays),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            capacity: None,
            fee: 0.0,
            color: "#3B82F6".to_string(),
            active: true,
        }
    }

    #[test]
    fn meets_on_matches_configured_weekdays() {
        let group = group_with_weekdays(vec![1, 3]);
        assert!(group.meets_on(Weekday::Mon));
        assert!(group.meets_on(Weekday::Wed));
        assert!(!group.meets_on(Weekday::Sun));
        assert!(!group.meets_on(Weekday::Sat));
    }

    #[test]
    fn meets_on_handles_sunday_as_zero() {
        let group = group_with_weekdays(vec![0, 6]);
        assert!(group.meets_on(Weekday::Sun));
        assert!(group.meets_on(Weekday::Sat));
        assert!(!group.meets_on(Weekday::Mon));
    }
}
