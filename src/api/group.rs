use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::types::Json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::require_confirmation;
use crate::error::Error;
use crate::model::Group;

#[derive(Deserialize, ToSchema)]
pub struct GroupPayload {
    #[schema(example = "Principiantes Lunes y Miércoles")]
    pub name: String,

    /// Weekday indices 0=Sunday..6=Saturday. At least one required.
    #[schema(example = json!([1, 3]))]
    pub weekdays: Vec<u8>,

    #[schema(example = "18:00:00", value_type = String, format = "time")]
    pub start_time: NaiveTime,

    #[schema(example = "19:00:00", value_type = String, format = "time")]
    pub end_time: NaiveTime,

    #[schema(example = 20)]
    pub capacity: Option<i64>,

    #[serde(default)]
    #[schema(example = 1000.0)]
    pub fee: f64,

    #[schema(example = "#3B82F6")]
    pub color: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GroupListResponse {
    pub data: Vec<Group>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ConfirmQuery {
    /// Must be `true`; soft-deleting a group is destructive.
    pub confirm: Option<bool>,
}

/// Rejected client-side before any write reaches the store.
fn validate_weekdays(weekdays: &[u8]) -> Result<Vec<u8>, Error> {
    if weekdays.is_empty() {
        return Err(Error::Validation(
            "A group needs at least one weekday".to_string(),
        ));
    }
    if weekdays.iter().any(|d| *d > 6) {
        return Err(Error::Validation(
            "Weekday indices must be between 0 (Sunday) and 6 (Saturday)".to_string(),
        ));
    }
    let mut days = weekdays.to_vec();
    days.sort_unstable();
    days.dedup();
    Ok(days)
}

/// Create Group
#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = GroupPayload,
    responses(
        (status = 200, description = "Group created", body = Object, example = json!({
            "message": "Group created successfully",
            "id": 1
        })),
        (status = 400, description = "No weekdays selected"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Groups"
)]
pub async fn create_group(
    pool: web::Data<SqlitePool>,
    payload: web::Json<GroupPayload>,
) -> actix_web::Result<impl Responder> {
    let weekdays = validate_weekdays(&payload.weekdays)?;
    let color = payload.color.clone().unwrap_or_else(|| "#3B82F6".to_string());

    let result = sqlx::query(
        "INSERT INTO groups(name, weekdays, start_time, end_time, capacity, fee, color, active)
         VALUES (?, ?, ?, ?, ?, ?, ?, 1)",
    )
    .bind(&payload.name)
    .bind(Json(weekdays))
    .bind(payload.start_time)
    .bind(payload.end_time)
    .bind(payload.capacity)
    .bind(payload.fee)
    .bind(&color)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => Ok(HttpResponse::Ok().json(json!({
            "message": "Group created successfully",
            "id": res.last_insert_rowid()
        }))),
        Err(e) => {
            error!(error = %e, "Failed to create group");
            Err(Error::Transient(e).into())
        }
    }
}

/// List active groups ordered by name
#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Active groups", body = GroupListResponse)
    ),
    tag = "Groups"
)]
pub async fn list_groups(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let groups =
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE active = 1 ORDER BY name")
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch groups");
                Error::Transient(e)
            })?;

    Ok(HttpResponse::Ok().json(GroupListResponse { data: groups }))
}

/// Get Group by ID
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id", description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 404, description = "Group not found")
    ),
    tag = "Groups"
)]
pub async fn get_group(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let group_id = path.into_inner();

    let group = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = ?")
        .bind(group_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, group_id, "Failed to fetch group");
            Error::Transient(e)
        })?;

    match group {
        Some(g) => Ok(HttpResponse::Ok().json(g)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Group not found"
        }))),
    }
}

/// Update Group (full replace)
#[utoipa::path(
    put,
    path = "/api/groups/{group_id}",
    params(("group_id", description = "Group ID")),
    request_body = GroupPayload,
    responses(
        (status = 200, description = "Group updated"),
        (status = 400, description = "No weekdays selected"),
        (status = 404, description = "Group not found")
    ),
    tag = "Groups"
)]
pub async fn update_group(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<GroupPayload>,
) -> actix_web::Result<impl Responder> {
    let group_id = path.into_inner();
    let weekdays = validate_weekdays(&payload.weekdays)?;
    let color = payload.color.clone().unwrap_or_else(|| "#3B82F6".to_string());

    let result = sqlx::query(
        "UPDATE groups SET
           name = ?, weekdays = ?, start_time = ?, end_time = ?,
           capacity = ?, fee = ?, color = ?
         WHERE id = ?",
    )
    .bind(&payload.name)
    .bind(Json(weekdays))
    .bind(payload.start_time)
    .bind(payload.end_time)
    .bind(payload.capacity)
    .bind(payload.fee)
    .bind(&color)
    .bind(group_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, group_id, "Failed to update group");
        Error::Transient(e)
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Group not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Group updated successfully"
    })))
}

/// Soft-delete Group
#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(("group_id", description = "Group ID"), ConfirmQuery),
    responses(
        (status = 200, description = "Group deactivated"),
        (status = 400, description = "Missing confirmation"),
        (status = 404, description = "Group not found")
    ),
    tag = "Groups"
)]
pub async fn delete_group(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<ConfirmQuery>,
) -> actix_web::Result<impl Responder> {
    require_confirmation(query.confirm)?;

    let group_id = path.into_inner();

    let result = sqlx::query("UPDATE groups SET active = 0 WHERE id = ?")
        .bind(group_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, group_id, "Failed to deactivate group");
            Error::Transient(e)
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Group not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Group deactivated successfully"
    })))
}
