use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::api::require_confirmation;
use crate::error::Error;
use crate::model::Student;

/// Full attribute set for a student; saving always replaces everything,
/// including the group memberships.
#[derive(Deserialize, ToSchema)]
pub struct StudentPayload {
    #[schema(example = "Martina")]
    pub first_name: String,

    #[schema(example = "Acosta")]
    pub last_name: String,

    #[schema(example = "2014-03-22", format = "date", value_type = Option<String>)]
    pub birth_date: Option<NaiveDate>,

    /// Defaults to today when omitted.
    #[schema(example = "2024-02-01", format = "date", value_type = Option<String>)]
    pub enrolled_on: Option<NaiveDate>,

    #[schema(example = "Laura Acosta")]
    pub guardian_name: String,

    #[schema(example = "+54911555001")]
    pub guardian_phone: Option<String>,

    #[schema(example = "laura@email.com")]
    pub guardian_email: Option<String>,

    pub emergency_phone: Option<String>,

    #[serde(default)]
    #[schema(example = true)]
    pub has_insurance: bool,

    pub insurance_receipt_url: Option<String>,

    pub notes: Option<String>,

    /// Groups the student attends; replaces the previous memberships
    /// wholesale on every save.
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub group_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StudentQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 20)]
    pub per_page: Option<u32>,

    /// Matches against student and guardian names.
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StudentListResponse {
    pub data: Vec<Student>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StudentDetail {
    pub student: Student,
    #[schema(example = json!([1, 2]))]
    pub group_ids: Vec<i64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ConfirmQuery {
    /// Must be `true`; soft-deleting a student is destructive.
    pub confirm: Option<bool>,
}

/// Create Student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student created", body = Object, example = json!({
            "message": "Student created successfully",
            "id": 1
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn create_student(
    pool: web::Data<SqlitePool>,
    payload: web::Json<StudentPayload>,
) -> actix_web::Result<impl Responder> {
    let enrolled_on = payload
        .enrolled_on
        .unwrap_or_else(|| Utc::now().date_naive());

    let mut tx = pool.begin().await.map_err(Error::Transient)?;

    let result = sqlx::query(
        "INSERT INTO students
         (first_name, last_name, birth_date, enrolled_on, guardian_name,
          guardian_phone, guardian_email, emergency_phone, has_insurance,
          insurance_receipt_url, notes, active)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1)",
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(payload.birth_date)
    .bind(enrolled_on)
    .bind(&payload.guardian_name)
    .bind(&payload.guardian_phone)
    .bind(&payload.guardian_email)
    .bind(&payload.emergency_phone)
    .bind(payload.has_insurance)
    .bind(&payload.insurance_receipt_url)
    .bind(&payload.notes)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create student");
        Error::Transient(e)
    })?;

    let student_id = result.last_insert_rowid();

    for group_id in &payload.group_ids {
        sqlx::query("INSERT INTO group_members(student_id, group_id) VALUES (?, ?)")
            .bind(student_id)
            .bind(group_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, student_id, group_id, "Failed to link student to group");
                Error::Transient(e)
            })?;
    }

    tx.commit().await.map_err(Error::Transient)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Student created successfully",
        "id": student_id
    })))
}

/// List students (active only), paginated
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Paginated student list", body = StudentListResponse)
    ),
    tag = "Students"
)]
pub async fn list_students(
    pool: web::Data<SqlitePool>,
    query: web::Query<StudentQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = vec!["active = 1"];
    let like = query.search.as_ref().map(|s| format!("%{}%", s));
    if like.is_some() {
        conditions.push("(first_name LIKE ? OR last_name LIKE ? OR guardian_name LIKE ?)");
    }
    let where_clause = format!("WHERE {}", conditions.join(" AND "));

    let count_sql = format!("SELECT COUNT(*) FROM students {}", where_clause);
    debug!(sql = %count_sql, "Counting students");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(like) = &like {
        count_query = count_query.bind(like).bind(like).bind(like);
    }
    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count students");
        Error::Transient(e)
    })?;

    let data_sql = format!(
        "SELECT * FROM students {} ORDER BY last_name, first_name LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, per_page, "Fetching students");

    let mut data_query = sqlx::query_as::<_, Student>(&data_sql);
    if let Some(like) = &like {
        data_query = data_query.bind(like).bind(like).bind(like);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let students = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch students");
        Error::Transient(e)
    })?;

    Ok(HttpResponse::Ok().json(StudentListResponse {
        data: students,
        page,
        per_page,
        total,
    }))
}

/// Get Student by ID (with group memberships)
#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(("student_id", description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentDetail),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let student_id = path.into_inner();

    let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = ?")
        .bind(student_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, student_id, "Failed to fetch student");
            Error::Transient(e)
        })?;

    let Some(student) = student else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })));
    };

    let group_ids: Vec<i64> =
        sqlx::query_scalar("SELECT group_id FROM group_members WHERE student_id = ?")
            .bind(student_id)
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, student_id, "Failed to fetch student memberships");
                Error::Transient(e)
            })?;

    Ok(HttpResponse::Ok().json(StudentDetail { student, group_ids }))
}

/// Update Student (full replace, including memberships)
#[utoipa::path(
    put,
    path = "/api/students/{student_id}",
    params(("student_id", description = "Student ID")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn update_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<StudentPayload>,
) -> actix_web::Result<impl Responder> {
    let student_id = path.into_inner();
    let enrolled_on = payload
        .enrolled_on
        .unwrap_or_else(|| Utc::now().date_naive());

    let mut tx = pool.begin().await.map_err(Error::Transient)?;

    let result = sqlx::query(
        "UPDATE students SET
           first_name = ?, last_name = ?, birth_date = ?, enrolled_on = ?,
           guardian_name = ?, guardian_phone = ?, guardian_email = ?,
           emergency_phone = ?, has_insurance = ?, insurance_receipt_url = ?,
           notes = ?
         WHERE id = ?",
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(payload.birth_date)
    .bind(enrolled_on)
    .bind(&payload.guardian_name)
    .bind(&payload.guardian_phone)
    .bind(&payload.guardian_email)
    .bind(&payload.emergency_phone)
    .bind(payload.has_insurance)
    .bind(&payload.insurance_receipt_url)
    .bind(&payload.notes)
    .bind(student_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        error!(error = %e, student_id, "Failed to update student");
        Error::Transient(e)
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })));
    }

    // Memberships are replaced wholesale on every save, never patched.
    sqlx::query("DELETE FROM group_members WHERE student_id = ?")
        .bind(student_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Transient)?;

    for group_id in &payload.group_ids {
        sqlx::query("INSERT INTO group_members(student_id, group_id) VALUES (?, ?)")
            .bind(student_id)
            .bind(group_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, student_id, group_id, "Failed to link student to group");
                Error::Transient(e)
            })?;
    }

    tx.commit().await.map_err(Error::Transient)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Student updated successfully"
    })))
}

/// Soft-delete Student
///
/// Flips the active flag; the row and its attendance history are kept.
#[utoipa::path(
    delete,
    path = "/api/students/{student_id}",
    params(("student_id", description = "Student ID"), ConfirmQuery),
    responses(
        (status = 200, description = "Student deactivated"),
        (status = 400, description = "Missing confirmation"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<ConfirmQuery>,
) -> actix_web::Result<impl Responder> {
    require_confirmation(query.confirm)?;

    let student_id = path.into_inner();

    let result = sqlx::query("UPDATE students SET active = 0 WHERE id = ?")
        .bind(student_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, student_id, "Failed to deactivate student");
            Error::Transient(e)
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Student deactivated successfully"
    })))
}
