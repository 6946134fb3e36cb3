mod common;

use std::collections::HashMap;

use club_console::core::{attendance, calendar, roster};
use club_console::model::ExceptionKind;
use common::*;

#[tokio::test]
async fn repeated_commits_keep_one_record_per_student() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Martina", "Acosta", group).await;
    let b = seed_student(&pool, "Bruno", "Benítez", group).await;
    let day = date(2024, 5, 6);

    let mut marks = HashMap::new();
    marks.insert(a, true);
    marks.insert(b, false);
    attendance::commit_day(&pool, group, day, &marks)
        .await
        .unwrap();

    marks.insert(b, true);
    attendance::commit_day(&pool, group, day, &marks)
        .await
        .unwrap();
    marks.insert(a, false);
    attendance::commit_day(&pool, group, day, &marks)
        .await
        .unwrap();

    let rows = attendance_rows(&pool, group, day).await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows, vec![(a, false), (b, true)]);
}

#[tokio::test]
async fn unmarked_roster_members_are_saved_absent() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Martina", "Acosta", group).await;
    let b = seed_student(&pool, "Bruno", "Benítez", group).await;
    let day = date(2024, 5, 6);

    let mut marks = HashMap::new();
    marks.insert(a, true);
    let written = attendance::commit_day(&pool, group, day, &marks)
        .await
        .unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        attendance_rows(&pool, group, day).await,
        vec![(a, true), (b, false)]
    );
}

#[tokio::test]
async fn committing_a_later_date_never_touches_removed_students_history() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let x = seed_student(&pool, "Ximena", "Núñez", group).await;
    let y = seed_student(&pool, "Yago", "Ortiz", group).await;
    let past = date(2024, 4, 10);
    let later = date(2024, 4, 17);

    let mut marks = HashMap::new();
    marks.insert(x, true);
    marks.insert(y, true);
    attendance::commit_day(&pool, group, past, &marks)
        .await
        .unwrap();

    // X leaves the group; the membership row goes away but history stays.
    sqlx::query("DELETE FROM group_members WHERE student_id = ? AND group_id = ?")
        .bind(x)
        .bind(group)
        .execute(&pool)
        .await
        .unwrap();

    let mut later_marks = HashMap::new();
    later_marks.insert(y, false);
    attendance::commit_day(&pool, group, later, &later_marks)
        .await
        .unwrap();

    assert_eq!(
        attendance_rows(&pool, group, past).await,
        vec![(x, true), (y, true)]
    );
    assert_eq!(attendance_rows(&pool, group, later).await, vec![(y, false)]);
}

#[tokio::test]
async fn load_day_merges_roster_with_persisted_marks() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Martina", "Acosta", group).await;
    let b = seed_student(&pool, "Bruno", "Benítez", group).await;
    let day = date(2024, 5, 6);

    mark_present(&pool, a, group, day).await;

    let sheet = attendance::load_day(&pool, group, day).await.unwrap();
    assert_eq!(sheet.roster.len(), 2);
    assert!(sheet.is_editable());
    assert!(sheet.presence(a));
    // No row for B yet: indistinguishable from an explicit absence.
    assert!(!sheet.presence(b));
    assert_eq!(sheet.attendance.len(), 1);
}

#[tokio::test]
async fn delete_day_leaves_the_exception_in_place() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let day = date(2024, 5, 6);

    calendar::mark_exception(&pool, group, day, ExceptionKind::Holiday)
        .await
        .unwrap();

    let removed = attendance::delete_day(&pool, group, day).await.unwrap();
    assert_eq!(removed, 0);
    assert!(exception_row(&pool, group, day).await.is_some());
}

#[tokio::test]
async fn soft_deleted_students_leave_the_roster_but_keep_their_rows() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Martina", "Acosta", group).await;
    let b = seed_student(&pool, "Bruno", "Benítez", group).await;
    let day = date(2024, 5, 6);

    let mut marks = HashMap::new();
    marks.insert(a, true);
    marks.insert(b, true);
    attendance::commit_day(&pool, group, day, &marks)
        .await
        .unwrap();

    sqlx::query("UPDATE students SET active = 0 WHERE id = ?")
        .bind(a)
        .execute(&pool)
        .await
        .unwrap();

    let ids: Vec<i64> = roster::resolve_roster(&pool, group)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![b]);

    // History survives the soft delete.
    assert_eq!(
        attendance_rows(&pool, group, day).await,
        vec![(a, true), (b, true)]
    );
}
