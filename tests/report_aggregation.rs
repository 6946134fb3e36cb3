mod common;

use club_console::core::{report, roster};
use common::*;

#[tokio::test]
async fn report_matches_expected_monthly_tallies() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;
    let b = seed_student(&pool, "Bruno", "Benítez", group).await;
    let month = date(2024, 5, 1);

    // A attended four classes, missing one.
    for (day, present) in [(6, true), (8, true), (13, true), (15, false)] {
        sqlx::query(
            "INSERT INTO attendance(student_id, group_id, date, present) VALUES (?, ?, ?, ?)",
        )
        .bind(a)
        .bind(group)
        .bind(date(2024, 5, day))
        .bind(present)
        .execute(&pool)
        .await
        .unwrap();
    }

    // A paid the month; B has no rows at all.
    report::toggle_payment(&pool, group, a, month, false)
        .await
        .unwrap();

    let rows = report::build_report(&pool, group, month).await.unwrap();
    assert_eq!(rows.len(), 2);

    let row_a = &rows[0];
    assert_eq!(row_a.student_id, a);
    assert_eq!(row_a.classes_held, 4);
    assert_eq!(row_a.present, 3);
    assert_eq!(row_a.absent, 1);
    assert_eq!(row_a.attendance_percent, 75);
    assert!(row_a.paid);

    let row_b = &rows[1];
    assert_eq!(row_b.student_id, b);
    assert_eq!(row_b.classes_held, 0);
    assert_eq!(row_b.present, 0);
    assert_eq!(row_b.absent, 0);
    assert_eq!(row_b.attendance_percent, 0);
    assert!(!row_b.paid);
}

#[tokio::test]
async fn report_ignores_attendance_outside_the_month() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;

    for day in [date(2024, 4, 30), date(2024, 5, 1), date(2024, 5, 31), date(2024, 6, 1)] {
        mark_present(&pool, a, group, day).await;
    }

    let rows = report::build_report(&pool, group, date(2024, 5, 15))
        .await
        .unwrap();
    assert_eq!(rows[0].classes_held, 2);
    assert_eq!(rows[0].attendance_percent, 100);
}

#[tokio::test]
async fn roster_is_ordered_by_surname() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    seed_student(&pool, "Zoe", "Zárate", group).await;
    seed_student(&pool, "Ana", "Acosta", group).await;
    seed_student(&pool, "Mora", "Medina", group).await;

    let surnames: Vec<String> = roster::resolve_roster(&pool, group)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.last_name)
        .collect();
    assert_eq!(surnames, vec!["Acosta", "Medina", "Zárate"]);
}

#[tokio::test]
async fn unknown_group_reports_an_empty_list() {
    let pool = setup_pool().await;

    let roster = roster::resolve_roster(&pool, 999).await.unwrap();
    assert!(roster.is_empty());

    let rows = report::build_report(&pool, 999, date(2024, 5, 1))
        .await
        .unwrap();
    assert!(rows.is_empty());
}
