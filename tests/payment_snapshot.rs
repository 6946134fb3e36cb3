mod common;

use chrono::{Datelike, Utc};
use club_console::core::report;
use common::*;

#[tokio::test]
async fn marking_paid_snapshots_the_fee_at_toggle_time() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;
    let month = date(2024, 5, 1);

    let payment = report::toggle_payment(&pool, group, a, month, false)
        .await
        .unwrap()
        .expect("payment row after marking paid");
    assert!(payment.paid);
    assert_eq!(payment.amount, 1000.0);
    assert!(payment.paid_at.is_some());

    // A later fee change must not rewrite the recorded amount.
    sqlx::query("UPDATE groups SET fee = 2000 WHERE id = ?")
        .bind(group)
        .execute(&pool)
        .await
        .unwrap();

    let rows = report::build_report(&pool, group, month).await.unwrap();
    assert!(rows[0].paid);
    let stored: f64 =
        sqlx::query_scalar("SELECT amount FROM payments WHERE student_id = ? AND month = ?")
            .bind(a)
            .bind(month)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored, 1000.0);
}

#[tokio::test]
async fn toggling_off_clears_the_record_but_keeps_the_row() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;
    let month = date(2024, 5, 1);

    report::toggle_payment(&pool, group, a, month, false)
        .await
        .unwrap();
    let payment = report::toggle_payment(&pool, group, a, month, true)
        .await
        .unwrap()
        .expect("row is retained, not deleted");

    assert!(!payment.paid);
    assert_eq!(payment.amount, 0.0);
    assert!(payment.paid_at.is_none());
}

#[tokio::test]
async fn retoggling_resnapshots_at_the_current_fee() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;
    let month = date(2024, 5, 1);

    report::toggle_payment(&pool, group, a, month, false)
        .await
        .unwrap();
    report::toggle_payment(&pool, group, a, month, true)
        .await
        .unwrap();

    sqlx::query("UPDATE groups SET fee = 2000 WHERE id = ?")
        .bind(group)
        .execute(&pool)
        .await
        .unwrap();

    let payment = report::toggle_payment(&pool, group, a, month, false)
        .await
        .unwrap()
        .expect("payment row after re-marking");
    assert!(payment.paid);
    assert_eq!(payment.amount, 2000.0);
}

#[tokio::test]
async fn toggling_off_a_never_paid_month_is_a_quiet_noop() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;

    let payment = report::toggle_payment(&pool, group, a, date(2024, 5, 1), true)
        .await
        .unwrap();
    assert!(payment.is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn month_is_normalized_to_its_first_day() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1000.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;

    report::toggle_payment(&pool, group, a, date(2024, 5, 17), false)
        .await
        .unwrap();

    let stored: String =
        sqlx::query_scalar("SELECT month FROM payments WHERE student_id = ?")
            .bind(a)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored, "2024-05-01");
}

#[tokio::test]
async fn income_sums_stored_snapshots_not_current_fees() {
    let pool = setup_pool().await;
    let group = seed_group(&pool, "Principiantes", 1500.0).await;
    let a = seed_student(&pool, "Ana", "Acosta", group).await;
    let b = seed_student(&pool, "Bruno", "Benítez", group).await;
    let this_month = {
        let today = Utc::now().date_naive();
        today.with_day(1).unwrap_or(today)
    };

    report::toggle_payment(&pool, group, a, this_month, false)
        .await
        .unwrap();
    report::toggle_payment(&pool, group, b, this_month, false)
        .await
        .unwrap();

    sqlx::query("UPDATE groups SET fee = 9999 WHERE id = ?")
        .bind(group)
        .execute(&pool)
        .await
        .unwrap();

    let summary = report::monthly_income(&pool, 6).await.unwrap();
    assert_eq!(summary.len(), 6);

    let latest = summary.last().unwrap();
    assert_eq!(latest.month, this_month);
    assert_eq!(latest.income, 3000.0);
    assert_eq!(latest.payments, 2);

    // Earlier months stay zeroed.
    assert!(summary[..5].iter().all(|m| m.income == 0.0 && m.payments == 0));
}
