mod common;

use chrono::NaiveTime;
use common::*;
use infra::repos::{reservations, ReservationStatus};

#[tokio::test]
async fn test_create_then_read_returns_same_fields() {
    let app_state = setup_test_db().await;
    let fields = reservation_fields(unique_date(), "18:00", "555-123-4567");

    let created = reservations::create(&app_state.db, &fields, ReservationStatus::Booked)
        .await
        .expect("create should succeed");
    assert!(created.reservation_id > 0);
    assert_eq!(created.status, ReservationStatus::Booked);

    let read = reservations::read(&app_state.db, created.reservation_id)
        .await
        .expect("read should succeed")
        .expect("reservation should exist");

    assert_eq!(read.fields(), fields);
    assert_eq!(read.reservation_id, created.reservation_id);
}

#[tokio::test]
async fn test_read_missing_returns_none() {
    let app_state = setup_test_db().await;

    let read = reservations::read(&app_state.db, i32::MAX).await.unwrap();
    assert!(read.is_none());
}

#[tokio::test]
async fn test_search_by_date_excludes_finished_and_sorts_by_time() {
    let app_state = setup_test_db().await;
    let date = unique_date();

    let late = reservations::create(
        &app_state.db,
        &reservation_fields(date, "20:30", "555-000-0001"),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();
    let early = reservations::create(
        &app_state.db,
        &reservation_fields(date, "17:15", "555-000-0002"),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();
    let finished = reservations::create(
        &app_state.db,
        &reservation_fields(date, "18:00", "555-000-0003"),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();
    reservations::update_status(&app_state.db, finished.reservation_id, ReservationStatus::Finished)
        .await
        .unwrap();
    let other_day = reservations::create(
        &app_state.db,
        &reservation_fields(date.succ_opt().unwrap(), "19:00", "555-000-0004"),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();

    let found = reservations::search_by_date(&app_state.db, date).await.unwrap();

    assert!(found.iter().all(|r| r.reservation_date == date));
    assert!(found.iter().all(|r| r.status != ReservationStatus::Finished));
    assert!(found
        .windows(2)
        .all(|pair| pair[0].reservation_time <= pair[1].reservation_time));

    let ids: Vec<i32> = found.iter().map(|r| r.reservation_id).collect();
    let early_pos = ids.iter().position(|id| *id == early.reservation_id);
    let late_pos = ids.iter().position(|id| *id == late.reservation_id);
    assert!(early_pos.is_some() && late_pos.is_some());
    assert!(early_pos < late_pos);
    assert!(!ids.contains(&finished.reservation_id));
    assert!(!ids.contains(&other_day.reservation_id));
}

#[tokio::test]
async fn test_search_by_phone_matches_digit_fragments() {
    let app_state = setup_test_db().await;
    let digits = unique_phone_digits();
    let formatted = format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10]);

    let matching = reservations::create(
        &app_state.db,
        &reservation_fields(unique_date(), "18:00", &formatted),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();

    // Fragment spanning the punctuation in the stored value
    let fragment = format!("{}-{}", &digits[2..6], &digits[6..8]);
    let found = reservations::search_by_phone(&app_state.db, &fragment)
        .await
        .unwrap();
    assert!(found.iter().any(|r| r.reservation_id == matching.reservation_id));
    let needle: String = fragment.chars().filter(char::is_ascii_digit).collect();
    for row in &found {
        let stored: String = row
            .mobile_number
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | ' ' | '-'))
            .collect();
        assert!(stored.contains(&needle), "{} should contain {}", stored, needle);
    }

    // Full number, different punctuation
    let found = reservations::search_by_phone(&app_state.db, &digits).await.unwrap();
    assert!(found.iter().any(|r| r.reservation_id == matching.reservation_id));
}

#[tokio::test]
async fn test_search_by_phone_orders_by_date() {
    let app_state = setup_test_db().await;
    let digits = unique_phone_digits();
    let date = unique_date();

    let later = reservations::create(
        &app_state.db,
        &reservation_fields(date.succ_opt().unwrap(), "12:00", &digits),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();
    let earlier = reservations::create(
        &app_state.db,
        &reservation_fields(date, "12:00", &digits),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();

    let found = reservations::search_by_phone(&app_state.db, &digits).await.unwrap();
    let ids: Vec<i32> = found
        .iter()
        .map(|r| r.reservation_id)
        .filter(|id| *id == later.reservation_id || *id == earlier.reservation_id)
        .collect();
    assert_eq!(ids, vec![earlier.reservation_id, later.reservation_id]);
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let app_state = setup_test_db().await;
    let created = reservations::create(
        &app_state.db,
        &reservation_fields(unique_date(), "18:00", "555-123-4567"),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();

    let mut replacement = reservation_fields(unique_date(), "19:45", "555-987-6543");
    replacement.first_name = "John".to_string();
    replacement.last_name = "Smith".to_string();
    replacement.people = 6;

    let updated = reservations::update(&app_state.db, created.reservation_id, &replacement)
        .await
        .unwrap()
        .expect("reservation should exist");
    assert_eq!(updated.reservation_id, created.reservation_id);

    let read = reservations::read(&app_state.db, created.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.fields(), replacement);
    assert_eq!(read.reservation_id, created.reservation_id);
    assert_eq!(
        read.reservation_time,
        NaiveTime::from_hms_opt(19, 45, 0).unwrap()
    );
}

#[tokio::test]
async fn test_update_missing_returns_none() {
    let app_state = setup_test_db().await;
    let fields = reservation_fields(unique_date(), "18:00", "555-123-4567");

    let updated = reservations::update(&app_state.db, i32::MAX, &fields)
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_update_status_changes_only_status() {
    let app_state = setup_test_db().await;
    let created = reservations::create(
        &app_state.db,
        &reservation_fields(unique_date(), "18:00", "555-123-4567"),
        ReservationStatus::Booked,
    )
    .await
    .unwrap();

    let rows = reservations::update_status(
        &app_state.db,
        created.reservation_id,
        ReservationStatus::Seated,
    )
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReservationStatus::Seated);

    let read = reservations::read(&app_state.db, created.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.status, ReservationStatus::Seated);
    assert_eq!(read.fields(), created.fields());
    assert_eq!(read.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_status_missing_returns_no_rows() {
    let app_state = setup_test_db().await;

    let rows = reservations::update_status(&app_state.db, i32::MAX, ReservationStatus::Cancelled)
        .await
        .unwrap();
    assert!(rows.is_empty());
}
