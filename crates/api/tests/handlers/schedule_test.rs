use axum::http::StatusCode;
use cabinet_core::models::slot::AppointmentSlot;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin_header, at, TestContext};

fn slot(id: Uuid, is_booked: bool) -> AppointmentSlot {
    AppointmentSlot {
        id,
        start_time: at("2024-05-06", "09:00"),
        end_time: at("2024-05-06", "09:30"),
        is_booked,
        created_at: at("2024-05-01", "08:00"),
        updated_at: at("2024-05-01", "08:00"),
    }
}

#[tokio::test]
async fn test_add_daily_slots() {
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_slot_exists()
        .times(5)
        .returning(|_, _| Ok(false));
    ctx.slots
        .expect_insert_slot()
        .withf(|start, _| *start != at("2024-05-06", "10:00"))
        .times(5)
        .returning(|_, _| Ok(Some(Uuid::new_v4())));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({
            "action": "add_daily_slots",
            "date": "2024-05-06",
            "start_time": "09:00",
            "end_time": "12:00",
            "break_start": "10:00",
            "break_end": "10:30"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "5 slots added successfully" })
    );
}

#[tokio::test]
async fn test_add_daily_slots_skips_existing() {
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_slot_exists()
        .times(2)
        .returning(|start, _| Ok(start == at("2024-05-06", "09:00")));
    ctx.slots
        .expect_insert_slot()
        .with(
            predicate::eq(at("2024-05-06", "09:30")),
            predicate::eq(at("2024-05-06", "10:00")),
        )
        .times(1)
        .returning(|_, _| Ok(Some(Uuid::new_v4())));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({
            "action": "add_daily_slots",
            "date": "2024-05-06",
            "start_time": "09:00",
            "end_time": "10:00"
        }))
        .await;

    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "1 slots added successfully" })
    );
}

#[tokio::test]
async fn test_add_daily_slots_requires_date() {
    let mut ctx = TestContext::new();
    ctx.slots.expect_slot_exists().never();
    ctx.slots.expect_insert_slot().never();

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "add_daily_slots", "all_day": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Validation error: Date is required" })
    );
}

#[tokio::test]
async fn test_add_daily_slots_storage_failure() {
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_slot_exists()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("connection refused")));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "add_daily_slots", "date": "2024-05-06" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Operation failed" })
    );
}

#[tokio::test]
async fn test_delete_slot() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_delete_slot_if_unbooked()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(1));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "delete_slot", "slot_id": id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Slot deleted successfully" })
    );
}

#[tokio::test]
async fn test_delete_booked_slot_is_refused() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_delete_slot_if_unbooked()
        .times(1)
        .returning(|_| Ok(0));
    ctx.slots
        .expect_find_slot()
        .with(predicate::eq(id))
        .times(1)
        .returning(|id| Ok(Some(slot(id, true))));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "delete_slot", "slot_id": id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Action refused: Booked slots cannot be deleted" })
    );
}

#[tokio::test]
async fn test_delete_slot_with_appointments_is_refused() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_delete_slot_if_unbooked()
        .times(1)
        .returning(|_| Ok(0));
    ctx.slots
        .expect_find_slot()
        .times(1)
        .returning(|id| Ok(Some(slot(id, false))));
    ctx.slots
        .expect_count_appointments()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(1));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "delete_slot", "slot_id": id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Action refused: Slots with appointments cannot be deleted" })
    );
}

#[tokio::test]
async fn test_delete_unknown_slot() {
    let mut ctx = TestContext::new();
    ctx.slots
        .expect_delete_slot_if_unbooked()
        .times(1)
        .returning(|_| Ok(0));
    ctx.slots.expect_find_slot().times(1).returning(|_| Ok(None));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "delete_slot", "slot_id": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_slot_requires_id() {
    let mut ctx = TestContext::new();
    ctx.slots.expect_delete_slot_if_unbooked().never();

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/schedule")
        .add_header(name, value)
        .json(&json!({ "action": "delete_slot" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Validation error: Slot ID is required" })
    );
}
