use axum::http::StatusCode;
use cabinet_core::{
    commands::{ContactAction, ContactCommand},
    models::contact::{Contact, ContactStatus},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin_header, at, TestContext};

fn contact(id: Uuid, status: ContactStatus) -> Contact {
    Contact {
        id,
        name: "Marta Ruiz".to_string(),
        email: "marta@example.com".to_string(),
        phone: Some("+34 600 000 000".to_string()),
        subject: Some("Lease dispute".to_string()),
        message: "My landlord kept the deposit.".to_string(),
        status,
        appointment_id: None,
        created_at: at("2024-05-02", "08:45"),
        updated_at: at("2024-05-02", "08:45"),
    }
}

#[tokio::test]
async fn test_contact_command_requires_id() {
    let mut ctx = TestContext::new();
    ctx.contacts.expect_set_contact_status().never();

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/contacts")
        .add_header(name, value)
        .json(&json!({ "action": "mark_read" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Validation error: Missing ID" })
    );
}

#[tokio::test]
async fn test_contact_detail_requires_token() {
    let mut ctx = TestContext::new();
    ctx.contacts.expect_find_contact().never();

    let (server, _uploads) = ctx.build_server();

    let response = server
        .get(&format!("/api/admin/contacts/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contact_detail_marks_contact_read() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.contacts
        .expect_find_contact()
        .with(predicate::eq(id))
        .times(1)
        .returning(|id| Ok(Some(contact(id, ContactStatus::New))));
    ctx.contacts
        .expect_set_contact_status()
        .with(predicate::eq(id), predicate::eq(ContactStatus::Read))
        .times(1)
        .returning(|_, _| Ok(1));
    ctx.contacts
        .expect_contact_files()
        .times(1)
        .returning(|_| Ok(vec![]));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .get(&format!("/api/admin/contacts/{}", id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["contact"]["status"], json!("read"));
    assert_eq!(body["contact"]["email"], json!("marta@example.com"));
    assert_eq!(body["files"], json!([]));
}

#[tokio::test]
async fn test_contact_detail_of_absent_contact_is_not_found() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.contacts.expect_find_contact().returning(|_| Ok(None));
    ctx.contacts.expect_set_contact_status().never();

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .get(&format!("/api/admin/contacts/{}", id))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "error": format!("Resource not found: Contact with ID {} not found", id)
        })
    );
}

#[rstest]
#[case("mark_read")]
#[case("mark_new")]
#[case("delete")]
#[tokio::test]
async fn test_contact_command_on_absent_contact_is_not_found(#[case] action: &str) {
    let mut ctx = TestContext::new();
    ctx.contacts
        .expect_set_contact_status()
        .returning(|_, _| Ok(0));
    ctx.contacts.expect_delete_contact().returning(|_| Ok(0));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/contacts")
        .add_header(name, value)
        .json(&json!({ "action": action, "id": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_contact() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.contacts
        .expect_delete_contact()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(1));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .post("/api/admin/contacts")
        .add_header(name, value)
        .json(&json!({ "action": "delete", "id": id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Message deleted" })
    );
}

#[tokio::test]
async fn test_list_contacts() {
    let mut ctx = TestContext::new();
    ctx.contacts.expect_list_contacts().times(1).returning(|| {
        Ok(vec![
            contact(Uuid::new_v4(), ContactStatus::New),
            contact(Uuid::new_v4(), ContactStatus::Read),
        ])
    });

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .get("/api/admin/contacts")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body[0]["status"], json!("new"));
    assert_eq!(body[1]["status"], json!("read"));
}

#[test]
fn test_contact_command_actions() {
    let command: ContactCommand = serde_json::from_value(json!({
        "action": "mark_new",
        "id": "7f0c5a2e-61c4-4d36-9a55-2f6b0b1f3f0e"
    }))
    .unwrap();

    assert_eq!(command.action, ContactAction::MarkNew);
    assert!(command.id.is_some());

    assert!(serde_json::from_value::<ContactCommand>(json!({ "action": "archive" })).is_err());
}
