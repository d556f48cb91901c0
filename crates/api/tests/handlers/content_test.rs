use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use cabinet_api::{
    forms::{parse_date_time, ContentCommand, FormData},
    handlers::content::execute,
    images::{ImageFolder, ImageStore, LocalImageStore, UploadedImage},
};
use cabinet_core::{
    context::RequestContext,
    errors::CabinetError,
    models::content::{
        ArticleFields, ArticleKind, ServiceFields, SiteContent, TeamMemberFields,
        DEFAULT_SERVICE_COLOR, DEFAULT_SERVICE_ICON,
    },
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin_header, at, TestContext};

fn validation_message(form: FormData) -> String {
    match ContentCommand::from_form(form) {
        Err(CabinetError::Validation(message)) => message,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

fn png() -> UploadedImage {
    UploadedImage {
        file_name: Some("photo.png".to_string()),
        content_type: Some("image/png".to_string()),
        bytes: vec![0x89, 0x50, 0x4E, 0x47],
    }
}

#[test]
fn test_add_service_defaults() {
    let form = FormData::default()
        .with_field("action", "add_service")
        .with_field("service_title", "Family law")
        .with_field("service_description", "Divorce and custody");

    match ContentCommand::from_form(form).unwrap() {
        ContentCommand::AddService(fields) => assert_eq!(
            fields,
            ServiceFields {
                title: "Family law".to_string(),
                description: "Divorce and custody".to_string(),
                icon: DEFAULT_SERVICE_ICON.to_string(),
                color: DEFAULT_SERVICE_COLOR.to_string(),
                detailed_content: String::new(),
            }
        ),
        other => panic!("unexpected command {:?}", other),
    }
}

#[rstest]
#[case(FormData::default().with_field("action", "add_service").with_field("service_title", "Family law"), "Title and description are required")]
#[case(FormData::default().with_field("action", "update_service").with_field("service_title", "Family law").with_field("service_description", "d"), "Missing data")]
#[case(FormData::default().with_field("action", "delete_service"), "Missing ID")]
#[case(FormData::default().with_field("action", "add_team_member").with_field("team_name", "Ana").with_field("team_position", " "), "All fields are required")]
#[case(FormData::default().with_field("action", "delete_team_member").with_field("team_id", ""), "Missing ID")]
#[case(FormData::default().with_field("action", "add_news").with_field("news_title", "Opening"), "Title and content are required")]
#[case(FormData::default().with_field("action", "add_event").with_field("event_content", "Talk"), "Title and content are required")]
#[case(FormData::default().with_field("action", "delete_event").with_field("event_id", "42"), "Invalid ID: 42")]
#[case(FormData::default().with_field("action", "publish_everything"), "Unknown action: publish_everything")]
#[case(FormData::default(), "Action is required")]
fn test_invalid_forms(#[case] form: FormData, #[case] expected: &str) {
    assert_eq!(validation_message(form), expected);
}

#[test]
fn test_update_team_member_keeps_flag_and_image() {
    let id = Uuid::new_v4();
    let form = FormData::default()
        .with_field("action", "update_team_member")
        .with_field("team_id", id.to_string())
        .with_field("team_name", "Ana Lopez")
        .with_field("team_position", "Partner")
        .with_field("team_description", "Labour law")
        .with_field("team_is_active", "on")
        .with_file("team_image", png());

    match ContentCommand::from_form(form).unwrap() {
        ContentCommand::UpdateTeamMember {
            id: parsed,
            fields,
            image,
            is_active,
        } => {
            assert_eq!(parsed, id);
            assert_eq!(fields.name, "Ana Lopez");
            assert!(is_active);
            assert_eq!(image.unwrap().bytes, png().bytes);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_unchecked_active_flag_deactivates() {
    let form = FormData::default()
        .with_field("action", "update_service")
        .with_field("service_id", Uuid::new_v4().to_string())
        .with_field("service_title", "Family law")
        .with_field("service_description", "Divorce and custody");

    match ContentCommand::from_form(form).unwrap() {
        ContentCommand::UpdateService { is_active, .. } => assert!(!is_active),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_add_event_with_date() {
    let form = FormData::default()
        .with_field("action", "add_event")
        .with_field("event_title", "Open day")
        .with_field("event_content", "Free consultations")
        .with_field("event_date", "2024-06-01T14:30");

    match ContentCommand::from_form(form).unwrap() {
        ContentCommand::AddArticle {
            kind,
            fields,
            image,
        } => {
            assert_eq!(kind, ArticleKind::Events);
            assert_eq!(fields.date, Some(at("2024-06-01", "14:30")));
            assert!(image.is_none());
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_add_news_without_date() {
    let form = FormData::default()
        .with_field("action", "add_news")
        .with_field("news_title", "New office")
        .with_field("news_content", "We moved")
        .with_field("news_publish_date", "");

    match ContentCommand::from_form(form).unwrap() {
        ContentCommand::AddArticle { kind, fields, .. } => {
            assert_eq!(kind, ArticleKind::News);
            assert_eq!(fields.date, None);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_update_content_keeps_editable_sections_only() {
    let form = FormData::default()
        .with_field("action", "update_content")
        .with_field("hero[title]", "Your rights, defended")
        .with_field("footer[copyright]", "2024")
        .with_field("admin[password]", "nope")
        .with_field("hero[]", "no key")
        .with_field("about", "no brackets");

    match ContentCommand::from_form(form).unwrap() {
        ContentCommand::UpdateContent { entries } => assert_eq!(
            entries,
            vec![
                (
                    "footer".to_string(),
                    "copyright".to_string(),
                    "2024".to_string()
                ),
                (
                    "hero".to_string(),
                    "title".to_string(),
                    "Your rights, defended".to_string()
                ),
            ]
        ),
        other => panic!("unexpected command {:?}", other),
    }
}

#[rstest]
#[case("2024-06-01T14:30", "2024-06-01", "14:30")]
#[case("2024-06-01 14:30:00", "2024-06-01", "14:30")]
#[case("2024-06-01", "2024-06-01", "00:00")]
fn test_parse_date_time(#[case] input: &str, #[case] date: &str, #[case] time: &str) {
    assert_eq!(parse_date_time(input).unwrap(), at(date, time));
}

#[test]
fn test_parse_date_time_rejects_garbage() {
    assert!(matches!(
        parse_date_time("next tuesday"),
        Err(CabinetError::Validation(_))
    ));
}

fn admin() -> RequestContext {
    RequestContext::new("test-admin")
}

fn member_fields() -> TeamMemberFields {
    TeamMemberFields {
        name: "Ana Lopez".to_string(),
        position: "Partner".to_string(),
        description: "Labour law".to_string(),
    }
}

fn service_fields() -> ServiceFields {
    ServiceFields {
        title: "Family law".to_string(),
        description: "Divorce and custody".to_string(),
        icon: DEFAULT_SERVICE_ICON.to_string(),
        color: DEFAULT_SERVICE_COLOR.to_string(),
        detailed_content: String::new(),
    }
}

/// Files below one upload folder.
fn files_in(upload_dir: &Path, folder: ImageFolder) -> Vec<PathBuf> {
    match std::fs::read_dir(upload_dir.join(folder.as_str())) {
        Ok(entries) => entries.map(|entry| entry.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[tokio::test]
async fn test_update_unknown_service_is_not_found() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.content
        .expect_update_service()
        .withf(move |service_id, fields, is_active| {
            *service_id == id && fields.title == "Family law" && *is_active
        })
        .times(1)
        .returning(|_, _, _| Ok(0));

    let (state, _uploads) = ctx.build_state();
    let command = ContentCommand::UpdateService {
        id,
        fields: service_fields(),
        is_active: true,
    };

    match execute(&state, &admin(), command).await {
        Err(CabinetError::NotFound(message)) => {
            assert_eq!(message, format!("Service with ID {} not found", id))
        }
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_unknown_service_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.content.expect_delete_service().returning(|_| Ok(0));

    let (state, _uploads) = ctx.build_state();
    let command = ContentCommand::DeleteService { id: Uuid::new_v4() };

    assert!(matches!(
        execute(&state, &admin(), command).await,
        Err(CabinetError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_missing_team_member_discards_new_upload() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.content
        .expect_update_team_member()
        .withf(|_, _, image_path, _| {
            image_path
                .as_deref()
                .is_some_and(|path| path.starts_with("/uploads/team/team_"))
        })
        .times(1)
        .returning(|_, _, _, _| Ok(0));

    let (state, uploads) = ctx.build_state();
    let command = ContentCommand::UpdateTeamMember {
        id,
        fields: member_fields(),
        image: Some(png()),
        is_active: true,
    };

    let result = execute(&state, &admin(), command).await;

    assert!(matches!(result, Err(CabinetError::NotFound(_))));
    assert_eq!(files_in(uploads.path(), ImageFolder::Team), Vec::<PathBuf>::new());
}

#[tokio::test]
async fn test_update_team_member_keeps_new_upload() {
    let mut ctx = TestContext::new();
    ctx.content
        .expect_update_team_member()
        .returning(|_, _, _, _| Ok(1));

    let (state, uploads) = ctx.build_state();
    let command = ContentCommand::UpdateTeamMember {
        id: Uuid::new_v4(),
        fields: member_fields(),
        image: Some(png()),
        is_active: false,
    };

    let flash = execute(&state, &admin(), command).await.unwrap();

    assert_eq!(flash.message, "Team member updated successfully");
    assert_eq!(files_in(uploads.path(), ImageFolder::Team).len(), 1);
}

#[tokio::test]
async fn test_update_without_upload_keeps_stored_image() {
    let mut ctx = TestContext::new();
    ctx.content
        .expect_update_article()
        .withf(|kind, _, _, image_path, _| *kind == ArticleKind::News && image_path.is_none())
        .times(1)
        .returning(|_, _, _, _, _| Ok(1));

    let (state, _uploads) = ctx.build_state();
    let command = ContentCommand::UpdateArticle {
        kind: ArticleKind::News,
        id: Uuid::new_v4(),
        fields: ArticleFields {
            title: "New office".to_string(),
            content: "We moved".to_string(),
            date: None,
        },
        image: None,
        is_active: true,
    };

    let flash = execute(&state, &admin(), command).await.unwrap();
    assert_eq!(flash.message, "News item updated successfully");
}

#[tokio::test]
async fn test_delete_team_member_removes_image() {
    let mut ctx = TestContext::new();
    let images = LocalImageStore::new(ctx.upload_dir.path());
    let public_path = images
        .store(ImageFolder::Team, &png())
        .await
        .unwrap()
        .unwrap();
    let on_disk = images.resolve(&public_path).unwrap();
    assert!(on_disk.exists());

    let id = Uuid::new_v4();
    ctx.content
        .expect_delete_team_member()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |_| Ok(Some(Some(public_path.clone()))));

    let (state, _uploads) = ctx.build_state();
    let flash = execute(&state, &admin(), ContentCommand::DeleteTeamMember { id })
        .await
        .unwrap();

    assert_eq!(flash.message, "Team member deleted successfully");
    assert!(!on_disk.exists());
}

#[tokio::test]
async fn test_delete_event_removes_image() {
    let mut ctx = TestContext::new();
    let images = LocalImageStore::new(ctx.upload_dir.path());
    let public_path = images
        .store(ImageFolder::Events, &png())
        .await
        .unwrap()
        .unwrap();
    let on_disk = images.resolve(&public_path).unwrap();

    ctx.content
        .expect_delete_article()
        .withf(|kind, _| *kind == ArticleKind::Events)
        .times(1)
        .returning(move |_, _| Ok(Some(Some(public_path.clone()))));

    let (state, _uploads) = ctx.build_state();
    let command = ContentCommand::DeleteArticle {
        kind: ArticleKind::Events,
        id: Uuid::new_v4(),
    };
    let flash = execute(&state, &admin(), command).await.unwrap();

    assert_eq!(flash.message, "Event deleted successfully");
    assert!(!on_disk.exists());
}

#[tokio::test]
async fn test_delete_unknown_news_item_is_not_found() {
    let id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.content
        .expect_delete_article()
        .returning(|_, _| Ok(None));

    let (state, _uploads) = ctx.build_state();
    let command = ContentCommand::DeleteArticle {
        kind: ArticleKind::News,
        id,
    };

    match execute(&state, &admin(), command).await {
        Err(CabinetError::NotFound(message)) => {
            assert_eq!(message, format!("News item with ID {} not found", id))
        }
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_add_team_member_ignores_unsupported_upload() {
    let mut ctx = TestContext::new();
    ctx.content
        .expect_create_team_member()
        .withf(|fields, image_path| fields.name == "Ana Lopez" && image_path.is_none())
        .times(1)
        .returning(|fields, image_path| {
            Ok(cabinet_core::models::content::TeamMember {
                id: Uuid::new_v4(),
                name: fields.name.clone(),
                position: fields.position.clone(),
                description: fields.description.clone(),
                image_path,
                order_position: 1,
                is_active: true,
                created_at: at("2024-05-01", "08:00"),
                updated_at: at("2024-05-01", "08:00"),
            })
        });

    let (state, uploads) = ctx.build_state();
    let command = ContentCommand::AddTeamMember {
        fields: member_fields(),
        image: Some(UploadedImage {
            file_name: Some("cv.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        }),
    };

    let flash = execute(&state, &admin(), command).await.unwrap();

    assert_eq!(flash.message, "Team member added successfully");
    assert!(files_in(uploads.path(), ImageFolder::Team).is_empty());
}

#[tokio::test]
async fn test_update_content_saves_entries() {
    let mut ctx = TestContext::new();
    ctx.content
        .expect_save_site_content()
        .with(predicate::eq(vec![(
            "hero".to_string(),
            "title".to_string(),
            "Your rights, defended".to_string(),
        )]))
        .times(1)
        .returning(|_| Ok(()));

    let (state, _uploads) = ctx.build_state();
    let command = ContentCommand::UpdateContent {
        entries: vec![(
            "hero".to_string(),
            "title".to_string(),
            "Your rights, defended".to_string(),
        )],
    };

    let flash = execute(&state, &admin(), command).await.unwrap();
    assert_eq!(flash.message, "Content updated successfully");
}

#[tokio::test]
async fn test_get_content_overview() {
    let mut ctx = TestContext::new();
    ctx.content.expect_site_content().times(1).returning(|| {
        let mut content = SiteContent::new();
        content
            .entry("hero".to_string())
            .or_default()
            .insert("title".to_string(), "Your rights, defended".to_string());
        Ok(content)
    });
    ctx.content.expect_list_services().returning(|| Ok(vec![]));
    ctx.content.expect_list_team_members().returning(|| Ok(vec![]));
    ctx.content.expect_list_news().returning(|| Ok(vec![]));
    ctx.content.expect_list_events().returning(|| Ok(vec![]));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .get("/api/admin/content")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "content": { "hero": { "title": "Your rights, defended" } },
            "services": [],
            "team": [],
            "news": [],
            "events": []
        })
    );
}

#[tokio::test]
async fn test_content_storage_failure_hides_details() {
    let mut ctx = TestContext::new();
    ctx.content
        .expect_site_content()
        .returning(|| Err(eyre::eyre!("relation \"site_content\" does not exist")));

    let (server, _uploads) = ctx.build_server();
    let (name, value) = admin_header();

    let response = server
        .get("/api/admin/content")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Operation failed" })
    );
}
