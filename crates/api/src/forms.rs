//! # Content Forms
//!
//! The content editor posts multipart forms: text fields, an `action` field
//! naming the command and, for team members, news and events, an optional
//! image. This module reads such a form once and turns it into a
//! [`ContentCommand`], validating required fields before anything is written.

use std::collections::HashMap;

use axum::extract::Multipart;
use cabinet_core::{
    errors::{CabinetError, CabinetResult},
    models::content::{
        ArticleFields, ArticleKind, ServiceFields, TeamMemberFields, DEFAULT_SERVICE_COLOR,
        DEFAULT_SERVICE_ICON, EDITABLE_SECTIONS,
    },
};
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::images::{ImageFolder, UploadedImage};

/// Date formats accepted for news and event dates.
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Text fields and files of a submitted form.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedImage>,
}

impl FormData {
    /// Reads every part of a multipart body. Parts with a file name are kept
    /// as files, except empty ones which browsers send for untouched inputs.
    pub async fn from_multipart(mut multipart: Multipart) -> CabinetResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| CabinetError::Validation(format!("Invalid form data: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            if file_name.is_some() {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| CabinetError::Validation(format!("Invalid upload: {}", e)))?;
                if !bytes.is_empty() {
                    form.files.insert(
                        name,
                        UploadedImage {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| CabinetError::Validation(format!("Invalid form field: {}", e)))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, image: UploadedImage) -> Self {
        self.files.insert(name.into(), image);
        self
    }

    /// A text field, `None` if absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// A text field, or an empty string if absent.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Checkbox semantics: the flag is set when the field was submitted at all.
    pub fn flag(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedImage> {
        self.files.remove(name)
    }

    fn id(&self, name: &str, missing: &str) -> CabinetResult<Uuid> {
        let value = self
            .text(name)
            .ok_or_else(|| CabinetError::Validation(missing.to_string()))?;
        Uuid::parse_str(value.trim())
            .map_err(|_| CabinetError::Validation(format!("Invalid ID: {}", value)))
    }

    fn date(&self, name: &str) -> CabinetResult<Option<NaiveDateTime>> {
        self.text(name).map(parse_date_time).transpose()
    }

    /// `section[key]` fields of the editable sections, as upsert entries.
    fn site_content_entries(&self) -> Vec<(String, String, String)> {
        let mut entries: Vec<_> = self
            .fields
            .iter()
            .filter_map(|(name, value)| {
                let (section, rest) = name.split_once('[')?;
                let key = rest.strip_suffix(']')?;
                if key.is_empty() || !EDITABLE_SECTIONS.contains(&section) {
                    return None;
                }
                Some((section.to_string(), key.to_string(), value.clone()))
            })
            .collect();
        entries.sort();
        entries
    }
}

/// Parses a date-time as sent by `datetime-local` inputs, a SQL timestamp or a
/// bare date (taken at midnight).
pub fn parse_date_time(value: &str) -> CabinetResult<NaiveDateTime> {
    let value = value.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CabinetError::Validation(format!("Invalid date: {}", value)))
}

/// A content editor command, validated and ready to run.
#[derive(Debug, Clone)]
pub enum ContentCommand {
    UpdateContent {
        entries: Vec<(String, String, String)>,
    },
    AddService(ServiceFields),
    UpdateService {
        id: Uuid,
        fields: ServiceFields,
        is_active: bool,
    },
    DeleteService {
        id: Uuid,
    },
    AddTeamMember {
        fields: TeamMemberFields,
        image: Option<UploadedImage>,
    },
    UpdateTeamMember {
        id: Uuid,
        fields: TeamMemberFields,
        image: Option<UploadedImage>,
        is_active: bool,
    },
    DeleteTeamMember {
        id: Uuid,
    },
    AddArticle {
        kind: ArticleKind,
        fields: ArticleFields,
        image: Option<UploadedImage>,
    },
    UpdateArticle {
        kind: ArticleKind,
        id: Uuid,
        fields: ArticleFields,
        image: Option<UploadedImage>,
        is_active: bool,
    },
    DeleteArticle {
        kind: ArticleKind,
        id: Uuid,
    },
}

/// Form field prefix and upload folder of each article kind.
pub fn article_prefix(kind: ArticleKind) -> (&'static str, &'static str, ImageFolder) {
    match kind {
        ArticleKind::News => ("news", "news_publish_date", ImageFolder::News),
        ArticleKind::Events => ("event", "event_date", ImageFolder::Events),
    }
}

impl ContentCommand {
    /// Resolves the `action` field and validates the fields it requires.
    pub fn from_form(mut form: FormData) -> CabinetResult<Self> {
        let action = form.text("action").unwrap_or_default().to_string();

        match action.as_str() {
            "update_content" => Ok(ContentCommand::UpdateContent {
                entries: form.site_content_entries(),
            }),
            "add_service" => {
                let fields = service_fields(&form)
                    .ok_or_else(|| validation("Title and description are required"))?;
                Ok(ContentCommand::AddService(fields))
            }
            "update_service" => {
                let id = form.id("service_id", "Missing data")?;
                let fields = service_fields(&form).ok_or_else(|| validation("Missing data"))?;
                Ok(ContentCommand::UpdateService {
                    id,
                    fields,
                    is_active: form.flag("service_is_active"),
                })
            }
            "delete_service" => Ok(ContentCommand::DeleteService {
                id: form.id("service_id", "Missing ID")?,
            }),
            "add_team_member" => {
                let fields =
                    team_fields(&form).ok_or_else(|| validation("All fields are required"))?;
                Ok(ContentCommand::AddTeamMember {
                    fields,
                    image: form.take_file("team_image"),
                })
            }
            "update_team_member" => {
                let id = form.id("team_id", "Missing data")?;
                let fields = team_fields(&form).ok_or_else(|| validation("Missing data"))?;
                Ok(ContentCommand::UpdateTeamMember {
                    id,
                    fields,
                    is_active: form.flag("team_is_active"),
                    image: form.take_file("team_image"),
                })
            }
            "delete_team_member" => Ok(ContentCommand::DeleteTeamMember {
                id: form.id("team_id", "Missing ID")?,
            }),
            "add_news" => add_article(ArticleKind::News, &mut form),
            "update_news" => update_article(ArticleKind::News, &mut form),
            "delete_news" => Ok(ContentCommand::DeleteArticle {
                kind: ArticleKind::News,
                id: form.id("news_id", "Missing ID")?,
            }),
            "add_event" => add_article(ArticleKind::Events, &mut form),
            "update_event" => update_article(ArticleKind::Events, &mut form),
            "delete_event" => Ok(ContentCommand::DeleteArticle {
                kind: ArticleKind::Events,
                id: form.id("event_id", "Missing ID")?,
            }),
            "" => Err(validation("Action is required")),
            other => Err(CabinetError::Validation(format!("Unknown action: {}", other))),
        }
    }
}

fn validation(message: &str) -> CabinetError {
    CabinetError::Validation(message.to_string())
}

fn service_fields(form: &FormData) -> Option<ServiceFields> {
    Some(ServiceFields {
        title: form.text("service_title")?.to_string(),
        description: form.text("service_description")?.to_string(),
        icon: form
            .text("service_icon")
            .unwrap_or(DEFAULT_SERVICE_ICON)
            .to_string(),
        color: form
            .text("service_color")
            .unwrap_or(DEFAULT_SERVICE_COLOR)
            .to_string(),
        detailed_content: form.text_or_empty("service_detailed_content"),
    })
}

fn team_fields(form: &FormData) -> Option<TeamMemberFields> {
    Some(TeamMemberFields {
        name: form.text("team_name")?.to_string(),
        position: form.text("team_position")?.to_string(),
        description: form.text("team_description")?.to_string(),
    })
}

fn article_fields(kind: ArticleKind, form: &FormData) -> CabinetResult<Option<ArticleFields>> {
    let (prefix, date_field, _) = article_prefix(kind);
    let title = form.text(&format!("{}_title", prefix));
    let content = form.text(&format!("{}_content", prefix));

    match (title, content) {
        (Some(title), Some(content)) => Ok(Some(ArticleFields {
            title: title.to_string(),
            content: content.to_string(),
            date: form.date(date_field)?,
        })),
        _ => Ok(None),
    }
}

fn add_article(kind: ArticleKind, form: &mut FormData) -> CabinetResult<ContentCommand> {
    let (prefix, _, _) = article_prefix(kind);
    let fields = article_fields(kind, form)?
        .ok_or_else(|| validation("Title and content are required"))?;

    Ok(ContentCommand::AddArticle {
        kind,
        fields,
        image: form.take_file(&format!("{}_image", prefix)),
    })
}

fn update_article(kind: ArticleKind, form: &mut FormData) -> CabinetResult<ContentCommand> {
    let (prefix, _, _) = article_prefix(kind);
    let id = form.id(&format!("{}_id", prefix), "Missing data")?;
    let fields = article_fields(kind, form)?.ok_or_else(|| validation("Missing data"))?;

    Ok(ContentCommand::UpdateArticle {
        kind,
        id,
        is_active: form.flag(&format!("{}_is_active", prefix)),
        image: form.take_file(&format!("{}_image", prefix)),
        fields,
    })
}
