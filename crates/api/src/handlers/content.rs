//! # Content Handlers
//!
//! Serves the site content editor: the editable texts of each section and the
//! services, team members, news and events lists, plus the commands that
//! change them.

use axum::{
    extract::{Multipart, State},
    Json,
};
use cabinet_core::{
    context::RequestContext,
    errors::{CabinetError, CabinetResult},
    models::{
        content::{ArticleKind, ContentOverview},
        dashboard::FlashMessage,
    },
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    forms::{article_prefix, ContentCommand, FormData},
    images::{ImageFolder, UploadedImage},
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn get_content(
    State(state): State<Arc<ApiState>>,
    AdminSession(_ctx): AdminSession,
) -> Result<Json<ContentOverview>, AppError> {
    let store = state.content.as_ref();

    Ok(Json(ContentOverview {
        content: store.site_content().await?,
        services: store.list_services().await?,
        team: store.list_team_members().await?,
        news: store.list_news().await?,
        events: store.list_events().await?,
    }))
}

/// Runs the content command named by the form's `action` field.
#[axum::debug_handler]
pub async fn post_content(
    State(state): State<Arc<ApiState>>,
    AdminSession(ctx): AdminSession,
    multipart: Multipart,
) -> Result<Json<FlashMessage>, AppError> {
    let form = FormData::from_multipart(multipart).await?;
    let command = ContentCommand::from_form(form)?;
    let message = execute(&state, &ctx, command).await?;

    Ok(Json(message))
}

/// Applies a validated content command.
///
/// Images are written before the row and are not part of its transaction: a
/// new upload is removed again when the update matched no row, and the image
/// of a deleted entry is removed once the row is gone.
///
/// # Errors
///
/// * `CabinetError::NotFound` - the command names an id with no row
/// * `CabinetError::Internal` - an upload could not be stored
/// * `CabinetError::Database` - a gateway call failed
pub async fn execute(
    state: &ApiState,
    ctx: &RequestContext,
    command: ContentCommand,
) -> CabinetResult<FlashMessage> {
    let store = state.content.as_ref();

    let message = match command {
        ContentCommand::UpdateContent { entries } => {
            let count = entries.len();
            store
                .save_site_content(entries)
                .await
                .map_err(CabinetError::Database)?;
            info!(admin = %ctx.admin, entries = count, "Site content updated");
            "Content updated successfully"
        }
        ContentCommand::AddService(fields) => {
            let service = store
                .create_service(&fields)
                .await
                .map_err(CabinetError::Database)?;
            info!(admin = %ctx.admin, "Created service {}", service.id);
            "Service added successfully"
        }
        ContentCommand::UpdateService {
            id,
            fields,
            is_active,
        } => {
            let affected = store
                .update_service(id, &fields, is_active)
                .await
                .map_err(CabinetError::Database)?;
            ensure_found(affected, "Service", id)?;
            "Service updated successfully"
        }
        ContentCommand::DeleteService { id } => {
            let affected = store
                .delete_service(id)
                .await
                .map_err(CabinetError::Database)?;
            ensure_found(affected, "Service", id)?;
            info!(admin = %ctx.admin, "Deleted service {}", id);
            "Service deleted successfully"
        }
        ContentCommand::AddTeamMember { fields, image } => {
            let image_path = store_image(state, ImageFolder::Team, image.as_ref()).await?;
            let member = store
                .create_team_member(&fields, image_path)
                .await
                .map_err(CabinetError::Database)?;
            info!(admin = %ctx.admin, "Created team member {}", member.id);
            "Team member added successfully"
        }
        ContentCommand::UpdateTeamMember {
            id,
            fields,
            image,
            is_active,
        } => {
            let image_path = store_image(state, ImageFolder::Team, image.as_ref()).await?;
            let affected = store
                .update_team_member(id, &fields, image_path.clone(), is_active)
                .await
                .map_err(CabinetError::Database)?;
            if affected == 0 {
                discard_image(state, image_path.as_deref()).await;
            }
            ensure_found(affected, "Team member", id)?;
            "Team member updated successfully"
        }
        ContentCommand::DeleteTeamMember { id } => {
            let deleted = store
                .delete_team_member(id)
                .await
                .map_err(CabinetError::Database)?
                .ok_or_else(|| not_found("Team member", id))?;
            discard_image(state, deleted.as_deref()).await;
            info!(admin = %ctx.admin, "Deleted team member {}", id);
            "Team member deleted successfully"
        }
        ContentCommand::AddArticle {
            kind,
            fields,
            image,
        } => {
            let (_, _, folder) = article_prefix(kind);
            let image_path = store_image(state, folder, image.as_ref()).await?;
            let created = store
                .create_article(kind, &fields, image_path)
                .await
                .map_err(CabinetError::Database)?;
            info!(admin = %ctx.admin, "Created {} entry {}", kind.as_str(), created);
            match kind {
                ArticleKind::News => "News item added successfully",
                ArticleKind::Events => "Event added successfully",
            }
        }
        ContentCommand::UpdateArticle {
            kind,
            id,
            fields,
            image,
            is_active,
        } => {
            let (_, _, folder) = article_prefix(kind);
            let image_path = store_image(state, folder, image.as_ref()).await?;
            let affected = store
                .update_article(kind, id, &fields, image_path.clone(), is_active)
                .await
                .map_err(CabinetError::Database)?;
            if affected == 0 {
                discard_image(state, image_path.as_deref()).await;
            }
            ensure_found(affected, article_label(kind), id)?;
            match kind {
                ArticleKind::News => "News item updated successfully",
                ArticleKind::Events => "Event updated successfully",
            }
        }
        ContentCommand::DeleteArticle { kind, id } => {
            let deleted = store
                .delete_article(kind, id)
                .await
                .map_err(CabinetError::Database)?
                .ok_or_else(|| not_found(article_label(kind), id))?;
            discard_image(state, deleted.as_deref()).await;
            info!(admin = %ctx.admin, "Deleted {} entry {}", kind.as_str(), id);
            match kind {
                ArticleKind::News => "News item deleted successfully",
                ArticleKind::Events => "Event deleted successfully",
            }
        }
    };

    Ok(FlashMessage::success(message))
}

fn article_label(kind: ArticleKind) -> &'static str {
    match kind {
        ArticleKind::News => "News item",
        ArticleKind::Events => "Event",
    }
}

fn not_found(label: &str, id: Uuid) -> CabinetError {
    CabinetError::NotFound(format!("{} with ID {} not found", label, id))
}

fn ensure_found(affected: u64, label: &str, id: Uuid) -> CabinetResult<()> {
    if affected == 0 {
        Err(not_found(label, id))
    } else {
        Ok(())
    }
}

async fn store_image(
    state: &ApiState,
    folder: ImageFolder,
    image: Option<&UploadedImage>,
) -> CabinetResult<Option<String>> {
    match image {
        Some(image) => state
            .images
            .store(folder, image)
            .await
            .map_err(|e| CabinetError::Internal(e.into())),
        None => Ok(None),
    }
}

/// Removes an image that is no longer referenced. Failures are only logged.
async fn discard_image(state: &ApiState, public_path: Option<&str>) {
    if let Some(path) = public_path {
        if let Err(e) = state.images.remove(path).await {
            warn!("Failed to remove image {}: {:?}", path, e);
        }
    }
}
