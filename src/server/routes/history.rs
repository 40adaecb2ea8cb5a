//! Generation history endpoints

use crate::core::models::HistoryRecord;
use crate::server::middleware::authenticated_user;
use crate::server::state::AppState;
use crate::utils::error::ForgeError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// History listing response payload
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// The user's records, newest first
    pub history: Vec<HistoryRecord>,
}

/// List the authenticated user's history, newest first
pub async fn list_history(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ForgeError> {
    let user_id = authenticated_user(&req)?;
    debug!("History listing for user: {}", user_id);

    let history = state.storage.db().list_history(user_id).await?;

    Ok(HttpResponse::Ok().json(HistoryResponse { history }))
}

/// Delete one of the authenticated user's history records
pub async fn delete_history_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ForgeError> {
    let user_id = authenticated_user(&req)?;
    let id = path.into_inner();

    // A foreign id behaves like a missing one
    let deleted = state.storage.db().delete_history_item(user_id, id).await?;
    if !deleted {
        return Err(ForgeError::not_found("History item not found"));
    }

    info!("Deleted history item {} for user {}", id, user_id);
    Ok(HttpResponse::NoContent().finish())
}

/// Clear all of the authenticated user's history
pub async fn clear_history(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ForgeError> {
    let user_id = authenticated_user(&req)?;

    let removed = state.storage.db().clear_history(user_id).await?;
    info!("Cleared {} history item(s) for user {}", removed, user_id);

    Ok(HttpResponse::NoContent().finish())
}
