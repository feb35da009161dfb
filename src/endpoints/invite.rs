use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};

use crate::endpoints::extractors::LenientJson;
use crate::endpoints::not_found;
use crate::error::{AppError, Result};
use crate::schemas::{
    AcceptInviteRequest, AcceptInviteResponse, CreateInviteRequest, CreateInviteResponse,
    InviteQuery, InviteSummary,
};
use crate::services::invite::INVITE_NOT_FOUND;
use crate::state::AppState;

/// Create invite routes, mounted under `/api/invite`
pub fn invite_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_invite_by_query))
        .route("/create", post(create_invite))
        .route("/accept", post(accept_invite))
        .route("/{invite_id}", get(get_invite))
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

/// Create an invite for the given user
async fn create_invite(
    State(state): State<AppState>,
    LenientJson(data): LenientJson<CreateInviteRequest>,
) -> Result<Json<CreateInviteResponse>> {
    let user_id = data.user_id.unwrap_or_default();
    let invite_id = state.invites.create_invite(&user_id).await?;

    Ok(Json(CreateInviteResponse { invite_id }))
}

/// Get an unredeemed invite
async fn get_invite(
    State(state): State<AppState>,
    invite_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<InviteSummary>> {
    // A segment that does not decode to UTF-8 cannot name a stored invite
    let Path(invite_id) = invite_id.map_err(|e| {
        tracing::debug!("Undecodable invite id: {}", e);
        AppError::NotFound(INVITE_NOT_FOUND.to_string())
    })?;

    Ok(Json(state.invites.get_invite(&invite_id).await?))
}

/// Query-string form of [`get_invite`], as produced by serverless path rewrites
async fn get_invite_by_query(
    State(state): State<AppState>,
    query: std::result::Result<Query<InviteQuery>, QueryRejection>,
) -> Result<Json<InviteSummary>> {
    let invite_id = query.ok().and_then(|Query(query)| query.invite_id);

    match invite_id.filter(|id| !id.is_empty()) {
        Some(invite_id) => Ok(Json(state.invites.get_invite(&invite_id).await?)),
        None => Err(AppError::NotFound(crate::endpoints::NOT_FOUND_MESSAGE.to_string())),
    }
}

/// Accept an invite on behalf of the given user
async fn accept_invite(
    State(state): State<AppState>,
    LenientJson(data): LenientJson<AcceptInviteRequest>,
) -> Result<Json<AcceptInviteResponse>> {
    let invite_id = data.invite_id.unwrap_or_default();
    let user_id = data.user_id.unwrap_or_default();

    let created = state.invites.accept_invite(&invite_id, &user_id).await?;

    Ok(Json(AcceptInviteResponse {
        success: true,
        relationship_id: created.id,
    }))
}
