//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::future::Future;
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::{
    CreateIdentityUseCase, DeleteIdentityUseCase, ListIdentitiesUseCase, RetrieveIdentityUseCase,
    UpdateIdentityUseCase,
};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{IdentityDto, IdentityListResponse, IdentityResponse};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<IdentityConfig>,
}

/// Decode a JSON body, routing rejections through the identity error responder
fn decode_body(body: Result<Json<IdentityDto>, JsonRejection>) -> IdentityResult<Identity> {
    let Json(dto) = body?;
    Ok(dto.into())
}

/// Run a use case under the request deadline; expiry drops the in-flight
/// store call and answers through the identity error responder
async fn within_deadline<T>(
    config: &IdentityConfig,
    work: impl Future<Output = IdentityResult<T>>,
) -> IdentityResult<T> {
    tokio::time::timeout(config.request_timeout, work)
        .await
        .map_err(|_| IdentityError::RequestTimeout(config.request_timeout))?
}

// ============================================================================
// Create
// ============================================================================

/// POST /identities
pub async fn create_identity<R>(
    State(state): State<IdentityAppState<R>>,
    body: Result<Json<IdentityDto>, JsonRejection>,
) -> IdentityResult<impl IntoResponse>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let identity = decode_body(body)?;

    let use_case = CreateIdentityUseCase::new(state.repo.clone());
    let created = within_deadline(&state.config, use_case.execute(identity)).await?;

    Ok((StatusCode::CREATED, Json(IdentityResponse::from(created))))
}

// ============================================================================
// List
// ============================================================================

/// GET /identities
pub async fn list_identities<R>(
    State(state): State<IdentityAppState<R>>,
) -> IdentityResult<Json<IdentityListResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListIdentitiesUseCase::new(state.repo.clone());
    let identities = within_deadline(&state.config, use_case.execute()).await?;

    Ok(Json(identities.into()))
}

// ============================================================================
// Retrieve
// ============================================================================

/// GET /identities/{identityId}
pub async fn retrieve_identity<R>(
    State(state): State<IdentityAppState<R>>,
    Path(identity_id): Path<String>,
) -> IdentityResult<Json<IdentityResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let use_case = RetrieveIdentityUseCase::new(state.repo.clone());
    let identity = within_deadline(&state.config, use_case.execute(&identity_id)).await?;

    Ok(Json(identity.into()))
}

// ============================================================================
// Update
// ============================================================================

/// PUT /identities/{identityId}
pub async fn update_identity<R>(
    State(state): State<IdentityAppState<R>>,
    Path(identity_id): Path<String>,
    body: Result<Json<IdentityDto>, JsonRejection>,
) -> IdentityResult<Json<IdentityResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let mut identity = decode_body(body)?;
    // The path wins over any id in the body
    identity.id = identity_id;

    let use_case = UpdateIdentityUseCase::new(state.repo.clone());
    let updated = within_deadline(&state.config, use_case.execute(identity)).await?;

    Ok(Json(updated.into()))
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /identities/{identityId}
///
/// The body must carry the identity's email and phone.
pub async fn delete_identity<R>(
    State(state): State<IdentityAppState<R>>,
    Path(identity_id): Path<String>,
    body: Result<Json<IdentityDto>, JsonRejection>,
) -> IdentityResult<Json<IdentityResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let mut identity = decode_body(body)?;
    identity.id = identity_id;

    let use_case = DeleteIdentityUseCase::new(state.repo.clone());
    let emptied = within_deadline(&state.config, use_case.execute(&identity)).await?;

    Ok(Json(emptied.into()))
}
