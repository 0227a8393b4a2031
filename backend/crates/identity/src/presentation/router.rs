//! Identity Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::IdentityRepository;
use crate::infra::DynamoTable;
use crate::infra::repository::TableIdentityRepository;
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the Identity router with the DynamoDB-backed repository
pub fn identity_router(
    repo: TableIdentityRepository<DynamoTable>,
    config: IdentityConfig,
) -> Router {
    identity_router_generic(repo, config)
}

/// Create a generic Identity router for any repository implementation
///
/// Routes are relative; nest the router under `/identities`. Handlers enforce
/// `config.request_timeout` themselves so an expired request still gets a
/// JSON error body.
pub fn identity_router_generic<R>(repo: R, config: IdentityConfig) -> Router
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_identities::<R>).post(handlers::create_identity::<R>),
        )
        .route(
            "/{identityId}",
            get(handlers::retrieve_identity::<R>)
                .put(handlers::update_identity::<R>)
                .delete(handlers::delete_identity::<R>),
        )
        .with_state(state)
}
