//! Route guards: bearer authentication and role checks.
//!
//! Both run as `route_layer` middleware; the role guard must sit inside the
//! auth guard so that the user is already in the request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use tracing::{debug, warn};

use service::auth::domain::{AuthUser, ValidRole};
use service::auth::AuthService;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const ADMIN: &[ValidRole] = &[ValidRole::Admin];
pub const ADMIN_OR_SUPER_USER: &[ValidRole] = &[ValidRole::SuperUser, ValidRole::Admin];

/// Resolve `Authorization: Bearer <jwt>` to an active user and store it in the request.
pub async fn require_auth(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        warn!(path = %req.uri().path(), "missing bearer token");
        return Err(JsonApiError::unauthorized("Unauthorized"));
    };
    let user = state.auth.verify_token(bearer.token()).await?;
    debug!(user_id = %user.id, "request authenticated");
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Admit the request when the authenticated user holds one of `roles`.
pub async fn require_roles(
    State(roles): State<&'static [ValidRole]>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    AuthService::authorize(req.extensions().get::<AuthUser>(), roles)?;
    Ok(next.run(req).await)
}
