use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};

use crate::errors::JsonApiError;
use crate::extract::{CurrentUser, ValidatedJson};
use crate::guards::{require_auth, require_roles, ADMIN_OR_SUPER_USER};
use crate::state::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let authenticated = Router::new()
        .route("/auth/check-status", get(check_status))
        .route("/auth/private", get(private_route))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let privileged = Router::new()
        .route("/auth/private2", get(private_route2))
        .route("/auth/private3", get(private_route3))
        .route_layer(middleware::from_fn_with_state(ADMIN_OR_SUPER_USER, require_roles))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(authenticated).merge(privileged)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "User created", body = crate::openapi::AuthResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)))]
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<RegisterInput>,
) -> Result<(StatusCode, Json<AuthSession>), JsonApiError> {
    let session = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in", body = crate::openapi::AuthResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> Result<Json<AuthSession>, JsonApiError> {
    Ok(Json(state.auth.login(input).await?))
}

#[utoipa::path(get, path = "/api/auth/check-status", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Fresh token", body = crate::openapi::AuthResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn check_status(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<AuthSession>, JsonApiError> {
    Ok(Json(state.auth.check_status(user)?))
}

/// Flat `[name, value, name, value, ...]` list of the request headers.
fn raw_headers(headers: &HeaderMap) -> Vec<String> {
    headers
        .iter()
        .flat_map(|(name, value)| [name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()])
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateResponse {
    ok: bool,
    msg: &'static str,
    user: AuthUser,
    user_email: String,
    raw_headers: Vec<String>,
}

pub async fn private_route(CurrentUser(user): CurrentUser, headers: HeaderMap) -> Json<PrivateResponse> {
    Json(PrivateResponse {
        ok: true,
        msg: "This is a private route!",
        user_email: user.email.clone(),
        user,
        raw_headers: raw_headers(&headers),
    })
}

pub async fn private_route2(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "ok": true, "user": user }))
}

pub async fn private_route3(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "ok": true, "user": user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn raw_headers_are_flattened_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("localhost:3000"));
        headers.insert("accept", HeaderValue::from_static("*/*"));
        let raw = raw_headers(&headers);
        assert_eq!(raw.len(), 4);
        let host_at = raw.iter().position(|h| h == "host").unwrap();
        assert_eq!(raw[host_at + 1], "localhost:3000");
    }
}
