use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};

use common::types::Message;
use service::pagination::Pagination;
use service::products::domain::{CreateProductInput, ProductView, UpdateProductInput};

use crate::errors::JsonApiError;
use crate::extract::{CurrentUser, UuidParam, ValidatedJson, ValidatedQuery};
use crate::guards::{require_auth, require_roles, ADMIN};
use crate::state::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/products", get(find_all))
        .route("/products/:term", get(find_one));

    let authenticated = Router::new()
        .route("/products", post(create))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin = Router::new()
        .route("/products/:term", patch(update).delete(remove))
        .route_layer(middleware::from_fn_with_state(ADMIN, require_roles))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(authenticated).merge(admin)
}

#[utoipa::path(post, path = "/api/products", tag = "products", security(("bearer" = [])), request_body = crate::openapi::CreateProductRequest, responses((status = 201, description = "Product created", body = crate::openapi::ProductResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(input): ValidatedJson<CreateProductInput>,
) -> Result<(StatusCode, Json<ProductView>), JsonApiError> {
    let product = state.products.create(input, &user).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(get, path = "/api/products", tag = "products", params(("limit" = Option<u64>, Query, description = "Rows per page (default 10)"), ("offset" = Option<u64>, Query, description = "Rows to skip (default 0)")), responses((status = 200, description = "Products ordered by title", body = [crate::openapi::ProductResponse]), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)))]
pub async fn find_all(
    State(state): State<ServerState>,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    Ok(Json(state.products.find_all(pagination).await?))
}

#[utoipa::path(get, path = "/api/products/{term}", tag = "products", params(("term" = String, Path, description = "Product id, title or slug")), responses((status = 200, description = "Product", body = crate::openapi::ProductResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn find_one(
    State(state): State<ServerState>,
    Path(term): Path<String>,
) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(state.products.find_one(&term).await?))
}

#[utoipa::path(patch, path = "/api/products/{id}", tag = "products", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Product id")), request_body = crate::openapi::UpdateProductRequest, responses((status = 200, description = "Updated product", body = crate::openapi::ProductResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 403, description = "Forbidden", body = crate::openapi::ErrorResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    UuidParam(id): UuidParam,
    ValidatedJson(input): ValidatedJson<UpdateProductInput>,
) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(state.products.update(id, input, &user).await?))
}

#[utoipa::path(delete, path = "/api/products/{id}", tag = "products", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Product id")), responses((status = 200, description = "Product removed", body = crate::openapi::MessageResponse), (status = 403, description = "Forbidden", body = crate::openapi::ErrorResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn remove(
    State(state): State<ServerState>,
    UuidParam(id): UuidParam,
) -> Result<Json<Message>, JsonApiError> {
    let message = state.products.remove(id).await?;
    Ok(Json(Message::new(message)))
}
