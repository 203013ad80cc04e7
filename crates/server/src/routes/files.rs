use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use service::files::{UploadedImage, NOT_AN_IMAGE};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/files/product", post(upload_product_image))
        .route("/files/product/:image_name", get(find_product_image))
}

#[utoipa::path(get, path = "/api/files/product/{imageName}", tag = "files", params(("imageName" = String, Path, description = "Stored file name")), responses((status = 200, description = "Image bytes"), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)))]
pub async fn find_product_image(
    State(state): State<ServerState>,
    Path(image_name): Path<String>,
    req: Request,
) -> Result<Response, JsonApiError> {
    let path = state.files.resolve(&image_name).await?;
    let res = ServeFile::new(path).oneshot(req).await.unwrap_or_else(|never| match never {});
    Ok(res.into_response())
}

#[utoipa::path(post, path = "/api/files/product", tag = "files", request_body(content = crate::openapi::UploadRequest, content_type = "multipart/form-data"), responses((status = 201, description = "Stored", body = crate::openapi::UploadResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 413, description = "Payload Too Large", body = crate::openapi::ErrorResponse)))]
pub async fn upload_product_image(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadedImage>), JsonApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(err = %rejection.body_text(), "upload is not multipart");
        JsonApiError::bad_request(NOT_AN_IMAGE)
    })?;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(err = %e, "failed to read multipart field");
        JsonApiError::new(e.status(), e.body_text())
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            warn!(err = %e, "failed to read upload body");
            JsonApiError::new(e.status(), e.body_text())
        })?;
        let uploaded = state.files.save_product_image(content_type.as_deref(), &bytes).await?;
        return Ok((StatusCode::CREATED, Json(uploaded)));
    }
    Err(JsonApiError::bad_request(NOT_AN_IMAGE))
}
