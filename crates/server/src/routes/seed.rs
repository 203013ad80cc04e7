use axum::{extract::State, routing::post, Router};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/seed", post(execute_seed))
}

#[utoipa::path(post, path = "/api/seed", tag = "seed", responses((status = 201, description = "Fixtures reloaded", body = String)))]
pub async fn execute_seed(State(state): State<ServerState>) -> Result<(axum::http::StatusCode, &'static str), JsonApiError> {
    let done = state.seed.run_seed().await?;
    Ok((axum::http::StatusCode::CREATED, done))
}
