use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ErrorResponse { pub status_code: u16, pub error: String, pub message: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterRequest { pub email: String, pub password: String, pub full_name: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserResponse { pub id: Uuid, pub email: String, pub full_name: String, pub is_active: bool, pub roles: Vec<String> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<String>,
    pub token: String,
}

#[derive(ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    /// One of `men`, `women`, `kid`, `unisex`
    pub gender: String,
    pub sizes: Vec<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub slug: Option<String>,
    pub stock: Option<i32>,
    pub images: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub gender: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub slug: Option<String>,
    pub stock: Option<i32>,
    /// Replaces the whole image set when present
    pub images: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub user: Option<UserResponse>,
}

#[derive(ToSchema)]
pub struct UploadRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UploadResponse { pub secure_url: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::check_status,
        crate::routes::products::create,
        crate::routes::products::find_all,
        crate::routes::products::find_one,
        crate::routes::products::update,
        crate::routes::products::remove,
        crate::routes::files::find_product_image,
        crate::routes::files::upload_product_image,
        crate::routes::seed::execute_seed,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            UploadRequest,
            UploadResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "products"),
        (name = "files"),
        (name = "seed")
    )
)]
pub struct ApiDoc;
