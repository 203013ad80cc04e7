#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::build_router;
use server::ServerState;
use service::auth::domain::ValidRole;
use service::auth::repository::mock::MockAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::{hash_password, AuthConfig};
use service::files::FileStore;
use service::products::repository::mock::MockProductRepository;

pub const MAX_UPLOAD: usize = 64 * 1024;

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MockAuthRepository>,
    pub upload_dir: std::path::PathBuf,
}

impl TestApp {
    pub async fn new() -> Self {
        let users = Arc::new(MockAuthRepository::default());
        let upload_dir = std::env::temp_dir().join(format!("teslo-router-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&upload_dir).await.unwrap();
        let state = ServerState::new(
            users.clone(),
            Arc::new(MockProductRepository::default()),
            AuthConfig { jwt_secret: "router-secret".into(), token_ttl_hours: 2 },
            FileStore::new(&upload_dir, "http://localhost:3000/api"),
        );
        let router = build_router(state, CorsLayer::very_permissive(), MAX_UPLOAD);
        Self { router, users, upload_dir }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        (status, body_json(res).await)
    }

    pub async fn raw(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    /// Register through the API and return the bearer token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(json_request("POST", "/api/auth/register", None, json!({
                "email": email,
                "password": "Abc123",
                "fullName": "Router Tester",
            })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Insert a user with the given roles directly and log in.
    pub async fn login_with_roles(&self, email: &str, roles: &[ValidRole]) -> String {
        self.users
            .create_user(service::auth::domain::NewUser {
                email: email.into(),
                password_hash: hash_password("Abc123").unwrap(),
                full_name: "Role Holder".into(),
                roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            })
            .await
            .unwrap();
        let (status, body) = self
            .send(json_request("POST", "/api/auth/login", None, json!({ "email": email, "password": "Abc123" })))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(serde_json::to_vec(&body).unwrap())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn multipart_request(uri: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "teslo-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"; filename=\"upload\"\r\n");
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(res: Response<Body>) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = body_bytes(res).await;
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

pub fn product_payload(title: &str, images: &[&str]) -> Value {
    json!({
        "title": title,
        "gender": "men",
        "sizes": ["S", "M"],
        "price": 40.0,
        "stock": 3,
        "images": images,
    })
}
