use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::AuthConfig;
use service::auth::AuthService;
use service::files::FileStore;
use service::products::repo::seaorm::SeaOrmProductRepository;
use service::products::repository::ProductRepository;
use service::products::ProductService;
use service::seed::SeedService;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub products: Arc<ProductService>,
    pub files: Arc<FileStore>,
    pub seed: Arc<SeedService>,
}

impl ServerState {
    /// Wire services over any repository pair (SeaORM in production, in-memory in tests).
    pub fn new(
        users: Arc<dyn AuthRepository>,
        products: Arc<dyn ProductRepository>,
        auth_cfg: AuthConfig,
        files: FileStore,
    ) -> Self {
        let auth = Arc::new(AuthService::new(users.clone(), auth_cfg));
        let products = Arc::new(ProductService::new(products));
        let seed = Arc::new(SeedService::new(users, products.clone()));
        Self { auth, products, files: Arc::new(files), seed }
    }

    pub fn from_db(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let auth_cfg = AuthConfig {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            token_ttl_hours: cfg.auth.token_ttl_hours,
        };
        Self::new(
            Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            Arc::new(SeaOrmProductRepository::new(db)),
            auth_cfg,
            FileStore::new(&cfg.files.upload_dir, cfg.files.host_api.clone()),
        )
    }
}
