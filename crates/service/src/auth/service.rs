use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::domain::{AuthSession, AuthUser, JwtClaims, LoginInput, NewUser, RegisterInput, ValidRole};
use super::errors::AuthError;
use super::repository::AuthRepository;
use crate::errors::flatten_validation_errors;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user with a hashed password and return it with a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 2 });
    /// let input = RegisterInput { email: "User@Example.com".into(), password: "Secret123".into(), full_name: "Test".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert_eq!(session.user.roles, vec!["user".to_string()]);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        input.validate().map_err(|e| AuthError::Validation(flatten_validation_errors(&e)))?;
        models::user::validate_full_name(&input.full_name).map_err(|e| AuthError::Validation(e.to_string()))?;

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(NewUser {
                email: input.email,
                password_hash,
                full_name: input.full_name.trim().to_string(),
                roles: vec![ValidRole::User.as_str().to_string()],
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");

        let token = self.sign_token(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Authenticate a user by email and password and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 2 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), password: "Passw0rd".into(), full_name: "N".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        input.validate().map_err(|e| AuthError::Validation(flatten_validation_errors(&e)))?;

        let stored = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| AuthError::Unauthorized("Credentials are not valid (email)".into()))?;

        if !verify_password(&input.password, &stored.password_hash)? {
            debug!(user_id = %stored.user.id, "password mismatch");
            return Err(AuthError::Unauthorized("Credentials are not valid (password)".into()));
        }

        let token = self.sign_token(&stored.user)?;
        info!(user_id = %stored.user.id, "user_logged_in");
        Ok(AuthSession { user: stored.user, token })
    }

    /// Re-issue a token for an already authenticated user.
    pub fn check_status(&self, user: AuthUser) -> Result<AuthSession, AuthError> {
        let token = self.sign_token(&user)?;
        Ok(AuthSession { user, token })
    }

    pub fn sign_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = JwtClaims {
            id: user.id,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp(),
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature and expiry only.
    pub fn decode_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<JwtClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!(err = %e, "token validation failed");
                AuthError::Unauthorized("Token not valid".into())
            })
    }

    /// Resolve a bearer token to an active user.
    pub async fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.decode_token(token)?;
        let user = self.find_active_user(claims.id).await?;
        Ok(user)
    }

    async fn find_active_user(&self, id: Uuid) -> Result<AuthUser, AuthError> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::Unauthorized("Token not valid".into()))?;
        if !user.is_active {
            return Err(AuthError::Unauthorized("User is inactive, talk with an admin".into()));
        }
        Ok(user)
    }

    /// Role guard: an empty list admits everyone; otherwise one shared role is enough.
    pub fn authorize(user: Option<&AuthUser>, valid_roles: &[ValidRole]) -> Result<(), AuthError> {
        if valid_roles.is_empty() {
            return Ok(());
        }
        let user = user.ok_or(AuthError::MissingUser)?;
        if valid_roles.iter().any(|role| user.has_role(*role)) {
            return Ok(());
        }
        let expected = valid_roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(",");
        Err(AuthError::Forbidden(format!("User {} need a valid role: [{}]", user.full_name, expected)))
    }
}

pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}
