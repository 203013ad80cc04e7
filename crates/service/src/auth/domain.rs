use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterInput {
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    #[validate(
        length(min = 6, max = 50, message = "password must be between 6 and 50 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    #[validate(length(min = 1, message = "fullName must not be empty"))]
    pub full_name: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginInput {
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    #[validate(
        length(min = 6, max = 50, message = "password must be between 6 and 50 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

/// Uppercase, lowercase, and a digit or a non-word character.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit_or_symbol = password
        .chars()
        .any(|c| c.is_ascii_digit() || !(c.is_alphanumeric() || c == '_'));
    if has_upper && has_lower && has_digit_or_symbol {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some("The password must have a Uppercase, lowercase letter and a number".into());
        Err(err)
    }
}

/// Domain user (business view); never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn has_role(&self, role: ValidRole) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, email: u.email, full_name: u.full_name, is_active: u.is_active, roles: u.roles }
    }
}

/// User row as needed for password checks
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Insert payload for the repository (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub roles: Vec<String>,
}

/// Login/register result: the user plus a signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(flatten)]
    pub user: AuthUser,
    pub token: String,
}

/// JWT payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Roles understood by the role guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidRole {
    Admin,
    SuperUser,
    User,
}

impl ValidRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidRole::Admin => "admin",
            ValidRole::SuperUser => "super-user",
            ValidRole::User => "user",
        }
    }
}

impl fmt::Display for ValidRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(ValidRole::Admin),
            "super-user" => Ok(ValidRole::SuperUser),
            "user" => Ok(ValidRole::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
