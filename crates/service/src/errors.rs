use sea_orm::sqlx::postgres::PgDatabaseError;
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

use crate::auth::errors::AuthError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Unique constraint violation; carries the database detail.
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, term: &str) -> Self {
        Self::NotFound(format!("{} with id {} not found", entity, term))
    }

    /// Whether the error is the server's fault and deserves an `error!` line.
    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Db(_) | ServiceError::Storage(_))
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match unique_violation_detail(&e) {
            Some(detail) => ServiceError::Conflict(detail),
            None => ServiceError::Db(e.to_string()),
        }
    }
}

/// Postgres detail of a unique violation (`Key (title)=(..) already exists.`),
/// falling back to the driver message when the server sent none.
pub(crate) fn unique_violation_detail(e: &DbErr) -> Option<String> {
    let Some(SqlErr::UniqueConstraintViolation(message)) = e.sql_err() else {
        return None;
    };
    let detail = match e {
        DbErr::Query(RuntimeErr::SqlxError(err)) | DbErr::Exec(RuntimeErr::SqlxError(err)) => err
            .as_database_error()
            .and_then(|db| db.try_downcast_ref::<PgDatabaseError>())
            .and_then(|pg| pg.detail())
            .map(str::to_owned),
        _ => None,
    };
    Some(detail.unwrap_or(message))
}

impl From<ValidationErrors> for ServiceError {
    fn from(e: ValidationErrors) -> Self {
        ServiceError::Validation(flatten_validation_errors(&e))
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ServiceError::Validation(m),
            AuthError::Conflict(d) => ServiceError::Conflict(d),
            other => ServiceError::Db(other.to_string()),
        }
    }
}

/// `field: message` pairs joined with `; `, in field order.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
