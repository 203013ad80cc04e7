use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, NewUser, StoredUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::user;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(user::normalize_email(email)))
            .one(&self.db)
            .await?;
        Ok(res.map(|u| {
            let password_hash = u.password_hash.clone();
            StoredUser { user: u.into(), password_hash }
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<AuthUser, AuthError> {
        let now = Utc::now().into();
        let am = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            full_name: Set(new_user.full_name),
            is_active: Set(true),
            roles: Set(new_user.roles),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn delete_all(&self) -> Result<u64, AuthError> {
        let res = user::Entity::delete_many().exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn duplicate_email_reports_key_detail() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmAuthRepository { db };
        let email = format!("dup-{}@test.dev", Uuid::new_v4());
        let new_user = || NewUser {
            email: email.clone(),
            password_hash: "x".into(),
            full_name: "Dup".into(),
            roles: vec!["user".into()],
        };

        repo.create_user(new_user()).await.unwrap();
        match repo.create_user(new_user()).await.unwrap_err() {
            AuthError::Conflict(detail) => assert_eq!(detail, format!("Key (email)=({email}) already exists.")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
