use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, NewUser, StoredUser};
use super::errors::AuthError;

/// Repository abstraction for user persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Lookup by email; the email is normalized by the implementation.
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    /// Insert a user; a duplicate email yields [`AuthError::Conflict`].
    async fn create_user(&self, new_user: NewUser) -> Result<AuthUser, AuthError>;
    /// Remove every user (seed only). Returns the number of rows removed.
    async fn delete_all(&self) -> Result<u64, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, StoredUser>>, // key: user id
    }

    impl MockAuthRepository {
        /// Flip `is_active` for a stored user.
        pub fn set_active(&self, id: Uuid, active: bool) {
            if let Some(stored) = self.users.lock().unwrap().get_mut(&id) {
                stored.user.is_active = active;
            }
        }

        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
            let email = models::user::normalize_email(email);
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.user.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&id).map(|u| u.user.clone()))
        }

        async fn create_user(&self, new_user: NewUser) -> Result<AuthUser, AuthError> {
            let email = models::user::normalize_email(&new_user.email);
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.user.email == email) {
                return Err(AuthError::Conflict(format!("Key (email)=({}) already exists.", email)));
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email,
                full_name: new_user.full_name,
                is_active: true,
                roles: new_user.roles,
            };
            users.insert(user.id, StoredUser { user: user.clone(), password_hash: new_user.password_hash });
            Ok(user)
        }

        async fn delete_all(&self) -> Result<u64, AuthError> {
            let mut users = self.users.lock().unwrap();
            let n = users.len() as u64;
            users.clear();
            Ok(n)
        }
    }
}
