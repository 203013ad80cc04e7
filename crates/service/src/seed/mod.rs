//! Development seed: wipe products and users, then load fixtures.

pub mod data;

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::domain::{AuthUser, NewUser};
use crate::auth::repository::AuthRepository;
use crate::auth::service::hash_password;
use crate::errors::ServiceError;
use crate::products::domain::CreateProductInput;
use crate::products::ProductService;

pub const SEED_EXECUTED: &str = "Seed executed";

pub struct SeedService {
    users: Arc<dyn AuthRepository>,
    products: Arc<ProductService>,
}

impl SeedService {
    pub fn new(users: Arc<dyn AuthRepository>, products: Arc<ProductService>) -> Self {
        Self { users, products }
    }

    #[instrument(skip(self))]
    pub async fn run_seed(&self) -> Result<&'static str, ServiceError> {
        self.delete_tables().await?;
        let admin = self.insert_users().await?;
        let count = self.insert_products(&admin).await?;
        info!(users = data::USERS.len(), products = count, "seed_executed");
        Ok(SEED_EXECUTED)
    }

    async fn delete_tables(&self) -> Result<(), ServiceError> {
        // products first: users are referenced by product.user_id
        self.products.delete_all_products().await?;
        let removed = self.users.delete_all().await?;
        info!(removed, "users_cleared");
        Ok(())
    }

    /// Insert fixture users and return the first one.
    async fn insert_users(&self) -> Result<AuthUser, ServiceError> {
        let mut created = Vec::with_capacity(data::USERS.len());
        for seed in data::USERS {
            let user = self
                .users
                .create_user(NewUser {
                    email: seed.email.to_string(),
                    password_hash: hash_password(seed.password)?,
                    full_name: seed.full_name.to_string(),
                    roles: seed.roles.iter().map(|r| r.to_string()).collect(),
                })
                .await?;
            created.push(user);
        }
        created
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Validation("seed has no users".into()))
    }

    async fn insert_products(&self, owner: &AuthUser) -> Result<usize, ServiceError> {
        for seed in data::PRODUCTS {
            let input = CreateProductInput {
                title: seed.title.to_string(),
                gender: seed.gender.to_string(),
                sizes: seed.sizes.iter().map(|s| s.to_string()).collect(),
                description: Some(seed.description.to_string()),
                price: Some(seed.price),
                tags: Some(seed.tags.iter().map(|t| t.to_string()).collect()),
                slug: None,
                stock: Some(seed.stock),
                images: Some(seed.images.iter().map(|i| i.to_string()).collect()),
            };
            self.products.create(input, owner).await?;
        }
        Ok(data::PRODUCTS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::auth::service::verify_password;
    use crate::pagination::Pagination;
    use crate::products::repository::mock::MockProductRepository;

    #[tokio::test]
    async fn seed_is_repeatable_and_owned_by_admin() {
        let users = Arc::new(MockAuthRepository::default());
        let products = Arc::new(ProductService::new(Arc::new(MockProductRepository::default())));
        let seed = SeedService::new(users.clone(), products.clone());

        assert_eq!(seed.run_seed().await.unwrap(), "Seed executed");
        assert_eq!(seed.run_seed().await.unwrap(), "Seed executed");
        assert_eq!(users.len(), data::USERS.len());

        let all = products.find_all(Pagination::new(100, 0)).await.unwrap();
        assert_eq!(all.len(), data::PRODUCTS.len());
        let admin = users.find_by_email("test1@google.com").await.unwrap().unwrap();
        assert!(admin.user.roles.contains(&"admin".to_string()));
        assert!(verify_password("Abc123", &admin.password_hash).unwrap());
        assert!(all.iter().all(|p| p.user.as_ref().map(|u| u.id) == Some(admin.user.id)));
    }

    #[test]
    fn fixtures_are_valid() {
        for p in data::PRODUCTS {
            assert!(models::product::validate_gender(p.gender).is_ok(), "{}", p.title);
        }
        let mut slugs: Vec<_> = data::PRODUCTS.iter().map(|p| models::product::normalize_slug(p.title)).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), data::PRODUCTS.len());
    }
}
