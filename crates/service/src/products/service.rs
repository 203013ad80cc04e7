use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::domain::{CreateProductInput, NewProduct, ProductView, UpdateProductInput};
use super::repository::ProductRepository;
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Product business service
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// Create a product with its images, owned by `user`.
    ///
    /// # Examples
    /// ```
    /// use service::products::{ProductService, repository::mock::MockProductRepository};
    /// use service::products::domain::CreateProductInput;
    /// use service::auth::domain::AuthUser;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(MockProductRepository::default()));
    /// let user = AuthUser { id: uuid::Uuid::new_v4(), email: "a@b.com".into(), full_name: "A".into(), is_active: true, roles: vec!["user".into()] };
    /// let input = CreateProductInput {
    ///     title: "Men's Chill Crew Neck".into(), gender: "men".into(), sizes: vec!["M".into()],
    ///     description: None, price: Some(75.0), tags: None, slug: None, stock: Some(7), images: None,
    /// };
    /// let product = tokio_test::block_on(svc.create(input, &user)).unwrap();
    /// assert_eq!(product.slug, "mens_chill_crew_neck");
    /// ```
    #[instrument(skip(self, input, user), fields(user_id = %user.id))]
    pub async fn create(&self, input: CreateProductInput, user: &AuthUser) -> Result<ProductView, ServiceError> {
        input.validate()?;
        let product = self.repo.insert(NewProduct::from_input(input, user)).await.map_err(log_internal)?;
        info!(product_id = %product.id, slug = %product.slug, "product_created");
        Ok(product)
    }

    pub async fn find_all(&self, pagination: Pagination) -> Result<Vec<ProductView>, ServiceError> {
        pagination.validate()?;
        let (limit, offset) = pagination.normalize();
        self.repo.list(limit, offset).await.map_err(log_internal)
    }

    /// Look up by id when `term` is a UUID, otherwise by title or slug.
    pub async fn find_one(&self, term: &str) -> Result<ProductView, ServiceError> {
        let found = match Uuid::parse_str(term) {
            Ok(id) => self.repo.find_by_id(id).await,
            Err(_) => self.repo.find_by_title_or_slug(term).await,
        }
        .map_err(log_internal)?;
        found.ok_or_else(|| ServiceError::not_found("Product", term))
    }

    /// Apply a partial update; a present `images` list replaces the stored set.
    #[instrument(skip(self, input, user), fields(product_id = %id, user_id = %user.id))]
    pub async fn update(&self, id: Uuid, input: UpdateProductInput, user: &AuthUser) -> Result<ProductView, ServiceError> {
        input.validate()?;
        let (changes, images) = input.into_parts();
        let updated = self.repo.update(id, changes, images, user).await.map_err(log_internal)?;
        let product = updated.ok_or_else(|| ServiceError::not_found("Product", &id.to_string()))?;
        info!(product_id = %product.id, "product_updated");
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&self, id: Uuid) -> Result<String, ServiceError> {
        if !self.repo.delete(id).await.map_err(log_internal)? {
            return Err(ServiceError::not_found("Product", &id.to_string()));
        }
        info!("product_removed");
        Ok(format!("Product with id {} removed", id))
    }

    pub async fn delete_all_products(&self) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_all().await.map_err(log_internal)?;
        info!(removed, "products_cleared");
        Ok(removed)
    }
}

fn log_internal(e: ServiceError) -> ServiceError {
    if e.is_internal() {
        error!(err = %e, "product repository failure");
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::repository::mock::MockProductRepository;

    fn user(roles: &[&str]) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "owner@google.com".into(),
            full_name: "Owner".into(),
            is_active: true,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn input(title: &str, images: &[&str]) -> CreateProductInput {
        CreateProductInput {
            title: title.into(),
            gender: "women".into(),
            sizes: vec!["S".into(), "M".into()],
            description: Some("soft cotton".into()),
            price: Some(30.0),
            tags: Some(vec!["shirt".into()]),
            slug: None,
            stock: Some(4),
            images: Some(images.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn svc() -> ProductService {
        ProductService::new(Arc::new(MockProductRepository::default()))
    }

    #[tokio::test]
    async fn create_derives_slug_and_sets_owner() {
        let svc = svc();
        let owner = user(&["user"]);
        let p = svc.create(input("Women's Raven Tee", &["1.jpg"]), &owner).await.unwrap();
        assert_eq!(p.slug, "womens_raven_tee");
        assert_eq!(p.user.unwrap().id, owner.id);
        assert_eq!(p.images, vec!["1.jpg"]);
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let svc = svc();
        let owner = user(&["user"]);
        svc.create(input("Plaid Shirt", &[]), &owner).await.unwrap();
        let err = svc.create(input("Plaid Shirt", &[]), &owner).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_one_by_id_title_and_slug() {
        let svc = svc();
        let p = svc.create(input("Cyber Hoodie", &[]), &user(&["user"])).await.unwrap();
        assert_eq!(svc.find_one(&p.id.to_string()).await.unwrap().id, p.id);
        assert_eq!(svc.find_one("cyber hoodie").await.unwrap().id, p.id);
        assert_eq!(svc.find_one("CYBER_HOODIE").await.unwrap().id, p.id);

        let err = svc.find_one("missing-thing").await.unwrap_err();
        assert_eq!(err.to_string(), "Product with id missing-thing not found");
    }

    #[tokio::test]
    async fn find_all_pages_in_title_order() {
        let svc = svc();
        let owner = user(&["user"]);
        for title in ["Charlie", "Alpha", "Bravo"] {
            svc.create(input(title, &[]), &owner).await.unwrap();
        }
        let page = svc.find_all(Pagination::new(2, 1)).await.unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Bravo", "Charlie"]);

        assert!(matches!(svc.find_all(Pagination::new(0, 0)).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn update_replaces_images_and_reassigns_owner() {
        let svc = svc();
        let creator = user(&["user"]);
        let admin = user(&["admin"]);
        let p = svc.create(input("Zip Jacket", &["a.jpg", "b.jpg"]), &creator).await.unwrap();

        let patch = UpdateProductInput { images: Some(vec!["c.jpg".into()]), stock: Some(9), ..Default::default() };
        let updated = svc.update(p.id, patch, &admin).await.unwrap();
        assert_eq!(updated.images, vec!["c.jpg"]);
        assert_eq!(updated.stock, 9);
        assert_eq!(updated.user.unwrap().id, admin.id);

        // no images key keeps the current set
        let patch = UpdateProductInput { price: Some(12.5), ..Default::default() };
        let updated = svc.update(p.id, patch, &admin).await.unwrap();
        assert_eq!(updated.images, vec!["c.jpg"]);
    }

    #[tokio::test]
    async fn update_conflict_keeps_previous_state() {
        let svc = svc();
        let owner = user(&["admin"]);
        svc.create(input("First", &[]), &owner).await.unwrap();
        let second = svc.create(input("Second", &["keep.jpg"]), &owner).await.unwrap();

        let patch = UpdateProductInput { title: Some("First".into()), images: Some(vec![]), ..Default::default() };
        assert!(matches!(svc.update(second.id, patch, &owner).await, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.find_one(&second.id.to_string()).await.unwrap().images, vec!["keep.jpg"]);
    }

    #[tokio::test]
    async fn update_and_remove_unknown_product_are_not_found() {
        let svc = svc();
        let id = Uuid::new_v4();
        let err = svc.update(id, UpdateProductInput::default(), &user(&["admin"])).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(svc.remove(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn remove_and_delete_all() {
        let svc = svc();
        let owner = user(&["admin"]);
        let p = svc.create(input("Gone", &[]), &owner).await.unwrap();
        svc.create(input("Stays", &[]), &owner).await.unwrap();
        assert_eq!(svc.remove(p.id).await.unwrap(), format!("Product with id {} removed", p.id));
        assert_eq!(svc.delete_all_products().await.unwrap(), 1);
    }
}
