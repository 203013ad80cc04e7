use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewProduct, ProductChanges, ProductView};
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;

/// Repository abstraction for products and their images.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert the product and its images together.
    async fn insert(&self, new_product: NewProduct) -> Result<ProductView, ServiceError>;
    /// Page of products ordered by title.
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProductView>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, ServiceError>;
    /// Case-insensitive title match or exact (lower-cased) slug match.
    async fn find_by_title_or_slug(&self, term: &str) -> Result<Option<ProductView>, ServiceError>;
    /// Apply changes and, when `images` is `Some`, replace the image set; all or nothing.
    /// `Ok(None)` when the product does not exist.
    async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
        images: Option<Vec<String>>,
        editor: &AuthUser,
    ) -> Result<Option<ProductView>, ServiceError>;
    /// `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use models::product::normalize_slug;

    #[derive(Default)]
    pub struct MockProductRepository {
        products: Mutex<Vec<ProductView>>,
    }

    impl MockProductRepository {
        fn check_unique(products: &[ProductView], candidate: &ProductView) -> Result<(), ServiceError> {
            for p in products.iter().filter(|p| p.id != candidate.id) {
                if p.title == candidate.title {
                    return Err(ServiceError::Conflict(format!("Key (title)=({}) already exists.", candidate.title)));
                }
                if p.slug == candidate.slug {
                    return Err(ServiceError::Conflict(format!("Key (slug)=({}) already exists.", candidate.slug)));
                }
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn insert(&self, new_product: NewProduct) -> Result<ProductView, ServiceError> {
            let slug_source = new_product
                .slug
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| new_product.title.clone());
            let view = ProductView {
                id: Uuid::new_v4(),
                title: new_product.title,
                price: new_product.price,
                description: new_product.description,
                slug: normalize_slug(&slug_source),
                stock: new_product.stock,
                sizes: new_product.sizes,
                gender: new_product.gender,
                tags: new_product.tags,
                images: new_product.images,
                user: Some(new_product.owner),
            };
            let mut products = self.products.lock().unwrap();
            Self::check_unique(&products, &view)?;
            products.push(view.clone());
            Ok(view)
        }

        async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProductView>, ServiceError> {
            let mut all = self.products.lock().unwrap().clone();
            all.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(all.into_iter().skip(offset as usize).take(limit as usize).collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, ServiceError> {
            Ok(self.products.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn find_by_title_or_slug(&self, term: &str) -> Result<Option<ProductView>, ServiceError> {
            let upper = term.to_uppercase();
            let lower = term.to_lowercase();
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.title.to_uppercase() == upper || p.slug == lower)
                .cloned())
        }

        async fn update(
            &self,
            id: Uuid,
            changes: ProductChanges,
            images: Option<Vec<String>>,
            editor: &AuthUser,
        ) -> Result<Option<ProductView>, ServiceError> {
            let mut products = self.products.lock().unwrap();
            let Some(idx) = products.iter().position(|p| p.id == id) else { return Ok(None) };

            // build the candidate first so a conflict leaves the stored row untouched
            let mut next = products[idx].clone();
            if let Some(v) = changes.title { next.title = v; }
            if let Some(v) = changes.price { next.price = v; }
            if let Some(v) = changes.description { next.description = Some(v); }
            if let Some(v) = changes.stock { next.stock = v; }
            if let Some(v) = changes.sizes { next.sizes = v; }
            if let Some(v) = changes.gender { next.gender = v; }
            if let Some(v) = changes.tags { next.tags = v; }
            next.slug = normalize_slug(&changes.slug.unwrap_or(next.slug));
            if let Some(v) = images { next.images = v; }
            next.user = Some(editor.clone());

            Self::check_unique(&products, &next)?;
            products[idx] = next.clone();
            Ok(Some(next))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut products = self.products.lock().unwrap();
            let before = products.len();
            products.retain(|p| p.id != id);
            Ok(products.len() != before)
        }

        async fn delete_all(&self) -> Result<u64, ServiceError> {
            let mut products = self.products.lock().unwrap();
            let n = products.len() as u64;
            products.clear();
            Ok(n)
        }
    }
}
