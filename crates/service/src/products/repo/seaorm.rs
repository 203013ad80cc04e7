use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, LoaderTrait, ModelTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::products::domain::{NewProduct, ProductChanges, ProductView};
use crate::products::repository::ProductRepository;
use models::{product, product_image, user};

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach image URLs and owners to a batch of product rows.
    async fn hydrate<C: ConnectionTrait>(db: &C, products: Vec<product::Model>) -> Result<Vec<ProductView>, DbErr> {
        let images = products.load_many(product_image::Entity, db).await?;

        // user_id is nullable, so owners are fetched by id set
        let owner_ids: Vec<Uuid> = products.iter().filter_map(|p| p.user_id).collect();
        let owners: HashMap<Uuid, AuthUser> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(owner_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|u| (u.id, AuthUser::from(u)))
                .collect()
        };

        Ok(products
            .into_iter()
            .zip(images)
            .map(|(p, mut imgs)| {
                imgs.sort_by_key(|i| i.id);
                let urls = imgs.into_iter().map(|i| i.url).collect();
                let owner = p.user_id.and_then(|id| owners.get(&id).cloned());
                ProductView::from_parts(p, urls, owner)
            })
            .collect())
    }

    async fn insert_images<C: ConnectionTrait>(db: &C, product_id: Uuid, urls: &[String]) -> Result<(), DbErr> {
        if urls.is_empty() {
            return Ok(());
        }
        let rows = urls.iter().map(|url| product_image::ActiveModel {
            id: NotSet,
            url: Set(url.clone()),
            product_id: Set(product_id),
        });
        product_image::Entity::insert_many(rows).exec(db).await?;
        Ok(())
    }

    async fn insert_tx(txn: &DatabaseTransaction, new_product: NewProduct) -> Result<ProductView, DbErr> {
        let now = Utc::now().into();
        let am = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_product.title),
            price: Set(new_product.price),
            description: Set(new_product.description),
            // blank slug is filled from the title by the entity hook
            slug: Set(new_product.slug.unwrap_or_default()),
            stock: Set(new_product.stock),
            sizes: Set(new_product.sizes),
            gender: Set(new_product.gender),
            tags: Set(new_product.tags),
            user_id: Set(Some(new_product.owner.id)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(txn).await?;
        Self::insert_images(txn, created.id, &new_product.images).await?;
        Ok(ProductView::from_parts(created, new_product.images, Some(new_product.owner)))
    }

    async fn update_tx(
        txn: &DatabaseTransaction,
        id: Uuid,
        changes: ProductChanges,
        images: Option<Vec<String>>,
        editor: &AuthUser,
    ) -> Result<Option<ProductView>, DbErr> {
        let Some(existing) = product::Entity::find_by_id(id).one(txn).await? else {
            return Ok(None);
        };

        let mut am: product::ActiveModel = existing.into();
        if let Some(v) = changes.title { am.title = Set(v); }
        if let Some(v) = changes.price { am.price = Set(v); }
        if let Some(v) = changes.description { am.description = Set(Some(v)); }
        if let Some(v) = changes.slug { am.slug = Set(v); }
        if let Some(v) = changes.stock { am.stock = Set(v); }
        if let Some(v) = changes.sizes { am.sizes = Set(v); }
        if let Some(v) = changes.gender { am.gender = Set(v); }
        if let Some(v) = changes.tags { am.tags = Set(v); }
        am.user_id = Set(Some(editor.id));
        let updated = am.update(txn).await?;

        if let Some(urls) = images.as_deref() {
            let removed = product_image::Entity::delete_many()
                .filter(product_image::Column::ProductId.eq(id))
                .exec(txn)
                .await?;
            Self::insert_images(txn, id, urls).await?;
            info!(product_id = %id, removed = removed.rows_affected, added = urls.len(), "product_images_replaced");
        }

        let urls = updated
            .find_related(product_image::Entity)
            .order_by_asc(product_image::Column::Id)
            .all(txn)
            .await?
            .into_iter()
            .map(|i| i.url)
            .collect();
        Ok(Some(ProductView::from_parts(updated, urls, Some(editor.clone()))))
    }

    /// Commit on success, roll back on failure and return the first error.
    async fn finish<T>(txn: DatabaseTransaction, result: Result<T, DbErr>) -> Result<T, ServiceError> {
        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rb) = txn.rollback().await {
                    error!(err = %rb, "rollback failed");
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn insert(&self, new_product: NewProduct) -> Result<ProductView, ServiceError> {
        let txn = self.db.begin().await?;
        let result = Self::insert_tx(&txn, new_product).await;
        Self::finish(txn, result).await
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProductView>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Title)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(Self::hydrate(&self.db, rows).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, ServiceError> {
        let row = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(Self::hydrate(&self.db, row.into_iter().collect()).await?.pop())
    }

    async fn find_by_title_or_slug(&self, term: &str) -> Result<Option<ProductView>, ServiceError> {
        let cond = Condition::any()
            .add(Expr::expr(Func::upper(Expr::col((product::Entity, product::Column::Title)))).eq(term.to_uppercase()))
            .add(product::Column::Slug.eq(term.to_lowercase()));
        let row = product::Entity::find().filter(cond).one(&self.db).await?;
        Ok(Self::hydrate(&self.db, row.into_iter().collect()).await?.pop())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
        images: Option<Vec<String>>,
        editor: &AuthUser,
    ) -> Result<Option<ProductView>, ServiceError> {
        let txn = self.db.begin().await?;
        let result = Self::update_tx(&txn, id, changes, images, editor).await;
        Self::finish(txn, result).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let res = product::Entity::delete_many().exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::NewUser;
    use crate::auth::repo::seaorm::SeaOrmAuthRepository;
    use crate::auth::repository::AuthRepository;
    use crate::test_support::get_db;

    async fn owner(db: &DatabaseConnection) -> AuthUser {
        let repo = SeaOrmAuthRepository { db: db.clone() };
        repo.create_user(NewUser {
            email: format!("owner-{}@test.dev", Uuid::new_v4()),
            password_hash: "x".into(),
            full_name: "Owner".into(),
            roles: vec!["admin".into()],
        })
        .await
        .unwrap()
    }

    fn new_product(title: &str, images: &[&str], owner: &AuthUser) -> NewProduct {
        NewProduct {
            title: title.into(),
            price: 10.0,
            description: None,
            slug: None,
            stock: 1,
            sizes: vec!["M".into()],
            gender: "unisex".into(),
            tags: vec![],
            images: images.iter().map(|s| s.to_string()).collect(),
            owner: owner.clone(),
        }
    }

    #[tokio::test]
    async fn update_replaces_image_set_and_finds_by_slug() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmProductRepository::new(db.clone());
        let owner = owner(&db).await;
        let title = format!("Repo Tee {}", Uuid::new_v4());

        let created = repo.insert(new_product(&title, &["a.jpg", "b.jpg"], &owner)).await.unwrap();
        assert_eq!(created.images, vec!["a.jpg", "b.jpg"]);

        let updated = repo
            .update(created.id, ProductChanges::default(), Some(vec!["c.jpg".into()]), &owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.images, vec!["c.jpg"]);

        let found = repo.find_by_title_or_slug(&created.slug.to_uppercase()).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.images, vec!["c.jpg"]);
        assert_eq!(found.user.map(|u| u.id), Some(owner.id));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_title_rolls_back_insert() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmProductRepository::new(db.clone());
        let owner = owner(&db).await;
        let title = format!("Dup Tee {}", Uuid::new_v4());

        repo.insert(new_product(&title, &[], &owner)).await.unwrap();
        let err = repo.insert(new_product(&title, &["x.jpg"], &owner)).await.unwrap_err();
        match err {
            ServiceError::Conflict(detail) => {
                assert!(detail.starts_with("Key (title)=("), "{detail}");
                assert!(detail.ends_with("already exists."), "{detail}");
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let orphans = product_image::Entity::find()
            .filter(product_image::Column::Url.eq("x.jpg"))
            .all(&db)
            .await
            .unwrap();
        assert!(orphans.is_empty());
    }
}
