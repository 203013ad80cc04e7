use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use super::setup_test_db;
use crate::{product, user};

fn new_product(title: &str, slug: Option<&str>) -> product::ActiveModel {
    let now = Utc::now().into();
    product::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        price: Set(10.0),
        description: Set(None),
        slug: slug.map(|s| Set(s.to_string())).unwrap_or_default(),
        stock: Set(1),
        sizes: Set(vec!["M".into()]),
        gender: Set("men".into()),
        tags: Set(vec![]),
        user_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn insert_derives_slug_from_title() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let suffix = Uuid::new_v4().simple().to_string();
    let title = format!("Men's Hook Tee {suffix}");

    let created = new_product(&title, None).insert(&db).await?;
    assert_eq!(created.slug, format!("mens_hook_tee_{suffix}"));

    product::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn update_normalizes_explicit_slug() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let suffix = Uuid::new_v4().simple().to_string();
    let created = new_product(&format!("Hook Update {suffix}"), Some(&format!("given_{suffix}"))).insert(&db).await?;

    let mut am: product::ActiveModel = created.clone().into();
    am.slug = Set(format!("Kid's New Slug {suffix}"));
    let updated = am.update(&db).await?;
    assert_eq!(updated.slug, format!("kids_new_slug_{suffix}"));
    assert!(updated.updated_at >= created.updated_at);

    product::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn user_email_is_stored_lowercase() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let now = Utc::now().into();
    let email = format!("Hook_{}@Example.COM", Uuid::new_v4().simple());
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.clone()),
        password_hash: Set("x".into()),
        full_name: Set("Hook".into()),
        is_active: Set(true),
        roles: Set(vec!["user".into()]),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;
    assert_eq!(created.email, email.to_lowercase());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
