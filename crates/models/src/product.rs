use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, product_image, user};

/// Accepted values for `gender`.
pub const GENDERS: [&str; 4] = ["men", "women", "kid", "unisex"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Images,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
            Relation::Images => Entity::has_many(product_image::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Slug hook: on insert a blank slug is derived from the title; on every
    /// save the slug is normalized with [`normalize_slug`].
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let current = active_str(&self.slug).filter(|s| !s.trim().is_empty()).cloned();
        let source = match current {
            Some(slug) => Some(slug),
            None if insert => active_str(&self.title).cloned(),
            None => None,
        };
        if let Some(source) = source {
            let slug = normalize_slug(&source);
            if active_str(&self.slug) != Some(&slug) {
                self.slug = Set(slug);
            }
        }
        if !insert {
            self.updated_at = Set(Utc::now().into());
        }
        Ok(self)
    }
}

fn active_str(value: &ActiveValue<String>) -> Option<&String> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}

/// Lower-case, spaces to `_`, apostrophes dropped.
///
/// ```
/// assert_eq!(models::product::normalize_slug("Men's Chill Crew Neck"), "mens_chill_crew_neck");
/// ```
pub fn normalize_slug(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_").replace('\'', "")
}

pub fn validate_gender(gender: &str) -> Result<(), errors::ModelError> {
    if GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(errors::ModelError::Validation(format!("gender must be one of: {}", GENDERS.join(", "))))
    }
}
