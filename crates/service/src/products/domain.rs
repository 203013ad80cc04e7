use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::auth::domain::AuthUser;

/// Create input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "title must be longer than or equal to 1 characters"))]
    pub title: String,
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
    pub sizes: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// Partial update input; `images`, when present, replaces the whole image set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, message = "title must be longer than or equal to 1 characters"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub slug: Option<String>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
    pub images: Option<Vec<String>>,
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    models::product::validate_gender(gender).map_err(|_| {
        let mut err = ValidationError::new("gender");
        err.message = Some(format!("gender must be one of the following values: {}", models::product::GENDERS.join(", ")).into());
        err
    })
}

/// Insert payload handed to the repository
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub owner: AuthUser,
}

impl NewProduct {
    pub fn from_input(input: CreateProductInput, owner: &AuthUser) -> Self {
        Self {
            title: input.title,
            price: input.price.unwrap_or(0.0),
            description: input.description,
            slug: input.slug,
            stock: input.stock.unwrap_or(0),
            sizes: input.sizes,
            gender: input.gender,
            tags: input.tags.unwrap_or_default(),
            images: input.images.unwrap_or_default(),
            owner: owner.clone(),
        }
    }
}

/// Column changes for an update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateProductInput {
    /// Split into column changes and the optional replacement image list.
    pub fn into_parts(self) -> (ProductChanges, Option<Vec<String>>) {
        let changes = ProductChanges {
            title: self.title,
            price: self.price,
            description: self.description,
            slug: self.slug,
            stock: self.stock,
            sizes: self.sizes,
            gender: self.gender,
            tags: self.tags,
        };
        (changes, self.images)
    }
}

/// Product as returned by the API: images flattened to URLs, owner embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub user: Option<AuthUser>,
}

impl ProductView {
    pub fn from_parts(product: models::product::Model, images: Vec<String>, user: Option<AuthUser>) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            description: product.description,
            slug: product.slug,
            stock: product.stock,
            sizes: product.sizes,
            gender: product.gender,
            tags: product.tags,
            images,
            user,
        }
    }
}
